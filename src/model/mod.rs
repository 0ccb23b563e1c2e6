pub mod employee;
pub mod role;
pub mod user;
pub mod vacation;
