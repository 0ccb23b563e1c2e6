pub mod employee;
pub mod health;
pub mod user;
pub mod vacation;
