pub mod api;
pub mod auth;
pub mod balance;
pub mod config;
pub mod docs;
pub mod model;
pub mod models;
pub mod routes;
pub mod storage;
