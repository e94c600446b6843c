pub mod auth;
pub mod pages;
pub mod reports;
pub mod weather;
