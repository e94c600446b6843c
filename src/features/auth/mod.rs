pub mod dto;
pub mod model;
pub mod password;
pub mod repositories;
pub mod services;

pub use repositories::{PgUserStore, UserStore};
pub use services::AuthService;
