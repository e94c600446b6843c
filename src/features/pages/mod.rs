pub mod handlers;
pub mod routes;

pub use handlers::PageState;
pub use routes::routes;
