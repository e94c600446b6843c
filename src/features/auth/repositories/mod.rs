mod user_store;

pub use user_store::{PgUserStore, UserStore};
