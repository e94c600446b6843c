mod page_handler;

pub use page_handler::{admin, anonymous, home, user, PageState};
