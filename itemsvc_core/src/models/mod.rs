pub mod items;
pub mod request;

pub use items::{utc_now, Item, ItemRequest};
pub use request::ApiResponse;
