pub mod item_manager;

pub use item_manager::{ItemManager, ItemResult};
