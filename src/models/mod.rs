pub mod media_item;
pub mod media_page;

pub use media_item::*;
pub use media_page::*;
