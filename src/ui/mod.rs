pub mod events;
pub mod popup;
pub mod scroll;

pub use events::{EditorCommand, EditorEvent, EditorMessage};
pub use popup::MediaPopup;
pub use scroll::{ScrollMetrics, VirtualViewport};
