// Editor event bus types
// Inbound events the popup reacts to, and outbound messages it emits.

use serde::Serialize;

/// Alt text used when the selected item carries no description.
pub const DEFAULT_ALT_TEXT: &str = "image";

/// Events delivered to the popup by the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// The editor body took focus.
    Focus,
    /// Some popup asked every popup to close.
    CloseAllPopup,
    /// Toolbar request to open the media popup.
    OpenPopupAddFromMedia,
}

/// Commands the editor executes on the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command")]
pub enum EditorCommand {
    #[serde(rename_all = "camelCase")]
    AddImage { image_url: String, alt_text: String },
}

impl EditorCommand {
    /// Builds an `AddImage` command, filling in the default alt text when
    /// `alt_text` is empty.
    pub fn add_image(image_url: impl Into<String>, alt_text: &str) -> Self {
        let alt_text = if alt_text.is_empty() {
            DEFAULT_ALT_TEXT
        } else {
            alt_text
        };
        Self::AddImage {
            image_url: image_url.into(),
            alt_text: alt_text.to_string(),
        }
    }
}

/// Messages the popup emits on the editor bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMessage {
    Command(EditorCommand),
    CloseAllPopup,
}
