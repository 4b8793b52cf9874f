//! Props and events at the editor widget boundary.

use serde::Serialize;

pub const EDITOR_FONT_FAMILY: &str = "Fira Code, monospace";
pub const EDITOR_HEIGHT: &str = "50vh";
pub const SCROLLBAR_SIZE: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorProps {
    pub height: String,
    pub language: String,
    pub value: String,
    pub theme: String,
    pub font_size: u32,
    pub options: DisplayOptions,
}

impl EditorProps {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    pub minimap: MinimapOptions,
    pub font_family: String,
    pub automatic_layout: bool,
    pub scrollbar: ScrollbarOptions,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            minimap: MinimapOptions { enabled: false },
            font_family: EDITOR_FONT_FAMILY.to_string(),
            automatic_layout: true,
            scrollbar: ScrollbarOptions {
                vertical_scrollbar_size: SCROLLBAR_SIZE,
                horizontal_scrollbar_size: SCROLLBAR_SIZE,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinimapOptions {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollbarOptions {
    pub vertical_scrollbar_size: u32,
    pub horizontal_scrollbar_size: u32,
}

/// Events emitted by the widget. Content changes carry the full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    ContentChanged(String),
}
