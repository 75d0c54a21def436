//! Symbol rendering definitions for the PDF exporter.

use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_FAMILY: &str = "Helvetica-Bold";
pub const DEFAULT_FONT_WEIGHT: u16 = 700;

/// How a single symbol identifier is drawn on a card.
///
/// `id` is what cards refer to. For text symbols it equals the text; for
/// images it is the original source reference, kept even after `src` has been
/// replaced by an embedded data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SymbolDefinition {
    Text {
        id: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_family: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_weight: Option<u16>,
    },
    Image {
        id: String,
        src: String,
    },
}

impl SymbolDefinition {
    /// A text symbol in the default bold face; `id` is the text itself.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        SymbolDefinition::Text {
            id: text.clone(),
            text,
            font_family: Some(DEFAULT_FONT_FAMILY.to_string()),
            font_weight: Some(DEFAULT_FONT_WEIGHT),
        }
    }

    /// An image symbol whose id is its source reference.
    pub fn image(src: impl Into<String>) -> Self {
        let src = src.into();
        SymbolDefinition::Image {
            id: src.clone(),
            src,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            SymbolDefinition::Text { id, .. } | SymbolDefinition::Image { id, .. } => id,
        }
    }
}
