use serde::{Deserialize, Serialize};

use crate::font::FontSize;
use crate::language::Language;

/// Initial session values. Deserializing validates the font size.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub language: Language,
    pub font_size: FontSize,
    pub dark_mode: bool,
}
