use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlaygroundError;

/// Editor font size in points, always in `MIN..=MAX` and on the `STEP` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FontSize(u32);

impl FontSize {
    pub const MIN: u32 = 10;
    pub const MAX: u32 = 30;
    pub const STEP: u32 = 2;
    pub const DEFAULT: u32 = 14;

    pub fn new(points: u32) -> Result<Self, PlaygroundError> {
        if !(Self::MIN..=Self::MAX).contains(&points) || (points - Self::MIN) % Self::STEP != 0 {
            return Err(PlaygroundError::InvalidFontSize(points));
        }
        Ok(Self(points))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// One step larger; stays put at `MAX`.
    pub fn increase(self) -> Self {
        if self.0 < Self::MAX {
            Self(self.0 + Self::STEP)
        } else {
            self
        }
    }

    /// One step smaller; stays put at `MIN`.
    pub fn decrease(self) -> Self {
        if self.0 > Self::MIN {
            Self(self.0 - Self::STEP)
        } else {
            self
        }
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<u32> for FontSize {
    type Error = PlaygroundError;

    fn try_from(points: u32) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<FontSize> for u32 {
    fn from(size: FontSize) -> Self {
        size.0
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}
