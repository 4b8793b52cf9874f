use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaygroundError {
    #[error("unknown language: {0} (expected one of javascript, python, cpp)")]
    UnknownLanguage(String),
    #[error("font size {0} must be an even value between 10 and 30")]
    InvalidFontSize(u32),
    #[error("a run is already in flight")]
    RunInFlight,
}

pub type Result<T> = std::result::Result<T, PlaygroundError>;
