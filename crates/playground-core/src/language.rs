use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlaygroundError;

const JAVASCRIPT_STARTER: &str = r#"console.log("hello");"#;
const PYTHON_STARTER: &str = r#"print("hello")"#;
const CPP_STARTER: &str = r#"#include <iostream>

int main() {
    std::cout << "hello";
    return 0;
}"#;

/// Languages the execution service accepts. The set is closed: anything else
/// is rejected at the parsing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Python,
    #[default]
    Cpp,
}

impl Language {
    /// Selector order.
    pub const ALL: [Language; 3] = [Language::JavaScript, Language::Python, Language::Cpp];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Cpp => "cpp",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Cpp => "C/C++",
        }
    }

    pub fn starter_source(self) -> &'static str {
        match self {
            Language::JavaScript => JAVASCRIPT_STARTER,
            Language::Python => PYTHON_STARTER,
            Language::Cpp => CPP_STARTER,
        }
    }

    /// Syntax-highlighting mode handed to the editor widget.
    pub fn highlight_mode(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlaygroundError::UnknownLanguage(wanted.to_string()))
    }
}
