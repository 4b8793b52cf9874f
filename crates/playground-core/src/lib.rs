pub mod config;
pub mod editor;
pub mod error;
pub mod font;
pub mod language;
pub mod page;
pub mod run;
pub mod session;
pub mod theme;

pub use config::SessionConfig;
pub use error::{PlaygroundError, Result};
pub use font::FontSize;
pub use language::Language;
pub use page::{HostPage, Subscription};
pub use run::{Executor, RunOutcome, RunRequest, RunTicket};
pub use session::{EditorSession, Intent, Session, SessionState};
pub use theme::{EditorTheme, ThemeSync};
