use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::editor::{DisplayOptions, EditorEvent, EditorProps, EDITOR_HEIGHT};
use crate::error::{PlaygroundError, Result};
use crate::font::FontSize;
use crate::language::Language;
use crate::page::HostPage;
use crate::run::{Executor, RunId, RunOutcome, RunRequest, RunTicket};
use crate::theme::{EditorTheme, ThemeSync};

// Shared by every session so a ticket only ever matches the session that issued it.
static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
}

/// Live editing state for one page visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    language: Language,
    source_text: String,
    font_size: FontSize,
    dark_mode: bool,
    last_output: Option<String>,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            language: config.language,
            source_text: config.language.starter_source().to_string(),
            font_size: config.font_size,
            dark_mode: config.dark_mode,
            last_output: None,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// `None` until the first run completes.
    pub fn last_output(&self) -> Option<&str> {
        self.last_output.as_deref()
    }
}

/// Synchronous user intents. `run` is separate because it suspends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectLanguage(Language),
    SetSourceText(String),
    IncreaseFontSize,
    DecreaseFontSize,
    ToggleDarkMode,
}

/// Owner of the session state and the run lifecycle.
///
/// The session writes the dark-mode marker on the host page; its
/// [`ThemeSync`] reads it back from there. Dropping the session releases the
/// theme observer.
pub struct EditorSession {
    session: Session,
    state: SessionState,
    page: HostPage,
    theme_sync: ThemeSync,
    executor: Arc<dyn Executor>,
    in_flight: Option<RunId>,
}

impl EditorSession {
    pub fn new(page: HostPage, executor: Arc<dyn Executor>, config: SessionConfig) -> Self {
        let theme_sync = ThemeSync::attach(&page);
        let session = Session::new(&config);
        page.set_dark(session.dark_mode);
        debug!(
            language = %session.language,
            font_size = session.font_size.get(),
            dark_mode = session.dark_mode,
            "editor session started"
        );
        Self {
            session,
            state: SessionState::Idle,
            page,
            theme_sync,
            executor,
            in_flight: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn page(&self) -> &HostPage {
        &self.page
    }

    pub fn theme(&self) -> EditorTheme {
        self.theme_sync.theme()
    }

    pub fn executor(&self) -> Arc<dyn Executor> {
        Arc::clone(&self.executor)
    }

    /// Switches language and replaces the buffer with its starter text.
    /// Unsaved edits are discarded.
    pub fn select_language(&mut self, language: Language) {
        self.session.language = language;
        self.session.source_text = language.starter_source().to_string();
        debug!(%language, "language selected");
    }

    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.session.source_text = text.into();
    }

    pub fn handle_editor_event(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::ContentChanged(text) => self.set_source_text(text),
        }
    }

    pub fn increase_font_size(&mut self) {
        self.session.font_size = self.session.font_size.increase();
        debug!(font_size = self.session.font_size.get(), "font size changed");
    }

    pub fn decrease_font_size(&mut self) {
        self.session.font_size = self.session.font_size.decrease();
        debug!(font_size = self.session.font_size.get(), "font size changed");
    }

    pub fn toggle_dark_mode(&mut self) {
        self.session.dark_mode = !self.session.dark_mode;
        self.page.set_dark(self.session.dark_mode);
        debug!(dark_mode = self.session.dark_mode, "dark mode toggled");
    }

    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::SelectLanguage(language) => self.select_language(language),
            Intent::SetSourceText(text) => self.set_source_text(text),
            Intent::IncreaseFontSize => self.increase_font_size(),
            Intent::DecreaseFontSize => self.decrease_font_size(),
            Intent::ToggleDarkMode => self.toggle_dark_mode(),
        }
    }

    pub fn editor_props(&self) -> EditorProps {
        EditorProps {
            height: EDITOR_HEIGHT.to_string(),
            language: self.session.language.highlight_mode().to_string(),
            value: self.session.source_text.clone(),
            theme: self.theme().widget_name().to_string(),
            font_size: self.session.font_size.get(),
            options: DisplayOptions::default(),
        }
    }

    /// Packages the current buffer and enters `Running`. Fails with
    /// [`PlaygroundError::RunInFlight`] while another run is pending.
    pub fn begin_run(&mut self) -> Result<RunTicket> {
        if let Some(id) = self.in_flight {
            warn!(run_id = id.0, "run requested while another is in flight");
            return Err(PlaygroundError::RunInFlight);
        }
        let id = RunId(NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed));
        let request = RunRequest {
            language: self.session.language,
            source_text: self.session.source_text.clone(),
        };
        self.in_flight = Some(id);
        self.state = SessionState::Running;
        info!(
            run_id = id.0,
            language = %request.language,
            bytes = request.source_text.len(),
            "run started"
        );
        Ok(RunTicket::new(id, request))
    }

    /// Stores the outcome of the in-flight run and returns to `Idle`.
    pub fn complete_run(&mut self, ticket: RunTicket, outcome: RunOutcome) {
        if self.in_flight != Some(ticket.id()) {
            warn!(run_id = ticket.id().0, "ignoring outcome for a run that is not in flight");
            return;
        }
        info!(
            run_id = ticket.id().0,
            success = outcome.is_success(),
            "run finished"
        );
        self.session.last_output = Some(outcome.display_text());
        self.in_flight = None;
        self.state = SessionState::Idle;
    }

    /// Sends the current buffer to the executor and records the result.
    /// Run failures end up in `last_output`; the only error is a run
    /// already being in flight.
    pub async fn run(&mut self) -> Result<()> {
        let ticket = self.begin_run()?;
        let executor = self.executor();
        let outcome = executor.execute(ticket.request()).await;
        self.complete_run(ticket, outcome);
        Ok(())
    }
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("session", &self.session)
            .field("state", &self.state)
            .field("theme", &self.theme())
            .field("in_flight", &self.in_flight)
            .finish()
    }
}
