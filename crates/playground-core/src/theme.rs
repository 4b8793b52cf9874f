use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use tracing::debug;

use crate::page::{HostPage, Subscription, CLASS_ATTRIBUTE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTheme {
    #[default]
    Light,
    Dark,
}

impl EditorTheme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            EditorTheme::Dark
        } else {
            EditorTheme::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EditorTheme::Light => "light",
            EditorTheme::Dark => "dark",
        }
    }

    /// Theme name understood by the editor widget.
    pub fn widget_name(self) -> &'static str {
        match self {
            EditorTheme::Light => "light",
            EditorTheme::Dark => "vs-dark",
        }
    }
}

impl fmt::Display for EditorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keeps the editor theme in step with the page's dark-mode marker.
///
/// The marker is read once on attach and again on every class mutation.
/// The observer is released when the `ThemeSync` is dropped.
pub struct ThemeSync {
    theme: Rc<Cell<EditorTheme>>,
    subscription: Subscription,
}

impl ThemeSync {
    pub fn attach(page: &HostPage) -> Self {
        Self::attach_with(page, HostPage::is_dark)
    }

    /// Like [`ThemeSync::attach`], with `predicate` deciding whether the page is dark.
    pub fn attach_with<P>(page: &HostPage, predicate: P) -> Self
    where
        P: Fn(&HostPage) -> bool + 'static,
    {
        let predicate: Rc<dyn Fn(&HostPage) -> bool> = Rc::new(predicate);
        let theme = Rc::new(Cell::new(EditorTheme::from_dark(predicate(page))));
        let derived = Rc::clone(&theme);
        let subscription = page.observe(CLASS_ATTRIBUTE, move |page| {
            let next = EditorTheme::from_dark(predicate(page));
            if derived.replace(next) != next {
                debug!(theme = next.as_str(), "editor theme changed");
            }
        });
        debug!(theme = theme.get().as_str(), "theme sync attached");
        Self {
            theme,
            subscription,
        }
    }

    pub fn theme(&self) -> EditorTheme {
        self.theme.get()
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_connected()
    }

    pub fn detach(self) {
        self.subscription.disconnect();
    }
}

impl fmt::Debug for ThemeSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeSync")
            .field("theme", &self.theme.get())
            .finish()
    }
}
