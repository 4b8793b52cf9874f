//! Host page root and its change notifications.
//!
//! The page root carries a class list; the `dark` class is the page-level
//! dark-mode marker. Any write to an attribute notifies the observers that
//! filtered on it, in registration order, after the write has been applied.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

pub const CLASS_ATTRIBUTE: &str = "class";
pub const DARK_CLASS: &str = "dark";

type Callback = Rc<dyn Fn(&HostPage)>;

struct Observer {
    id: u64,
    attribute: String,
    callback: Callback,
}

#[derive(Default)]
struct PageRoot {
    classes: BTreeSet<String>,
    observers: Vec<Observer>,
    next_observer_id: u64,
}

/// Shared handle to the page root. Clones refer to the same page.
#[derive(Clone, Default)]
pub struct HostPage {
    root: Rc<RefCell<PageRoot>>,
}

impl HostPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.root.borrow().classes.contains(name)
    }

    pub fn classes(&self) -> Vec<String> {
        self.root.borrow().classes.iter().cloned().collect()
    }

    /// Adds or removes `name` from the class list. Observers of the class
    /// attribute fire on every call, even when the list is unchanged.
    pub fn set_class(&self, name: &str, present: bool) {
        {
            let mut root = self.root.borrow_mut();
            if present {
                root.classes.insert(name.to_string());
            } else {
                root.classes.remove(name);
            }
        }
        self.notify(CLASS_ATTRIBUTE);
    }

    pub fn is_dark(&self) -> bool {
        self.has_class(DARK_CLASS)
    }

    pub fn set_dark(&self, dark: bool) {
        self.set_class(DARK_CLASS, dark);
    }

    /// Registers `callback` for writes to `attribute`. The observer lives as
    /// long as the returned [`Subscription`].
    pub fn observe<F>(&self, attribute: &str, callback: F) -> Subscription
    where
        F: Fn(&HostPage) + 'static,
    {
        let mut root = self.root.borrow_mut();
        let id = root.next_observer_id;
        root.next_observer_id += 1;
        root.observers.push(Observer {
            id,
            attribute: attribute.to_string(),
            callback: Rc::new(callback),
        });
        trace!(id, attribute, "observer registered");
        Subscription {
            root: Rc::downgrade(&self.root),
            id,
        }
    }

    pub fn observer_count(&self) -> usize {
        self.root.borrow().observers.len()
    }

    fn notify(&self, attribute: &str) {
        // Callbacks may read the page or drop subscriptions, so no borrow is
        // held while they run.
        let callbacks: Vec<Callback> = self
            .root
            .borrow()
            .observers
            .iter()
            .filter(|observer| observer.attribute == attribute)
            .map(|observer| Rc::clone(&observer.callback))
            .collect();
        for callback in callbacks {
            callback(self);
        }
    }
}

impl fmt::Debug for HostPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.root.borrow();
        f.debug_struct("HostPage")
            .field("classes", &root.classes)
            .field("observers", &root.observers.len())
            .finish()
    }
}

/// Handle for a registered observer. Dropping it disconnects the observer.
#[must_use = "dropping a Subscription disconnects its observer immediately"]
pub struct Subscription {
    root: Weak<RefCell<PageRoot>>,
    id: u64,
}

impl Subscription {
    pub fn disconnect(self) {}

    pub fn is_connected(&self) -> bool {
        let Some(root) = self.root.upgrade() else {
            return false;
        };
        let connected = root.borrow().observers.iter().any(|o| o.id == self.id);
        connected
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(root) = self.root.upgrade() {
            root.borrow_mut().observers.retain(|observer| observer.id != self.id);
            trace!(id = self.id, "observer released");
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
