//! Session access for flash messages.
//!
//! Session storage belongs to the host application. This module only defines what
//! responders need from a session: a queue of messages that survives until the next
//! rendered page.

use std::fmt;
use std::sync::{Arc, Mutex};

pub trait Session: Send + Sync {
    /// Queue a message for the next rendered page.
    fn push_message(&self, message: String);

    /// Remove and return all queued messages, or `None` if nothing is queued.
    fn take_messages(&self) -> Option<Vec<String>>;
}

/// Cloneable handle stored in request extensions.
#[derive(Clone)]
pub struct SessionHandle(Arc<dyn Session>);

impl SessionHandle {
    pub fn new(session: impl Session + 'static) -> Self {
        Self(Arc::new(session))
    }

    pub fn from_arc(session: Arc<dyn Session>) -> Self {
        Self(session)
    }

    pub fn push_message(&self, message: impl Into<String>) {
        self.0.push_message(message.into());
    }

    pub fn take_messages(&self) -> Option<Vec<String>> {
        self.0.take_messages()
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionHandle")
    }
}

/// Process-local session. Used when the host attaches no session to a request.
#[derive(Debug, Default)]
pub struct MemorySession {
    messages: Mutex<Option<Vec<String>>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Session for MemorySession {
    fn push_message(&self, message: String) {
        let mut messages = self.messages.lock().expect("session mutex poisoned");
        messages.get_or_insert_with(Vec::new).push(message);
    }

    fn take_messages(&self) -> Option<Vec<String>> {
        self.messages.lock().expect("session mutex poisoned").take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears_queue() {
        let session = SessionHandle::new(MemorySession::new());
        assert!(session.take_messages().is_none());

        session.push_message("one");
        session.push_message("two");
        assert_eq!(
            session.take_messages(),
            Some(vec!["one".to_string(), "two".to_string()])
        );
        assert!(session.take_messages().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionHandle::new(MemorySession::new());
        let other = session.clone();
        other.push_message("shared");
        assert_eq!(session.take_messages(), Some(vec!["shared".to_string()]));
    }
}
