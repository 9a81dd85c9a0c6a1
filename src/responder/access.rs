//! Error continuation and authorization-level gating.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::Error;
use crate::http::request::IncomingRequest;

/// Continuation that hands an error to the surrounding framework's error path.
#[derive(Clone)]
pub struct Next(Arc<dyn Fn(Error) + Send + Sync>);

impl Next {
    pub fn new(f: impl Fn(Error) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// A continuation that parks the error until the handler finishes.
    pub fn deferred() -> (Self, DeferredError) {
        let slot = DeferredError::default();
        let sink = slot.clone();
        let next = Self::new(move |err| {
            let mut pending = sink.0.lock().expect("deferred error mutex poisoned");
            // Keep the first error; later ones are follow-ups of it.
            if pending.is_none() {
                *pending = Some(err);
            }
        });
        (next, slot)
    }

    pub fn run(&self, err: Error) {
        (self.0)(err)
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Next")
    }
}

/// Error parked by a [`Next::deferred`] continuation.
#[derive(Clone, Default)]
pub struct DeferredError(Arc<Mutex<Option<Error>>>);

impl DeferredError {
    pub fn take(&self) -> Option<Error> {
        self.0.lock().expect("deferred error mutex poisoned").take()
    }

    pub fn is_set(&self) -> bool {
        self.0.lock().expect("deferred error mutex poisoned").is_some()
    }
}

/// True if the request's user may access a page requiring `level`.
/// Lower levels denote higher privilege.
pub fn has_access(req: &IncomingRequest, level: u32) -> bool {
    req.user.as_ref().is_some_and(|user| user.level <= level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::AuthUser;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_has_access() {
        let mut req = IncomingRequest::new("/");
        assert!(!has_access(&req, 100));

        req.user = Some(AuthUser::new("mod", 2));
        assert!(has_access(&req, 2));
        assert!(has_access(&req, 5));
        assert!(!has_access(&req, 1));
    }

    #[test]
    fn test_deferred_keeps_first_error() {
        let (next, slot) = Next::deferred();
        assert!(!slot.is_set());

        next.run(Error::forbidden("first"));
        next.run(Error::forbidden("second"));

        assert_eq!(slot.take().unwrap().to_string(), "first");
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_custom_next() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let next = Next::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        next.clone().run(Error::forbidden("x"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
