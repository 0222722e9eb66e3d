//! Originating-surface handle

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Handle for the UI surface (form sheet, confirm dialog) that initiated
/// a mutation.
///
/// Dismissing the surface lets an in-flight request run to completion
/// but suppresses its terminal effects: no notification is emitted and
/// no close signal is sent for a surface that no longer exists.
#[derive(Debug, Clone)]
pub struct MutationSurface {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    cancel: CancellationToken,
    close: watch::Sender<bool>,
}

impl MutationSurface {
    pub fn new() -> Self {
        let (close, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                cancel: CancellationToken::new(),
                close,
            }),
        }
    }

    /// The surface was torn down before its mutation settled.
    pub fn dismiss(&self) {
        self.inner.cancel.cancel();
    }

    pub fn is_dismissed(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    /// Receiver flipping to `true` when a successful mutation asks the
    /// surface to close (e.g. a form sheet after save).
    pub fn close_signal(&self) -> watch::Receiver<bool> {
        self.inner.close.subscribe()
    }

    pub(crate) fn request_close(&self) {
        self.inner.close.send_replace(true);
    }
}

impl Default for MutationSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_is_observable() {
        let surface = MutationSurface::new();
        assert!(!surface.is_dismissed());

        surface.dismiss();
        assert!(surface.is_dismissed());
    }

    #[test]
    fn test_close_signal() {
        let surface = MutationSurface::new();
        let rx = surface.close_signal();
        assert!(!*rx.borrow());

        surface.request_close();
        assert!(*rx.borrow());
    }

    #[test]
    fn test_clones_share_state() {
        let surface = MutationSurface::new();
        let other = surface.clone();

        other.dismiss();
        assert!(surface.is_dismissed());
    }
}
