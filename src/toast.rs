use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays visible
pub const TOAST_TTL: Duration = Duration::from_secs(4);

const MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

/// A short-lived status message
#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Queue of visible toasts, newest last
#[derive(Debug, Default)]
pub struct Toasts {
    queue: VecDeque<Toast>,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        if self.queue.len() == MAX_TOASTS {
            self.queue.pop_front();
        }
        self.queue.push_back(Toast {
            kind,
            message,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    /// Drop toasts whose time is up
    pub fn expire(&mut self, now: Instant) {
        self.queue.retain(|toast| toast.expires_at > now);
    }

    /// Most recent visible toast
    pub fn latest(&self) -> Option<&Toast> {
        self.queue.back()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_is_newest() {
        let mut toasts = Toasts::default();
        toasts.success("saved");
        toasts.warning("careful");

        let latest = toasts.latest().unwrap();
        assert_eq!(latest.kind, ToastKind::Warning);
        assert_eq!(latest.message, "careful");
    }

    #[test]
    fn test_expire_drops_old_toasts() {
        let mut toasts = Toasts::default();
        toasts.error("boom");
        toasts.expire(Instant::now());
        assert_eq!(toasts.len(), 1);

        toasts.expire(Instant::now() + TOAST_TTL + Duration::from_millis(1));
        assert!(toasts.latest().is_none());
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut toasts = Toasts::default();
        for i in 0..10 {
            toasts.success(format!("toast {}", i));
        }
        assert_eq!(toasts.len(), MAX_TOASTS);
        assert_eq!(toasts.latest().unwrap().message, "toast 9");
    }
}
