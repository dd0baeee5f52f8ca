use std::time::{Duration, Instant};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient status message.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

impl Toast {
    pub fn is_error(&self) -> bool {
        self.kind == ToastKind::Error
    }
}

/// Holds at most one toast; showing a new one replaces the old.
#[derive(Debug, Clone)]
pub struct ToastSlot {
    current: Option<Toast>,
    ttl: Duration,
}

impl Default for ToastSlot {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

impl ToastSlot {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }

    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        match kind {
            ToastKind::Success => info!("{}", message),
            ToastKind::Error => error!("{}", message),
        }
        self.current = Some(Toast {
            message,
            kind,
            shown_at: Instant::now(),
        });
    }

    /// The toast still on screen, if it has not expired.
    #[cfg(test)]
    pub fn visible(&self) -> Option<&Toast> {
        self.visible_at(Instant::now())
    }

    #[cfg(test)]
    pub fn visible_at(&self, now: Instant) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|toast| now.saturating_duration_since(toast.shown_at) < self.ttl)
    }

    /// Remove and return the pending toast. Expiry only hides a toast from
    /// `visible`; a taken toast is always handed back.
    pub fn take(&mut self) -> Option<Toast> {
        let toast = self.current.take()?;
        let age = toast.shown_at.elapsed();
        if age >= self.ttl {
            debug!("Toast taken {:?} after it was shown", age);
        }
        Some(toast)
    }
}
