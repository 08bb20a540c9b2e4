//! User-facing notifications ("toasts")
//!
//! Stores report outcomes through a [`Notifier`]. A UI layer either
//! implements the trait itself or drains a [`ToastQueue`].

use std::sync::{Arc, Mutex};

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A single notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

impl Toast {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: title.into(),
            description: Some(description.into()),
        }
    }
}

/// Side channel for user notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, toast: Toast) {
        (**self).notify(toast)
    }
}

/// Notifier that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => tracing::info!(title = %toast.title, "toast"),
            ToastKind::Error => tracing::warn!(
                title = %toast.title,
                description = toast.description.as_deref().unwrap_or_default(),
                "toast"
            ),
        }
    }
}

/// Collects toasts for a UI to drain on its next frame
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    inner: Arc<Mutex<Vec<Toast>>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending toast
    pub fn drain(&self) -> Vec<Toast> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *guard)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pending toasts of one kind, without draining
    pub fn count(&self, kind: ToastKind) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|t| t.kind == kind)
            .count()
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(toast);
    }
}
