//! Transient user notifications.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// Surface able to show short-lived messages to the user.
pub trait Toaster {
    fn show(&self, kind: ToastKind, message: &str);

    fn success(&self, message: &str) {
        self.show(ToastKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.show(ToastKind::Error, message);
    }

    fn info(&self, message: &str) {
        self.show(ToastKind::Info, message);
    }
}
