//! Hooks for the presentation layer.
//!
//! The submission workflow reports outcomes through these trait seams so the
//! core stays decoupled from any concrete notification or surface toolkit.
//! Embeddings implement them; the no-op and tracing implementations cover
//! headless use.

use std::fmt;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A fixed user-facing notice emitted by the submission workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    /// Submit attempted before the upload resolved.
    pub fn upload_not_ready() -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Image not yet uploaded".to_string(),
            description: Some(
                "You need to add an image and wait for its upload before registering.".to_string(),
            ),
        }
    }

    /// Registration resolved.
    pub fn image_added() -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Image added".to_string(),
            description: None,
        }
    }

    /// Registration rejected; no detail is surfaced beyond the generic text.
    pub fn submit_failed() -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Failed to add image, try again later".to_string(),
            description: None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.title, description),
            None => write!(f, "{}", self.title),
        }
    }
}

/// Sink for user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that reports through the tracing subscriber.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => tracing::info!(notice = %notice, "notice"),
            NoticeKind::Error => tracing::warn!(notice = %notice, "notice"),
        }
    }
}

/// The interaction surface hosting one submission (a modal form, a prompt).
///
/// Closed unconditionally when a submission resolves, on success and failure
/// alike.
pub trait InteractionSurface: Send + Sync {
    fn close(&self);
}

/// Surface for embeddings with nothing to tear down.
pub struct NoOpSurface;

impl InteractionSurface for NoOpSurface {
    fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_literals() {
        assert_eq!(Notice::upload_not_ready().title, "Image not yet uploaded");
        assert_eq!(Notice::image_added().title, "Image added");
        assert_eq!(
            Notice::submit_failed().title,
            "Failed to add image, try again later"
        );
    }

    #[test]
    fn notice_kinds() {
        assert_eq!(Notice::upload_not_ready().kind, NoticeKind::Error);
        assert_eq!(Notice::image_added().kind, NoticeKind::Success);
        assert_eq!(Notice::submit_failed().kind, NoticeKind::Error);
    }

    #[test]
    fn notice_display_includes_description() {
        let notice = Notice::upload_not_ready();
        let rendered = notice.to_string();
        assert!(rendered.starts_with("Image not yet uploaded: "));
    }
}
