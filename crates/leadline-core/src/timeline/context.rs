use serde::{Deserialize, Serialize};

/// Fallback author label when nothing else resolves.
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

/// The person looking at the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: String,
    pub name: String,
}

impl Viewer {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Inputs to [`reconcile`](super::reconcile) besides the three collections.
///
/// The viewer is passed in rather than read from session state so that
/// reconciliation stays a pure function.
#[derive(Debug, Clone, Copy)]
pub struct ReconcileContext<'a> {
    viewer: Option<&'a Viewer>,
    unknown_author: &'a str,
}

impl<'a> ReconcileContext<'a> {
    #[must_use]
    pub const fn new(viewer: Option<&'a Viewer>) -> Self {
        Self {
            viewer,
            unknown_author: UNKNOWN_AUTHOR,
        }
    }

    /// Override the unknown-author label. A blank label is ignored.
    #[must_use]
    pub fn with_unknown_author(mut self, label: &'a str) -> Self {
        if !label.trim().is_empty() {
            self.unknown_author = label;
        }
        self
    }

    #[must_use]
    pub const fn viewer(&self) -> Option<&'a Viewer> {
        self.viewer
    }

    #[must_use]
    pub const fn unknown_author(&self) -> &'a str {
        self.unknown_author
    }
}

impl Default for ReconcileContext<'_> {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_unknown_author_keeps_default() {
        let ctx = ReconcileContext::default().with_unknown_author("  ");
        assert_eq!(ctx.unknown_author(), UNKNOWN_AUTHOR);

        let ctx = ReconcileContext::default().with_unknown_author("Someone");
        assert_eq!(ctx.unknown_author(), "Someone");
    }
}
