//! User-facing error notices.

use std::fmt::{Display, Formatter};

/// Generic error notification shown at the top of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn offline() -> Self {
        Self::new(
            "No internet connection",
            "Try adding the task again once the connection is restored.",
        )
    }

    pub fn upload_failed() -> Self {
        Self::new(
            "Could not upload the file",
            "Try removing the file and attaching it again.",
        )
    }

    pub fn save_failed() -> Self {
        Self::new("Could not save the task", "")
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{}: {}", self.title, self.description)
        }
    }
}
