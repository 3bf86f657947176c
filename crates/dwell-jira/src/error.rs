//! Jira client error types.

/// Errors that can occur while talking to Jira.
#[derive(Debug, thiserror::Error)]
pub enum JiraError {
    /// Jira answered with a non-success status code.
    #[error("Jira returned HTTP {status}{}", hint_suffix(.status))]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// The request could not be sent or the response could not be read.
    #[error("request to Jira failed: {0}")]
    Transport(#[source] ureq::Error),

    /// The search scope was incomplete or inconsistent.
    #[error("invalid search: {message}")]
    InvalidSearch {
        /// Description of what is wrong with the search.
        message: String,
    },
}

/// Convenience alias used throughout the Jira crate.
pub type Result<T> = std::result::Result<T, JiraError>;

impl JiraError {
    /// Creates a [`JiraError::InvalidSearch`] with the given message.
    pub fn invalid_search(message: impl Into<String>) -> Self {
        Self::InvalidSearch {
            message: message.into(),
        }
    }
}

impl From<ureq::Error> for JiraError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => Self::Status { status },
            other => Self::Transport(other),
        }
    }
}

fn hint_suffix(status: &u16) -> &'static str {
    match *status {
        401 => " (check JIRA_USER_EMAIL and JIRA_USER_API_TOKEN)",
        403 => " (the account cannot browse this project)",
        400 => " (the JQL query was rejected)",
        _ => "",
    }
}
