//! Terminal and continuation outcomes of a command.

use super::ResponseData;
use crate::types::{Status, Tag};
use crate::{Error, Result};

/// The tagged status line that completes a command, together with the
/// untagged data the server sent before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalResponse {
    status: Status,
    tag: Tag,
    text: String,
    data: ResponseData,
}

impl FinalResponse {
    /// Creates a final response once the parser has seen the tagged line.
    #[must_use]
    pub fn new(status: Status, tag: Tag, text: impl Into<String>, data: ResponseData) -> Self {
        Self {
            status,
            tag,
            text: text.into(),
            data,
        }
    }

    /// Completion status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Tag of the command this response completes.
    #[must_use]
    pub const fn tag(&self) -> Tag {
        self.tag
    }

    /// Human-readable text after the status keyword.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Untagged data collected for this command.
    #[must_use]
    pub const fn data(&self) -> &ResponseData {
        &self.data
    }

    /// Consumes the response, returning its data.
    #[must_use]
    pub fn into_data(self) -> ResponseData {
        self.data
    }

    /// Returns true if the status is OK.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    /// Converts NO and BAD completions into errors carrying the status text.
    ///
    /// A BYE among the untagged data takes precedence over an OK status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::No`], [`Error::Bad`] or [`Error::Bye`].
    pub fn into_result(self) -> Result<Self> {
        match self.status {
            Status::No => Err(Error::No(self.text)),
            Status::Bad => Err(Error::Bad(self.text)),
            Status::Ok => {
                let bye = self
                    .data
                    .try_bye_message()
                    .map(|message| message.unwrap_or_default().to_string());
                bye.map_or(Ok(self), |message| Err(Error::Bye(message)))
            }
        }
    }
}

/// A `+` prompt: the server wants more input before it can complete the
/// command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Continuation {
    /// Prompt text, possibly empty.
    pub data: String,
}

impl Continuation {
    /// Creates a continuation with the given prompt text.
    #[must_use]
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}
