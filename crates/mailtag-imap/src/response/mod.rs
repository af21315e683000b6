//! Parsed server responses.
//!
//! The parser (not part of this crate) builds a [`ResponseData`] as untagged
//! lines arrive, then wraps it in a [`FinalResponse`] when it reaches the
//! tagged status line, or yields a [`Continuation`] for a `+` prompt. Either
//! way the result is a [`Response`], which the connection layer hands to
//! [`PendingCommands::dispatch`](crate::PendingCommands::dispatch).

mod data;
mod types;

pub use data::{ResponseData, ResponseType};
pub use types::{Continuation, FinalResponse};

use crate::types::Tag;

/// One complete parse unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Tagged completion of a command.
    Final(FinalResponse),
    /// Server prompt for more input; the command is not finished.
    Continuation(Continuation),
}

impl Response {
    /// Returns the tag for final responses; continuations are untagged.
    #[must_use]
    pub const fn tag(&self) -> Option<Tag> {
        match self {
            Self::Final(resp) => Some(resp.tag()),
            Self::Continuation(_) => None,
        }
    }

    /// Returns true for a final response.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Final(_))
    }

    /// Returns true for a continuation prompt.
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        matches!(self, Self::Continuation(_))
    }

    /// Borrows the final response, if this is one.
    #[must_use]
    pub const fn as_final(&self) -> Option<&FinalResponse> {
        match self {
            Self::Final(resp) => Some(resp),
            Self::Continuation(_) => None,
        }
    }

    /// Converts into the final response, if this is one.
    #[must_use]
    pub fn into_final(self) -> Option<FinalResponse> {
        match self {
            Self::Final(resp) => Some(resp),
            Self::Continuation(_) => None,
        }
    }

    /// Borrows the continuation, if this is one.
    #[must_use]
    pub const fn as_continuation(&self) -> Option<&Continuation> {
        match self {
            Self::Final(_) => None,
            Self::Continuation(cont) => Some(cont),
        }
    }
}

impl From<FinalResponse> for Response {
    fn from(resp: FinalResponse) -> Self {
        Self::Final(resp)
    }
}

impl From<Continuation> for Response {
    fn from(cont: Continuation) -> Self {
        Self::Continuation(cont)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    #[test]
    fn final_variant() {
        let resp: Response =
            FinalResponse::new(Status::Ok, Tag::new(4), "done", ResponseData::new()).into();
        assert!(resp.is_final());
        assert!(!resp.is_continuation());
        assert_eq!(resp.tag(), Some(Tag::new(4)));
        assert!(resp.as_continuation().is_none());
        assert_eq!(resp.into_final().map(|r| r.tag()), Some(Tag::new(4)));
    }

    #[test]
    fn continuation_variant() {
        let resp: Response = Continuation::new("go ahead").into();
        assert!(resp.is_continuation());
        assert_eq!(resp.tag(), None);
        assert!(resp.as_final().is_none());
        assert_eq!(resp.as_continuation().map(|c| c.data.as_str()), Some("go ahead"));
        assert!(resp.into_final().is_none());
    }
}
