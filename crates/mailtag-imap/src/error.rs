//! Errors raised while correlating commands with their responses.

use std::time::Duration;

use thiserror::Error;

use crate::types::Tag;

/// Everything that can go wrong between issuing a command and reading its
/// result.
///
/// `No`, `Bad` and `Bye` are never produced by the registry itself: a
/// failed command is still a delivered [`FinalResponse`](crate::FinalResponse).
/// They come from [`FinalResponse::into_result`](crate::FinalResponse::into_result)
/// for callers that prefer `?`.
#[derive(Debug, Error)]
pub enum Error {
    /// The event loop's runtime could not be created.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Command completed with `NO`.
    #[error("command rejected (NO): {0}")]
    No(String),

    /// Command completed with `BAD`.
    #[error("command malformed (BAD): {0}")]
    Bad(String),

    /// Response data carried a `BYE`.
    #[error("server closing connection (BYE): {0}")]
    Bye(String),

    /// [`WaitConfig::timeout`](crate::WaitConfig::timeout) elapsed first.
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// The wait's cancellation token fired.
    #[error("wait cancelled")]
    Cancelled,

    /// Another waiter already took the value.
    #[error("promise value already taken")]
    AlreadyConsumed,

    /// The tag belongs to a command still in flight.
    #[error("tag {0} is already in flight")]
    DuplicateTag(Tag),

    /// A final response named a tag nobody is waiting on.
    #[error("response for unknown tag {0}")]
    UnknownTag(Tag),

    /// The registry's in-flight limit was reached.
    #[error("in-flight limit of {0} commands reached")]
    TooManyInFlight(usize),

    /// Operation not allowed from the current context.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Response that fits no outstanding command.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
