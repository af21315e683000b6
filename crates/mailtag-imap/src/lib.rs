//! # mailtag-imap
//!
//! The result side of an IMAP client: accumulating what the server says in
//! reply to a command, and handing it to whoever is waiting for that
//! command's tag.
//!
//! ## Features
//!
//! - **Response accumulator**: [`ResponseData`] is filled one untagged
//!   element at a time and records which elements it holds
//! - **Closed response type**: a [`Response`] is either a tagged
//!   [`FinalResponse`] or a [`Continuation`] prompt
//! - **Single-resolution promises**: [`Promise`] with synchronous `map`
//!   chaining, async waiting, timeouts and cancellation
//! - **Explicit event loop**: [`EventLoop`] lets synchronous code wait on a
//!   promise without any global runtime
//! - **Tag routing**: [`PendingCommands`] allocates tags and resolves the
//!   right promise for each parsed response
//!
//! The byte-level parser, transport and command serializer live outside
//! this crate and talk to it through the types above.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailtag_imap::{
//!     CommandType, EventLoop, FinalResponse, PendingCommands, ResponseData,
//!     Status, WaitConfig,
//! };
//!
//! let event_loop = EventLoop::new()?;
//! let mut pending = PendingCommands::default();
//!
//! let (command, reply) = pending.issue(CommandType::Capability, Vec::new())?;
//! let capability_names = reply.map(|resp| {
//!     resp.as_final()
//!         .and_then(|f| f.data().try_capabilities().map(<[String]>::to_vec))
//!         .unwrap_or_default()
//! });
//!
//! // The parser, on reading "* CAPABILITY IMAP4rev1 IDLE" and "1 OK done":
//! let mut data = ResponseData::new();
//! data.add_capabilities(vec!["IMAP4rev1".into(), "IDLE".into()]);
//! pending.dispatch(FinalResponse::new(Status::Ok, command.tag, "done", data).into())?;
//!
//! let names = event_loop.wait(&capability_names, &WaitConfig::default())?;
//! assert_eq!(names, ["IMAP4rev1", "IDLE"]);
//! ```
//!
//! ## Modules
//!
//! - [`command`]: command descriptors and tag allocation
//! - [`pending`]: tag-to-promise routing
//! - [`promise`]: promises, wait configuration and the event loop
//! - [`response`]: response data, final responses and continuations
//! - [`types`]: status, capabilities, flags, listing rows and tags

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
mod error;
mod message;
pub mod pending;
pub mod promise;
pub mod response;
pub mod types;

pub use command::{Command, CommandType, TagGenerator};
pub use error::{Error, Result};
pub use message::Message;
pub use pending::{PendingCommands, PendingConfig};
pub use promise::{EventLoop, Promise, WaitConfig};
pub use response::{Continuation, FinalResponse, Response, ResponseData, ResponseType};
pub use types::{Capability, Flag, Flags, ListItem, MailboxFlags, Status, Tag};
