//! Core IMAP types.
//!
//! Status keywords, capabilities, flags, mailbox listing rows and command
//! tags shared by the response and command modules.

#![allow(clippy::missing_const_for_fn)]

mod capability;
mod flags;
mod identifiers;
mod mailbox;

pub use capability::{Capability, Status};
pub use flags::{Flag, Flags};
pub use identifiers::Tag;
pub use mailbox::{ListItem, MailboxFlags};
