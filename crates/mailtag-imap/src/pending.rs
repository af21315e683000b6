//! Routing of parsed responses to the commands waiting for them.
//!
//! IMAP allows sending several commands before any completes (RFC 9051
//! Section 5.5). Each gets a [`Promise`] keyed by its tag; when the parser
//! produces a [`Response`] the connection layer calls
//! [`PendingCommands::dispatch`], which resolves the matching promise.
//!
//! # Example
//!
//! ```ignore
//! use mailtag_imap::{CommandType, PendingCommands, PendingConfig};
//!
//! let mut pending = PendingCommands::new(PendingConfig::new().max_in_flight(4));
//! let (noop, reply) = pending.issue(CommandType::Noop, Vec::new())?;
//! // ... serialize `noop`, read the server's answer, parse it ...
//! pending.dispatch(parsed)?;
//! let response = event_loop.wait(&reply, &WaitConfig::default())?;
//! ```

// Registry operations all touch the VecDeque and cannot be const.
#![allow(clippy::missing_const_for_fn)]

use std::collections::VecDeque;

use crate::command::{Command, CommandType, TagGenerator};
use crate::promise::Promise;
use crate::response::Response;
use crate::types::Tag;
use crate::{Error, Result};

/// Default limit on commands in flight.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;

/// Hard upper bound on commands in flight.
pub const MAX_IN_FLIGHT: usize = 256;

/// Configuration for the pending-command registry.
#[derive(Debug, Clone)]
pub struct PendingConfig {
    /// Maximum number of commands awaiting completion at once.
    pub max_in_flight: usize,
}

impl Default for PendingConfig {
    fn default() -> Self {
        Self {
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

impl PendingConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the in-flight limit, clamped to `1..=MAX_IN_FLIGHT`.
    #[must_use]
    pub fn max_in_flight(mut self, limit: usize) -> Self {
        self.max_in_flight = limit.clamp(1, MAX_IN_FLIGHT);
        self
    }
}

#[derive(Debug)]
struct Entry {
    tag: Tag,
    kind: CommandType,
    promise: Promise<Response>,
}

/// Tag-to-promise table for one connection.
#[derive(Debug)]
pub struct PendingCommands {
    config: PendingConfig,
    tags: TagGenerator,
    in_flight: VecDeque<Entry>,
}

impl Default for PendingCommands {
    fn default() -> Self {
        Self::new(PendingConfig::default())
    }
}

impl PendingCommands {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(config: PendingConfig) -> Self {
        Self {
            config,
            tags: TagGenerator::new(),
            in_flight: VecDeque::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PendingConfig {
        &self.config
    }

    /// Allocates a tag, builds the command and registers it.
    ///
    /// No tag is used up when the call is rejected. Tags already in flight
    /// through [`register`](Self::register) are skipped.
    ///
    /// # Errors
    ///
    /// [`Error::TooManyInFlight`] if the limit is reached.
    pub fn issue(
        &mut self,
        kind: CommandType,
        args: Vec<String>,
    ) -> Result<(Command, Promise<Response>)> {
        self.check_capacity()?;
        let mut tag = self.tags.next();
        while self.is_in_flight(tag) {
            tracing::trace!(%tag, "skipping tag registered by hand");
            tag = self.tags.next();
        }
        let command = Command { kind, tag, args };
        let promise = self.register(&command)?;
        Ok((command, promise))
    }

    fn check_capacity(&self) -> Result<()> {
        if self.in_flight.len() >= self.config.max_in_flight {
            return Err(Error::TooManyInFlight(self.config.max_in_flight));
        }
        Ok(())
    }

    /// Registers a command built elsewhere and returns the promise its
    /// completion will resolve.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateTag`] if the tag is already in flight,
    /// [`Error::TooManyInFlight`] if the limit is reached.
    pub fn register(&mut self, command: &Command) -> Result<Promise<Response>> {
        if self.is_in_flight(command.tag) {
            return Err(Error::DuplicateTag(command.tag));
        }
        self.check_capacity()?;
        if !self.in_flight.is_empty() && !command.kind.is_pipelineable() {
            tracing::debug!(
                tag = %command.tag,
                kind = %command.kind,
                in_flight = self.in_flight.len(),
                "state-changing command pipelined behind outstanding commands"
            );
        }

        let promise = Promise::new();
        self.in_flight.push_back(Entry {
            tag: command.tag,
            kind: command.kind,
            promise: promise.clone(),
        });
        tracing::trace!(tag = %command.tag, kind = %command.kind, "command registered");
        Ok(promise)
    }

    /// Routes a parsed response to the command it belongs to.
    ///
    /// A final response resolves and retires its tag. A continuation goes to
    /// the newest outstanding command, the only one that can be waiting for
    /// a `+` prompt; that tag stays in flight with a fresh promise, available
    /// from [`promise`](Self::promise), for the final response still to come.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownTag`] for a final response nobody is waiting on,
    /// [`Error::Protocol`] for a continuation with nothing in flight.
    pub fn dispatch(&mut self, response: Response) -> Result<()> {
        match response.tag() {
            Some(tag) => self.complete(tag, response),
            None => self.prompt(response),
        }
    }

    fn complete(&mut self, tag: Tag, response: Response) -> Result<()> {
        let Some(pos) = self.in_flight.iter().position(|e| e.tag == tag) else {
            tracing::warn!(%tag, "response for a tag that is not in flight");
            return Err(Error::UnknownTag(tag));
        };
        if pos != 0 {
            tracing::warn!(
                %tag,
                expected = ?self.next_expected(),
                "received response out of order"
            );
        }
        if let Some(entry) = self.in_flight.remove(pos) {
            tracing::trace!(%tag, kind = %entry.kind, "command completed");
            // Registry promises are resolved only here, once per entry.
            let _ = entry.promise.resolve(response);
        }
        Ok(())
    }

    fn prompt(&mut self, response: Response) -> Result<()> {
        let Some(entry) = self.in_flight.back_mut() else {
            return Err(Error::Protocol(
                "continuation request with no command in flight".to_string(),
            ));
        };
        tracing::trace!(tag = %entry.tag, "continuation requested");
        let prompted = std::mem::take(&mut entry.promise);
        let _ = prompted.resolve(response);
        Ok(())
    }

    /// Returns the promise currently registered for `tag`.
    #[must_use]
    pub fn promise(&self, tag: Tag) -> Option<Promise<Response>> {
        self.in_flight
            .iter()
            .find(|e| e.tag == tag)
            .map(|e| e.promise.clone())
    }

    /// Drops every outstanding command, e.g. after the connection is lost,
    /// and returns their tags in issue order.
    ///
    /// Their promises are never resolved, so anyone waiting without a
    /// timeout keeps waiting.
    pub fn abandon_all(&mut self) -> Vec<Tag> {
        let tags: Vec<Tag> = self.in_flight.drain(..).map(|e| e.tag).collect();
        if !tags.is_empty() {
            tracing::warn!(count = tags.len(), "abandoning unresolved commands");
        }
        tags
    }

    /// Returns the number of commands in flight.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Returns `true` if `tag` is in flight.
    #[must_use]
    pub fn is_in_flight(&self, tag: Tag) -> bool {
        self.in_flight.iter().any(|e| e.tag == tag)
    }

    /// Returns the tag whose completion is expected next.
    #[must_use]
    pub fn next_expected(&self) -> Option<Tag> {
        self.in_flight.front().map(|e| e.tag)
    }
}
