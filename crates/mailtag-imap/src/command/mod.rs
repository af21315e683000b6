//! IMAP command descriptors.
//!
//! A [`Command`] is what the command layer hands to the serializer: a type,
//! the tag its response will carry, and positional string arguments. Tags
//! come from a [`TagGenerator`] and must be unique among commands still in
//! flight, since the response is routed back by tag alone.

mod tag_generator;

pub use tag_generator::TagGenerator;

use crate::types::Tag;

/// Kind of command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    /// CAPABILITY command.
    Capability,
    /// LIST command.
    List,
    /// LOGIN command.
    Login,
    /// LOGOUT command.
    Logout,
    /// NOOP command.
    Noop,
    /// SELECT command.
    Select,
}

impl CommandType {
    /// Returns the command keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Capability => "CAPABILITY",
            Self::List => "LIST",
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::Noop => "NOOP",
            Self::Select => "SELECT",
        }
    }

    /// Returns `true` if the command can be sent while others are in flight.
    ///
    /// LOGIN, LOGOUT and SELECT change connection state, so commands issued
    /// after them would run against the wrong state if pipelined.
    #[must_use]
    pub const fn is_pipelineable(self) -> bool {
        matches!(self, Self::Capability | Self::List | Self::Noop)
    }
}

impl std::fmt::Display for CommandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Kind of command.
    pub kind: CommandType,
    /// Tag the completion will carry.
    pub tag: Tag,
    /// Positional arguments, in wire order.
    pub args: Vec<String>,
}

impl Command {
    /// Creates a command with no arguments.
    #[must_use]
    pub const fn new(kind: CommandType, tag: Tag) -> Self {
        Self {
            kind,
            tag,
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// CAPABILITY.
    #[must_use]
    pub const fn capability(tag: Tag) -> Self {
        Self::new(CommandType::Capability, tag)
    }

    /// NOOP.
    #[must_use]
    pub const fn noop(tag: Tag) -> Self {
        Self::new(CommandType::Noop, tag)
    }

    /// LOGOUT.
    #[must_use]
    pub const fn logout(tag: Tag) -> Self {
        Self::new(CommandType::Logout, tag)
    }

    /// LOGIN with username and password.
    #[must_use]
    pub fn login(tag: Tag, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(CommandType::Login, tag).arg(username).arg(password)
    }

    /// LIST with reference name and mailbox pattern.
    #[must_use]
    pub fn list(tag: Tag, reference: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(CommandType::List, tag).arg(reference).arg(pattern)
    }

    /// SELECT a mailbox.
    #[must_use]
    pub fn select(tag: Tag, mailbox: impl Into<String>) -> Self {
        Self::new(CommandType::Select, tag).arg(mailbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind_and_args() {
        let login = Command::login(Tag::new(1), "user", "secret");
        assert_eq!(login.kind, CommandType::Login);
        assert_eq!(login.tag, Tag::new(1));
        assert_eq!(login.args, vec!["user", "secret"]);

        let list = Command::list(Tag::new(2), "", "*");
        assert_eq!(list.kind, CommandType::List);
        assert_eq!(list.args, vec!["", "*"]);

        let select = Command::select(Tag::new(3), "INBOX");
        assert_eq!(select.args, vec!["INBOX"]);
    }

    #[test]
    fn no_argument_commands() {
        assert!(Command::noop(Tag::new(1)).args.is_empty());
        assert!(Command::capability(Tag::new(1)).args.is_empty());
        assert_eq!(Command::logout(Tag::new(1)).kind, CommandType::Logout);
    }

    #[test]
    fn args_keep_order() {
        let cmd = Command::new(CommandType::List, Tag::new(5))
            .arg("a")
            .arg("b")
            .arg("c");
        assert_eq!(cmd.args, vec!["a", "b", "c"]);
    }

    #[test]
    fn pipeline_classification() {
        assert!(CommandType::Noop.is_pipelineable());
        assert!(CommandType::Capability.is_pipelineable());
        assert!(CommandType::List.is_pipelineable());
        assert!(!CommandType::Login.is_pipelineable());
        assert!(!CommandType::Logout.is_pipelineable());
        assert!(!CommandType::Select.is_pipelineable());
    }

    #[test]
    fn display_keyword() {
        assert_eq!(CommandType::Select.to_string(), "SELECT");
    }
}
