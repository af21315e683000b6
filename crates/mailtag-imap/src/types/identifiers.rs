//! Command tags.

/// IMAP command tag.
///
/// Tags are client-chosen numbers that identify commands and their responses.
/// Each outstanding command has a unique tag, and the server's completion
/// line carries the same tag so the response can be routed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(pub u32);

impl Tag {
    /// Creates a new tag.
    #[must_use]
    pub const fn new(n: u32) -> Self {
        Self(n)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Tag {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
