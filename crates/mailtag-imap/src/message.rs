//! Retrieved message text.

/// An RFC 2822 message as fetched from the server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    /// Raw message text.
    pub data: String,
}

impl Message {
    /// Wraps raw message text.
    #[must_use]
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }

    /// Returns the message text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.data
    }
}

impl From<String> for Message {
    fn from(data: String) -> Self {
        Self { data }
    }
}
