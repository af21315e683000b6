//! Completion status and server capabilities.

/// Completion status carried by a tagged response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// `OK`
    Ok,
    /// `NO`: the server understood the command and refused it.
    No,
    /// `BAD`: the server could not parse the command.
    Bad,
}

impl Status {
    /// Parses a status keyword, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("OK") {
            Some(Self::Ok)
        } else if s.eq_ignore_ascii_case("NO") {
            Some(Self::No)
        } else if s.eq_ignore_ascii_case("BAD") {
            Some(Self::Bad)
        } else {
            None
        }
    }

    /// Returns the status keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::No => "NO",
            Self::Bad => "BAD",
        }
    }

    /// Returns true only for `OK`.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One atom of a CAPABILITY listing.
///
/// Atoms without a dedicated variant survive as [`Capability::Other`], so
/// nothing the server advertises is lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `IMAP4rev1`
    Imap4Rev1,
    /// `IDLE` (RFC 2177)
    Idle,
    /// `NAMESPACE` (RFC 2342)
    Namespace,
    /// `UIDPLUS` (RFC 4315)
    UidPlus,
    /// `MOVE` (RFC 6851)
    Move,
    /// `LITERAL+` (RFC 7888)
    LiteralPlus,
    /// `STARTTLS`
    StartTls,
    /// `LOGINDISABLED`
    LoginDisabled,
    /// `SPECIAL-USE` (RFC 6154)
    SpecialUse,
    /// `AUTH=<mechanism>`, mechanism kept as sent.
    Auth(String),
    /// Anything else, kept as sent.
    Other(String),
}

const AUTH_PREFIX: &str = "AUTH=";

static ATOMS: [(Capability, &str); 9] = [
    (Capability::Imap4Rev1, "IMAP4rev1"),
    (Capability::Idle, "IDLE"),
    (Capability::Namespace, "NAMESPACE"),
    (Capability::UidPlus, "UIDPLUS"),
    (Capability::Move, "MOVE"),
    (Capability::LiteralPlus, "LITERAL+"),
    (Capability::StartTls, "STARTTLS"),
    (Capability::LoginDisabled, "LOGINDISABLED"),
    (Capability::SpecialUse, "SPECIAL-USE"),
];

impl Capability {
    /// Classifies one atom of a CAPABILITY listing, ignoring case.
    #[must_use]
    pub fn parse(atom: &str) -> Self {
        if let Some((known, _)) = ATOMS.iter().find(|(_, name)| name.eq_ignore_ascii_case(atom)) {
            return known.clone();
        }
        match atom.split_at_checked(AUTH_PREFIX.len()) {
            Some((prefix, mechanism)) if prefix.eq_ignore_ascii_case(AUTH_PREFIX) => {
                Self::Auth(mechanism.to_string())
            }
            _ => Self::Other(atom.to_string()),
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth(mechanism) => write!(f, "{AUTH_PREFIX}{mechanism}"),
            Self::Other(atom) => f.write_str(atom),
            known => {
                let name = ATOMS
                    .iter()
                    .find(|(cap, _)| cap == known)
                    .map_or("", |(_, name)| *name);
                f.write_str(name)
            }
        }
    }
}
