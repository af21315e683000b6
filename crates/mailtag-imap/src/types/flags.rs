//! FLAGS and PERMANENTFLAGS entries.

use std::fmt;

/// One entry of a FLAGS or PERMANENTFLAGS list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Flag {
    /// `\Seen`
    Seen,
    /// `\Answered`
    Answered,
    /// `\Flagged`
    Flagged,
    /// `\Deleted`
    Deleted,
    /// `\Draft`
    Draft,
    /// `\Recent`, only ever set by the server.
    Recent,
    /// `\*`: the client may create new keywords (PERMANENTFLAGS only).
    MayCreate,
    /// Any other atom, kept as received.
    Keyword(String),
}

static NAMED: [(Flag, &str); 7] = [
    (Flag::Seen, "\\Seen"),
    (Flag::Answered, "\\Answered"),
    (Flag::Flagged, "\\Flagged"),
    (Flag::Deleted, "\\Deleted"),
    (Flag::Draft, "\\Draft"),
    (Flag::Recent, "\\Recent"),
    (Flag::MayCreate, "\\*"),
];

impl Flag {
    /// Maps a flag atom to a variant. System flags match case-insensitively;
    /// anything else becomes a [`Flag::Keyword`].
    #[must_use]
    pub fn parse(atom: &str) -> Self {
        NAMED
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(atom))
            .map_or_else(|| Self::Keyword(atom.to_string()), |(flag, _)| flag.clone())
    }

    /// Returns the canonical spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        if let Self::Keyword(atom) = self {
            return atom;
        }
        NAMED
            .iter()
            .find(|(flag, _)| flag == self)
            .map_or("", |(_, name)| *name)
    }

    /// Returns true for the backslash-prefixed flags defined by IMAP.
    #[must_use]
    pub const fn is_system(&self) -> bool {
        !matches!(self, Self::Keyword(_))
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flag list in the order the server sent it, without repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags(Vec<Flag>);

impl Flags {
    /// An empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list, keeping the first occurrence of each flag.
    #[must_use]
    pub fn from_vec(flags: Vec<Flag>) -> Self {
        flags.into_iter().collect()
    }

    /// Appends `flag` unless it is already listed.
    pub fn insert(&mut self, flag: Flag) {
        if !self.contains(&flag) {
            self.0.push(flag);
        }
    }

    /// Returns true if `flag` is listed.
    #[must_use]
    pub fn contains(&self, flag: &Flag) -> bool {
        self.0.contains(flag)
    }

    /// Returns true if the list carries `\*`.
    #[must_use]
    pub fn allows_new_keywords(&self) -> bool {
        self.contains(&Flag::MayCreate)
    }

    /// Iterates in arrival order.
    pub fn iter(&self) -> std::slice::Iter<'_, Flag> {
        self.0.iter()
    }

    /// Number of distinct flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Flag> for Flags {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut flags = Self::new();
        iter.into_iter().for_each(|flag| flags.insert(flag));
        flags
    }
}

impl<'a> FromIterator<&'a str> for Flags {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(Flag::parse).collect()
    }
}

impl IntoIterator for Flags {
    type Item = Flag;
    type IntoIter = std::vec::IntoIter<Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Flags {
    type Item = &'a Flag;
    type IntoIter = std::slice::Iter<'a, Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_flags_ignore_case() {
        for atom in ["\\Seen", "\\seen", "\\SEEN"] {
            assert_eq!(Flag::parse(atom), Flag::Seen);
        }
        assert_eq!(Flag::parse("\\answered"), Flag::Answered);
        assert_eq!(Flag::parse("\\*"), Flag::MayCreate);
    }

    #[test]
    fn keywords_kept_verbatim() {
        let flag = Flag::parse("$Forwarded");
        assert_eq!(flag, Flag::Keyword("$Forwarded".to_string()));
        assert!(!flag.is_system());
        assert_eq!(flag.as_str(), "$Forwarded");
    }

    #[test]
    fn canonical_spelling() {
        assert_eq!(Flag::parse("\\dRaFt").to_string(), "\\Draft");
        assert_eq!(Flag::MayCreate.to_string(), "\\*");
        assert!(Flag::Recent.is_system());
    }

    #[test]
    fn arrival_order_without_repeats() {
        let flags: Flags = ["\\Seen", "\\Draft", "$Junk", "\\seen"].into_iter().collect();
        assert_eq!(flags.len(), 3);
        let listed: Vec<&str> = flags.iter().map(Flag::as_str).collect();
        assert_eq!(listed, ["\\Seen", "\\Draft", "$Junk"]);
    }

    #[test]
    fn may_create_marker() {
        let permanent: Flags = ["\\Deleted", "\\*"].into_iter().collect();
        assert!(permanent.allows_new_keywords());
        assert!(!Flags::from_vec(vec![Flag::Deleted]).allows_new_keywords());
        assert!(Flags::new().is_empty());
    }
}
