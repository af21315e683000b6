//! Mailbox listing types.

use bitflags::bitflags;

bitflags! {
    /// Classification attributes of a mailbox, as reported by LIST.
    ///
    /// Bit positions are fixed so raw masks stay interchangeable with
    /// other clients that store them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MailboxFlags: u32 {
        /// Virtual mailbox holding all messages (RFC 6154).
        const ALL = 1 << 0;
        /// Drafts folder.
        const DRAFTS = 1 << 1;
        /// Virtual mailbox of flagged messages.
        const FLAGGED = 1 << 2;
        /// Mailbox has children.
        const HAS_CHILDREN = 1 << 3;
        /// Mailbox has no children.
        const HAS_NO_CHILDREN = 1 << 4;
        /// Important messages (RFC 8457).
        const IMPORTANT = 1 << 5;
        /// Junk/spam folder.
        const JUNK = 1 << 6;
        /// Marked for attention.
        const MARKED = 1 << 7;
        /// No child mailboxes can be created.
        const NO_INFERIORS = 1 << 8;
        /// Mailbox cannot be selected.
        const NO_SELECT = 1 << 9;
        /// Sent folder.
        const SENT = 1 << 10;
        /// Trash folder.
        const TRASH = 1 << 11;
        /// Not marked.
        const UNMARKED = 1 << 12;
        /// At least one attribute was not recognized.
        const UNKNOWN = 1 << 13;
    }
}

impl MailboxFlags {
    /// Maps a single LIST attribute such as `\HasChildren` to its bit.
    ///
    /// Matching ignores case. Unrecognized attributes map to
    /// [`MailboxFlags::UNKNOWN`].
    #[must_use]
    pub fn from_attribute(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "\\ALL" => Self::ALL,
            "\\DRAFTS" => Self::DRAFTS,
            "\\FLAGGED" => Self::FLAGGED,
            "\\HASCHILDREN" => Self::HAS_CHILDREN,
            "\\HASNOCHILDREN" => Self::HAS_NO_CHILDREN,
            "\\IMPORTANT" => Self::IMPORTANT,
            "\\JUNK" | "\\SPAM" => Self::JUNK,
            "\\MARKED" => Self::MARKED,
            "\\NOINFERIORS" => Self::NO_INFERIORS,
            "\\NOSELECT" | "\\NONEXISTENT" => Self::NO_SELECT,
            "\\SENT" => Self::SENT,
            "\\TRASH" => Self::TRASH,
            "\\UNMARKED" => Self::UNMARKED,
            _ => Self::UNKNOWN,
        }
    }

    /// Folds a whole attribute list into one mask.
    pub fn from_attributes<'a>(attrs: impl IntoIterator<Item = &'a str>) -> Self {
        attrs
            .into_iter()
            .fold(Self::empty(), |acc, attr| acc | Self::from_attribute(attr))
    }

    /// Returns true if the mailbox can be selected.
    #[must_use]
    pub fn is_selectable(self) -> bool {
        !self.contains(Self::NO_SELECT)
    }
}

/// One row of a LIST response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Mailbox attributes.
    pub flags: MailboxFlags,
    /// Reference name (hierarchy delimiter as sent by the server).
    pub reference: String,
    /// Mailbox name.
    pub name: String,
}

impl ListItem {
    /// Creates a listing row.
    #[must_use]
    pub fn new(flags: MailboxFlags, reference: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            flags,
            reference: reference.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod mailbox_flags_tests {
        use super::*;

        #[test]
        fn bit_positions_are_stable() {
            assert_eq!(MailboxFlags::ALL.bits(), 1);
            assert_eq!(MailboxFlags::NO_SELECT.bits(), 1 << 9);
            assert_eq!(MailboxFlags::UNKNOWN.bits(), 1 << 13);
        }

        #[test]
        fn from_attribute_ignores_case() {
            assert_eq!(
                MailboxFlags::from_attribute("\\Noselect"),
                MailboxFlags::NO_SELECT
            );
            assert_eq!(
                MailboxFlags::from_attribute("\\HASCHILDREN"),
                MailboxFlags::HAS_CHILDREN
            );
        }

        #[test]
        fn spam_is_junk() {
            assert_eq!(MailboxFlags::from_attribute("\\Spam"), MailboxFlags::JUNK);
        }

        #[test]
        fn unknown_attribute() {
            assert_eq!(
                MailboxFlags::from_attribute("\\Subscribed"),
                MailboxFlags::UNKNOWN
            );
        }

        #[test]
        fn from_attributes_combines() {
            let flags = MailboxFlags::from_attributes(["\\HasNoChildren", "\\Trash"]);
            assert_eq!(flags, MailboxFlags::HAS_NO_CHILDREN | MailboxFlags::TRASH);
            assert!(flags.is_selectable());
        }

        #[test]
        fn noselect_is_not_selectable() {
            assert!(!MailboxFlags::from_attributes(["\\Noselect"]).is_selectable());
        }
    }

    #[test]
    fn list_item_new() {
        let item = ListItem::new(MailboxFlags::SENT, "/", "Sent");
        assert_eq!(item.flags, MailboxFlags::SENT);
        assert_eq!(item.reference, "/");
        assert_eq!(item.name, "Sent");
    }
}
