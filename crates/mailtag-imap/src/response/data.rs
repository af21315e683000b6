//! Incrementally populated response data.

use bitflags::bitflags;

use crate::types::{Capability, Flags, ListItem};

bitflags! {
    /// Which kinds of untagged data a [`ResponseData`] holds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ResponseType: u32 {
        /// CAPABILITY list.
        const CAPABILITY = 1 << 0;
        /// One or more LIST rows.
        const LIST = 1 << 1;
        /// EXISTS count.
        const EXISTS = 1 << 2;
        /// RECENT count.
        const RECENT = 1 << 3;
        /// FLAGS list.
        const FLAGS = 1 << 4;
        /// UIDNEXT value.
        const UID_NEXT = 1 << 5;
        /// UIDVALIDITY value.
        const UID_VALIDITY = 1 << 6;
        /// UNSEEN value.
        const UNSEEN = 1 << 7;
        /// PERMANENTFLAGS list.
        const PERMANENT_FLAGS = 1 << 8;
        /// BYE notice.
        const BYE = 1 << 13;
    }
}

/// Untagged data collected while the server answers one command.
///
/// The parser fills this in one element at a time. Each mutator stores its
/// value and records the matching [`ResponseType`] bit; bits are never
/// cleared. `add_list_item` appends, every other mutator replaces the
/// previous value.
///
/// Plain accessors such as [`exists`](Self::exists) treat a missing bit as
/// a parser bug and panic. The `try_*` accessors return `None` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseData {
    response_type: ResponseType,
    capabilities: Vec<String>,
    list_items: Vec<ListItem>,
    exists: u32,
    recent: u32,
    uid_next: u32,
    uid_validity: u32,
    unseen: u32,
    flags: Flags,
    permanent_flags: Flags,
    bye_message: Option<String>,
}

impl ResponseData {
    /// Creates empty response data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the presence mask.
    #[must_use]
    pub const fn response_type(&self) -> ResponseType {
        self.response_type
    }

    /// Returns true if any bit of `response_type` is present.
    #[must_use]
    pub const fn contains_response_type(&self, response_type: ResponseType) -> bool {
        self.response_type.intersects(response_type)
    }

    fn mark(&mut self, response_type: ResponseType) {
        if self.response_type.contains(response_type) {
            tracing::debug!(?response_type, "overwriting previously received response data");
        }
        self.response_type.insert(response_type);
    }

    #[track_caller]
    fn require(&self, response_type: ResponseType, accessor: &str) {
        assert!(
            self.response_type.contains(response_type),
            "ResponseData::{accessor} called but no {response_type:?} data was received"
        );
    }

    fn present<T>(&self, response_type: ResponseType, value: T) -> Option<T> {
        self.response_type.contains(response_type).then_some(value)
    }

    /// Stores the server's capability list.
    pub fn add_capabilities(&mut self, capabilities: Vec<String>) {
        self.mark(ResponseType::CAPABILITY);
        self.capabilities = capabilities;
    }

    /// Appends one LIST row.
    pub fn add_list_item(&mut self, item: ListItem) {
        self.response_type.insert(ResponseType::LIST);
        self.list_items.push(item);
    }

    /// Stores the EXISTS count.
    pub fn set_exists(&mut self, exists: u32) {
        self.mark(ResponseType::EXISTS);
        self.exists = exists;
    }

    /// Stores the RECENT count.
    pub fn set_recent(&mut self, recent: u32) {
        self.mark(ResponseType::RECENT);
        self.recent = recent;
    }

    /// Stores the UIDNEXT value.
    pub fn set_uid_next(&mut self, uid_next: u32) {
        self.mark(ResponseType::UID_NEXT);
        self.uid_next = uid_next;
    }

    /// Stores the UIDVALIDITY value.
    pub fn set_uid_validity(&mut self, uid_validity: u32) {
        self.mark(ResponseType::UID_VALIDITY);
        self.uid_validity = uid_validity;
    }

    /// Stores the UNSEEN value.
    pub fn set_unseen(&mut self, unseen: u32) {
        self.mark(ResponseType::UNSEEN);
        self.unseen = unseen;
    }

    /// Stores the mailbox FLAGS list.
    ///
    /// The list is kept normalised, not as raw atoms: system flags take
    /// their canonical spelling and repeats are dropped (see [`Flags`]).
    pub fn set_flags(&mut self, flags: Flags) {
        self.mark(ResponseType::FLAGS);
        self.flags = flags;
    }

    /// Stores the PERMANENTFLAGS list.
    ///
    /// Normalised the same way as [`set_flags`](Self::set_flags).
    pub fn set_permanent_flags(&mut self, flags: Flags) {
        self.mark(ResponseType::PERMANENT_FLAGS);
        self.permanent_flags = flags;
    }

    /// Records a BYE notice with its optional human-readable text.
    pub fn set_bye(&mut self, message: Option<String>) {
        self.mark(ResponseType::BYE);
        self.bye_message = message;
    }

    /// Returns the capability list.
    ///
    /// # Panics
    ///
    /// Panics if no CAPABILITY data was received.
    #[must_use]
    #[track_caller]
    pub fn capabilities(&self) -> &[String] {
        self.require(ResponseType::CAPABILITY, "capabilities");
        &self.capabilities
    }

    /// Returns the LIST rows in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if no LIST data was received.
    #[must_use]
    #[track_caller]
    pub fn list_items(&self) -> &[ListItem] {
        self.require(ResponseType::LIST, "list_items");
        &self.list_items
    }

    /// Returns the EXISTS count.
    ///
    /// # Panics
    ///
    /// Panics if no EXISTS data was received.
    #[must_use]
    #[track_caller]
    pub fn exists(&self) -> u32 {
        self.require(ResponseType::EXISTS, "exists");
        self.exists
    }

    /// Returns the RECENT count.
    ///
    /// # Panics
    ///
    /// Panics if no RECENT data was received.
    #[must_use]
    #[track_caller]
    pub fn recent(&self) -> u32 {
        self.require(ResponseType::RECENT, "recent");
        self.recent
    }

    /// Returns the UIDNEXT value.
    ///
    /// # Panics
    ///
    /// Panics if no UIDNEXT data was received.
    #[must_use]
    #[track_caller]
    pub fn uid_next(&self) -> u32 {
        self.require(ResponseType::UID_NEXT, "uid_next");
        self.uid_next
    }

    /// Returns the UIDVALIDITY value.
    ///
    /// # Panics
    ///
    /// Panics if no UIDVALIDITY data was received.
    #[must_use]
    #[track_caller]
    pub fn uid_validity(&self) -> u32 {
        self.require(ResponseType::UID_VALIDITY, "uid_validity");
        self.uid_validity
    }

    /// Returns the UNSEEN value.
    ///
    /// # Panics
    ///
    /// Panics if no UNSEEN data was received.
    #[must_use]
    #[track_caller]
    pub fn unseen(&self) -> u32 {
        self.require(ResponseType::UNSEEN, "unseen");
        self.unseen
    }

    /// Returns the mailbox FLAGS list.
    ///
    /// # Panics
    ///
    /// Panics if no FLAGS data was received.
    #[must_use]
    #[track_caller]
    pub fn flags(&self) -> &Flags {
        self.require(ResponseType::FLAGS, "flags");
        &self.flags
    }

    /// Returns the PERMANENTFLAGS list.
    ///
    /// # Panics
    ///
    /// Panics if no PERMANENTFLAGS data was received.
    #[must_use]
    #[track_caller]
    pub fn permanent_flags(&self) -> &Flags {
        self.require(ResponseType::PERMANENT_FLAGS, "permanent_flags");
        &self.permanent_flags
    }

    /// Returns the BYE text, which the server may omit.
    ///
    /// # Panics
    ///
    /// Panics if no BYE was received.
    #[must_use]
    #[track_caller]
    pub fn bye_message(&self) -> Option<&str> {
        self.require(ResponseType::BYE, "bye_message");
        self.bye_message.as_deref()
    }

    /// Returns the capability list, if received.
    #[must_use]
    pub fn try_capabilities(&self) -> Option<&[String]> {
        self.present(ResponseType::CAPABILITY, self.capabilities.as_slice())
    }

    /// Returns the LIST rows, if any were received.
    #[must_use]
    pub fn try_list_items(&self) -> Option<&[ListItem]> {
        self.present(ResponseType::LIST, self.list_items.as_slice())
    }

    /// Returns the EXISTS count, if received.
    #[must_use]
    pub fn try_exists(&self) -> Option<u32> {
        self.present(ResponseType::EXISTS, self.exists)
    }

    /// Returns the RECENT count, if received.
    #[must_use]
    pub fn try_recent(&self) -> Option<u32> {
        self.present(ResponseType::RECENT, self.recent)
    }

    /// Returns the UIDNEXT value, if received.
    #[must_use]
    pub fn try_uid_next(&self) -> Option<u32> {
        self.present(ResponseType::UID_NEXT, self.uid_next)
    }

    /// Returns the UIDVALIDITY value, if received.
    #[must_use]
    pub fn try_uid_validity(&self) -> Option<u32> {
        self.present(ResponseType::UID_VALIDITY, self.uid_validity)
    }

    /// Returns the UNSEEN value, if received.
    #[must_use]
    pub fn try_unseen(&self) -> Option<u32> {
        self.present(ResponseType::UNSEEN, self.unseen)
    }

    /// Returns the mailbox FLAGS list, if received.
    #[must_use]
    pub fn try_flags(&self) -> Option<&Flags> {
        self.present(ResponseType::FLAGS, &self.flags)
    }

    /// Returns the PERMANENTFLAGS list, if received.
    #[must_use]
    pub fn try_permanent_flags(&self) -> Option<&Flags> {
        self.present(ResponseType::PERMANENT_FLAGS, &self.permanent_flags)
    }

    /// Returns the BYE text, if a BYE was received.
    ///
    /// The outer `Option` tracks presence of the BYE, the inner one whether
    /// the server attached text to it.
    #[must_use]
    pub fn try_bye_message(&self) -> Option<Option<&str>> {
        self.present(ResponseType::BYE, self.bye_message.as_deref())
    }

    /// Returns true if a BYE notice was received.
    #[must_use]
    pub const fn is_bye(&self) -> bool {
        self.response_type.contains(ResponseType::BYE)
    }

    /// Returns true if the capability list contains `capability`.
    ///
    /// Returns false when no CAPABILITY data was received.
    #[must_use]
    pub fn supports(&self, capability: &Capability) -> bool {
        self.try_capabilities()
            .is_some_and(|caps| caps.iter().any(|c| Capability::parse(c) == *capability))
    }
}
