//! Integration tests for response accumulation and tag routing.
//!
//! These drive the public API the way a parser and connection layer would,
//! without a real server.

#![allow(clippy::unwrap_used, clippy::unreadable_literal)]

use std::time::Duration;

use proptest::prelude::*;

use mailtag_imap::{
    Capability, CommandType, Continuation, Error, EventLoop, FinalResponse, ListItem,
    MailboxFlags, PendingCommands, Promise, Response, ResponseData, ResponseType, Status, Tag,
    WaitConfig,
};

#[test]
fn test_exists_presence() {
    let mut data = ResponseData::new();
    assert!(!data.contains_response_type(ResponseType::EXISTS));

    data.set_exists(42);
    assert!(data.contains_response_type(ResponseType::EXISTS));
    assert_eq!(data.exists(), 42);
}

#[test]
fn test_final_response_with_capabilities() {
    let mut data = ResponseData::new();
    data.add_capabilities(vec!["IMAP4rev1".to_string(), "IDLE".to_string()]);
    data.set_uid_validity(12345);
    let resp = FinalResponse::new(Status::Ok, Tag::new(7), "CAPABILITY completed", data);

    assert_eq!(resp.status(), Status::Ok);
    assert_eq!(resp.tag(), Tag::new(7));
    assert_eq!(resp.data().capabilities(), ["IMAP4rev1", "IDLE"]);
    assert_eq!(resp.data().uid_validity(), 12345);
    assert_eq!(
        resp.data().response_type(),
        ResponseType::CAPABILITY | ResponseType::UID_VALIDITY
    );
    assert!(resp.data().supports(&Capability::Idle));
}

#[test]
fn test_map_chain_without_event_loop() {
    let source: Promise<i32> = Promise::new();
    let doubled = source.map(|x| x * 2);
    source.resolve(21).unwrap();

    assert!(doubled.is_resolved());
    let inspected = doubled.map(|x| *x);
    assert_eq!(inspected.inspect(|x| *x), Some(42));
}

#[test]
fn test_list_items_in_insertion_order() {
    let rows = vec![
        ListItem::new(
            MailboxFlags::from_attributes(["\\HasNoChildren"]),
            "/",
            "INBOX",
        ),
        ListItem::new(
            MailboxFlags::from_attributes(["\\HasChildren", "\\Noselect"]),
            "/",
            "[Gmail]",
        ),
        ListItem::new(
            MailboxFlags::from_attributes(["\\HasNoChildren", "\\Trash"]),
            "/",
            "[Gmail]/Trash",
        ),
    ];

    let mut data = ResponseData::new();
    for row in rows.clone() {
        data.add_list_item(row);
    }

    assert_eq!(data.list_items(), rows.as_slice());
    assert!(!data.list_items()[1].flags.is_selectable());
    assert!(data.list_items()[2].flags.contains(MailboxFlags::TRASH));
}

#[test]
fn test_select_round_trip_through_registry() {
    let event_loop = EventLoop::new().unwrap();
    let mut pending = PendingCommands::default();

    let (select, reply) = pending
        .issue(CommandType::Select, vec!["INBOX".to_string()])
        .unwrap();
    let counts = reply.map(|resp: &Response| {
        resp.as_final()
            .map(|f| (f.data().exists(), f.data().try_recent()))
    });

    // Parser output for:
    //   * FLAGS (\Answered \Flagged \Deleted \Seen \Draft)
    //   * OK [PERMANENTFLAGS (\Deleted \Seen \*)] Limited
    //   * 172 EXISTS
    //   * 1 RECENT
    //   * OK [UIDVALIDITY 3857529045] UIDs valid
    //   * OK [UIDNEXT 4392] Predicted next UID
    //   1 OK [READ-WRITE] SELECT completed
    let mut data = ResponseData::new();
    data.set_flags(
        ["\\Answered", "\\Flagged", "\\Deleted", "\\Seen", "\\Draft"]
            .into_iter()
            .collect(),
    );
    data.set_permanent_flags(["\\Deleted", "\\Seen", "\\*"].into_iter().collect());
    data.set_exists(172);
    data.set_recent(1);
    data.set_uid_validity(3857529045);
    data.set_uid_next(4392);
    pending
        .dispatch(FinalResponse::new(Status::Ok, select.tag, "SELECT completed", data).into())
        .unwrap();

    assert_eq!(
        event_loop.wait(&counts, &WaitConfig::default()).unwrap(),
        Some((172, Some(1)))
    );

    let resp = event_loop
        .wait(&reply, &WaitConfig::default())
        .unwrap()
        .into_final()
        .unwrap();
    assert_eq!(resp.data().uid_next(), 4392);
    assert!(resp.data().permanent_flags().allows_new_keywords());
    assert!(!resp.data().contains_response_type(ResponseType::UNSEEN));
    assert_eq!(pending.in_flight_count(), 0);
}

#[test]
fn test_protocol_failure_is_data() {
    let mut pending = PendingCommands::default();
    let (login, reply) = pending
        .issue(
            CommandType::Login,
            vec!["user".to_string(), "wrong".to_string()],
        )
        .unwrap();

    pending
        .dispatch(
            FinalResponse::new(
                Status::No,
                login.tag,
                "[AUTHENTICATIONFAILED] Invalid credentials",
                ResponseData::new(),
            )
            .into(),
        )
        .unwrap();

    let resp = reply.try_take().unwrap().into_final().unwrap();
    assert_eq!(resp.status(), Status::No);
    assert!(matches!(resp.into_result(), Err(Error::No(_))));
}

#[test]
fn test_continuation_then_completion() {
    let event_loop = EventLoop::new().unwrap();
    let mut pending = PendingCommands::default();
    let (login, reply) = pending.issue(CommandType::Login, Vec::new()).unwrap();

    pending.dispatch(Continuation::new("").into()).unwrap();
    let prompt = event_loop.wait(&reply, &WaitConfig::default()).unwrap();
    assert!(prompt.is_continuation());

    let completion = pending.promise(login.tag).unwrap();
    pending
        .dispatch(FinalResponse::new(Status::Ok, login.tag, "LOGIN completed", ResponseData::new()).into())
        .unwrap();
    let done = event_loop.wait(&completion, &WaitConfig::default()).unwrap();
    assert_eq!(done.tag(), Some(login.tag));
}

#[test]
fn test_continuation_reaches_login_pipelined_behind_noop() {
    let mut pending = PendingCommands::default();
    let (noop, noop_reply) = pending.issue(CommandType::Noop, Vec::new()).unwrap();
    let (login, login_reply) = pending
        .issue(CommandType::Login, vec!["user".to_string(), "{8}".to_string()])
        .unwrap();

    pending
        .dispatch(Continuation::new("send literal").into())
        .unwrap();
    assert!(login_reply.try_take().unwrap().is_continuation());
    assert!(!noop_reply.is_resolved());

    pending
        .dispatch(FinalResponse::new(Status::Ok, noop.tag, "NOOP completed", ResponseData::new()).into())
        .unwrap();
    assert_eq!(noop_reply.try_take().unwrap().tag(), Some(noop.tag));

    let completion = pending.promise(login.tag).unwrap();
    pending
        .dispatch(FinalResponse::new(Status::Ok, login.tag, "LOGIN completed", ResponseData::new()).into())
        .unwrap();
    assert_eq!(completion.try_take().unwrap().tag(), Some(login.tag));
}

#[test]
fn test_bye_is_reported_as_data() {
    let mut pending = PendingCommands::default();
    let (logout, reply) = pending.issue(CommandType::Logout, Vec::new()).unwrap();

    let mut data = ResponseData::new();
    data.set_bye(Some("IMAP4rev1 Server logging out".to_string()));
    pending
        .dispatch(FinalResponse::new(Status::Ok, logout.tag, "LOGOUT completed", data).into())
        .unwrap();

    let resp = reply.try_take().unwrap().into_final().unwrap();
    assert!(resp.is_ok());
    assert_eq!(
        resp.data().bye_message(),
        Some("IMAP4rev1 Server logging out")
    );
}

#[test]
fn test_resolution_from_event_loop_task() {
    let event_loop = EventLoop::new().unwrap();
    let mut pending = PendingCommands::default();
    let (noop, reply) = pending.issue(CommandType::Noop, Vec::new()).unwrap();

    // Stand-in for the reader task: it resolves after a delay, on the loop.
    let resolver = reply.clone();
    event_loop.spawn(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        let resp = FinalResponse::new(Status::Ok, noop.tag, "NOOP completed", ResponseData::new());
        resolver.resolve(resp.into()).unwrap();
    });

    let config = WaitConfig::new()
        .timeout(Duration::from_secs(5))
        .warn_after(Duration::from_secs(1));
    let resp = event_loop.wait(&reply, &config).unwrap();
    assert!(resp.is_final());
}

#[test]
fn test_unresolved_wait_times_out() {
    let event_loop = EventLoop::new().unwrap();
    let mut pending = PendingCommands::default();
    let (noop, reply) = pending.issue(CommandType::Noop, Vec::new()).unwrap();

    let config = WaitConfig::new().timeout(Duration::from_millis(20));
    assert!(matches!(
        event_loop.wait(&reply, &config),
        Err(Error::Timeout(_))
    ));
    assert!(pending.is_in_flight(noop.tag));

    // A late completion still reaches the same promise.
    pending
        .dispatch(FinalResponse::new(Status::Ok, noop.tag, "NOOP completed", ResponseData::new()).into())
        .unwrap();
    assert!(event_loop.wait(&reply, &config).unwrap().is_final());
}

proptest! {
    #[test]
    fn list_items_preserve_arrival_order(
        rows in prop::collection::vec(("[a-z]{1,8}", 0u32..(1 << 14)), 0..20)
    ) {
        let mut data = ResponseData::new();
        let expected: Vec<ListItem> = rows
            .iter()
            .map(|(name, bits)| ListItem::new(MailboxFlags::from_bits_truncate(*bits), ".", name.as_str()))
            .collect();
        for item in expected.iter().cloned() {
            data.add_list_item(item);
        }

        if expected.is_empty() {
            prop_assert!(data.try_list_items().is_none());
        } else {
            prop_assert_eq!(data.list_items(), expected.as_slice());
        }
    }

    #[test]
    fn only_first_resolution_is_observed(values in prop::collection::vec(any::<u32>(), 1..8)) {
        let promise = Promise::new();
        let observed = promise.map(|v: &u32| *v);
        let mut iter = values.iter().copied();
        let first = iter.next().unwrap();
        prop_assert!(promise.resolve(first).is_ok());
        for later in iter {
            prop_assert_eq!(promise.resolve(later), Err(later));
        }
        prop_assert_eq!(observed.try_take(), Some(first));
        prop_assert_eq!(promise.try_take(), Some(first));
    }
}
