// tests/integration/messages_test.rs

//! End-to-end tests for the message-store handlers dispatched through the
//! registry.

use super::test_helpers::TestContext;
use opaldb::config::Limits;
use opaldb::core::protocol::Request;
use opaldb::Disposition;
use serde_json::Value;

fn messages_array(response: &opaldb::core::Response) -> Vec<Value> {
    serde_json::from_str(response.get("messages")).expect("valid JSON array")
}

#[test]
fn test_created_message_round_trips_through_get() {
    let mut ctx = TestContext::new();

    let created = ctx.create_message("A", "B");
    assert!(created.response.is_ok());
    let id = created.response.get("messageID").to_string();

    let fetched = ctx.get_messages(None);
    let rows = messages_array(&fetched.response);
    assert_eq!(rows[0]["messageID"].as_str().unwrap(), id);
    assert_eq!(rows[0]["name"], "A");
    assert_eq!(rows[0]["message"], "B");
}

#[test]
fn test_three_inserts_limit_two_returns_newest_first() {
    let mut ctx = TestContext::new();
    ctx.create_message("a", "first");
    ctx.create_message("b", "second");
    ctx.create_message("c", "third");

    let fetched = ctx.get_messages(Some("2"));
    assert_eq!(fetched.response.get("resultCount"), "2");

    let rows = messages_array(&fetched.response);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["message"], "third");
    assert_eq!(rows[1]["message"], "second");
}

#[test]
fn test_message_ids_increase_across_sequential_dispatches() {
    let mut ctx = TestContext::new();
    let first: i64 = ctx
        .create_message("a", "x")
        .response
        .get("messageID")
        .parse()
        .unwrap();
    let second: i64 = ctx
        .create_message("b", "y")
        .response
        .get("messageID")
        .parse()
        .unwrap();

    assert!(first > 0);
    assert!(second > first);
}

#[test]
fn test_repeated_reads_are_identical_without_writes() {
    let mut ctx = TestContext::new();
    ctx.create_message("a", "x");
    ctx.create_message("b", "y");

    let first = ctx.get_messages(Some("10"));
    let second = ctx.get_messages(Some("10"));
    assert_eq!(first.response, second.response);
}

#[test]
fn test_replica_escalation_then_leader_commit() {
    let mut ctx = TestContext::new();
    let request = Request::new("CreateMessage")
        .with_attribute("name", "alice")
        .with_attribute("message", "hi");

    // On a replica the write command escalates without touching the store.
    let peeked = ctx.peek(&request);
    assert_eq!(peeked.disposition, Disposition::Escalate);
    assert_eq!(ctx.message_count(), 0);

    // The write-authorized node then runs the full protocol.
    let dispatched = ctx.dispatch(&request);
    assert_eq!(dispatched.disposition, Disposition::Complete);
    assert_eq!(ctx.message_count(), 1);

    // And replicas can serve the read from then on.
    let fetched = ctx.peek(&Request::new("GetMessages"));
    assert_eq!(fetched.disposition, Disposition::Complete);
    assert_eq!(fetched.response.get("resultCount"), "1");
}

#[test]
fn test_validation_failure_leaves_store_untouched_end_to_end() {
    let mut ctx = TestContext::with_limits(Limits {
        max_size_small: 4,
        max_size_query: 16,
    });

    let rejected = ctx.create_message("toolongname", "hi");
    assert_eq!(rejected.response.status_line(), "402 name is too long");
    assert_eq!(ctx.message_count(), 0);

    let fetched = ctx.get_messages(None);
    assert_eq!(fetched.response.get("resultCount"), "0");
}

#[test]
fn test_wire_level_round_trip() {
    let mut ctx = TestContext::new();

    let request =
        Request::parse("CreateMessage\nname: alice\nmessage: hello over the wire\n\n").unwrap();
    let dispatched = ctx.dispatch(&request);

    let wire = dispatched.response.to_string();
    assert!(wire.starts_with("200 OK\n"));
    assert!(wire.contains("result: stored\n"));
    assert!(wire.contains("messageID: 1\n"));
    assert!(wire.ends_with("\n\n"));
}

#[test]
fn test_unknown_attributes_are_ignored() {
    let mut ctx = TestContext::new();
    let request = Request::new("CreateMessage")
        .with_attribute("name", "alice")
        .with_attribute("message", "hi")
        .with_attribute("color", "purple");

    let dispatched = ctx.dispatch(&request);
    assert!(dispatched.response.is_ok());
    assert!(!dispatched.response.has("color"));
}

#[test]
fn test_capabilities_surface_lists_plugins() {
    let ctx = TestContext::new();
    let infos: Vec<_> = ctx.registry.plugins().map(|p| p.info()).collect();

    assert_eq!(infos.len(), 2);
    assert_eq!(infos[0].get("name").unwrap(), "core");
    assert_eq!(infos[1].get("name").unwrap(), "messages");
    assert!(infos.iter().all(|i| i.contains_key("version")));
}
