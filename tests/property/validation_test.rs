// tests/property/validation_test.rs

//! Property-based tests for `CreateMessage` validation bounds and the
//! insert/read round trip.

use opaldb::config::Limits;
use opaldb::core::commands::command_trait::{CommandExt, PeekOutcome};
use opaldb::core::commands::messages::{CreateMessage, GetMessages};
use opaldb::core::protocol::Request;
use opaldb::core::storage::{SqlSession, SqliteSession};
use proptest::prelude::*;

const LIMITS: Limits = Limits {
    max_size_small: 16,
    max_size_query: 64,
};

fn session_with_schema() -> SqliteSession {
    let mut session = SqliteSession::in_memory().expect("in-memory database");
    session
        .write(
            "CREATE TABLE messages ( \
                messageID INTEGER PRIMARY KEY, \
                name TEXT NOT NULL, \
                message TEXT NOT NULL, \
                createdAt INTEGER NOT NULL \
            );",
        )
        .expect("create schema");
    session
}

fn request(name: &str, message: &str) -> Request {
    Request::new("CreateMessage")
        .with_attribute("name", name)
        .with_attribute("message", message)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 50, // Each case opens its own database.
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_in_bounds_input_always_validates(
        name in "[a-zA-Z0-9]{1,16}",
        message in "[ -~]{1,64}",
    ) {
        let session = session_with_schema();
        let mut command = CreateMessage::new(request(&name, &message), LIMITS);
        prop_assert_eq!(command.peek(&session).unwrap(), PeekOutcome::Continue);
    }

    #[test]
    fn test_oversized_name_always_rejected(
        name in "[a-zA-Z0-9]{17,48}",
        message in "[ -~]{1,64}",
    ) {
        let session = session_with_schema();
        let mut command = CreateMessage::new(request(&name, &message), LIMITS);
        let err = command.peek(&session).unwrap_err();
        prop_assert_eq!(err.status(), 402);
    }

    #[test]
    fn test_oversized_message_always_rejected(
        name in "[a-zA-Z0-9]{1,16}",
        message in "[ -~]{65,128}",
    ) {
        let session = session_with_schema();
        let mut command = CreateMessage::new(request(&name, &message), LIMITS);
        let err = command.peek(&session).unwrap_err();
        prop_assert_eq!(err.status(), 402);
    }

    #[test]
    fn test_stored_message_round_trips(
        name in "[a-zA-Z0-9]{1,16}",
        message in "[ -~]{1,64}",
    ) {
        let mut session = session_with_schema();

        let mut create = CreateMessage::new(request(&name, &message), LIMITS);
        create.process(&mut session).unwrap();
        let stored_id = create.into_response().get("messageID").to_string();

        let mut get = GetMessages::new(Request::new("GetMessages"));
        get.peek(&session).unwrap();
        let response = get.into_response();

        let rows: Vec<serde_json::Value> =
            serde_json::from_str(response.get("messages")).unwrap();
        prop_assert_eq!(rows[0]["messageID"].as_str().unwrap(), stored_id.as_str());
        prop_assert_eq!(rows[0]["name"].as_str().unwrap(), name.as_str());
        prop_assert_eq!(rows[0]["message"].as_str().unwrap(), message.as_str());
    }
}
