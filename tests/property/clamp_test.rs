// tests/property/clamp_test.rs

//! Property-based tests for the `GetMessages` limit clamp.
//! Whatever the caller supplies, the bound reaching the store stays inside
//! `[1, 100]`, and an absent limit is exactly the default of 20.

use opaldb::core::CommandError;
use opaldb::core::commands::command_trait::{CommandExt, PeekOutcome};
use opaldb::core::commands::messages::GetMessages;
use opaldb::core::protocol::Request;
use opaldb::core::storage::{SqlResult, SqlSession};
use proptest::prelude::*;
use std::cell::RefCell;

/// A stub session that records the query text instead of executing it.
struct RecordingSession {
    last_query: RefCell<Option<String>>,
}

impl RecordingSession {
    fn new() -> Self {
        Self {
            last_query: RefCell::new(None),
        }
    }

    /// The LIMIT value of the last recorded query.
    fn effective_limit(&self) -> i64 {
        let query = self.last_query.borrow();
        let query = query.as_ref().expect("a query was recorded");
        let (_, tail) = query.rsplit_once("LIMIT ").expect("query has a LIMIT");
        tail.trim_end_matches(';').trim().parse().expect("numeric LIMIT")
    }
}

impl SqlSession for RecordingSession {
    fn read(&self, query: &str) -> Result<SqlResult, CommandError> {
        *self.last_query.borrow_mut() = Some(query.to_string());
        Ok(SqlResult::default())
    }

    fn write(&mut self, _query: &str) -> Result<(), CommandError> {
        Ok(())
    }

    fn last_insert_rowid(&self) -> i64 {
        0
    }
}

fn effective_limit_for(limit: Option<&str>) -> i64 {
    let mut request = Request::new("GetMessages");
    if let Some(limit) = limit {
        request.set("limit", limit);
    }

    let session = RecordingSession::new();
    let mut command = GetMessages::new(request);
    assert_eq!(command.peek(&session).unwrap(), PeekOutcome::Terminal);
    session.effective_limit()
}

#[test]
fn test_absent_limit_is_exactly_the_default() {
    assert_eq!(effective_limit_for(None), 20);
}

#[test]
fn test_empty_limit_is_exactly_the_default() {
    assert_eq!(effective_limit_for(Some("")), 20);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_any_numeric_limit_is_clamped(limit in any::<i64>()) {
        let effective = effective_limit_for(Some(&limit.to_string()));
        prop_assert!((1..=100).contains(&effective));
    }

    #[test]
    fn test_in_range_limits_pass_through(limit in 1i64..=100) {
        let effective = effective_limit_for(Some(&limit.to_string()));
        prop_assert_eq!(effective, limit);
    }

    #[test]
    fn test_arbitrary_limit_strings_never_escape_bounds(limit in "[ -~]{0,32}") {
        let effective = effective_limit_for(if limit.is_empty() {
            None
        } else {
            Some(limit.as_str())
        });
        prop_assert!((1..=100).contains(&effective));
    }
}
