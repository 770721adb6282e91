// src/core/commands/messages/get_messages.rs

use crate::core::CommandError;
use crate::core::commands::command_trait::{CommandExt, PeekOutcome};
use crate::core::protocol::{Request, Response};
use crate::core::storage::SqlSession;
use serde_json::{Map, Value};
use tracing::{debug, warn};

const DEFAULT_LIMIT: i64 = 20;
const MIN_LIMIT: i64 = 1;
const MAX_LIMIT: i64 = 100;

/// Represents the `GetMessages` command: a bounded, ordered read of the most
/// recent messages, serialized as a JSON array.
#[derive(Debug)]
pub struct GetMessages {
    request: Request,
    response: Response,
}

impl GetMessages {
    pub fn new(request: Request) -> Self {
        Self {
            request,
            response: Response::new(),
        }
    }

    /// Shared by both phases: a pure read, so `peek` computes the full result
    /// and `process` would produce an identical one if ever invoked.
    fn build_response(&mut self, db: &dyn SqlSession) -> Result<(), CommandError> {
        let limit = self
            .request
            .calc("limit", DEFAULT_LIMIT)
            .clamp(MIN_LIMIT, MAX_LIMIT);

        let query = format!(
            "SELECT messageID, name, message, createdAt \
             FROM messages \
             ORDER BY messageID DESC \
             LIMIT {limit};"
        );
        let result = db.read(&query).map_err(|e| {
            warn!(error = %e, "message fetch failed");
            CommandError::StoreRead("Failed to fetch messages".to_string())
        })?;

        let mut rows: Vec<Value> = Vec::with_capacity(result.len());
        for row in result.iter() {
            // Tolerate store-shape drift: short rows are skipped, not fatal.
            if row.len() < 4 {
                debug!(columns = row.len(), "skipping short message row");
                continue;
            }
            let mut item = Map::new();
            item.insert("messageID".to_string(), Value::String(row[0].clone()));
            item.insert("name".to_string(), Value::String(row[1].clone()));
            item.insert("message".to_string(), Value::String(row[2].clone()));
            item.insert("createdAt".to_string(), Value::String(row[3].clone()));
            rows.push(Value::Object(item));
        }

        self.response.set("resultCount", rows.len().to_string());
        self.response.set("messages", serde_json::to_string(&rows)?);
        self.response.set("format", "json");
        Ok(())
    }
}

impl CommandExt for GetMessages {
    fn name(&self) -> &'static str {
        "GetMessages"
    }

    fn description(&self) -> &'static str {
        "Returns the most recent messages as a JSON array"
    }

    fn request(&self) -> &Request {
        &self.request
    }

    fn into_response(self) -> Response {
        self.response
    }

    fn peek(&mut self, db: &dyn SqlSession) -> Result<PeekOutcome, CommandError> {
        self.build_response(db)?;
        Ok(PeekOutcome::Terminal)
    }

    fn process(&mut self, db: &mut dyn SqlSession) -> Result<(), CommandError> {
        self.build_response(db)
    }
}
