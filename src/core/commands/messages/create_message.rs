// src/core/commands/messages/create_message.rs

use crate::config::Limits;
use crate::core::CommandError;
use crate::core::commands::command_trait::{CommandExt, PeekOutcome};
use crate::core::commands::helpers::{now_micros, verify_attribute_size};
use crate::core::protocol::{Request, Response};
use crate::core::storage::{SqlSession, quote};
use tracing::warn;

/// Represents the `CreateMessage` command: a validated insert into the
/// `messages` table.
#[derive(Debug)]
pub struct CreateMessage {
    request: Request,
    response: Response,
    limits: Limits,
}

impl CreateMessage {
    pub fn new(request: Request, limits: Limits) -> Self {
        Self {
            request,
            response: Response::new(),
            limits,
        }
    }

    /// Both phases run this before touching the store; they may execute on
    /// different nodes at different times, so neither trusts the other.
    fn validate_request(&self) -> Result<(), CommandError> {
        verify_attribute_size(&self.request, "name", 1, self.limits.max_size_small)?;
        verify_attribute_size(&self.request, "message", 1, self.limits.max_size_query)?;
        Ok(())
    }
}

impl CommandExt for CreateMessage {
    fn name(&self) -> &'static str {
        "CreateMessage"
    }

    fn description(&self) -> &'static str {
        "Stores one message row after validating its attributes"
    }

    fn request(&self) -> &Request {
        &self.request
    }

    fn into_response(self) -> Response {
        self.response
    }

    fn peek(&mut self, _db: &dyn SqlSession) -> Result<PeekOutcome, CommandError> {
        self.validate_request()?;
        // An insert is always required, so the outcome can never be decided here.
        Ok(PeekOutcome::Continue)
    }

    fn process(&mut self, db: &mut dyn SqlSession) -> Result<(), CommandError> {
        self.validate_request()?;

        let name = self.request.get("name").to_string();
        let message = self.request.get("message").to_string();
        let created_at = now_micros();

        let insert = format!(
            "INSERT INTO messages (name, message, createdAt) VALUES ({}, {}, {created_at});",
            quote(&name),
            quote(&message),
        );
        db.write(&insert).map_err(|e| {
            warn!(error = %e, "message insert failed");
            CommandError::StoreWrite("Failed to insert message".to_string())
        })?;

        let message_id = db.last_insert_rowid();
        if message_id <= 0 {
            return Err(CommandError::RowIdUnavailable);
        }

        self.response.set("result", "stored");
        self.response.set("messageID", message_id.to_string());
        self.response.set("name", name);
        self.response.set("message", message);
        self.response.set("createdAt", created_at.to_string());
        Ok(())
    }
}
