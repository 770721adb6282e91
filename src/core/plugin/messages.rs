// src/core/plugin/messages.rs

use super::{Plugin, method_matches};
use crate::config::Limits;
use crate::core::Command;
use crate::core::commands::messages::{CreateMessage, GetMessages};
use crate::core::protocol::Request;

const NAME: &str = "messages";
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The plugin owning the message-store commands: validated inserts and
/// bounded, ordered reads against the `messages` table.
///
/// The table itself (`messages(messageID INTEGER PRIMARY KEY, name, message,
/// createdAt)`) is created by host bootstrap, not by this plugin.
#[derive(Debug)]
pub struct MessagesPlugin {
    limits: Limits,
}

impl MessagesPlugin {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }
}

impl Plugin for MessagesPlugin {
    fn name(&self) -> &'static str {
        NAME
    }

    fn version(&self) -> &'static str {
        VERSION
    }

    fn method_names(&self) -> &'static [&'static str] {
        &["CreateMessage", "GetMessages"]
    }

    fn get_command(&self, request: &Request) -> Option<Command> {
        let method_line = request.method_line();

        if method_matches(method_line, "CreateMessage") {
            return Some(Command::CreateMessage(CreateMessage::new(
                request.clone(),
                self.limits,
            )));
        }
        if method_matches(method_line, "GetMessages") {
            return Some(Command::GetMessages(GetMessages::new(request.clone())));
        }

        // Not our command.
        None
    }

    fn should_lock_commit_page_on_table_conflict(&self, table_name: &str) -> bool {
        // Every CreateMessage lands on the same table, so concurrent commits
        // touching it contend on the same pages.
        table_name == "messages"
    }
}
