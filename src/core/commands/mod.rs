// src/core/commands/mod.rs

//! This module defines all supported commands and the central `Command` enum
//! that encapsulates their parsed state.
//!
//! The set of commands is closed: one variant per concrete command, resolved
//! through the plugin registry by method name. Plugins construct variants;
//! the dispatcher only ever talks to the enum through `CommandExt`.

use crate::core::CommandError;
use crate::core::protocol::{Request, Response};
use crate::core::storage::SqlSession;

pub mod command_trait;
pub mod generic;
pub mod helpers;
pub mod messages;

pub use command_trait::{CommandExt, PeekOutcome};

use generic::HelloWorld;
use messages::{CreateMessage, GetMessages};

/// The closed set of executable commands.
#[derive(Debug)]
pub enum Command {
    HelloWorld(HelloWorld),
    CreateMessage(CreateMessage),
    GetMessages(GetMessages),
}

impl CommandExt for Command {
    fn name(&self) -> &'static str {
        match self {
            Command::HelloWorld(c) => c.name(),
            Command::CreateMessage(c) => c.name(),
            Command::GetMessages(c) => c.name(),
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Command::HelloWorld(c) => c.description(),
            Command::CreateMessage(c) => c.description(),
            Command::GetMessages(c) => c.description(),
        }
    }

    fn request(&self) -> &Request {
        match self {
            Command::HelloWorld(c) => c.request(),
            Command::CreateMessage(c) => c.request(),
            Command::GetMessages(c) => c.request(),
        }
    }

    fn into_response(self) -> Response {
        match self {
            Command::HelloWorld(c) => c.into_response(),
            Command::CreateMessage(c) => c.into_response(),
            Command::GetMessages(c) => c.into_response(),
        }
    }

    fn peek(&mut self, db: &dyn SqlSession) -> Result<PeekOutcome, CommandError> {
        match self {
            Command::HelloWorld(c) => c.peek(db),
            Command::CreateMessage(c) => c.peek(db),
            Command::GetMessages(c) => c.peek(db),
        }
    }

    fn process(&mut self, db: &mut dyn SqlSession) -> Result<(), CommandError> {
        match self {
            Command::HelloWorld(c) => c.process(db),
            Command::CreateMessage(c) => c.process(db),
            Command::GetMessages(c) => c.process(db),
        }
    }
}
