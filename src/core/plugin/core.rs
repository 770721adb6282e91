// src/core/plugin/core.rs

use super::{Plugin, method_matches};
use crate::core::Command;
use crate::core::commands::generic::HelloWorld;
use crate::core::protocol::Request;

const NAME: &str = "core";
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The built-in plugin owning the store-free liveness commands.
#[derive(Debug, Default)]
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn name(&self) -> &'static str {
        NAME
    }

    fn version(&self) -> &'static str {
        VERSION
    }

    fn method_names(&self) -> &'static [&'static str] {
        &["HelloWorld"]
    }

    fn get_command(&self, request: &Request) -> Option<Command> {
        if method_matches(request.method_line(), "HelloWorld") {
            return Some(Command::HelloWorld(HelloWorld::new(
                request.clone(),
                NAME,
                VERSION,
            )));
        }

        // Not our command.
        None
    }
}
