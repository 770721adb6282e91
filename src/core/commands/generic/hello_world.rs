// src/core/commands/generic/hello_world.rs

use crate::core::CommandError;
use crate::core::commands::command_trait::{CommandExt, PeekOutcome};
use crate::core::commands::helpers::now_micros;
use crate::core::protocol::{Request, Response};
use crate::core::storage::SqlSession;
use tracing::info;

/// Represents the `HelloWorld` command: a store-free liveness check that
/// greets the caller and echoes the plugin's identity.
#[derive(Debug)]
pub struct HelloWorld {
    request: Request,
    response: Response,
    plugin_name: &'static str,
    plugin_version: &'static str,
}

impl HelloWorld {
    pub fn new(request: Request, plugin_name: &'static str, plugin_version: &'static str) -> Self {
        Self {
            request,
            response: Response::new(),
            plugin_name,
            plugin_version,
        }
    }

    fn build_response(&mut self) {
        let name = self.request.get("name");
        let name = if name.is_empty() { "World" } else { name };
        let greeting = format!("Hello, {name}!");
        info!(name, "hello world executed");

        self.response.set("message", greeting);
        self.response.set("from", self.plugin_name);
        self.response.set("timestamp", now_micros().to_string());
        self.response.set("pluginVersion", self.plugin_version);
    }
}

impl CommandExt for HelloWorld {
    fn name(&self) -> &'static str {
        "HelloWorld"
    }

    fn description(&self) -> &'static str {
        "A simple hello world command for the core plugin"
    }

    fn request(&self) -> &Request {
        &self.request
    }

    fn into_response(self) -> Response {
        self.response
    }

    fn peek(&mut self, _db: &dyn SqlSession) -> Result<PeekOutcome, CommandError> {
        // Never needs the store, so the outcome is decided entirely here.
        self.build_response();
        Ok(PeekOutcome::Terminal)
    }

    fn process(&mut self, _db: &mut dyn SqlSession) -> Result<(), CommandError> {
        self.build_response();
        Ok(())
    }
}
