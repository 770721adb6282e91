// src/core/handler/dispatcher.rs

//! The central component for routing requests to their plugins and driving
//! the two-phase execution protocol.
//!
//! The `Registry` is built once at startup (plugins registered in order,
//! method-line collisions rejected immediately) and is read-only for its
//! entire dispatch life — registration takes `&mut self`, dispatch takes
//! `&self`, so the borrow checker rules out registration while requests are
//! in flight. It is also the sole translator from a raised `CommandError`
//! into a wire error response, which guarantees that every dispatched
//! request yields exactly one response.

use crate::core::commands::{CommandExt, PeekOutcome};
use crate::core::plugin::Plugin;
use crate::core::protocol::{Request, Response};
use crate::core::storage::SqlSession;
use crate::core::{Command, CommandError};
use std::collections::HashMap;
use tracing::{debug, info, info_span, warn};

/// What the host must do with a dispatched command next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The response is final; hand it to the caller.
    Complete,
    /// The command needs a write transaction this node is not authorized to
    /// run; re-dispatch it on the node with write authority.
    Escalate,
}

/// The outcome of one dispatch attempt.
///
/// On [`Disposition::Escalate`] the response carries no result — the
/// authoritative response is produced by the node that runs `process`.
#[derive(Debug)]
pub struct Dispatched {
    pub response: Response,
    pub disposition: Disposition,
}

impl Dispatched {
    fn complete(response: Response) -> Self {
        Self {
            response,
            disposition: Disposition::Complete,
        }
    }

    fn escalate() -> Self {
        Self {
            response: Response::new(),
            disposition: Disposition::Escalate,
        }
    }
}

/// Phases of one dispatched request. Transitions only move forward; `Error`
/// absorbs from any phase after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatchPhase {
    Received,
    Resolved,
    Peeked,
    Processed,
    Done,
    Error,
}

/// The process-wide plugin table and dispatch entry point.
#[derive(Default)]
pub struct Registry {
    plugins: Vec<Box<dyn Plugin>>,
    /// Lowercased method line -> index into `plugins`, for collision checks.
    methods: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plugin at startup. A method line already claimed by an earlier
    /// plugin is a configuration error, rejected here rather than resolved at
    /// dispatch time; on rejection the registry is left unchanged.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> Result<(), CommandError> {
        for method in plugin.method_names() {
            let key = method.to_ascii_lowercase();
            if let Some(&owner) = self.methods.get(&key) {
                return Err(CommandError::MethodCollision {
                    method: (*method).to_string(),
                    first: self.plugins[owner].name().to_string(),
                    second: plugin.name().to_string(),
                });
            }
        }

        let index = self.plugins.len();
        for method in plugin.method_names() {
            self.methods.insert(method.to_ascii_lowercase(), index);
        }
        info!(
            plugin = plugin.name(),
            version = plugin.version(),
            "registered plugin"
        );
        self.plugins.push(plugin);
        Ok(())
    }

    /// The registered plugins, in registration order (capabilities endpoint
    /// food).
    pub fn plugins(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins.iter().map(|plugin| plugin.as_ref())
    }

    /// Asks each plugin in registration order for a command bound to this
    /// request; the first match wins.
    fn resolve(&self, request: &Request) -> Option<Command> {
        self.plugins
            .iter()
            .find_map(|plugin| plugin.get_command(request))
    }

    /// Full two-phase execution on the node with write authority. Always
    /// yields a final response: peek, then process when peek did not
    /// terminate, with any raised error translated into an error response.
    pub fn dispatch(&self, request: &Request, db: &mut dyn SqlSession) -> Dispatched {
        let span = info_span!("command", method = %request.method_line());
        let _guard = span.enter();

        let mut phase = DispatchPhase::Received;
        debug!(?phase, "request received");

        let Some(mut command) = self.resolve(request) else {
            return Dispatched::complete(Self::unrecognized(request));
        };
        phase = DispatchPhase::Resolved;
        debug!(command = command.name(), ?phase, "command resolved");

        let outcome = match command.peek(&*db) {
            Ok(outcome) => outcome,
            Err(e) => return Dispatched::complete(Self::failed(&command, phase, &e)),
        };
        phase = DispatchPhase::Peeked;
        debug!(?phase, ?outcome, "peek finished");

        if outcome == PeekOutcome::Continue {
            if let Err(e) = command.process(db) {
                return Dispatched::complete(Self::failed(&command, phase, &e));
            }
            phase = DispatchPhase::Processed;
            debug!(?phase, "process finished");
        }

        phase = DispatchPhase::Done;
        debug!(?phase, "command finished");
        Dispatched::complete(command.into_response())
    }

    /// Replica-side evaluation: resolution plus the read-only peek phase.
    /// Commands whose outcome peek fully determines come back `Complete`;
    /// commands needing a write come back `Escalate` so the host can re-run
    /// them on the write-authorized node.
    pub fn peek(&self, request: &Request, db: &dyn SqlSession) -> Dispatched {
        let span = info_span!("command", method = %request.method_line());
        let _guard = span.enter();

        let Some(mut command) = self.resolve(request) else {
            return Dispatched::complete(Self::unrecognized(request));
        };
        debug!(command = command.name(), "command resolved");

        match command.peek(db) {
            Ok(PeekOutcome::Terminal) => {
                debug!("peek terminal");
                Dispatched::complete(command.into_response())
            }
            Ok(PeekOutcome::Continue) => {
                debug!("peek continue, escalating");
                Dispatched::escalate()
            }
            Err(e) => Dispatched::complete(Self::failed(&command, DispatchPhase::Resolved, &e)),
        }
    }

    /// The generated response for a method line no plugin claims.
    fn unrecognized(request: &Request) -> Response {
        let err = CommandError::UnknownMethod(request.method_line().to_string());
        warn!(method = request.method_line(), "unrecognized method line");
        Response::error(err.status(), err.to_string())
    }

    /// Translates a raised error into the one response the caller sees. The
    /// command's own response is discarded wholesale, so a failed phase can
    /// never leak partial success-shaped attributes.
    fn failed(command: &Command, phase: DispatchPhase, err: &CommandError) -> Response {
        let entered = DispatchPhase::Error;
        if err.is_client_error() {
            debug!(command = command.name(), ?phase, ?entered, error = %err, "command rejected");
        } else {
            warn!(command = command.name(), ?phase, ?entered, error = %err, "command failed");
        }
        Response::error(err.status(), err.to_string())
    }
}
