// src/core/commands/command_trait.rs

//! Defines the core trait for all executable commands: the two-phase
//! peek/process contract.

use crate::core::CommandError;
use crate::core::protocol::{Request, Response};
use crate::core::storage::SqlSession;

/// The outcome of the peek phase, as a first-class value.
///
/// This is what lets the host run `peek` on any replica: `Terminal` means the
/// command's outcome is fully determined without a write transaction, while
/// `Continue` means it must be escalated to the node with write authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeekOutcome {
    /// The outcome is complete; no write phase is needed.
    Terminal,
    /// A write transaction is required; `process` must still run.
    Continue,
}

/// The contract every command implements, and which the `Command` enum
/// delegates to.
///
/// A command is a transient, single-use object: it owns the one `Request` it
/// was created for and the `Response` it builds, and is discarded once the
/// dispatcher has extracted that response.
///
/// Phase discipline is enforced by the receiver types: `peek` sees the store
/// through `&dyn SqlSession` and therefore cannot reach its mutating methods,
/// making it safe to evaluate on any number of replicas in parallel. `process`
/// is the only phase handed `&mut dyn SqlSession`, and it always runs inside a
/// transaction boundary owned by the caller.
pub trait CommandExt {
    /// Stable command name for logging and introspection.
    fn name(&self) -> &'static str;

    /// One-line human description.
    fn description(&self) -> &'static str;

    /// The request this command is bound to.
    fn request(&self) -> &Request;

    /// Consumes the command and yields the response built so far.
    fn into_response(self) -> Response;

    /// Read-only evaluation. Must be idempotent and side-effect-free on
    /// persisted state; it may populate the response. Input validation runs
    /// here, before any store access.
    fn peek(&mut self, db: &dyn SqlSession) -> Result<PeekOutcome, CommandError>;

    /// Committing evaluation, invoked only after `peek` returned
    /// [`PeekOutcome::Continue`]. Re-validates input (the two phases may run
    /// on different nodes at different times), performs exactly the needed
    /// mutations, and populates the response with the authoritative result.
    /// Must be safe to re-run from `peek` if the surrounding transaction is
    /// retried.
    fn process(&mut self, db: &mut dyn SqlSession) -> Result<(), CommandError>;
}
