// src/core/plugin/mod.rs

//! The plugin seam: a long-lived registry entry owning a family of related
//! commands.
//!
//! A plugin carries identity (name, version) and a command factory. The
//! factory is total: for any method line it either constructs the bound
//! command or answers "not mine" — it never fails on unrecognized input,
//! since the registry asks every plugin in turn.

pub mod core;
pub mod messages;

pub use self::core::CorePlugin;
pub use self::messages::MessagesPlugin;

use crate::core::Command;
use crate::core::protocol::Request;
use indexmap::IndexMap;

/// A process-wide registry entry owning a family of commands.
///
/// Plugins hold no per-request state; each call to [`Plugin::get_command`]
/// constructs a fresh, single-use [`Command`] bound to that request.
pub trait Plugin {
    /// Stable plugin name.
    fn name(&self) -> &'static str;

    /// Plugin version string.
    fn version(&self) -> &'static str;

    /// The method lines this plugin answers to, consulted at registration
    /// time to reject cross-plugin collisions.
    fn method_names(&self) -> &'static [&'static str];

    /// Matches the request's method line (case-insensitively) against this
    /// plugin's commands and constructs the bound command on a hit. Must not
    /// mutate the request.
    fn get_command(&self, request: &Request) -> Option<Command>;

    /// Introspection mapping for a host-level capabilities endpoint.
    fn info(&self) -> IndexMap<String, String> {
        let mut info = IndexMap::new();
        info.insert("name".to_string(), self.name().to_string());
        info.insert("version".to_string(), self.version().to_string());
        info
    }

    /// Advisory hint the store-level conflict resolver may consult when two
    /// concurrently committing transactions touch `table_name`. This is a
    /// policy hint, not a lock the plugin manages.
    fn should_lock_commit_page_on_table_conflict(&self, _table_name: &str) -> bool {
        false
    }
}

/// Case-insensitive method-line comparison, the one matching rule every
/// plugin factory uses.
pub fn method_matches(method_line: &str, candidate: &str) -> bool {
    method_line.eq_ignore_ascii_case(candidate)
}
