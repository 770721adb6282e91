// src/core/handler/mod.rs

pub mod dispatcher;

pub use dispatcher::{Dispatched, Disposition, Registry};
