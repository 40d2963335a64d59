//! # Middleware Module
//!
//! Before/after hooks around handler execution.
//!
//! Middleware is referenced by name at registration and resolved through
//! [`MiddlewareRegistry`] at dispatch time; every dispatch gets fresh
//! instances. Before-hooks run global-then-route and may veto execution by
//! returning `false`; after-hooks run route-then-global once the handler
//! has completed.

mod core;
mod logging;
pub mod pipeline;

pub use self::core::{Middleware, MiddlewareRegistry};
pub use self::logging::RequestLog;
pub use self::pipeline::{run_after, run_before};
