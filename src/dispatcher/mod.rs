//! # Dispatcher Module
//!
//! End-to-end resolution of one inbound request to exactly one response.
//!
//! The dispatch state machine: normalize the path, look the route up by
//! method (404 vs 405 falls out of the allowed-method probe), run the
//! before-middleware chain with short-circuit, invoke the resolved handler
//! (function or controller action), normalize its return value into the
//! response sink, then run the after-middleware chain. Every failure past
//! routing is terminal here as a 500; causes are carried on the outcome
//! for the kernel's debug rendering, never written to the client directly.

mod core;

pub use self::core::{DispatchOutcome, Dispatcher};

pub(crate) use self::core::panic_message;
