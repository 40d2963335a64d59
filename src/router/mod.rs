//! # Router Module
//!
//! Path matching and route resolution.
//!
//! Route templates use `{name}` placeholders (`/users/{id}`), each matching
//! exactly one path segment. Templates compile to regexes at registration
//! time; matching an incoming request is a linear scan over the routes
//! registered for its method, in registration order, first match wins.
//!
//! The router also answers the "which methods *would* have matched this
//! path" question that drives 404 vs 405 disambiguation, and carries the
//! global before/after middleware name lists.

mod core;
mod pattern;


pub use self::core::{Route, RouteMatch, Router};
pub use self::pattern::{normalize_path, CaptureVec, PathPattern};
