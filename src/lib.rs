//! # skiff
//!
//! **skiff** is a featherweight, synchronous micro web framework: pattern
//! routing with `{name}` placeholders, a before/after middleware pipeline,
//! controller and middleware registries resolved by name, a send-once
//! response sink, and a fluent SQL builder with a thin model layer.
//!
//! ## Architecture
//!
//! - **[`router`]** - route templates compiled to regexes; method-keyed
//!   route table; first registered match wins; 404 vs 405 disambiguation
//!   via the allowed-method probe
//! - **[`dispatcher`]** - the per-request state machine: routing,
//!   middleware, handler invocation, return-value normalization
//! - **[`middleware`]** - before/after hooks with veto semantics, built
//!   fresh per dispatch from a factory registry
//! - **[`handler`]** / **[`controller`]** - function handlers and
//!   late-bound controller actions
//! - **[`server`]** - the request accessor and response sink; the host
//!   HTTP runtime owns sockets and implements [`ResponseWriter`]
//! - **[`app`]** - the kernel: panic backstop, debug posture for 500s,
//!   exactly-one-flush guarantee
//! - **[`db`]** - fluent query builder, explicit connection handle, base
//!   model
//!
//! Dispatch is synchronous and single-threaded per request: no suspension
//! points, no shared mutable state beyond the read-only route table. A
//! multi-threaded host can share one [`App`] freely.
//!
//! ## Quick start
//!
//! ```no_run
//! use http::Method;
//! use skiff::{
//!     App, AppConfig, ControllerRegistry, Dispatcher, Handler, HandlerReturn, HttpWriter,
//!     MiddlewareRegistry, Request, Router,
//! };
//!
//! let mut router = Router::new();
//! router.get(
//!     "/users/{id}",
//!     Handler::function(|_req, params| {
//!         Ok(HandlerReturn::Json(serde_json::json!({ "id": params[0] })))
//!     }),
//! );
//!
//! let dispatcher = Dispatcher::new(router, ControllerRegistry::new(), MiddlewareRegistry::new());
//! let app = App::new(dispatcher, AppConfig::from_env());
//!
//! // One call per inbound request; the host parses the wire format and
//! // supplies the writer.
//! let request = Request::new(Method::GET, "/users/42");
//! let mut writer = HttpWriter::new(std::io::stdout());
//! app.handle(&request, &mut writer);
//! ```

pub mod app;
pub mod config;
pub mod controller;
pub mod db;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod router;
pub mod server;

pub use app::App;
pub use config::AppConfig;
pub use controller::{Controller, ControllerRegistry};
pub use db::{Builder, Connection, Database, DbConfig, Model, Order, Row};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::{DbError, ResolveError};
pub use handler::{Handler, HandlerFn, HandlerResult, HandlerReturn};
pub use middleware::{Middleware, MiddlewareRegistry, RequestLog};
pub use router::{normalize_path, CaptureVec, PathPattern, Route, RouteMatch, Router};
pub use server::{HttpWriter, Request, Response, ResponseWriter};
