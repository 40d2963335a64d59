//! Controller contract and the startup-built controller registry.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::error::ResolveError;
use crate::handler::{HandlerResult, HandlerReturn};
use crate::server::{Request, Response};

/// Contract for controllers.
///
/// A fresh instance is constructed per dispatch through the registry, so
/// controllers never share mutable state across requests. `call` routes an
/// action name to the matching method; returning `None` means the
/// controller has no such action, which the dispatcher reports as a
/// resolution failure (500 naming the action).
///
/// The provided helpers mirror the common response shapes so concrete
/// controllers stay short.
pub trait Controller {
    fn call(&self, action: &str, req: &Request, params: &[String]) -> Option<HandlerResult>;

    /// JSON response with an explicit status.
    fn json(&self, data: Value, status: u16) -> HandlerResult {
        let mut res = Response::new();
        res.set_status(status);
        res.json(&data);
        Ok(HandlerReturn::Response(res))
    }

    /// Standard success envelope: `{"status": "success", "message", "data"}`.
    fn success(&self, data: Value, message: &str, status: u16) -> HandlerResult {
        self.json(
            json!({ "status": "success", "message": message, "data": data }),
            status,
        )
    }

    /// Standard error envelope: `{"status": "error", "message"}`.
    fn error(&self, message: &str, status: u16) -> HandlerResult {
        self.json(json!({ "status": "error", "message": message }), status)
    }
}

type ControllerFactory = Box<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

/// Lookup table from controller name to constructor, built at startup.
///
/// This replaces instantiate-by-class-name reflection: late binding is
/// preserved (resolution happens per dispatch), but the set of resolvable
/// names is fixed and explicit.
#[derive(Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under a stable name.
    pub fn register<F, C>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Controller + 'static,
    {
        self.factories
            .insert(name.into(), Box::new(move || Box::new(factory())));
    }

    /// Construct a fresh instance of the named controller.
    pub fn instantiate(&self, name: &str) -> Result<Box<dyn Controller>, ResolveError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| ResolveError::UnknownController(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}
