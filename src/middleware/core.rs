use std::collections::HashMap;

use crate::error::ResolveError;
use crate::server::Response;

/// Lifecycle hooks around handler execution.
///
/// `before` runs ahead of the handler with the positional captures and the
/// response sink. Returning `false` vetoes the dispatch: nothing further
/// runs, and the vetoing hook owns whatever response the client sees; it
/// received the sink for exactly that reason. If it wrote nothing, the
/// client gets an empty body with the sink's current status (200 unless the
/// hook set one).
///
/// `after` runs once the handler has completed. An `Err` aborts the
/// remaining after-hooks and surfaces as a 500.
pub trait Middleware {
    fn before(&self, _params: &[String], _res: &mut Response) -> bool {
        true
    }

    fn after(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

type MiddlewareFactory = Box<dyn Fn() -> Box<dyn Middleware> + Send + Sync>;

/// Lookup table from middleware name to constructor, built at startup.
///
/// A fresh instance is constructed per dispatch per middleware, separately
/// for the before and the after phase, so hooks never share mutable state
/// across requests.
#[derive(Default)]
pub struct MiddlewareRegistry {
    factories: HashMap<String, MiddlewareFactory>,
}

impl MiddlewareRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under a stable name.
    pub fn register<F, M>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> M + Send + Sync + 'static,
        M: Middleware + 'static,
    {
        self.factories
            .insert(name.into(), Box::new(move || Box::new(factory())));
    }

    /// Construct a fresh instance of the named middleware.
    pub fn instantiate(&self, name: &str) -> Result<Box<dyn Middleware>, ResolveError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| ResolveError::UnknownMiddleware(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}
