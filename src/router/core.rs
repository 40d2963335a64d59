use std::collections::HashMap;

use http::Method;
use tracing::debug;

use super::pattern::{normalize_path, CaptureVec, PathPattern};
use crate::handler::Handler;

/// A registered route: compiled pattern, handler reference, and the names
/// of the middleware that wrap it.
#[derive(Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: PathPattern,
    pub handler: Handler,
    /// Per-route before-middleware names, run after the global ones.
    pub before: Vec<String>,
    /// Per-route after-middleware names, run before the global ones.
    pub after: Vec<String>,
}

/// Result of a successful route lookup.
pub struct RouteMatch<'r> {
    pub route: &'r Route,
    pub captures: CaptureVec,
}

/// Method-keyed route table with global middleware lists.
///
/// Registration order is match priority: the first registered pattern that
/// matches wins. Re-registering the same method and template appends an
/// entry that is never reached. Accepted, not an error.
///
/// The table is populated at startup and moves into the dispatcher, which
/// keeps it read-only for the whole process lifetime.
#[derive(Default)]
pub struct Router {
    routes: HashMap<Method, Vec<Route>>,
    before: Vec<String>,
    after: Vec<String>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route for one HTTP method, with per-route middleware.
    pub fn register(
        &mut self,
        method: Method,
        template: &str,
        handler: Handler,
        before: Vec<String>,
        after: Vec<String>,
    ) {
        let pattern = PathPattern::compile(template);
        debug!(method = %method, template = %pattern.template(), "route registered");
        self.routes.entry(method.clone()).or_default().push(Route {
            method,
            pattern,
            handler,
            before,
            after,
        });
    }

    pub fn get(&mut self, template: &str, handler: Handler) {
        self.register(Method::GET, template, handler, Vec::new(), Vec::new());
    }

    pub fn post(&mut self, template: &str, handler: Handler) {
        self.register(Method::POST, template, handler, Vec::new(), Vec::new());
    }

    pub fn put(&mut self, template: &str, handler: Handler) {
        self.register(Method::PUT, template, handler, Vec::new(), Vec::new());
    }

    pub fn patch(&mut self, template: &str, handler: Handler) {
        self.register(Method::PATCH, template, handler, Vec::new(), Vec::new());
    }

    pub fn delete(&mut self, template: &str, handler: Handler) {
        self.register(Method::DELETE, template, handler, Vec::new(), Vec::new());
    }

    pub fn options(&mut self, template: &str, handler: Handler) {
        self.register(Method::OPTIONS, template, handler, Vec::new(), Vec::new());
    }

    /// Register the same handler under several methods at once.
    pub fn match_methods(&mut self, methods: &[Method], template: &str, handler: Handler) {
        for method in methods {
            self.register(
                method.clone(),
                template,
                handler.clone(),
                Vec::new(),
                Vec::new(),
            );
        }
    }

    /// Register the same handler under every standard verb.
    pub fn any(&mut self, template: &str, handler: Handler) {
        self.match_methods(
            &[
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ],
            template,
            handler,
        );
    }

    /// Append a global before-middleware name. Global before-hooks run
    /// ahead of every route's own before-hooks.
    pub fn before(&mut self, name: impl Into<String>) {
        self.before.push(name.into());
    }

    /// Append a global after-middleware name. Global after-hooks run after
    /// every route's own after-hooks.
    pub fn after(&mut self, name: impl Into<String>) {
        self.after.push(name.into());
    }

    pub fn global_before(&self) -> &[String] {
        &self.before
    }

    pub fn global_after(&self) -> &[String] {
        &self.after
    }

    /// First route under `method` whose pattern matches the path, in
    /// registration order. The path is normalized here, once.
    #[must_use]
    pub fn first_match(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let path = normalize_path(path);
        let routes = self.routes.get(method)?;
        for route in routes {
            if let Some(captures) = route.pattern.matches(&path) {
                return Some(RouteMatch { route, captures });
            }
        }
        None
    }

    /// Every method under which some route matches the path, sorted for a
    /// deterministic `Allow` header. Used for 405 reporting only, never for
    /// dispatch selection.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Vec<String> {
        let path = normalize_path(path);
        let mut methods: Vec<String> = self
            .routes
            .iter()
            .filter(|(_, routes)| routes.iter().any(|r| r.pattern.matches(&path).is_some()))
            .map(|(method, _)| method.to_string())
            .collect();
        methods.sort();
        methods
    }
}
