use std::panic::{catch_unwind, AssertUnwindSafe};

use anyhow::anyhow;
use tracing::{debug, error, info};

use crate::controller::ControllerRegistry;
use crate::error::ResolveError;
use crate::handler::{Handler, HandlerResult, HandlerReturn};
use crate::middleware::{pipeline, MiddlewareRegistry};
use crate::router::Router;
use crate::server::{Request, Response};

/// Terminal state of one dispatch.
///
/// The response content lives in the sink; the outcome tells the kernel
/// which exit path was taken, and carries the cause on the 500 path so the
/// kernel can apply its debug posture before the flush.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// A route matched, the handler ran, and its return value was written
    /// to the sink.
    Handled,
    /// No route matched the path under any method. 404.
    NotFound,
    /// The path matches under other methods only. 405, with the allowed
    /// set that also went into the `Allow` header.
    MethodNotAllowed(Vec<String>),
    /// A before-hook vetoed execution. The hook owns the response; the
    /// dispatcher wrote nothing.
    ShortCircuited,
    /// Resolution failure, handler failure, handler panic, or after-hook
    /// failure. 500 with the generic body; the cause never reaches the
    /// client unless the kernel is in debug mode.
    InternalError(anyhow::Error),
}

/// Drives one request through routing, middleware and handler execution.
///
/// Owns the route table and both registries. All three are populated at
/// startup and move in here, which keeps them read-only for the rest of
/// the process lifetime. Dispatch never mutates shared state, so the
/// dispatcher can be shared across threads by a multi-threaded host.
pub struct Dispatcher {
    router: Router,
    controllers: ControllerRegistry,
    middleware: MiddlewareRegistry,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        router: Router,
        controllers: ControllerRegistry,
        middleware: MiddlewareRegistry,
    ) -> Self {
        Self {
            router,
            controllers,
            middleware,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Resolve and execute `req`, writing the result into `res`.
    ///
    /// The sink is not flushed here; the kernel owns the flush so it can
    /// rewrite 500 bodies under its debug posture first.
    pub fn dispatch(&self, req: &Request, res: &mut Response) -> DispatchOutcome {
        let method = req.method();
        let path = req.path();

        let Some(matched) = self.router.first_match(method, path) else {
            // 405 wins over 404 whenever any other method would match the
            // literal path; both misses run the same probe.
            let allowed = self.router.allowed_methods(path);
            return if allowed.is_empty() {
                info!(method = %method, path = %path, "no route matched");
                res.set_status(404).set_body("Not Found");
                DispatchOutcome::NotFound
            } else {
                info!(method = %method, path = %path, allowed = ?allowed, "method not allowed");
                res.set_status(405)
                    .set_header("Allow", allowed.join(", "))
                    .set_body("Method Not Allowed");
                DispatchOutcome::MethodNotAllowed(allowed)
            };
        };

        debug!(
            method = %method,
            template = %matched.route.pattern.template(),
            captures = ?matched.captures,
            "route matched"
        );

        let before = self
            .router
            .global_before()
            .iter()
            .chain(matched.route.before.iter());
        match pipeline::run_before(&self.middleware, before, &matched.captures, res) {
            Ok(true) => {}
            Ok(false) => return DispatchOutcome::ShortCircuited,
            Err(err) => return self.internal_error(res, err.into()),
        }

        let invoked = catch_unwind(AssertUnwindSafe(|| {
            self.invoke(&matched.route.handler, req, &matched.captures)
        }));
        let returned = match invoked {
            Ok(Ok(value)) => value,
            Ok(Err(err)) => return self.internal_error(res, err),
            Err(panic) => {
                let message = panic_message(&*panic);
                return self.internal_error(res, anyhow!("handler panicked: {message}"));
            }
        };

        apply_return(returned, res);

        let after = matched
            .route
            .after
            .iter()
            .chain(self.router.global_after().iter());
        if let Err(err) = pipeline::run_after(&self.middleware, after) {
            return self.internal_error(res, err);
        }

        info!(method = %method, path = %path, status = res.status(), "request handled");
        DispatchOutcome::Handled
    }

    fn invoke(&self, handler: &Handler, req: &Request, params: &[String]) -> HandlerResult {
        match handler {
            Handler::Function(f) => f(req, params),
            Handler::Controller { controller, action } => {
                let instance = self.controllers.instantiate(controller)?;
                instance
                    .call(action, req, params)
                    .ok_or_else(|| ResolveError::UnknownAction {
                        controller: controller.clone(),
                        action: action.clone(),
                    })?
            }
        }
    }

    fn internal_error(&self, res: &mut Response, err: anyhow::Error) -> DispatchOutcome {
        error!(error = %err, "dispatch failed");
        // Whatever was written so far is discarded; a 500 must come out as
        // a 500 even if a hook or handler had locked the sink.
        *res = Response::new();
        res.set_status(500).set_body("Internal Server Error");
        DispatchOutcome::InternalError(err)
    }
}

/// Normalize a handler's return value into the sink.
fn apply_return(value: HandlerReturn, res: &mut Response) {
    match value {
        HandlerReturn::Response(built) => res.adopt(built),
        HandlerReturn::Json(data) => {
            res.json(&data);
        }
        HandlerReturn::Body(body) => {
            res.set_body(body);
        }
        HandlerReturn::Empty => {}
    }
}

pub(crate) fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
