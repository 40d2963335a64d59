//! Handler references and return-value normalization.
//!
//! A route's action is either a function stored directly at registration,
//! or a controller action kept as a `(controller, action)` name pair and
//! resolved at dispatch time through the controller registry for late
//! binding, so controllers referenced before they exist only fail when a
//! request actually hits the route.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::server::{Request, Response};

/// Value a handler hands back to the dispatcher for normalization.
pub enum HandlerReturn {
    /// A fully built response, adopted by the sink unchanged.
    Response(Response),
    /// Serialized as a JSON body with `Content-Type: application/json`;
    /// the status is left as-is (200 by default).
    Json(Value),
    /// Raw body; the content type is left as-is (none by default).
    Body(String),
    /// Nothing is written; the sink is flushed in whatever state it is in.
    Empty,
}

pub type HandlerResult = anyhow::Result<HandlerReturn>;

/// Boxed function-handler signature: the request accessor plus the
/// positional captures from the matched pattern.
pub type HandlerFn = dyn Fn(&Request, &[String]) -> HandlerResult + Send + Sync;

/// A route's action reference.
#[derive(Clone)]
pub enum Handler {
    Function(Arc<HandlerFn>),
    Controller { controller: String, action: String },
}

impl Handler {
    /// Wrap a closure as a function handler.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Request, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Reference a controller action by name, resolved at dispatch time.
    pub fn controller(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Controller {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(_) => f.write_str("Handler::Function"),
            Self::Controller { controller, action } => {
                write!(f, "Handler::Controller({controller}::{action})")
            }
        }
    }
}
