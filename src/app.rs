//! Application kernel.

use std::panic::{catch_unwind, AssertUnwindSafe};

use anyhow::anyhow;
use tracing::error;

use crate::config::AppConfig;
use crate::dispatcher::{panic_message, DispatchOutcome, Dispatcher};
use crate::server::{Request, Response, ResponseWriter};

/// Drives one dispatch per inbound request.
///
/// The kernel is the outermost layer: it backstops panics that escape the
/// dispatcher, owns the debug posture for 500 bodies, and guarantees the
/// sink is flushed exactly once on every exit path: success, each error
/// branch, and the vetoed path alike.
pub struct App {
    dispatcher: Dispatcher,
    debug: bool,
}

impl App {
    #[must_use]
    pub fn new(dispatcher: Dispatcher, config: AppConfig) -> Self {
        Self {
            dispatcher,
            debug: config.debug,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Handle one request: dispatch, apply the 500 posture, flush once.
    pub fn handle(&self, req: &Request, out: &mut dyn ResponseWriter) -> DispatchOutcome {
        let mut res = Response::new();

        let outcome = match catch_unwind(AssertUnwindSafe(|| {
            self.dispatcher.dispatch(req, &mut res)
        })) {
            Ok(outcome) => outcome,
            Err(panic) => {
                let message = panic_message(&panic);
                res = Response::new();
                res.set_status(500).set_body("Internal Server Error");
                DispatchOutcome::InternalError(anyhow!("dispatch panicked: {message}"))
            }
        };

        if let DispatchOutcome::InternalError(cause) = &outcome {
            if self.debug {
                res.text(format!("{cause:?}"));
            }
        }

        if let Err(err) = res.send(out) {
            error!(error = %err, "failed to flush response");
        }
        outcome
    }
}
