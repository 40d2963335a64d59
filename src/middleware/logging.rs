use tracing::info;

use super::core::Middleware;
use crate::server::Response;

/// Logs request acceptance and completion. Never blocks a request.
pub struct RequestLog;

impl Middleware for RequestLog {
    fn before(&self, params: &[String], _res: &mut Response) -> bool {
        info!(captures = ?params, "request accepted");
        true
    }

    fn after(&self) -> anyhow::Result<()> {
        info!("request completed");
        Ok(())
    }
}
