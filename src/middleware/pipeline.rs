use tracing::debug;

use super::core::MiddlewareRegistry;
use crate::error::ResolveError;
use crate::server::Response;

/// Run before-hooks in list order, instantiating each from the registry.
///
/// `Ok(false)` means a hook vetoed the dispatch: the remaining hooks are
/// never instantiated, and response ownership has passed to the vetoing
/// hook. An unknown name is a resolution failure.
pub fn run_before<'a, I>(
    registry: &MiddlewareRegistry,
    names: I,
    params: &[String],
    res: &mut Response,
) -> Result<bool, ResolveError>
where
    I: IntoIterator<Item = &'a String>,
{
    for name in names {
        let mw = registry.instantiate(name)?;
        if !mw.before(params, res) {
            debug!(middleware = %name, "before-hook vetoed dispatch");
            return Ok(false);
        }
    }
    Ok(true)
}

/// Run after-hooks in list order. The first failing hook aborts the rest;
/// the failure surfaces as a 500 at the dispatcher.
pub fn run_after<'a, I>(registry: &MiddlewareRegistry, names: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = &'a String>,
{
    for name in names {
        let mw = registry.instantiate(name)?;
        mw.after()?;
    }
    Ok(())
}
