//! Fallback for unrecognised top-level verbs: `tz <verb> [ARGS..]`.
//!
//! The verb is looked up in the project's custom mappings, then in the global
//! mapping. Custom verbs are never auto-suggested.

use anyhow::{Result, bail};

use crate::cmd::shared::Context;
use crate::error::Error;
use crate::executor;

/// `argv[0]` is the verb, the rest is forwarded verbatim.
pub fn execute_custom(ctx: &Context, argv: Vec<String>) -> Result<()> {
    let Some((verb, args)) = argv.split_first() else {
        bail!("missing command");
    };

    let mut store = ctx.load_store()?;
    let resolved = match ctx.resolve(&mut store, verb, args) {
        Ok(r) => r,
        Err(e) if matches!(e.downcast_ref::<Error>(), Some(Error::NoMapping { .. })) => {
            bail!("unknown command '{verb}'\n\nTip: Run 'tz map {verb} \"<your-command>\"' to set it up")
        }
        Err(e) => return Err(e),
    };
    crate::log_debug!("custom '{verb}' ({:?}): {}", resolved.origin, resolved.command);
    executor::run(&resolved.command)?;
    Ok(())
}
