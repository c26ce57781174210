//! `runtimeControl.*`: the engine's view of wall-clock time.

use crate::context::ModuleContext;
use crate::error::HostError;

/// `runtimeControl.timeInMilliseconds() -> i64`: non-decreasing milliseconds
/// since an arbitrary origin. The engine busy-waits on this to pace frames.
pub(crate) fn time_in_milliseconds(context: &mut ModuleContext<'_, '_>) -> Result<i64, HostError> {
    Ok(context.state_mut().clock.elapsed_ms())
}
