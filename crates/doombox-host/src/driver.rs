//! The frame loop: initialize once, then tick and pump input until
//! something stops the run.

use crate::error::HostError;
use crate::frontend::InputEvent;
use crate::instance::ModuleInstance;

/// Why [`run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The frontend asked to stop.
    Quit,
    /// The guest requested process exit with this code.
    GuestExit { code: i32 },
    /// The tick budget ran out before anything else stopped the loop.
    BudgetExhausted { ticks: u64 },
}

/// Drives the module: calls `initGame` once, then loops `tickGame`,
/// forwarding frontend input to the module after every tick.
///
/// `budget` caps the number of ticks; `None` runs until the frontend quits
/// or the guest exits. A guest call that fails because the module requested
/// process exit is reported as [`RunOutcome::GuestExit`], not as an error;
/// every other failure propagates. Pending console output is flushed on
/// every path out of the loop.
pub fn run(instance: &mut ModuleInstance, budget: Option<u64>) -> Result<RunOutcome, HostError> {
    if let Err(failure) = instance.context().init_game() {
        return finish(instance, failure);
    }

    let mut ticks: u64 = 0;
    loop {
        if let Some(limit) = budget {
            if ticks >= limit {
                instance.drain_console();
                tracing::info!(ticks, "tick budget exhausted");
                return Ok(RunOutcome::BudgetExhausted { ticks });
            }
        }

        if let Err(failure) = instance.context().tick_game() {
            return finish(instance, failure);
        }
        ticks += 1;

        for event in instance.state_mut().frontend.poll_input() {
            match event {
                InputEvent::Quit => {
                    instance.drain_console();
                    tracing::info!(ticks, "frontend requested quit");
                    return Ok(RunOutcome::Quit);
                }
                InputEvent::KeyDown(label) => {
                    let mut context = instance.context();
                    let code = context.key_code(label)?;
                    if let Err(failure) = context.report_key_down(code) {
                        return finish(instance, failure);
                    }
                }
                InputEvent::KeyUp(label) => {
                    let mut context = instance.context();
                    let code = context.key_code(label)?;
                    if let Err(failure) = context.report_key_up(code) {
                        return finish(instance, failure);
                    }
                }
            }
        }
    }
}

/// Settles a failed guest call: a recorded exit code means the guest asked
/// to stop, anything else is a genuine fault.
fn finish(instance: &mut ModuleInstance, failure: HostError) -> Result<RunOutcome, HostError> {
    instance.drain_console();
    if let Some(code) = instance.state().exit_code() {
        tracing::info!(code, "guest exited");
        return Ok(RunOutcome::GuestExit { code });
    }
    Err(failure)
}
