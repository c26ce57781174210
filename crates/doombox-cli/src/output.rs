//! Output formatting for CLI responses.

use doombox_host::{Diagnostic, HostError, RunOutcome};

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("[OK] {message}");
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

/// Reports how the run ended.
pub fn print_outcome(outcome: RunOutcome) {
    match outcome {
        RunOutcome::Quit => print_success("stopped by the frontend"),
        RunOutcome::GuestExit { code: 0 } => print_success("engine exited cleanly"),
        RunOutcome::GuestExit { code } => print_error(&format!("engine exited with code {code}")),
        RunOutcome::BudgetExhausted { ticks } => {
            print_success(&format!("tick budget reached after {ticks} ticks"))
        }
    }
}

/// Reports a failure, with the hint and fix lines when the error carries
/// diagnostics.
pub fn print_failure(failure: &anyhow::Error) {
    print_error(&format!("{failure:#}"));
    if let Some(diagnosed) = failure.downcast_ref::<HostError>() {
        if let Some(hint) = diagnosed.hint() {
            eprintln!("  hint: {hint}");
        }
        if let Some(fix) = diagnosed.fix() {
            eprintln!("  fix: {fix}");
        }
    }
}
