//! doombox - native command-line host for the engine's WebAssembly build.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::fmt::format::FmtSpan;

use doombox_host::{
    run, Collaborators, ExitPolicy, ModuleConfig, ModuleInstance, RunOutcome, SaveBackend,
};

mod config;
mod output;

/// Run the packaged engine module natively.
#[derive(Debug, Parser)]
#[command(name = "doombox", version, about)]
struct Cli {
    /// Path to the engine .wasm module.
    module: PathBuf,

    /// WAD archive to offer the engine; repeat for more, IWAD first.
    #[arg(short, long = "wad")]
    wads: Vec<PathBuf>,

    /// Directory for save-game files; saves stay in memory when omitted.
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Stop after this many ticks (smoke runs, benchmarks).
    #[arg(long)]
    ticks: Option<u64>,

    /// What a guest exit request does; overrides the config file.
    #[arg(long, value_parser = ["record", "ignore"])]
    exit_policy: Option<String>,

    /// Configuration file path.
    #[arg(short, long)]
    config: Option<String>,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format: plain (default) or json (for log aggregation).
    #[arg(long, default_value = "plain", value_parser = ["plain", "json"])]
    log_format: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing.
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    match cli.log_format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    };

    tracing::debug!("doombox starting with config: {:?}", cli.config);

    match drive(cli) {
        Ok(outcome) => {
            output::print_outcome(outcome);
            match outcome {
                // Proxy the guest's exit code the way a process wrapper would.
                RunOutcome::GuestExit { code } if code != 0 => ExitCode::from(code as u8),
                _ => ExitCode::SUCCESS,
            }
        }
        Err(failure) => {
            output::print_failure(&failure);
            ExitCode::FAILURE
        }
    }
}

fn drive(cli: Cli) -> anyhow::Result<RunOutcome> {
    let settings = config::load_config(cli.config.as_deref())?;

    // CLI flags override file and environment values.
    let wads = if cli.wads.is_empty() {
        settings.archives.wads
    } else {
        cli.wads
    };
    let save_dir = cli.save_dir.or(settings.saves.directory);
    let ticks = cli.ticks.or(settings.run.ticks);
    let policy_name = cli
        .exit_policy
        .unwrap_or(settings.run.exit_policy);
    let exit_policy = match policy_name.as_str() {
        "record" => ExitPolicy::Record,
        "ignore" => ExitPolicy::Ignore,
        other => anyhow::bail!("unknown exit policy '{other}' (expected record or ignore)"),
    };

    let module_config = ModuleConfig {
        wads,
        saves: match save_dir {
            Some(dir) => SaveBackend::Directory(dir),
            None => SaveBackend::Memory,
        },
        exit_policy,
    };

    tracing::info!(
        module = %cli.module.display(),
        archives = module_config.wads.len(),
        ?ticks,
        "starting host"
    );

    let mut instance =
        ModuleInstance::from_file(&cli.module, module_config, Collaborators::default())?;
    Ok(run(&mut instance, ticks)?)
}
