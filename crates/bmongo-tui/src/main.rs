use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;

use bmongo_backend::client::WireClient;
use bmongo_core::config::{load_console_config, ConsoleConfig};
use bmongo_core::pinned::PinnedActions;
use bmongo_tui::{run_console, ConsoleApp, Runtime};

const DEFAULT_CONFIG_PATH: &str = "bmongo.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliArgs {
    config_path: PathBuf,
    backend_addr: Option<String>,
    tick_ms: Option<u64>,
    state_dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum MainError {
    #[error("{0}")]
    Args(String),
    #[error(transparent)]
    Config(#[from] bmongo_core::config::ConfigError),
    #[error(transparent)]
    Backend(#[from] bmongo_backend::error::BackendError),
    #[error(transparent)]
    Tui(#[from] bmongo_tui::TuiError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

fn main() {
    if let Err(err) = run() {
        eprintln!("bmongo failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), MainError> {
    let mut argv = std::env::args();
    let program = argv.next().unwrap_or_else(|| "bmongo".to_string());
    let args = parse_cli_args(argv.collect::<Vec<_>>(), &program)?;

    // The config file is optional; flags override whatever it sets.
    let mut config = if args.config_path.exists() {
        load_console_config(&args.config_path)?
    } else {
        ConsoleConfig::default()
    };
    if let Some(addr) = args.backend_addr {
        config.backend_addr = addr;
    }
    if let Some(tick_ms) = args.tick_ms {
        config.tick_ms = tick_ms;
    }
    if let Some(state_dir) = args.state_dir {
        config.state_dir = state_dir;
    }

    std::fs::create_dir_all(&config.state_dir)
        .with_context(|| format!("failed to create state dir {}", config.state_dir.display()))?;
    let pinned = PinnedActions::load(config.pinned_path());

    let backend = WireClient::connect(&config.backend_addr)?;
    let runtime = Runtime::start(Arc::new(backend));
    runtime.bootstrap();

    let mut app = ConsoleApp::new(pinned, config.log_capacity);
    app.state.status_line = format!("conectado a {}", config.backend_addr);

    run_console(&mut app, Duration::from_millis(config.tick_ms), |app| {
        for command in app.drain_commands() {
            runtime.submit(command);
        }
        let now = Utc::now();
        for event in runtime.poll_events() {
            app.apply_event(event, now);
        }
        app.toasts.purge_expired(now);
    })?;

    Ok(())
}

fn parse_cli_args(args: Vec<String>, program: &str) -> Result<CliArgs, MainError> {
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut backend_addr = None;
    let mut tick_ms = None;
    let mut state_dir = None;
    let mut idx = 0usize;

    while idx < args.len() {
        let arg = &args[idx];
        match arg.as_str() {
            "--help" | "-h" => return Err(MainError::Args(usage(program))),
            "--config" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| MainError::Args("missing value for --config".to_string()))?;
                config_path = PathBuf::from(value);
            }
            "--backend-addr" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| {
                    MainError::Args("missing value for --backend-addr".to_string())
                })?;
                backend_addr = Some(value.clone());
            }
            "--tick-ms" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| MainError::Args("missing value for --tick-ms".to_string()))?;
                let parsed = value.parse::<u64>().map_err(|_| {
                    MainError::Args(format!("invalid --tick-ms value: {value} (expected u64)"))
                })?;
                if parsed == 0 {
                    return Err(MainError::Args(
                        "invalid --tick-ms value: 0 (must be > 0)".to_string(),
                    ));
                }
                tick_ms = Some(parsed);
            }
            "--state-dir" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| MainError::Args("missing value for --state-dir".to_string()))?;
                state_dir = Some(PathBuf::from(value));
            }
            other => {
                return Err(MainError::Args(format!(
                    "unknown argument: {other}\n\n{}",
                    usage(program)
                )));
            }
        }
        idx += 1;
    }

    Ok(CliArgs {
        config_path,
        backend_addr,
        tick_ms,
        state_dir,
    })
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--config <path>] [--backend-addr <host:port>] [--tick-ms <u64>] [--state-dir <path>]\n\
Defaults:\n\
  --config {DEFAULT_CONFIG_PATH}\n\
  --backend-addr 127.0.0.1:9611\n\
  --tick-ms 250\n\
  --state-dir .bmongo"
    )
}
