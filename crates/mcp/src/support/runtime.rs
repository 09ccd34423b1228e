#![forbid(unsafe_code)]

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_STATE_DIR: &str = ".querymap";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Process settings resolved from flags first, then `QUERYMAP_*` environment variables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RuntimeConfig {
    pub(crate) db: Option<PathBuf>,
    pub(crate) state_dir: PathBuf,
    pub(crate) config: Option<PathBuf>,
}

pub(crate) fn parse_runtime_config(args: &[String]) -> Result<RuntimeConfig, String> {
    let mut db: Option<PathBuf> = None;
    let mut state_dir: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--db" => &mut db,
            "--state-dir" => &mut state_dir,
            "--config" => &mut config,
            other => return Err(format!("unknown argument: {other}")),
        };
        let Some(value) = iter.next().filter(|v| !v.trim().is_empty()) else {
            return Err(format!("{arg} requires a value"));
        };
        *slot = Some(PathBuf::from(value));
    }

    Ok(RuntimeConfig {
        db: db.or_else(|| env_path("QUERYMAP_DB")),
        state_dir: state_dir
            .or_else(|| env_path("QUERYMAP_STATE_DIR"))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR)),
        config: config.or_else(|| env_path("QUERYMAP_CONFIG")),
    })
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Diagnostics go to stderr; stdout carries protocol frames only.
pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_env("QUERYMAP_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
