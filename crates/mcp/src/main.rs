#![forbid(unsafe_code)]

mod entry;
mod server;
mod support;
mod tools;

pub(crate) use server::McpServer;
pub(crate) use support::*;

use qm_engine::{EngineConfig, Session, SqliteQuerySource};
use std::fmt::Write as _;
use std::path::Path;

const MCP_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "querymap-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn write_last_crash(state_dir: &Path, kind: &str, detail: &str) {
    let _ = std::fs::create_dir_all(state_dir);
    let path = state_dir.join("querymap_last_crash.txt");

    let mut out = String::new();
    let _ = writeln!(out, "ts={}", crate::now_rfc3339());
    let _ = writeln!(out, "pid={}", std::process::id());
    let _ = writeln!(out, "kind={kind}");
    let _ = writeln!(out, "build={}", crate::build_fingerprint());
    let _ = writeln!(out, "args={:?}", std::env::args().collect::<Vec<_>>());
    let _ = writeln!(out, "detail={detail}");

    let _ = std::fs::write(path, out);
}

fn install_crash_reporter(state_dir: std::path::PathBuf) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let mut detail = info.to_string();
        let backtrace = std::backtrace::Backtrace::force_capture();
        let _ = write!(&mut detail, "\nbacktrace:\n{backtrace}");
        write_last_crash(&state_dir, "panic", &detail);
        default_hook(info);
    }));
}

fn usage() -> &'static str {
    "qm_mcp: querymap MCP server (query results to styled map layers, stdio)\n\n\
USAGE:\n\
  qm_mcp [--db PATH] [--state-dir DIR] [--config PATH]\n\
\n\
FLAGS:\n\
  --db PATH          SQLite database for the query tool (default: in-memory)\n\
  --state-dir DIR    Session and crash records (default: .querymap)\n\
  --config PATH      YAML layer defaults\n\
  -h, --help         Print this help and exit\n\
  -V, --version      Print version/build and exit\n\
\n\
ENV:\n\
  QUERYMAP_DB, QUERYMAP_STATE_DIR, QUERYMAP_CONFIG   fallbacks for the flags above\n\
  QUERYMAP_LOG                                       tracing filter for stderr (default: warn)\n"
}

fn version_line() -> String {
    format!("qm_mcp {SERVER_VERSION} build={}", crate::build_fingerprint())
}

fn serve(
    runtime: &RuntimeConfig,
    db_label: &str,
    log: &mut SessionLog,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &runtime.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let source = match &runtime.db {
        Some(path) => SqliteQuerySource::open(path)?,
        None => SqliteQuerySource::open_in_memory()?,
    };
    tracing::info!(
        db = db_label,
        geometry_key = %config.geometry_key,
        "querymap server starting"
    );

    let mut server = McpServer::new(Session::new(config), source);
    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let mut stdout = std::io::stdout().lock();
    entry::run_stdio(&mut server, &mut reader, &mut stdout, log)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        print!("{}", usage());
        return Ok(());
    }
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-V" | "--version"))
    {
        println!("{}", version_line());
        return Ok(());
    }

    let runtime = match parse_runtime_config(&args) {
        Ok(v) => v,
        Err(message) => {
            eprintln!("qm_mcp: {message}\n\n{}", usage());
            std::process::exit(2);
        }
    };

    init_tracing();
    install_crash_reporter(runtime.state_dir.clone());
    let db_label = runtime
        .db
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ":memory:".to_string());
    let mut log = SessionLog::new(&runtime.state_dir, &db_label);

    let result = serve(&runtime, &db_label, &mut log);
    if let Err(err) = &result {
        tracing::error!(error = %err, "server stopped");
        log.note_error(&err.to_string());
        log.note_exit("error");
        write_last_crash(&runtime.state_dir, "error", &format!("{err:?}"));
    }
    result
}
