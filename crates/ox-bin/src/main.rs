//! oxhex entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::EditorController;
use core_config::Config;
use core_state::Session;
use core_terminal::{Console, CrosstermBackend, CrosstermConsole, TerminalBackend};
use crossterm::{
    cursor::{MoveTo, Show},
    queue,
    style::ResetColor,
    terminal::{Clear, ClearType},
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "oxhex.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name = "oxhex",
    version,
    about = "Simple hex editor",
    override_usage = "oxhex [options] [file]"
)]
struct Args {
    /// File to open at startup.
    pub path: Option<PathBuf>,
    /// Open read-only (default).
    #[arg(long = "ro", overrides_with = "rw")]
    pub ro: bool,
    /// Open in read-write mode.
    #[arg(long = "rw", overrides_with = "ro")]
    pub rw: bool,
    /// Configuration file path (overrides discovery of `oxhex.toml`).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Rewrite the single-dash long options into clap's spelling, dropping
/// unknown options and surplus positionals. Returns the cleaned argv and the
/// warnings to show the user.
fn normalize_args<I>(raw: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = String>,
{
    let mut raw = raw.into_iter();
    let mut out: Vec<String> = raw.next().into_iter().collect();
    let mut warnings = Vec::new();
    let mut have_path = false;
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "-ro" | "--ro" => out.push("--ro".into()),
            "-rw" | "--rw" => out.push("--rw".into()),
            "-h" | "--help" | "-V" | "--version" => out.push(arg),
            "--config" => {
                out.push(arg);
                if let Some(value) = raw.next() {
                    out.push(value);
                }
            }
            a if a.starts_with("--config=") => out.push(arg),
            a if a.starts_with('-') && a.len() > 1 => {
                warnings.push(format!("unknown option {a}"));
            }
            _ if have_path => warnings.push(format!("ignoring param {arg}")),
            _ => {
                have_path = true;
                out.push(arg);
            }
        }
    }
    (out, warnings)
}

struct AppStartup {
    backend: CrosstermBackend,
    // Flushes buffered log lines when dropped.
    _log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            _log_guard: None,
        }
    }

    fn configure_logging(&mut self) {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
            .is_ok()
        {
            self._log_guard = Some(guard);
        }
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }

    fn run(&mut self, args: Args) -> Result<()> {
        let config = core_config::load_from(args.config.clone())?;
        let writable = args.rw && !args.ro;
        let path_str = args.path.as_ref().map(|p| p.to_string_lossy().to_string());
        info!(
            target: "runtime.startup",
            path = path_str.as_deref(),
            writable,
            columns = config.columns(),
            config_override = args.config.is_some(),
            "startup"
        );

        if let Err(e) = self.backend.set_title("oxhex") {
            warn!(target: "terminal", error = %e, "set_title_failed");
        }
        let guard = match self.backend.enter_guard() {
            Ok(guard) => guard,
            Err(e) => {
                warn!(target: "terminal", error = %e, "terminal_setup_failed");
                eprintln!("{}", setup_failure_message(&e));
                return Ok(());
            }
        };

        let mut console = CrosstermConsole::new(config.probe(), config.fallback_size());
        let outcome = run_editor(&config, &mut console, args.path.as_deref(), writable);
        if let Err(e) = restore_screen(&mut console) {
            warn!(target: "terminal", error = %e, "screen_reset_failed");
        }
        if let Err(e) = guard.restore() {
            warn!(target: "terminal", error = %e, "terminal_restore_failed");
        }
        outcome
    }
}

fn run_editor<C: Console>(
    config: &Config,
    console: &mut C,
    path: Option<&Path>,
    writable: bool,
) -> Result<()> {
    let term = console.size()?;
    let session = Session::new(config.columns(), config.panels(), term);
    let mut controller = EditorController::new(session, &mut *console);
    if let Some(path) = path {
        controller.open_initial(path, writable)?;
    }
    controller.run()
}

fn setup_failure_message(err: &anyhow::Error) -> String {
    format!("Unable to reconfigure terminal: {err:#}")
}

/// Leave the cursor on a blank line in the default style.
fn restore_screen<C: Console>(console: &mut C) -> Result<()> {
    let mut buf: Vec<u8> = Vec::new();
    queue!(
        buf,
        MoveTo(0, 255),
        ResetColor,
        Clear(ClearType::UntilNewLine),
        Show
    )?;
    console.write_all(&buf)
}

fn main() -> ExitCode {
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        eprintln!("oxhex: stdin and stdout must be a terminal");
        return ExitCode::from(1);
    }

    let (argv, warnings) = normalize_args(std::env::args());
    let args = Args::parse_from(argv);

    let mut app = AppStartup::new();
    app.configure_logging();
    AppStartup::install_panic_hook();
    for w in &warnings {
        eprintln!("{w}");
        warn!(target: "runtime.startup", "{w}");
    }

    match app.run(args) {
        Ok(()) => {
            info!(target: "runtime", "shutdown");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(target: "runtime", error = %e, "fatal");
            eprintln!("oxhex: {e:#}");
            ExitCode::FAILURE
        }
    }
}
