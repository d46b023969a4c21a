//! Granit entrypoint: loads a buffer, replays a key script through the
//! editor, and prints the resulting surface.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::Editor;
use core_events::Platform;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

mod host;
mod runner;
mod script;

use host::{FileSink, SharedSurface, SurfaceSink};
use runner::Runner;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "granit", version, about = "Granit snapshot editor")]
struct Args {
    /// Optional path to open at startup (UTF-8 text). Saves write back to it.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `granit.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Key script to replay; reads stdin when omitted.
    #[arg(long = "script")]
    pub script: Option<PathBuf>,
    /// Platform tag for keybinding lookup (mac, win, other).
    #[arg(long = "platform")]
    pub platform: Option<Platform>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("granit.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "granit.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
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

fn read_initial(path: Option<&Path>) -> Option<String> {
    let path = path?;
    match std::fs::read_to_string(path) {
        Ok(content) => {
            tracing::debug!(target: "io", file = %path.display(), size_bytes = content.len(), "file_read_ok");
            Some(content)
        }
        Err(e) => {
            // A missing file is a new buffer; the first save creates it.
            error!(target: "io", file = %path.display(), ?e, "file_open_error");
            None
        }
    }
}

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("reading script {}", p.display())),
        None => {
            let mut src = String::new();
            std::io::stdin()
                .read_to_string(&mut src)
                .context("reading script from stdin")?;
            Ok(src)
        }
    }
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = core_config::load_from(args.config.clone())?;
    let initial = read_initial(args.path.as_deref());
    let steps = script::parse_script(&read_script(args.script.as_deref())?)?;

    let surface = SharedSurface::default();
    let persistence = FileSink::new(args.path.clone(), initial.clone());
    let writes = persistence.write_counter();
    let mut editor = Editor::from_config(
        &config,
        initial.as_deref(),
        SurfaceSink::new(surface.clone()),
        persistence,
    );
    if let Some(platform) = args.platform {
        editor.set_platform(platform);
    }
    let path_str = args.path.as_ref().map(|p| p.to_string_lossy().to_string());
    info!(
        target: "runtime.startup",
        path = path_str.as_deref(),
        platform = %editor.platform(),
        steps = steps.len(),
        config_override = args.config.is_some(),
        "bootstrap_complete"
    );

    let mut runner = Runner::new(editor, surface.clone());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = runner.run(&steps, &mut out)?;
    write!(out, "{}", surface.borrow())?;
    out.flush()?;

    let history = runner.editor().session().history();
    info!(
        target: "runtime",
        keys = summary.keys,
        edits = summary.edits,
        unbound = summary.unbound,
        rejected = summary.rejected,
        undo_depth = history.undo_depth(),
        redo_depth = history.redo_depth(),
        dirty = runner.editor().session().is_dirty(),
        file_writes = *writes.borrow(),
        "shutdown"
    );
    Ok(())
}
