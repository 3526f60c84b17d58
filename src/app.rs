//! Application orchestrator.
//! Merges config (defaults < --config file < CLI flags), initializes logging, installs
//! the signal handler, runs the walk, and reports the outcome.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use find_replace::config::load_config_from_xml;
use find_replace::output as out;
use find_replace::{Config, FindReplaceError, ShutdownToken, WalkReport};

use crate::cli::Args;
use crate::logging::init_tracing;

/// Exit status for a failed run: the typed error's code, else 1.
pub fn exit_code(e: &anyhow::Error) -> u8 {
    e.downcast_ref::<FindReplaceError>()
        .map(FindReplaceError::code)
        .unwrap_or(1)
}

/// Build the effective config from CLI args (and the optional config file).
pub fn build_config(args: &Args) -> Result<Config> {
    let mut cfg = Config::new(args.find.clone(), args.replace.clone());
    if let Some(path) = args.config.as_deref() {
        load_config_from_xml(path)?.apply(&mut cfg);
    }
    args.apply_overrides(&mut cfg);
    Ok(cfg)
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<WalkReport> {
    let cfg = build_config(&args)?;

    // Reject unusable input before logging setup or any filesystem work.
    if cfg.substitution.find().is_empty() {
        return Err(FindReplaceError::Usage("FIND must not be empty".into()).into());
    }

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), &cfg.root, cfg.json)
        .map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    let shutdown = ShutdownToken::new();
    {
        let guard_slot = Arc::clone(&guard_slot);
        let shutdown = shutdown.clone();
        let installed = ctrlc::set_handler(move || {
            shutdown.request();
            out::print_warn("Received interrupt; stopping after the current file...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        });
        if let Err(e) = installed {
            out::print_warn(&format!("Could not install interrupt handler: {e}"));
        }
    }

    debug!("Starting find-replace: {:?}", args);

    let result = find_replace::run(&cfg, &shutdown);
    match &result {
        Ok(report) => {
            if !cfg.json {
                let line = out::summary_line(report, cfg.dry_run);
                if cfg.dry_run {
                    out::print_info(&format!("Dry-run: {line}"));
                } else {
                    out::print_success(&line);
                }
            }
        }
        Err(e) => match e.downcast_ref::<FindReplaceError>() {
            Some(fr) => {
                let code = fr.code();
                match fr {
                    FindReplaceError::RenameCollision { from, to } => {
                        error!(code, kind = fr.kind(), from = %from.display(), to = %to.display(), "Run aborted")
                    }
                    FindReplaceError::Rename { from, to, source } => {
                        error!(code, kind = fr.kind(), from = %from.display(), to = %to.display(), error = %source, "Run aborted")
                    }
                    FindReplaceError::DirectoryRead { path, source }
                    | FindReplaceError::FileOpen { path, source }
                    | FindReplaceError::FileRead { path, source }
                    | FindReplaceError::FileWrite { path, source }
                    | FindReplaceError::TempFile { path, source } => {
                        error!(code, kind = fr.kind(), path = %path.display(), error = %source, "Run aborted")
                    }
                    FindReplaceError::Interrupted => {
                        error!(code, kind = fr.kind(), "Run aborted by user")
                    }
                    FindReplaceError::Usage(msg) => {
                        error!(code, kind = fr.kind(), %msg, "Run aborted")
                    }
                }
            }
            None => error!(error = ?e, "Run aborted"),
        },
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}
