use super::read_commands;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use oasedit_editor::{CommandRegistry, Document, EditSession, Outcome};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// API description document (JSON)
    pub document: PathBuf,

    /// JSON file holding marshalled commands, applied in order
    pub commands: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Undo every applied command afterwards, in reverse order
    #[arg(long)]
    pub undo: bool,

    /// Write compact JSON (overrides config)
    #[arg(long)]
    pub compact: bool,

    /// Undo levels to keep (overrides config)
    #[arg(long)]
    pub max_undo_levels: Option<usize>,

    /// Also write the queued commands, as they would be sent to peers
    #[arg(long)]
    pub outbox: Option<PathBuf>,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let max_undo_levels = args.max_undo_levels.unwrap_or(config.max_undo_levels);
    let pretty = config.pretty && !args.compact;

    let document = Document::load(args.document.clone())
        .with_context(|| format!("Failed to load {}", args.document.display()))?;
    info!(path = %args.document.display(), dialect = %document.dialect(), "Loaded document");

    let registry = CommandRegistry::with_defaults();
    let commands = registry.unmarshall_all(read_commands(&args.commands)?)?;

    eprintln!(
        "{}",
        format!("🔨 Applying {} commands...", commands.len()).bright_blue().bold()
    );

    let mut session =
        EditSession::new(config.session_id.clone(), document).with_max_undo_levels(max_undo_levels);

    let mut applied = 0;
    for command in commands {
        let tag = command.type_tag();
        match session.apply_local(command)? {
            Outcome::Applied => {
                applied += 1;
                eprintln!("  {} {}", "✓".green(), tag);
            }
            Outcome::Unchanged => {
                applied += 1;
                eprintln!("  {} {} {}", "✓".green(), tag, "(no changes)".dimmed());
            }
            Outcome::Unresolved { path } => {
                eprintln!("  {} {} - target {} not found", "⚠️".yellow(), tag, path);
            }
        }
    }

    if args.undo {
        let mut undone = 0;
        while session.undo()? {
            undone += 1;
        }
        eprintln!("  {} Undid {} commands", "↩".bright_blue(), undone);
        if undone < applied {
            eprintln!(
                "  {} {} commands were beyond the undo limit of {}",
                "⚠️".yellow(),
                applied - undone,
                max_undo_levels
            );
        }
    }

    let tree = session.document.tree();
    let output = if pretty { tree.to_json_pretty()? } else { tree.to_json()? };

    match &args.output {
        Some(path) => {
            fs::write(path, output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Wrote {}", "✅".green(), path.display());
        }
        None => println!("{}", output),
    }

    if let Some(path) = &args.outbox {
        let outbox = session.drain_outbox();
        fs::write(path, serde_json::to_string_pretty(&outbox)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("{} Queued {} commands to {}", "📤".green(), outbox.len(), path.display());
    }

    Ok(())
}
