use super::read_commands;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use oasedit_editor::CommandRegistry;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// JSON file holding marshalled commands
    pub commands: PathBuf,
}

pub fn inspect(args: InspectArgs) -> Result<()> {
    let registry = CommandRegistry::with_defaults();
    let commands = registry.unmarshall_all(read_commands(&args.commands)?)?;

    println!(
        "{} {} commands in {}",
        "🔎".bright_blue(),
        commands.len(),
        args.commands.display()
    );

    for (index, command) in commands.iter().enumerate() {
        println!(
            "  {:>3}  {}  {}  {}",
            index,
            command.kind().bold(),
            command.dialect().to_string().dimmed(),
            format!("{:?}", command.state()).to_lowercase().dimmed()
        );
    }

    Ok(())
}
