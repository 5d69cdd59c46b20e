// wallnotes - edit alarms and notes in a wallpaper config.json
// Entry point and logging setup

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wallnotes::commands::{self, AlarmCommand, NoteCommand};
use wallnotes::EditorSession;

#[derive(Parser)]
#[command(version, about = "Edit alarms and notes in a wallpaper config.json")]
struct Cli {
    /// Wallpaper directory containing config.json
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time-triggered alarm effects
    #[command(subcommand)]
    Alarms(AlarmCommand),
    /// On-screen notes
    #[command(subcommand)]
    Notes(NoteCommand),
    /// Sound files available to alarms
    Audio,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so list output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wallnotes=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut session = EditorSession::open(&cli.dir)
        .await
        .with_context(|| format!("Failed to open config in {}", cli.dir.display()))?;

    match cli.command {
        Commands::Alarms(command) => commands::alarms::run(&mut session, command).await?,
        Commands::Notes(command) => commands::notes::run(&mut session, command).await?,
        Commands::Audio => commands::list_audio(&session).await?,
    }

    Ok(())
}
