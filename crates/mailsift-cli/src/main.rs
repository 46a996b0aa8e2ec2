//! mailsift - concurrent spam triage over a stream of mail addresses
//!
//! Reads newline-delimited addresses, pushes them through the
//! resolve → enumerate → classify → aggregate pipeline, and prints one
//! `<bool> <id>` line per surviving verdict in deterministic order.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod config;
mod run;

use config::Config;

#[derive(Parser)]
#[command(name = "mailsift")]
#[command(about = "Concurrent spam triage over a stream of mail addresses")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Suppress info logs (only warnings and errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug logging (includes per-stage diagnostics)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./mailsift.toml or ~/.config/mailsift/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the triage pipeline over an address list
    Run(run::RunArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    mailsift_core::init_logging(cli.quiet, cli.debug);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Run(args) => run::run(args, &config),
        Command::Config => {
            use comfy_table::{
                modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec!["Batch size", &config.pipeline.batch_size.to_string()]);
            table.add_row(vec![
                "Classify permits",
                &config.pipeline.classify_permits.to_string(),
            ]);
            table.add_row(vec![
                "Queue capacity",
                &config.pipeline.queue_capacity.to_string(),
            ]);
            table.add_row(vec![
                "Fixture messages/user",
                &config.fixture.messages_per_user.to_string(),
            ]);
            table.add_row(vec![
                "Fixture failure rate",
                &format!("{}%", config.fixture.failure_rate_pct),
            ]);
            table.add_row(vec![
                "Fixture latency",
                &format!("{}ms", config.fixture.latency_ms),
            ]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
