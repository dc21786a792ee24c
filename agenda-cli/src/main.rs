mod commands;
mod prompt;
mod render;

use std::path::PathBuf;

use agenda_core::{AgendaError, Session};
use agenda_core::config::AgendaConfig;
use agenda_core::report::ReportScope;
use agenda_core::store::DirStore;
use anyhow::Result;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Month calendar, events and PDF reports in your terminal")]
struct Cli {
    /// Log store and export activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month grid (defaults to the current month)
    Month {
        #[arg(short, long)]
        year: Option<i32>,

        /// Month number, 1-12
        #[arg(short, long)]
        month: Option<u32>,
    },
    /// List the events of a day
    Day {
        /// Day to list (YYYY-MM-DD)
        date: String,
    },
    /// Add an event to a day
    Add {
        /// Day of the event (YYYY-MM-DD)
        date: String,

        #[arg(short, long)]
        title: String,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Change an existing event
    Edit {
        /// Event id, as shown by `agenda day`
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[command(flatten)]
        fields: FieldArgs,

        /// Remove every participant
        #[arg(long, conflicts_with = "participants")]
        clear_participants: bool,
    },
    /// Delete an event
    Delete {
        /// Event id, as shown by `agenda day`
        id: String,
    },
    /// Export a PDF report
    Export {
        #[command(subcommand)]
        scope: ExportScope,
    },
    /// Browse months and edit events interactively (the default)
    Interactive,
}

#[derive(Args)]
struct FieldArgs {
    #[arg(short, long)]
    description: Option<String>,

    /// Time label, e.g. "14:30"
    #[arg(long)]
    hour: Option<String>,

    /// Participant tag (repeatable)
    #[arg(short, long = "participant")]
    participants: Vec<String>,
}

#[derive(Subcommand)]
enum ExportScope {
    /// Events of one month
    Month {
        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long)]
        month: Option<u32>,

        /// Directory to write the PDF into (defaults to export_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Events of one year
    Year {
        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli).await;

    // Input problems are shown as-is, without the error chain
    if let Err(e) = &result
        && let Some(AgendaError::Validation(message)) = e.downcast_ref::<AgendaError>()
    {
        eprintln!("{}", message.red());
        std::process::exit(1);
    }

    result
}

async fn run(cli: Cli) -> Result<()> {
    let config = AgendaConfig::load()?;
    let store = DirStore::open(&config.data_path()).await?;
    let mut session = Session::new(store, Local::now().date_naive(), config.locale()?);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Month { year, month } => {
            let month = commands::resolve_month(&session, year, month)?;
            commands::month::run(&mut session, month).await
        }
        Commands::Day { date } => commands::day::run(&session, commands::parse_date(&date)?).await,
        Commands::Add { date, title, fields } => {
            let edit = commands::FieldEdit {
                title: Some(title),
                description: fields.description,
                hour: fields.hour,
                participants: Some(fields.participants),
            };
            commands::add::run(&mut session, commands::parse_date(&date)?, edit).await
        }
        Commands::Edit {
            id,
            title,
            fields,
            clear_participants,
        } => {
            let participants = if clear_participants {
                Some(Vec::new())
            } else if fields.participants.is_empty() {
                None
            } else {
                Some(fields.participants)
            };
            let edit = commands::FieldEdit {
                title,
                description: fields.description,
                hour: fields.hour,
                participants,
            };
            commands::edit::run(&mut session, commands::parse_id(&id)?, edit).await
        }
        Commands::Delete { id } => commands::delete::run(&mut session, commands::parse_id(&id)?).await,
        Commands::Export { scope } => match scope {
            ExportScope::Month {
                year,
                month,
                output,
            } => {
                let month = commands::resolve_month(&session, year, month)?;
                let dir = output.unwrap_or_else(|| config.export_path());
                commands::export::run(&session, ReportScope::Month(month), &dir).await
            }
            ExportScope::Year { year, output } => {
                let year = year.unwrap_or(session.current_month().year());
                let dir = output.unwrap_or_else(|| config.export_path());
                commands::export::run(&session, ReportScope::Year(year), &dir).await
            }
        },
        Commands::Interactive => commands::interactive::run(&mut session, &config).await,
    }
}

/// Warnings only by default; `--verbose` shows debug, `RUST_LOG` wins otherwise.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
