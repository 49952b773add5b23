//! grill CLI
//!
//! Show an animated selector in the terminal and print the chosen option.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use grill::config::{pick_menu, MenuFile};
use grill::error::Result;
use grill::logging::init_logging;
use grill::menu::Navigation;
use grill::report::{format_choice, OutputFormat};
use grill::selector::{CrosstermSurface, Outcome};
use grill::types::Choice;

#[derive(Parser)]
#[command(name = "grill")]
#[command(about = "Pick one option from an animated terminal menu")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for the chosen option
    #[arg(long, value_enum, default_value = "human", global = true)]
    format: OutputFormatArg,

    /// Animation and key poll interval in milliseconds (overrides menu files)
    #[arg(long, global = true)]
    step_ms: Option<u64>,

    /// Write logs to this file (default location is used when GRILL_LOG is set)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a menu definition file
    Run {
        /// JSON menu file
        menu: PathBuf,
    },

    /// Build a one-screen menu from the given labels
    Pick {
        /// Option labels, top to bottom
        #[arg(required = true)]
        labels: Vec<String>,

        /// Title shown above the options
        #[arg(long)]
        title: Option<String>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let step = cli.step_ms.map(Duration::from_millis);
    let result = match cli.command {
        Commands::Run { menu } => cmd_run(&menu, step),
        Commands::Pick { labels, title } => cmd_pick(&labels, title.as_deref(), step),
    };

    match result {
        Ok(Some(choice)) => {
            println!("{}", format_choice(&choice, cli.format.into()));
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::from(Outcome::Interrupted.exit_code() as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Run a menu file. None when the user interrupted.
fn cmd_run(path: &Path, step: Option<Duration>) -> Result<Option<Choice>> {
    let file = MenuFile::load(path)?;
    let (mut menu, root) = file.build(step)?;

    let mut surface = CrosstermSurface::new();
    match menu.run(root, &mut surface)? {
        Navigation::Chosen { choice, .. } => Ok(Some(choice)),
        Navigation::Interrupted => Ok(None),
    }
}

/// Run a single screen built from labels. None when the user interrupted.
fn cmd_pick(labels: &[String], title: Option<&str>, step: Option<Duration>) -> Result<Option<Choice>> {
    let mut selector = pick_menu(labels, title)?;
    if let Some(step) = step {
        selector.set_step_interval(step);
    }

    let mut surface = CrosstermSurface::new();
    match selector.render(&mut surface)? {
        Outcome::Committed => Ok(Some(selector.selected_option()?.clone())),
        Outcome::Interrupted => Ok(None),
    }
}
