#![forbid(unsafe_code)]

mod cmd;
mod output;
mod viewer;

use clap::{Parser, Subcommand};
use leadline_core::config::resolve_config;
use leadline_core::error::ErrorCode;
use output::{CliError, OutputMode, render_error};
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "leadline: lead lifecycle guards and activity timeline",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Viewer id used for author fallback and as the acting user.
    #[arg(long, global = true)]
    viewer_id: Option<String>,

    /// Viewer display name.
    #[arg(long, global = true)]
    viewer_name: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// The output format requested on the command line, if any.
    fn format_flag(&self) -> Option<&'static str> {
        match self.format {
            Some(mode) => Some(mode.as_str()),
            None if self.json => Some(OutputMode::Json.as_str()),
            None => None,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Lifecycle",
        about = "Move a lead to a new pipeline stage",
        long_about = "Validate a pipeline-stage move, record its event, and apply the auto-open follow-up.",
        after_help = "EXAMPLES:\n    # First contact with an assigned lead\n    leadline stage --status ASSIGNED --to FIRST_TALK_DONE\n\n    # Park a lead\n    leadline stage --from FOLLOWING_UP --to HIBERNATED --reason \"Budget frozen\"\n\n    # Emit machine-readable output\n    leadline stage --to FOLLOWING_UP --json"
    )]
    Stage(cmd::stage::StageArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Move a lead to a new status filter",
        after_help = "EXAMPLES:\n    # Prioritize a lead\n    leadline status --from OPEN --to HIGH_PRIORITY"
    )]
    Status(cmd::status::StatusArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Validate a combined status/stage save",
        after_help = "EXAMPLES:\n    # Change both at once\n    leadline update --status LOW_PRIORITY --stage NO_RESPONSE_DORMANT --reason \"No answer in 3 weeks\""
    )]
    Update(cmd::update::UpdateArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Evaluate the auto-open rule",
        after_help = "EXAMPLES:\n    leadline auto-open PENDING FIRST_TALK_DONE"
    )]
    AutoOpen(cmd::auto_open::AutoOpenArgs),

    #[command(
        next_help_heading = "Read",
        about = "List selectable next stages",
        after_help = "EXAMPLES:\n    # Options for a lead that has progressed\n    leadline stages --current FOLLOWING_UP\n\n    # Selectable status filters\n    leadline stages --statuses"
    )]
    Stages(cmd::stages::StagesArgs),

    #[command(
        next_help_heading = "Read",
        about = "Print the reconciled activity timeline",
        long_about = "Merge interactions, remarks, and lifecycle events into one deduplicated, newest-first feed.",
        after_help = "EXAMPLES:\n    leadline timeline --interactions i.json --remarks r.json --events e.json\n\n    # Newest five entries as JSON\n    leadline timeline --interactions i.json --limit 5 --json"
    )]
    Timeline(cmd::timeline::TimelineArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("LEADLINE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "leadline=debug,info"
        } else {
            "leadline=info,warn"
        })
    });

    let format = env::var("LEADLINE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let config = match resolve_config(&project_root, cli.format_flag()) {
        Ok(config) => config,
        Err(err) => {
            let output = cli.format.unwrap_or(if cli.json {
                OutputMode::Json
            } else {
                OutputMode::Text
            });
            render_error(
                output,
                &CliError::coded(format!("{err:#}"), ErrorCode::ConfigParseError),
            )?;
            return Err(err);
        }
    };
    let output = OutputMode::from_resolved(&config.resolved_output);
    let viewer = viewer::resolve_viewer(
        cli.viewer_id.as_deref(),
        cli.viewer_name.as_deref(),
        &config.user,
    );
    debug!(output = output.as_str(), viewer = ?viewer, "resolved settings");

    match &cli.command {
        Commands::Stage(args) => cmd::stage::run_stage(args, viewer.as_ref(), &config, output),
        Commands::Status(args) => cmd::status::run_status(args, viewer.as_ref(), &config, output),
        Commands::Update(args) => cmd::update::run_update(args, output),
        Commands::AutoOpen(args) => cmd::auto_open::run_auto_open(args, output),
        Commands::Stages(args) => cmd::stages::run_stages(args, output),
        Commands::Timeline(args) => {
            cmd::timeline::run_timeline(args, viewer.as_ref(), &config, output)
        }
    }
}
