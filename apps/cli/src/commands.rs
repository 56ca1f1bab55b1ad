//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use figmacopy_core::pipeline::{ExpressConfig, ExpressResult, ProgressReporter};
use figmacopy_core::ticket::{TicketConfig, TicketSink, WriterTicketSink};
use figmacopy_figma::FigmaClient;
use figmacopy_shared::{AppConfig, init_config, load_config, resolve_token};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// figmacopy — turn Figma designs into implementation-ready copy.
#[derive(Parser)]
#[command(
    name = "figmacopy",
    version,
    about = "Extract and organize copy from Figma designs.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// List every visible text layer under a Figma node.
    Extract {
        /// Figma URL including a node-id.
        url: Option<String>,
    },

    /// Extract, organize, and draft a ticket for a Figma node's copy.
    Express {
        /// Figma URL including a node-id.
        url: Option<String>,

        /// Product area for the ticket (defaults to the configured area).
        area: Option<String>,

        /// Skip the project build check.
        #[arg(long)]
        skip_build: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout is
/// reserved for the report.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "figmacopy=info",
        1 => "figmacopy=debug",
        _ => "figmacopy=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Extract { url } => {
            let url = require_url(url, "extract", EXTRACT_USAGE);
            cmd_extract(&url).await
        }
        Command::Express {
            url,
            area,
            skip_build,
        } => {
            let url = require_url(url, "express", EXPRESS_USAGE);
            cmd_express(&url, area.as_deref(), skip_build).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

/// Argument synopsis and example for `extract`.
const EXTRACT_USAGE: (&str, &str) = (
    "\"<figma_url>\"",
    "\"https://www.figma.com/file/xxxxx/Design?node-id=347:3746\"",
);

/// Argument synopsis and example for `express`.
const EXPRESS_USAGE: (&str, &str) = (
    "\"<figma_url>\" [area]",
    "\"https://www.figma.com/design/...\" UPP",
);

/// Usage text printed when a command is missing its URL.
fn usage(command: &str, (args, example): (&str, &str)) -> String {
    format!("Usage: figmacopy {command} {args}\nExample: figmacopy {command} {example}")
}

/// Unwrap the URL argument or print usage and exit with status 1.
fn require_url(url: Option<String>, command: &str, synopsis: (&str, &str)) -> String {
    match url {
        Some(url) => url,
        None => {
            println!("{}", usage(command, synopsis));
            std::process::exit(1);
        }
    }
}

/// Load config, resolve the token, and build the API client.
fn figma_client() -> Result<(AppConfig, FigmaClient)> {
    let config = load_config()?;
    let token = resolve_token(&config)?;
    let client = FigmaClient::new(&config.figma, token)?;
    Ok((config, client))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_extract(url: &str) -> Result<()> {
    let (config, client) = figma_client()?;

    info!(url, "extracting text");
    let texts =
        figmacopy_core::pipeline::fetch_texts(&client, url, config.extract.max_depth).await?;

    println!();
    println!("Extracted texts:");
    if texts.is_empty() {
        println!("No text elements found in this node.");
    } else {
        for (index, text) in texts.iter().enumerate() {
            println!("{}. {text}", index + 1);
        }
    }

    Ok(())
}

async fn cmd_express(url: &str, area: Option<&str>, skip_build: bool) -> Result<()> {
    println!("🚀 Express Figma Copy Extraction & Ticket Creation");
    println!("================================================");
    println!();

    let (config, client) = figma_client()?;

    let express_config = ExpressConfig {
        figma_url: url.to_string(),
        max_depth: config.extract.max_depth,
        build: (!skip_build).then(|| config.build.clone()),
        ticket: TicketConfig::from_defaults(&config.ticket, area),
    };

    info!(url, area = %express_config.ticket.area, skip_build, "starting express extraction");

    let reporter = CliProgress::new();
    let result = figmacopy_core::pipeline::express(&express_config, &client, &reporter).await;
    reporter.spinner.finish_and_clear();
    let result = result?;

    println!("✅ Text extraction complete");
    println!();
    println!("{}", result.report);

    let mut sink = WriterTicketSink::new(std::io::stdout());
    let status = sink.submit(&result.ticket)?;

    println!();
    println!("{status}");
    println!();
    println!("🎉 Express extraction complete!");

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, result: &ExpressResult) {
        self.spinner.finish_and_clear();
        info!(
            lines = result.copy.lines.len(),
            build = ?result.build,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "pipeline finished"
        );
    }
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
