//! Issuelift CLI - replay a GitLab issue export onto GitHub.

mod commands;
mod config;
mod progress;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use issuelift::{IssueId, TextRewriteRule, UserId};
use tracing_subscriber::EnvFilter;

use crate::commands::limits::OutputFormat;

#[derive(Parser)]
#[command(name = "issuelift")]
#[command(version)]
#[command(about = "Migrate issues from a GitLab export to GitHub")]
#[command(
    long_about = "Issuelift reads the issues.ndjson file of a GitLab project export and \
recreates its issues and comments on GitHub, in identifier order, so that every \
issue keeps its number. Gaps left by deleted issues are filled with placeholders."
)]
#[command(after_long_help = r#"EXAMPLES
    List the issues found in an export:
        $ issuelift -e tree/project/issues.ndjson summary

    Rehearse a full import without calling GitHub:
        $ issuelift -e issues.ndjson -u alice=482361 import -r acme/app --dry-run

    Resume an import from issue 120:
        $ issuelift -e issues.ndjson import -r acme/app --start 120 --delay 5s

    Post the comments again, newest issue first:
        $ issuelift -e issues.ndjson import -r acme/app --comments --reverse

CONFIGURATION
    Issuelift reads configuration from:
      1. ~/.config/issuelift/config.toml (or $XDG_CONFIG_HOME/issuelift/config.toml)
      2. ./issuelift.toml
      3. Environment variables (ISSUELIFT_* prefix, e.g., ISSUELIFT_GITHUB__TOKEN)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    ISSUELIFT_GITHUB__TOKEN         GitHub personal access token
    ISSUELIFT_GITHUB__API_URL       GitHub API endpoint
    ISSUELIFT_IMPORT__DELAY_SECS    Seconds between API calls
    ISSUELIFT_IMPORT__LABELS        Comma-separated labels for created issues
    RUST_LOG                        Log filter (default: issuelift=info,issuelift_cli=info)
"#)]
struct Cli {
    #[command(flatten)]
    globals: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads the export.
#[derive(Debug, Clone, Args)]
struct GlobalArgs {
    /// Path to the issues.ndjson file of the uncompressed GitLab export
    #[arg(short, long, global = true, default_value = "tree/project/issues.ndjson")]
    export: PathBuf,

    /// Drop comments starting with these prefixes (replaces the built-in set)
    #[arg(short, long, global = true, value_delimiter = ',')]
    filter: Vec<String>,

    /// Map a GitHub handle to a GitLab user id, as handle=id (repeatable)
    #[arg(short, long = "users", global = true, value_delimiter = ',', value_parser = parse_user_pair)]
    users: Vec<(String, UserId)>,

    /// Rewrite issue and comment text, as regex=replacement (repeatable, applied in order)
    #[arg(long, global = true, value_parser = parse_rewrite_rule)]
    replace: Vec<TextRewriteRule>,

    /// Trace every GitHub request and response
    #[arg(short, long, global = true)]
    debug: bool,

    /// GitHub API token (default from config or ISSUELIFT_GITHUB__TOKEN)
    #[arg(short, long, global = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every issue found in the export
    Summary,
    /// List the unique GitLab user ids found across issues and comments
    Users,
    /// Display one converted issue with its comments
    Show {
        /// Identifier of the issue
        #[arg(long)]
        id: IssueId,
    },
    /// Create one issue and its comments on GitHub
    Post {
        /// Identifier of the issue
        #[arg(long)]
        id: IssueId,

        #[command(flatten)]
        target: TargetOptions,
    },
    /// Replay the whole export onto GitHub
    Import {
        #[command(flatten)]
        target: TargetOptions,

        /// First identifier to replay (lower ones are skipped)
        #[arg(long, default_value_t = 1)]
        start: IssueId,

        /// Last identifier to replay (only with --comments)
        #[arg(long)]
        end: Option<IssueId>,

        /// Post comments only, onto issues that already exist with the same numbers
        #[arg(long)]
        comments: bool,

        /// Walk identifiers from the highest down (only with --comments)
        #[arg(long)]
        reverse: bool,

        /// Pause between API calls, e.g. "10s" or "500ms" (default from config or 10s)
        #[arg(long)]
        delay: Option<humantime::Duration>,
    },
    /// Show current GitHub rate limit status
    Limits {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Generate man page(s)
    Man {
        /// Output directory for man pages (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Where created issues go.
#[derive(Debug, Clone, Args)]
struct TargetOptions {
    /// Target repository as owner/name
    #[arg(short, long)]
    repo: String,

    /// Labels attached to every created issue (default from config)
    #[arg(short, long, value_delimiter = ',')]
    labels: Vec<String>,

    /// Build and log every request without sending it
    #[arg(short = 'n', long)]
    dry_run: bool,
}

fn parse_user_pair(s: &str) -> Result<(String, UserId), String> {
    let (handle, id) = s
        .split_once('=')
        .ok_or_else(|| format!("expected handle=id, got '{s}'"))?;
    let id = id
        .trim()
        .parse()
        .map_err(|e| format!("invalid user id '{id}': {e}"))?;
    Ok((handle.trim().to_string(), id))
}

/// Split on the first `=`, so replacements may contain `=` but patterns may not.
fn parse_rewrite_rule(s: &str) -> Result<TextRewriteRule, String> {
    let (pattern, replacement) = s
        .split_once('=')
        .ok_or_else(|| format!("expected pattern=replacement, got '{s}'"))?;
    if pattern.is_empty() {
        return Err("empty rewrite pattern".to_string());
    }
    Ok(TextRewriteRule::new(pattern, replacement))
}

fn init_tracing(debug: bool) {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if debug => EnvFilter::new("issuelift=debug,issuelift_cli=debug"),
        Err(_) => EnvFilter::new("issuelift=info,issuelift_cli=info"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Handle commands that don't need the export or configuration first
    match &cli.command {
        Commands::Completions { shell } => {
            commands::meta::handle_completions(*shell)?;
            return Ok(());
        }
        Commands::Man { output } => {
            commands::meta::handle_man(output.clone())?;
            return Ok(());
        }
        _ => {}
    }

    init_tracing(cli.globals.debug);

    // Load configuration (config file -> env vars -> defaults)
    let config = config::Config::load()?;
    let ctx = commands::shared::Context::new(&cli.globals, &config);

    match cli.command {
        Commands::Summary => commands::summary::handle_summary(&ctx)?,
        Commands::Users => commands::users::handle_users(&ctx)?,
        Commands::Show { id } => commands::show::handle_show(&ctx, id)?,
        Commands::Post { id, target } => commands::post::handle_post(&ctx, id, &target).await?,
        Commands::Import {
            target,
            start,
            end,
            comments,
            reverse,
            delay,
        } => {
            let args = commands::import::ImportArgs {
                start,
                end,
                comments,
                reverse,
                delay: delay.map(Into::into),
            };
            commands::import::handle_import(&ctx, &target, args).await?;
        }
        Commands::Limits { output } => commands::limits::handle_limits(&ctx, output).await?,
        Commands::Completions { .. } | Commands::Man { .. } => {}
    }

    Ok(())
}
