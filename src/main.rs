//! Postdesk - A terminal editor for blog posts.
//!
//! # Usage
//!
//! ```bash
//! postdesk new
//! postdesk edit 42
//! postdesk render post.md
//! postdesk --api-url https://blog.example.com/api --token TOKEN --save
//! ```

use std::fs::OpenOptions;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use postdesk::api::{ApiError, HttpPostService, PostService};
use postdesk::app::App;
use postdesk::config::{
    ConfigFlags, Settings, TOKEN_ENV, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use postdesk::draft::{DraftSlot, FileStorage};
use postdesk::markdown;

/// A terminal editor for blog posts
#[derive(Parser, Debug)]
#[command(name = "postdesk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Base URL of the blog admin API
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Bearer token for the admin API (also read from POSTDESK_TOKEN)
    #[arg(long, global = true, value_name = "TOKEN")]
    token: Option<String>,

    /// Directory holding the autosaved draft
    #[arg(long, global = true, value_name = "DIR")]
    draft_dir: Option<PathBuf>,

    /// Write debug logs to a file
    #[arg(long, global = true, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Open the key reference when the editor starts
    #[arg(long, global = true)]
    help_on_start: bool,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a new post (the default)
    New,
    /// Edit an existing post
    Edit {
        /// Post id
        id: i64,
    },
    /// Render markdown to HTML on stdout
    Render {
        /// Markdown file; stdin when omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Inspect or discard the autosaved draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
    /// List the blogs posts can be published under
    Blogs,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum DraftAction {
    /// Print the stored draft as JSON
    Show,
    /// Remove the stored draft
    Clear,
}

fn init_logging(debug_log: Option<&Path>) -> Result<()> {
    match debug_log {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open debug log {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
                )
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let settings = file_flags
        .union(&cli_flags)
        .resolve(std::env::var(TOKEN_ENV).ok());

    init_logging(settings.debug_log.as_deref())?;
    tracing::debug!(?settings, "configuration resolved");

    let Some(command) = cli.command else {
        if cli.save || cli.clear {
            println!("Defaults updated in {}", global_path.display());
            return Ok(());
        }
        return run_editor(&settings, None);
    };

    match command {
        Command::New => run_editor(&settings, None),
        Command::Edit { id } => run_editor(&settings, Some(id)),
        Command::Render { file } => render_markdown(file.as_deref()),
        Command::Draft { action } => draft_command(&settings, action),
        Command::Blogs => list_blogs(&settings),
    }
}

fn service_for(settings: &Settings) -> HttpPostService {
    HttpPostService::new(settings.api_url.clone(), settings.token.clone())
}

/// Turn a failed startup request into a user-facing error. An auth failure
/// points at the token settings.
fn startup_error(err: ApiError, what: &str) -> anyhow::Error {
    match err {
        ApiError::Unauthorized => anyhow!(
            "Not authorized to {what}. Log in to the admin and pass the token with --token, \
             set {TOKEN_ENV}, or store it with --token <TOKEN> --save."
        ),
        other => anyhow::Error::new(other).context(format!("Failed to {what}")),
    }
}

fn run_editor(settings: &Settings, post_id: Option<i64>) -> Result<()> {
    let service = service_for(settings);
    let storage = FileStorage::new(settings.draft_dir.clone());
    let app = match post_id {
        Some(id) => App::load_edit_post(id, storage, service)
            .map_err(|err| startup_error(err, &format!("load post {id}")))?,
        None => App::load_new_post(storage, service)
            .map_err(|err| startup_error(err, "load blogs"))?,
    }
    .with_help_visible(settings.help_on_start);

    match app.run().context("Application error")? {
        Some(post) => {
            let state = if post.published { "published" } else { "draft" };
            println!("Saved post #{} \"{}\" ({state})", post.id, post.title);
        }
        None if post_id.is_none() => {
            println!(
                "Exited without saving. Unsaved work is kept in {}",
                settings.draft_dir.display()
            );
        }
        None => println!("Exited without saving."),
    }
    Ok(())
}

fn render_markdown(file: Option<&Path>) -> Result<()> {
    let source = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    println!("{}", markdown::render(&source));
    Ok(())
}

fn draft_command(settings: &Settings, action: DraftAction) -> Result<()> {
    let mut slot = DraftSlot::new(FileStorage::new(settings.draft_dir.clone()));
    match action {
        DraftAction::Show => match slot.try_load().context("Failed to read stored draft")? {
            Some(draft) => println!("{}", serde_json::to_string_pretty(&draft)?),
            None => println!("No stored draft in {}", settings.draft_dir.display()),
        },
        DraftAction::Clear => {
            slot.clear().context("Failed to clear stored draft")?;
            println!("Stored draft cleared");
        }
    }
    Ok(())
}

fn list_blogs(settings: &Settings) -> Result<()> {
    let blogs = service_for(settings)
        .get_blogs()
        .map_err(|err| startup_error(err, "load blogs"))?;
    if blogs.is_empty() {
        println!("No blogs");
    }
    for blog in blogs {
        println!("{:>5}  {}  ({})", blog.id, blog.name, blog.slug);
    }
    Ok(())
}
