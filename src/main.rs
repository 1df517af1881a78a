use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sitetheme::{
    chip_color, render_embed, GiscusWidget, JsonFileStore, ResolvedTheme, RootElement, SiteConfig,
    SystemAppearance, ThemeChangeEvent, ThemeController, WriterChannel,
};

type Controller = ThemeController<JsonFileStore, SystemAppearance, RootElement>;

/// Manage the site theme preference.
#[derive(Debug, Parser)]
#[command(name = "sitetheme", version, about)]
struct Cli {
    /// Configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Preference state file; overrides the configured one.
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Append comment-widget control messages to this file as JSON lines.
    #[arg(long, global = true, value_name = "PATH")]
    widget_messages: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the stored preference and the theme it resolves to.
    Show,
    /// Store a preference: light, dark or system.
    Set { preference: String },
    /// Cycle light -> dark -> system.
    Toggle,
    /// Follow system appearance changes until interrupted.
    Watch,
    /// Print chip colors for tags.
    Chip {
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Print the comment-widget embed markup.
    Embed {
        /// Theme to embed with; defaults to the current resolved theme.
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for ResolvedTheme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ResolvedTheme::Light,
            ThemeArg::Dark => ResolvedTheme::Dark,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "sitetheme=debug,warn"
    } else {
        "sitetheme=info,warn"
    };
    let env_filter =
        EnvFilter::try_from_env("SITETHEME_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

/// Accepts `Dark` or ` system ` on the command line; the store only ever sees
/// the lowercase form.
fn normalize_preference(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

fn build_controller(cli: &Cli, config: &SiteConfig) -> Result<Controller> {
    let state_path = cli.state.clone().unwrap_or_else(|| config.state_path());
    let store = JsonFileStore::open(&state_path)
        .with_context(|| format!("Failed to open state file {:?}", state_path))?;

    let mut controller = ThemeController::with_storage_key(
        config.storage_key.clone(),
        store,
        SystemAppearance,
        RootElement::new(),
    );
    controller.initialize();

    if let Some(path) = &cli.widget_messages {
        if config.comments.is_configured() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open widget message file {:?}", path))?;
            let channel = WriterChannel::new(file);
            controller.mount_widget(GiscusWidget::with_channel(config.comments.clone(), channel));
        } else {
            tracing::warn!("--widget-messages given but no comments repo is configured");
        }
    }
    Ok(controller)
}

fn print_state(controller: &Controller) {
    println!(
        "{} {}",
        style("preference:").dim(),
        style(controller.preference()).bold()
    );
    println!(
        "{} {}",
        style("resolved:  ").dim(),
        styled_theme(controller.resolved())
    );
    println!("{} {}", style("root:      ").dim(), controller.document());
}

fn print_event(event: &ThemeChangeEvent) {
    println!(
        "{} {} {}",
        style(event.preference).bold(),
        style("->").dim(),
        styled_theme(event.resolved)
    );
}

fn styled_theme(theme: ResolvedTheme) -> console::StyledObject<ResolvedTheme> {
    match theme {
        ResolvedTheme::Dark => style(theme).magenta(),
        ResolvedTheme::Light => style(theme).yellow(),
    }
}

fn run(cli: Cli) -> Result<()> {
    let config =
        SiteConfig::load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;

    match &cli.command {
        Command::Show => {
            let controller = build_controller(&cli, &config)?;
            print_state(&controller);
        }
        Command::Set { preference } => {
            let mut controller = build_controller(&cli, &config)?;
            let event = controller
                .set_theme_named(&normalize_preference(preference))
                .context("Failed to set theme")?;
            print_event(&event);
        }
        Command::Toggle => {
            let mut controller = build_controller(&cli, &config)?;
            let event = controller.toggle_theme().context("Failed to toggle theme")?;
            print_event(&event);
        }
        Command::Watch => {
            let mut controller = build_controller(&cli, &config)?;
            controller.subscribe(print_event);
            print_state(&controller);
            loop {
                thread::sleep(config.poll_interval());
                controller.poll_appearance();
            }
        }
        Command::Chip { tags } => {
            for tag in tags {
                println!("{} {}", style(tag).bold(), chip_color(tag));
            }
        }
        Command::Embed { theme } => {
            let theme = match theme {
                Some(theme) => ResolvedTheme::from(*theme),
                None => build_controller(&cli, &config)?.resolved(),
            };
            let markup = render_embed(&config.comments, theme)
                .context("Failed to render comment widget markup")?;
            println!("{}", markup);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.comments.repo = "dana/site".to_string();
        config.comments.repo_id = "R_1".to_string();
        config.comments.category = "Comments".to_string();
        config.comments.category_id = "C_1".to_string();
        config
    }

    #[test]
    fn test_widget_message_file_holds_only_json_lines() {
        let dir = TempDir::new().unwrap();
        let state = dir.path().join("state.json");
        let messages = dir.path().join("widget.jsonl");
        let cli = Cli::parse_from([
            "sitetheme".as_ref(),
            "--state".as_ref(),
            state.as_os_str(),
            "--widget-messages".as_ref(),
            messages.as_os_str(),
            "set".as_ref(),
            "Dark".as_ref(),
        ]);

        let Command::Set { preference } = &cli.command else {
            panic!("expected set command");
        };
        let mut controller = build_controller(&cli, &config()).unwrap();
        controller
            .set_theme_named(&normalize_preference(preference))
            .unwrap();
        controller.toggle_theme().unwrap();
        drop(controller);

        let content = fs::read_to_string(&messages).unwrap();
        let envelopes: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        // mount, set dark, toggle to system
        assert_eq!(envelopes.len(), 3);
        for envelope in &envelopes {
            assert_eq!(envelope["targetOrigin"], "https://giscus.app");
            assert!(envelope["message"]["giscus"]["setConfig"]["theme"].is_string());
        }
        assert_eq!(envelopes[1]["message"]["giscus"]["setConfig"]["theme"], "dark");
    }

    #[test]
    fn test_normalize_preference() {
        assert_eq!(normalize_preference(" Dark "), "dark");
        assert_eq!(normalize_preference("SYSTEM\n"), "system");
        assert_eq!(normalize_preference("sepia"), "sepia");
    }

    #[test]
    fn test_widget_messages_skipped_without_comments_repo() {
        let dir = TempDir::new().unwrap();
        let messages = dir.path().join("widget.jsonl");
        let cli = Cli::parse_from([
            "sitetheme".as_ref(),
            "--state".as_ref(),
            dir.path().join("state.json").as_os_str(),
            "--widget-messages".as_ref(),
            messages.as_os_str(),
            "show".as_ref(),
        ]);

        let controller = build_controller(&cli, &SiteConfig::default()).unwrap();
        assert_eq!(controller.widget_count(), 0);
        assert!(!messages.exists());
    }
}
