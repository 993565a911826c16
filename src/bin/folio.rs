use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio::{
    Config, Dataset, Environment, ImageFile, MotionPreference, PersistOutcome, Theme,
    ThemePreference, theme::THEME_ATTRIBUTE,
};

#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Cli {
    /// JSON config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Key-value store file (overrides config and FOLIO_STORE).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Run without persistence or system signals.
    #[arg(long, global = true)]
    headless: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the average color of an image (PNG, JPEG, SVG, ...).
    Average(AverageArgs),
    /// Convert a #rrggbb color to rgba(...).
    Rgba(RgbaArgs),
    /// Show or change the persisted theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Print the reduced-motion preference.
    Motion,
}

#[derive(Parser, Debug)]
struct AverageArgs {
    /// Input image.
    path: PathBuf,

    /// Alpha for the rgba(...) output.
    #[arg(long, default_value_t = 1.0)]
    alpha: f64,

    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct RgbaArgs {
    /// Hex color, with or without the leading '#'.
    hex: String,

    #[arg(long, default_value_t = 1.0)]
    alpha: f64,
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    /// Print the current theme (default).
    Show,
    /// Set the theme.
    Set { theme: Theme },
    /// Switch between light and dark.
    Toggle,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.cmd {
        Command::Average(args) => cmd_average(args),
        Command::Rgba(args) => cmd_rgba(args),
        Command::Theme { action } => {
            let config = load_config(&cli)?;
            let (env, dataset) = detect_environment(&config);
            cmd_theme(env, &dataset, &config, action.as_ref())
        }
        Command::Motion => {
            let (env, _) = detect_environment(&load_config(&cli)?);
            println!("{}", MotionPreference::resolve(&env));
            Ok(())
        }
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config =
        Config::load(cli.config.as_deref(), &env_lookup).context("load configuration")?;
    if let Some(store) = &cli.store {
        config.store_path = Some(store.clone());
    }
    if cli.headless {
        config.headless = true;
    }
    Ok(config)
}

fn detect_environment(config: &Config) -> (Environment, Dataset) {
    let dataset = Dataset::new();
    let env = Environment::detect(config, &env_lookup, dataset.clone());
    (env, dataset)
}

fn cmd_average(args: &AverageArgs) -> anyhow::Result<()> {
    let rgb = folio::average_color(&ImageFile::new(&args.path));
    let hex = folio::rgb_to_hex(rgb);
    let rgba = folio::hex_to_rgba(hex.as_str(), args.alpha)?;

    if args.json {
        let out = serde_json::json!({
            "rgb": rgb,
            "hex": hex,
            "rgba": rgba,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("hex: {hex}");
        println!("rgba: {rgba}");
    }
    Ok(())
}

fn cmd_rgba(args: &RgbaArgs) -> anyhow::Result<()> {
    let rgba = folio::hex_to_rgba(&args.hex, args.alpha)
        .with_context(|| format!("convert '{}'", args.hex))?;
    println!("{rgba}");
    Ok(())
}

fn cmd_theme(
    env: Environment,
    dataset: &Dataset,
    config: &Config,
    action: Option<&ThemeAction>,
) -> anyhow::Result<()> {
    let mut pref = ThemePreference::with_key(env, config.theme_key.clone());
    let mut outcome = pref.activate();
    match action {
        None | Some(ThemeAction::Show) => {}
        Some(ThemeAction::Set { theme }) => outcome = pref.set(*theme),
        Some(ThemeAction::Toggle) => outcome = pref.toggle(),
    }

    println!("theme: {}", pref.get());
    match dataset.get(THEME_ATTRIBUTE) {
        Some(value) => println!("{THEME_ATTRIBUTE}: {value}"),
        None => println!("{THEME_ATTRIBUTE}: (headless)"),
    }
    if let PersistOutcome::Failed(err) = outcome {
        eprintln!("warning: theme not saved: {err}");
    }
    Ok(())
}
