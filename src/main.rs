use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use kaiheartradio::{
    cli,
    config::{self, Config, DEFAULT_MARKETPLACE_URL},
    error, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Print debug output
    #[clap(short, long, global = true)]
    debug: bool,

    /// Path of the config file
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Defaults to `daily`
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add the songs of the latest posted day to the playlist
    Daily,

    /// Add all songs from a number of pages to an empty playlist
    Bootstrap(BootstrapOptions),

    /// Show the songs on a page without adding them
    Songs(SongsOptions),

    /// Run an HTTP server that triggers the daily run
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct BootstrapOptions {
    /// Number of numbered pages to read in addition to the first page
    pages: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct SongsOptions {
    /// Include every day on the page, not only the latest
    #[clap(long)]
    all: bool,

    /// Page number to read instead of the first page
    #[clap(long)]
    page: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to listen on, overrides `[server] address`
    #[clap(long)]
    address: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

async fn load_config(path: Option<PathBuf>) -> Config {
    let path = config::config_path(path);
    match Config::load(path.clone()).await {
        Ok(config) => config,
        Err(e) => error!("Cannot load config from {}. Err: {}", path.display(), e),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    kaiheartradio::set_debug(cli.debug);

    match cli.command.unwrap_or(Command::Daily) {
        Command::Daily => cli::daily(load_config(cli.config).await).await,
        Command::Bootstrap(opt) => cli::bootstrap(load_config(cli.config).await, opt.pages).await,
        Command::Songs(opt) => {
            let marketplace_url = match Config::load(config::config_path(cli.config)).await {
                Ok(config) => config.marketplace_url,
                Err(_) => DEFAULT_MARKETPLACE_URL.to_string(),
            };
            cli::songs(marketplace_url, opt.all, opt.page).await
        }
        Command::Serve(opt) => cli::serve(load_config(cli.config).await, opt.address).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
