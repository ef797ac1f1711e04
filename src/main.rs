use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use scrobble_slots::{cli, config, error};

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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP service
    Serve(ServeOptions),

    /// Show a user's total scrobble count
    Playcount(UserOptions),

    /// Resolve the n-th most recent scrobble
    Track(TrackOptions),

    /// Pick a random scrobble
    Spin(SpinOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    pub addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct UserOptions {
    /// Last.fm username
    #[clap(long)]
    pub user: String,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackOptions {
    /// Last.fm username
    #[clap(long)]
    pub user: String,

    /// Index counted from the most recent scrobble (1 = latest)
    #[clap(long)]
    pub n: u64,

    /// Known playcount; fetched from Last.fm when omitted
    #[clap(long)]
    pub max_playcount: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
pub struct SpinOptions {
    /// Last.fm username
    #[clap(long)]
    pub user: String,

    /// Open the Spotify match in the browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => cli::serve(opt.addr).await,
        Command::Playcount(opt) => cli::playcount(opt.user).await,
        Command::Track(opt) => cli::track(opt.user, opt.n, opt.max_playcount).await,
        Command::Spin(opt) => cli::spin(opt.user, opt.open).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
