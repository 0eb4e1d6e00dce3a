use clap::Parser;

/// Sidekick — an embedded sidebar chat panel host.
#[derive(Parser, Debug)]
#[command(name = "sidekick", version, about)]
pub struct Args {
    /// Workspace identifier used to scope conversation state.
    #[arg(short = 'w', long, default_value = "default")]
    pub workspace: String,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (e.g. debug, sidekick=debug).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
