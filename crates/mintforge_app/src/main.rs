mod platform;

use std::path::PathBuf;

use clap::Parser;

use platform::logging::LogDestination;

/// Terminal client for webhook-driven artwork minting.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Webhook URL to pre-fill the input field with.
    #[arg(short, long)]
    webhook_url: Option<String>,

    /// Directory saved images are written into.
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Where log output goes.
    #[arg(long, value_enum, default_value = "file")]
    log: LogDestination,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    platform::logging::initialize(cli.log);

    let mut terminal = ratatui::init();
    let result = platform::run_app(&mut terminal, cli.webhook_url, cli.output_dir);
    ratatui::restore();

    result
}
