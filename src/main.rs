use clap::Parser;
use herald::core::config::{self, CliOverrides};
use herald::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "herald", about = "Send messages to a project from the terminal")]
struct Args {
    /// Project that receives the messages
    #[arg(short, long)]
    project_id: Option<String>,

    /// Base URL of the RPC endpoint (e.g. http://localhost:3000/api/trpc)
    #[arg(short, long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to herald.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("herald.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config()?;
    let cli = CliOverrides {
        project_id: args.project_id,
        base_url: args.base_url,
    };
    let resolved = config::resolve(&file_config, &cli)?;

    log::info!(
        "Herald starting up: project={}, base_url={}",
        resolved.project_id,
        resolved.base_url
    );

    tui::run(resolved)?;
    Ok(())
}
