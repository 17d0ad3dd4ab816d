mod cli;
mod render;
mod repl;

use anyhow::Result;
use clap::Parser;
use cli::Args;
use pdf_assistant::Assistant;
use repl::Repl;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = args.config()?;

    log::info!("Starting PDF chat assistant...");
    let assistant = Assistant::new(&config);

    Repl::new(assistant).run(args.files).await
}
