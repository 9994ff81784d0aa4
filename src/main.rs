use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use slacky::backend::{ChatBackend, SlackClient};
use slacky::core::config::{self, CliOverrides};
use slacky::core::directory::{Directory, DirectoryMode};
use slacky::tui;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "slacky", about = "Terminal client for Slack conversations")]
struct Args {
    /// Config file holding the Slack token (takes precedence over SLACK_TOKEN)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Which conversations to list
    #[arg(long, value_enum)]
    directory: Option<DirectoryMode>,

    /// Number of past messages shown when a conversation is opened
    #[arg(long)]
    history: Option<usize>,

    /// Where to write the log
    #[arg(long, default_value = "slacky.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the UI, so logs go to a file
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let cli = CliOverrides {
        config_file: args.config,
        directory: args.directory,
        history_count: args.history,
    };
    let file_config = match config::load_config(cli.config_file.as_deref()) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    let resolved = match config::resolve(&file_config, &cli, |k| std::env::var(k).ok()) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };

    log::info!(
        "Slacky starting up against {} ({} directory)",
        resolved.base_url,
        resolved.directory
    );

    let backend: Arc<dyn ChatBackend> = Arc::new(SlackClient::new(
        resolved.token.clone(),
        Some(resolved.base_url.clone()),
    ));

    // Anything wrong with the token shows up here, before the terminal is taken
    let directory = match Directory::load(backend.as_ref(), resolved.directory).await {
        Ok(d) => d,
        Err(e) => return fail(&e),
    };

    match tui::run(&resolved, backend, directory).await {
        Ok(()) => {
            log::info!("Slacky shut down");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn fail(error: &dyn std::error::Error) -> ExitCode {
    log::error!("{error}");
    eprintln!("slacky: {error}");
    ExitCode::FAILURE
}
