use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use listing_digest::{
    constants::DIGEST_DATE_FORMAT,
    logging::{init_logging, LogFormat},
    Config, EmailProcessor, Error, Runner,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "listing-digest",
    about = "Build a daily digest from real-estate alert emails",
    arg_required_else_help = true
)]
struct Cli {
    #[arg(short, long, help = "TOML configuration file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Maildir holding the alert emails")]
    maildir: Option<PathBuf>,

    #[arg(long, help = "Directory the digest files are written to")]
    dump_dir: Option<PathBuf>,

    #[arg(long, help = "Bot webhook URL")]
    webhook_url: Option<String>,

    #[arg(long, help = "Do not call the bot webhook")]
    no_notify: bool,

    #[arg(long, default_value = "text", help = "Log format (text or json)")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Process unread mail into today's digest
    Run {
        #[arg(long, help = "Digest date (YYYY-MM-DD), defaults to today")]
        date: Option<String>,
    },
    /// Look up an older digest and tell the bot
    Lookup {
        #[arg(long, help = "Date as DD/MM/YYYY")]
        date: String,
    },
    /// Run the extractor over a single HTML body
    Extract {
        #[arg(long, help = "Sender display name, e.g. \"Casa Sapo\"")]
        from: String,
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    init_logging(cli.log_format, "info")?;
    let config = build_config(&cli)?;

    match cli.command {
        Commands::Run { date } => {
            let date = match date {
                Some(raw) => NaiveDate::parse_from_str(&raw, DIGEST_DATE_FORMAT)
                    .map_err(|e| Error::Config(format!("invalid date {raw:?}: {e}")))?,
                None => Local::now().date_naive(),
            };
            let runner = build_runner(config, cli.no_notify)?;
            let report = runner.run(date).await;
            println!("Date: {}", report.date);
            println!("Messages: {}", report.processed);
            println!("Listings: {}", report.listings);
            if let Some(path) = &report.digest_path {
                println!("Digest: {}", path.display());
            }
            if let Some(err) = report.error {
                return Err(err);
            }
        }
        Commands::Lookup { date } => {
            let runner = build_runner(config, cli.no_notify)?;
            let payload = runner.lookup(&date).await?;
            println!("{}", payload.link);
            if let Some(err) = payload.error {
                println!("Error: {err}");
            }
        }
        Commands::Extract { from, file } => {
            let html = std::fs::read_to_string(&file)?;
            let processor = EmailProcessor::builtin(config.excluded_subjects)?;
            let source = listing_digest::source_id(&from);
            let found = processor.process_body(source, &html);
            println!("Source: {source}");
            println!("Link: {}", found.link.as_deref().unwrap_or("-"));
            println!("Snippet: {}", found.snippet.as_deref().unwrap_or("-"));
        }
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<Config, Error> {
    let mut cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(maildir) = &cli.maildir {
        cfg.maildir = maildir.clone();
    }
    if let Some(dump_dir) = &cli.dump_dir {
        cfg.dump_dir = dump_dir.clone();
    }
    if let Some(url) = &cli.webhook_url {
        cfg.webhook_url = url.clone();
    }
    Ok(cfg)
}

fn build_runner(config: Config, no_notify: bool) -> Result<Runner, Error> {
    if no_notify {
        Runner::without_notifier(config)
    } else {
        Runner::new(config)
    }
}
