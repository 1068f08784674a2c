//! Download one article and print it as JSON.
//!
//! Usage: `fetch_article <URL or absolute path> [--nlp] [--follow-meta-refresh]`
//!
//! Logs go to stderr; set `RUST_LOG=rs_newspaper=debug` for pipeline detail.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use rs_newspaper::{ArticleBuilder, DownloadState, Options};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fetch_article")]
#[command(about = "Download, parse and print a news article as JSON")]
struct Cli {
    /// Article URL or absolute file path
    url: String,

    /// Site home page used to resolve a relative URL
    #[arg(long)]
    source_url: Option<String>,

    /// Also compute keywords and a summary
    #[arg(long)]
    nlp: bool,

    /// Follow one meta-refresh redirect
    #[arg(long)]
    follow_meta_refresh: bool,

    /// Force the extraction language (ISO 639-1)
    #[arg(long, env = "NEWSPAPER_LANGUAGE")]
    language: Option<String>,

    /// CSS selector of a "read more" link to follow
    #[arg(long)]
    read_more: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 7)]
    timeout: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> rs_newspaper::Result<ExitCode> {
    let mut options = match &cli.language {
        Some(language) => Options::with_language(language),
        None => Options::default(),
    };
    options.follow_meta_refresh = cli.follow_meta_refresh;
    options.request.timeout = std::time::Duration::from_secs(cli.timeout);

    let mut builder = ArticleBuilder::new(cli.url.as_str()).options(Arc::new(options));
    if let Some(source_url) = &cli.source_url {
        builder = builder.source_url(source_url.as_str());
    }
    if let Some(selector) = &cli.read_more {
        builder = builder.read_more_link(selector.as_str());
    }
    let mut article = builder.build()?;

    article.download()?;
    if article.download_state() != DownloadState::Success {
        eprintln!(
            "download failed: {}",
            article.download_exception_msg().unwrap_or("unknown error")
        );
        return Ok(ExitCode::from(2));
    }

    article.parse()?;
    if cli.nlp {
        article.nlp()?;
    }

    println!("{}", article.to_json()?);
    Ok(ExitCode::SUCCESS)
}
