use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use paperscout::api;
use paperscout::config::CONFIG;
use paperscout::data_models::{AnalysisReport, AnalysisSettings};
use paperscout::page::PageFetcher;
use paperscout::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "paperscout", about = "Related-paper suggestions for academic pages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a paper page and print ranked suggestions
    Analyze { url: String },
    /// Run the HTTP API
    Serve {
        /// Bind address, overrides BIND_ADDR
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    // Bridge log crate -> tracing (so log::info! etc. work)
    // tracing_log::LogTracer::init()?;

    let cli = Cli::parse();
    match cli.command {
        Command::Analyze { url } => {
            let fetcher = PageFetcher::new()?;
            let text = fetcher.fetch_text(&url).await?;

            let pipeline = Pipeline::from_config()?;
            let report = pipeline
                .analyze(&text, &AnalysisSettings::default())
                .await
                .context("analysis already in flight")?;
            print_report(&report);
        }
        Command::Serve { bind } => {
            let pipeline = Arc::new(Pipeline::from_config()?);
            let router = api::create_router(pipeline);

            let addr = bind.unwrap_or_else(|| CONFIG.bind_addr.clone());
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            log::info!("listening on {addr}");
            axum::serve(listener, router).await?;
        }
    }
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!("status: {:?}", report.status);
    println!("keywords: {}", report.keywords.join(", "));
    if let Some(insight) = &report.insight {
        println!("insight: {insight}");
    }
    println!();
    for (i, paper) in report.suggestions.iter().enumerate() {
        println!("{}. {} ({})", i + 1, paper.title, paper.year);
        println!(
            "   {} | {} citations | {:.0}% relevant | {}",
            paper.authors,
            paper.citation_count,
            paper.relevance_score * 100.0,
            paper.source_name
        );
        println!("   {}", paper.source_url);
        println!("   {}", paper.abstract_snippet);
    }
}
