use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use events::{EventBus, EventEnvelope, PipelineEvent};
use llm::GeminiClient;
use pipeline::{PipelineConfig, PipelineController, StageContext, DEFAULT_KNOWLEDGE_BASE_URL};
use prospect_core::{QueryContext, ResearchRun, SalesRep};
use search::{ExaClient, PageFetcher, WebSearchClient};
use tokio::sync::broadcast;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "prospect-studio")]
#[command(about = "Automated prospect research and outreach drafting", long_about = None)]
#[command(version)]
struct Cli {
    /// Prospect to research
    #[arg(long)]
    prospect: String,

    /// The prospect's company
    #[arg(long)]
    company: String,

    /// Sales rep name used to sign the outreach
    #[arg(long, default_value = "John Doe")]
    rep_name: String,

    /// Sales rep title
    #[arg(long, default_value = "Senior Account Executive")]
    rep_title: String,

    /// Where the outreach report is written
    #[arg(short, long, default_value = "sales_outreach.md")]
    output: PathBuf,

    /// Upper bound per research task, in seconds
    #[arg(long, default_value_t = 45)]
    task_timeout_secs: u64,

    /// Completion model to use
    #[arg(long, default_value = llm::DEFAULT_MODEL)]
    model: String,

    /// Case-study page inlined into the strategy prompt
    #[arg(long, default_value = DEFAULT_KNOWLEDGE_BASE_URL)]
    knowledge_base_url: String,

    /// Skip fetching the case-study page
    #[arg(long)]
    no_knowledge_base: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prospect_studio=info,pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_key =
        std::env::var("GOOGLE_API_KEY").context("GOOGLE_API_KEY not set (see .env.example)")?;
    let engine_id = std::env::var("GOOGLE_SEARCH_ENGINE_ID")
        .context("GOOGLE_SEARCH_ENGINE_ID not set (see .env.example)")?;

    let gemini = GeminiClient::new(api_key.clone()).with_model(&cli.model);
    let web_search = WebSearchClient::new(api_key, engine_id);

    let mut config = PipelineConfig::default()
        .with_task_timeout(Duration::from_secs(cli.task_timeout_secs))
        .with_output_path(&cli.output);
    if !cli.no_knowledge_base {
        config = config.with_knowledge_base_url(&cli.knowledge_base_url);
    }

    let bus = EventBus::new();
    let mut ctx = StageContext::new(Arc::new(gemini), Arc::new(web_search), config)
        .with_page_fetch(Arc::new(PageFetcher::new()))
        .with_event_bus(bus.clone());

    match std::env::var("EXA_API_KEY") {
        Ok(key) if !key.is_empty() => {
            ctx = ctx.with_profile_search(Arc::new(ExaClient::new(key)));
        }
        _ => warn!("EXA_API_KEY not set, executive profiling falls back to web search"),
    }

    let controller = PipelineController::new(ctx);

    let cancel = controller.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nCancelling run, waiting for in-flight research...");
            cancel.cancel();
        }
    });

    let printer = tokio::spawn(print_events(bus.subscribe()));

    let context = QueryContext::new(&cli.prospect, &cli.company)
        .with_sales_rep(SalesRep::new(&cli.rep_name, &cli.rep_title));
    let mut run = ResearchRun::new(context);

    println!(
        "Researching '{}' at '{}' (rep: {})...",
        cli.prospect, cli.company, cli.rep_name
    );

    let result = controller.run(&mut run).await;
    let _ = printer.await;

    match result {
        Ok(report) => {
            println!("\n================================================================");
            println!("FINAL OUTREACH DRAFT");
            println!("================================================================\n");
            println!("{}\n", report.artifact.email.trim());
            println!("--- Call script ---\n{}\n", report.artifact.call_script.trim());
            println!("Saved outreach report to {}", cli.output.display());
            Ok(())
        }
        Err(err) => Err(err).with_context(|| {
            format!("pipeline run ended with status '{}'", run.status.as_str())
        }),
    }
}

/// Mirror pipeline events to stdout until the run finishes.
async fn print_events(mut rx: broadcast::Receiver<EventEnvelope>) {
    loop {
        let envelope = match rx.recv().await {
            Ok(envelope) => envelope,
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        };

        match envelope.event {
            PipelineEvent::ResearchStarted { topic, .. } => {
                println!("  [research] {topic} started");
            }
            PipelineEvent::ResearchFinished {
                topic,
                success,
                duration_ms,
                summary,
                ..
            } => {
                let verdict = if success { "done" } else { "unavailable" };
                println!("  [research] {topic} {verdict} ({:.1}s)", duration_ms as f64 / 1000.0);
                if let Some(summary) = summary {
                    println!("{}", indent(&summary));
                }
            }
            PipelineEvent::StageStarted { stage, .. } => {
                println!("[stage] {stage} started");
            }
            PipelineEvent::StageFinished {
                stage,
                success,
                duration_ms,
                summary,
                ..
            } => {
                let verdict = if success { "finished" } else { "failed" };
                println!("[stage] {stage} {verdict} ({:.1}s)", duration_ms as f64 / 1000.0);
                if let Some(summary) = summary {
                    println!("{}", indent(&summary));
                }
            }
            PipelineEvent::ReportSaved { path, .. } => {
                println!("[report] saved to {path}");
            }
            PipelineEvent::RunFinished { status, .. } => {
                println!("[run] finished with status '{status}'");
                break;
            }
            _ => {}
        }
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("      {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
