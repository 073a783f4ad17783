//! VeriPura Workflow Simulator — Demo CLI
//!
//! Runs a single workflow simulation in the terminal, or one or all of the
//! trade reference scenarios.
//!
//! Usage:
//!   cargo run -p demo -- run --industry food --product "Organic Sun-Dried Mangoes"
//!   cargo run -p demo -- run --industry pharma --offline --fast
//!   cargo run -p demo -- industries
//!   cargo run -p demo -- run-all

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use veripura_audit::InMemoryLedger;
use veripura_config::{api_key_from_env, Settings};
use veripura_contracts::{error::VeriPuraResult, industry::Industry};
use veripura_core::{
    clock::SystemClock,
    controller::{run_blocking, RunController},
    present::{agent_cards, header, summary},
    traits::TextGenerator,
};
use veripura_gemini::GeminiClient;
use veripura_ref_trade::{
    catalog::{industry_config, sample_product, TOTAL_MARKET},
    mock_data::CannedGenerator,
    requester::trade_requester,
    scenarios::{auto_approve, hitm_review, request_failure},
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// VeriPura — multi-agent trade compliance workflow simulator.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "VeriPura workflow simulator demo",
    long_about = "Simulates the six-agent VeriPura compliance workflow for a product,\n\
                  reveals each stage on a timed cadence, and notarizes the run."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate one product through the six-stage workflow.
    Run(RunArgs),
    /// List the supported industries.
    Industries,
    /// Run all three reference scenarios in sequence.
    RunAll,
    /// Scenario 1: organic mangoes, auto-approved.
    AutoApprove,
    /// Scenario 2: pharmaceutical batch routed to human review.
    HitmReview,
    /// Scenario 3: generation service unavailable.
    RequestFailure,
}

#[derive(Args)]
struct RunArgs {
    /// Industry key or label (food, fashion, pet-food, cosmetics, pharma).
    #[arg(long, short, default_value = "food")]
    industry: Industry,

    /// Product description. Defaults to the industry's sample product.
    #[arg(long, short)]
    product: Option<String>,

    /// Answer from canned data instead of calling the generation service.
    #[arg(long)]
    offline: bool,

    /// Skip the delay between stages.
    #[arg(long)]
    fast: bool,

    /// Settings file (TOML).
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override `playback.step_delay_ms`.
    #[arg(long)]
    step_delay_ms: Option<u64>,

    /// Override `routing.hitm_threshold`.
    #[arg(long)]
    hitm_threshold: Option<f64>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging. Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::Run(args) => run_workflow(args),
        Command::Industries => {
            list_industries();
            Ok(())
        }
        Command::RunAll => run_all(),
        Command::AutoApprove => auto_approve::run_scenario(),
        Command::HitmReview => hitm_review::run_scenario(),
        Command::RequestFailure => request_failure::run_scenario(),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_all() -> VeriPuraResult<()> {
    auto_approve::run_scenario()?;
    hitm_review::run_scenario()?;
    request_failure::run_scenario()?;
    println!("All scenarios completed successfully.");
    Ok(())
}

fn list_industries() {
    println!("Supported industries ({TOTAL_MARKET} combined annual trade):");
    println!();
    for industry in Industry::ALL {
        let config = industry_config(industry);
        println!(
            "  {:<10} {} {:<18} {:>8}",
            industry.key(),
            config.icon,
            industry.label(),
            config.market_size
        );
    }
    println!();
}

fn run_workflow(args: RunArgs) -> VeriPuraResult<()> {
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(ms) = args.step_delay_ms {
        settings.playback.step_delay_ms = ms;
    }
    if let Some(threshold) = args.hitm_threshold {
        settings.routing.hitm_threshold = threshold;
    }
    settings.validate()?;

    let industry = args.industry;
    let product = args
        .product
        .unwrap_or_else(|| sample_product(industry).to_string());
    let step_delay = if args.fast {
        Duration::ZERO
    } else {
        settings.step_delay()
    };
    let threshold = settings.routing.hitm_threshold;

    let generator: Box<dyn TextGenerator> = if args.offline {
        Box::new(CannedGenerator::new())
    } else {
        Box::new(GeminiClient::new(&settings.generator, api_key_from_env()))
    };
    let requester = trade_requester(generator);
    let ledger = InMemoryLedger::new();
    let mut controller = RunController::new(Box::new(ledger.clone()), step_delay);

    let view = header(industry, industry_config(industry));
    println!("{}", view.title);
    println!("{}", view.blurb);
    for point in &view.solution_points {
        println!("  ✓ {point}");
    }
    println!();
    println!("Product: {product}");
    println!();
    println!("Live orchestration log:");

    info!(industry = %industry, offline = args.offline, "starting demo run");
    let run_id = run_blocking(
        &mut controller,
        &requester,
        &SystemClock,
        industry,
        &product,
        |line| {
            let marker = if line.is_alert() { "!" } else { " " };
            println!("{marker} [{}] {}", line.clock(), line.text);
        },
    )?;
    println!();

    let Some(result) = controller.result() else {
        println!("No result. The run was aborted; see the log above.");
        return Ok(());
    };

    println!("Agent status:");
    for card in agent_cards(controller.step(), Some(result), threshold) {
        println!(
            "  {} {:<22} [{}]",
            card.card.icon(),
            card.card.name(),
            card.status.label()
        );
        if let Some(content) = &card.content {
            for line in content.lines() {
                println!("      {line}");
            }
        }
    }
    println!();

    if let Some(view) = summary(Some(result), controller.is_in_progress(), threshold) {
        for line in view.lines() {
            println!("  {line}");
        }
        println!();
    }

    println!(
        "Ledger chain: {}",
        if ledger.verify_integrity(&run_id) {
            "VERIFIED"
        } else {
            "FAILED"
        }
    );
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("VeriPura — Multi-Agent Trade Compliance");
    println!("Workflow Simulator Demo");
    println!("=======================================");
    println!();
    println!("Stages revealed per run:");
    println!("  [1] Intake        Product classification and HS code");
    println!("  [2] Mapping       Regulatory requirements");
    println!("  [3] Extraction    AI document parsing");
    println!("  [4] Validation    Rules and compliance check");
    println!("  [5] Audit         Anomaly detection and confidence scoring");
    println!("  [6] Notarization  Ledger entry sealed with a hash chain");
    println!();
}
