//! FloatChat Demo
//!
//! Offline walk-through of the local assistant: prints the nearest floats,
//! then runs each message given on the command line (or a few sample
//! prompts) against the built-in catalog and types the reply to the
//! terminal. Ctrl+C stops the typing.
//!
//! Run with: cargo run --bin floatchat -- "show me a temperature graph"

use floatchat::chat::{AssistantReply, LocalAssistant, Typewriter, TypingOutcome};
use floatchat::config::Config;
use floatchat::floats::{FloatCatalog, TemperatureSeries};
use std::io::Write;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SAMPLE_PROMPTS: &[&str] = &[
    "Where are the nearest floats?",
    "Plot a temperature line chart",
    "What can you do?",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "floatchat=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let catalog = Arc::new(FloatCatalog::builtin());
    let assistant = LocalAssistant::new(
        Arc::clone(&catalog),
        config.chat.reference()?,
        config.chat.nearest_limit,
    );
    let typewriter = Typewriter::from_millis(config.chat.typing_delay_ms);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let args: Vec<String> = std::env::args().skip(1).collect();
    let prompts: Vec<&str> = if args.is_empty() {
        SAMPLE_PROMPTS.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    println!("FloatChat v{} demo", env!("CARGO_PKG_VERSION"));
    println!("Reference point: {}", assistant.reference());
    println!();

    print_nearest(&catalog, &assistant, config.chat.nearest_limit)?;

    for prompt in prompts {
        println!("> {}", prompt);

        let reply = assistant.respond(prompt)?;
        if type_reply(&typewriter, &reply, &cancel).await == TypingOutcome::Cancelled {
            println!();
            println!("(interrupted)");
            return Ok(());
        }

        if let Some(chart) = &reply.chart {
            println!();
            println!("{} [{:?}]", chart.title, chart.kind);
            for dataset in &chart.datasets {
                let series = dataset
                    .data
                    .iter()
                    .map(|v| format!("{:.1}", v))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("  {:<32} {}", dataset.label, series);
            }
        }
        println!();
    }

    print_series_summary(&catalog);
    print_risk_markers(&catalog);

    Ok(())
}

/// Print the reply one character at a time
async fn type_reply(
    typewriter: &Typewriter,
    reply: &AssistantReply,
    cancel: &CancellationToken,
) -> TypingOutcome {
    let mut printed = 0;
    let outcome = typewriter
        .run(&reply.text, cancel, |frame| {
            print!("{}", &frame[printed..]);
            printed = frame.len();
            std::io::stdout().flush().is_ok()
        })
        .await;
    println!();
    outcome
}

fn print_nearest(
    catalog: &FloatCatalog,
    assistant: &LocalAssistant,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{:<4} {:<10} {:<32} {:>10}", "#", "Float", "Name", "Distance");
    println!("{}", "-".repeat(59));

    for (rank, ranked) in catalog
        .nearest(assistant.reference(), limit)?
        .iter()
        .enumerate()
    {
        println!(
            "{:<4} {:<10} {:<32} {:>7.1} km",
            rank + 1,
            ranked.float.id,
            ranked.float.name,
            ranked.distance_km
        );
    }
    println!();

    Ok(())
}

fn print_series_summary(catalog: &FloatCatalog) {
    println!("{:<10} {:<32} {:>8} {:>8}", "Float", "Name", "Min °C", "Max °C");
    println!("{}", "-".repeat(62));

    for float in catalog.floats() {
        let series = TemperatureSeries::for_float(float);
        println!(
            "{:<10} {:<32} {:>8.2} {:>8.2}",
            float.id,
            float.name,
            series.min().unwrap_or(float.temperature),
            series.max().unwrap_or(float.temperature)
        );
    }
    println!();
}

fn print_risk_markers(catalog: &FloatCatalog) {
    println!("Tsunami risk:");
    for location in catalog.risk_locations() {
        println!(
            "  {:<16} {:<8} population {}",
            location.name, location.risk, location.population
        );
    }
}
