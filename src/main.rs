use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process;

// Use library instead of local modules
use debt_inventory::{ConsolidationEngine, ReferencePolicy, Report};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let mut json_output = false;
    let mut stable_references = false;
    let mut path: Option<&str> = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "--json" => json_output = true,
            "--stable-refs" => stable_references = true,
            other => path = Some(other),
        }
    }

    let path = match path {
        Some(p) => Path::new(p),
        None => {
            eprintln!("Usage: debt-inventory [--json] [--stable-refs] <report-file>");
            process::exit(2);
        }
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report file: {path:?}"))?;
    let report = Report::from_str_detect(&text)
        .with_context(|| format!("Failed to decode report: {path:?}"))?;

    let engine = ConsolidationEngine {
        reference_policy: if stable_references {
            ReferencePolicy::Stable
        } else {
            ReferencePolicy::Random
        },
        ..ConsolidationEngine::new()
    };
    let summary = engine.process(&report)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("📂 Report: {}", path.display());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ {} consolidated debts", summary.debts.len());

    for debt in &summary.debts {
        println!(
            "  {} | {} | balance ${:.2} | payment ${:.2}/mo | term {} mo",
            debt.group.as_str(),
            debt.lender,
            debt.principal_balance,
            debt.scheduled_monthly_payment,
            debt.term,
        );
    }

    println!("✓ {} credit scores", summary.credit_scores.len());
    for score in &summary.credit_scores {
        println!("  {} | {} | {}", score.bureau.as_str(), score.value, score.date);
    }

    println!(
        "✓ {} summary attributes",
        summary.credit_summary_attributes.len()
    );

    Ok(())
}
