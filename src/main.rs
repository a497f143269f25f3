use std::io::{self, BufRead, Write};

use veritas::{
    analysis::{self, Analyzer, Report, generator_from_config},
    config::Config,
    evidence::DuckDuckGoNews,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let analyzer = Analyzer::new(generator_from_config(&config));
    let search = DuckDuckGoNews::new(config.search_api_base());

    println!("\n--- AI NEWS CREDIBILITY ASSISTANT ---");
    println!("Type a URL or a claim; 'exit' to quit.");

    let stdin = io::stdin();
    loop {
        print!("\n>> Enter URL or Claim: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();
        if matches!(input, "exit" | "quit") {
            break;
        }

        match analysis::assess(&search, &analyzer, input).await {
            Ok(report) => print_report(&report),
            Err(e) => println!("ERROR: {e}"),
        }
    }

    Ok(())
}

fn print_report(report: &Report) {
    let divider = "=".repeat(45);
    let analysis = &report.analysis;

    println!("{divider}");
    println!("FINAL INTELLIGENCE REPORT");
    println!("{divider}");
    println!("Trust Score: {}%", analysis.trust_score);
    println!("Factual Accuracy: {:?}", analysis.factual_accuracy);
    println!("Bias Rating: {:?}", analysis.bias_rating);
    println!("\nHeadline: {}", analysis.headline);
    println!("\nSummary:\n{}", analysis.summary);
    println!("\nTags: {}", analysis.tags.join(", "));
    if !analysis.cross_references.is_empty() {
        println!("\nCross-References:");
        for reference in &analysis.cross_references {
            println!("  - {} ({})", reference.source, reference.time_ago);
        }
    }
    println!("{divider}");
}
