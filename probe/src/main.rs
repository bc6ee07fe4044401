use anyhow::{Result, anyhow};
use chrono::Local;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use showcase::majors::Major;
use showcase::remote::Gateway;
use showcase::resolver::{MemoryTermStore, ResolveEra, ResolverConfig, resolve_term};
use showcase::term::{Term, default_term};

/// Walks the resolution range against a live gateway and reports what each
/// candidate term holds, then runs the actual resolution.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Major slug to probe, e.g. computer-science
    major: String,

    /// Gateway base URL
    #[arg(long, default_value = "http://localhost:3000/api")]
    gateway: String,

    /// Explicit term override, e.g. fa-2024
    #[arg(long)]
    term: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let major =
        Major::from_slug(&args.major).ok_or_else(|| anyhow!("unknown major: {}", args.major))?;
    let explicit = args.term.as_deref().map(parse_term).transpose()?;

    let config = ResolverConfig::default();
    let gateway = Gateway::new(args.gateway.clone(), config.check_timeout)?;
    let today = Local::now().date_naive();

    let pb = ProgressBar::new(config.walk_limit as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    let mut candidate = default_term(today);
    let mut counts = Vec::new();

    for _ in 0..config.walk_limit {
        pb.set_message(format!("Fetching {candidate}"));

        let count = match gateway.survey_by_major(major, candidate).await {
            Ok(rows) => rows.len().to_string(),
            Err(err) => format!("error ({err})"),
        };

        counts.push((candidate, count));
        candidate = candidate.previous();
        pb.inc(1);
    }

    pb.finish_with_message("Done");

    println!("\nEntries per term for {}:", major.slug());
    for (term, count) in &counts {
        println!("  {term}: {count}");
    }

    let store = MemoryTermStore::new();
    let era = ResolveEra::new();
    let guard = era.begin();

    let resolution = resolve_term(
        Some(major),
        explicit,
        today,
        &gateway,
        &store,
        &guard,
        &config,
    )
    .await;

    println!(
        "\nResolved: {} (via {})",
        resolution.term,
        resolution.via.label()
    );

    Ok(())
}

fn parse_term(raw: &str) -> Result<Term> {
    let (code, year) = raw
        .split_once('-')
        .ok_or_else(|| anyhow!("expected code-year, e.g. fa-2024"))?;

    Ok(Term::parse(code, year)?)
}
