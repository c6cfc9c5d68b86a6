use clap::Args;

use crate::cli::{block_on, report_load, OutputFormat, SourceArgs};
use crate::core::song::{DifficultyTier, Song};
use crate::core::types::DEFAULT_THRESHOLD;
use crate::core::versions::VersionRegistry;
use crate::matching::engine::{SearchConfig, SearchEngine, SearchHit};
use crate::utils::validation::validate_keyword;

/// Aliases shown per song in text output
const MAX_ALIASES_SHOWN: usize = 3;

#[derive(Args)]
pub struct SearchArgs {
    /// Title, alias, or c<id> to look up
    #[arg(required = true)]
    pub keyword: String,

    /// Minimum score (0-100) a song needs to be considered
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: u8,

    /// Refresh the catalog from the remote source before searching
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Args)]
pub struct DebugArgs {
    /// Keyword to score
    #[arg(required = true)]
    pub keyword: String,
}

/// Execute search subcommand
///
/// # Errors
///
/// Returns an error if the keyword is invalid or output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: SearchArgs,
    source: &SourceArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    validate_keyword(&args.keyword)?;

    let store = source.open_store();
    let outcome = block_on(store.load(args.refresh))?;
    report_load(&outcome, verbose);

    let snapshot = store.snapshot();
    if snapshot.is_empty() {
        eprintln!("Warning: Catalog is empty, no songs to search.");
        return Ok(());
    }

    let config = SearchConfig {
        threshold: args.threshold,
    };
    let engine = SearchEngine::with_config(snapshot.songs(), config);
    let hits = engine.rank(&args.keyword);

    if hits.is_empty() {
        eprintln!("No songs found matching \"{}\".", args.keyword);
        return Ok(());
    }

    let versions = store.versions();
    match format {
        OutputFormat::Text => print_text_results(&args.keyword, &hits, &versions, verbose),
        OutputFormat::Json => print_json_results(&args.keyword, &hits, &versions)?,
        OutputFormat::Tsv => print_tsv_results(&hits, &versions),
    }

    Ok(())
}

/// Execute debug subcommand
///
/// # Errors
///
/// Returns an error if the keyword is invalid or output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run_debug(
    args: DebugArgs,
    source: &SourceArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    validate_keyword(&args.keyword)?;

    let store = source.open_store();
    let outcome = block_on(store.load(false))?;
    report_load(&outcome, verbose);

    let snapshot = store.snapshot();
    if snapshot.is_empty() {
        eprintln!("Warning: Catalog is empty, no songs to score.");
        return Ok(());
    }

    let hits = SearchEngine::new(snapshot.songs()).debug_scores(&args.keyword);
    let keyword = args.keyword.trim().to_lowercase();

    match format {
        OutputFormat::Text => {
            println!("Debug scores for \"{keyword}\":");
            println!();
            for hit in &hits {
                println!("[{:>3}] {} ({})", hit.score, hit.song.title, hit.tier);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "keyword": keyword,
                "scores": hits.iter().map(|h| serde_json::json!({
                    "id": h.song.id,
                    "title": h.song.title,
                    "score": h.score,
                    "tier": h.tier,
                })).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("score\ttier\tid\ttitle");
            for hit in &hits {
                println!(
                    "{}\t{}\t{}\t{}",
                    hit.score, hit.tier, hit.song.id, hit.song.title
                );
            }
        }
    }

    Ok(())
}

/// "a, b, c (5 total)" style alias summary
pub(crate) fn alias_summary(aliases: &[String]) -> String {
    let shown = aliases
        .iter()
        .take(MAX_ALIASES_SHOWN)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if aliases.len() > MAX_ALIASES_SHOWN {
        format!("{shown} ({} total)", aliases.len())
    } else {
        shown
    }
}

fn level_summary(song: &Song) -> String {
    DifficultyTier::ALL
        .iter()
        .filter_map(|&tier| {
            song.difficulty(tier)
                .map(|d| format!("{} {:.1}", tier.abbreviation(), d.level_value))
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

fn print_text_results(
    keyword: &str,
    hits: &[SearchHit<'_>],
    versions: &VersionRegistry,
    verbose: bool,
) {
    if hits.len() == 1 {
        println!("Found 1 song matching \"{keyword}\":");
    } else {
        println!("Found {} songs matching \"{keyword}\":", hits.len());
    }
    println!();

    for (i, hit) in hits.iter().enumerate() {
        let song = hit.song;
        println!("{}. {} [c{}]", i + 1, song.title, song.id);

        if !song.artist.is_empty() {
            println!("   Artist: {}", song.artist);
        }
        if !song.aliases.is_empty() {
            println!("   Aliases: {}", alias_summary(&song.aliases));
        }
        if verbose {
            println!("   Version: {}", versions.label(song.version));
            let levels = level_summary(song);
            if !levels.is_empty() {
                println!("   Levels: {levels}");
            }
            println!("   Score: {} ({})", hit.score, hit.tier);
        }

        if i + 1 < hits.len() {
            println!("   {}", "-".repeat(12));
        }
    }
}

fn print_json_results(
    keyword: &str,
    hits: &[SearchHit<'_>],
    versions: &VersionRegistry,
) -> anyhow::Result<()> {
    let results: Vec<serde_json::Value> = hits
        .iter()
        .map(|hit| {
            serde_json::json!({
                "score": hit.score,
                "tier": hit.tier,
                "version_label": versions.label(hit.song.version),
                "song": hit.song,
            })
        })
        .collect();

    let output = serde_json::json!({
        "keyword": keyword,
        "matches": results,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(hits: &[SearchHit<'_>], versions: &VersionRegistry) {
    println!("id\ttitle\tartist\tscore\ttier\tversion\taliases");
    for hit in hits {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            hit.song.id,
            hit.song.title,
            hit.song.artist,
            hit.score,
            hit.tier,
            versions.label(hit.song.version),
            hit.song.aliases.join(";"),
        );
    }
}
