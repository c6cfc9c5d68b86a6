use clap::Args;

use crate::catalog::store::{AliasStatus, PersistStatus};
use crate::cli::{block_on, report_load, OutputFormat, SourceArgs};

#[derive(Args)]
pub struct VersionsArgs {
    /// Refresh the catalog before listing
    #[arg(long)]
    pub refresh: bool,
}

/// Execute refresh subcommand
///
/// # Errors
///
/// Returns an error if the remote fetch fails or output cannot be written.
pub fn run_refresh(source: &SourceArgs, format: OutputFormat) -> anyhow::Result<()> {
    let store = source.open_store();
    let report = block_on(store.fetch())?
        .map_err(|e| anyhow::anyhow!("Refresh failed: {e}"))?;

    match format {
        OutputFormat::Text => {
            println!("Refresh complete: {} songs", report.song_count);
            println!("  Version labels: {}", report.version_count);
            match &report.aliases {
                AliasStatus::Attached { songs_with_aliases } => {
                    println!("  Songs with aliases: {songs_with_aliases}");
                }
                AliasStatus::Unavailable { http_status } => {
                    println!("  Aliases: unavailable (status {http_status})");
                }
            }
            match &report.persisted {
                PersistStatus::Written => {
                    println!("  Cache: {}", store.cache_path().display());
                }
                PersistStatus::Failed(reason) => {
                    println!("  Cache: NOT written ({reason})");
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Tsv => {
            println!("song_count\tversion_count\taliases\tpersisted\tcompleted_at");
            let aliases = match report.aliases {
                AliasStatus::Attached { songs_with_aliases } => songs_with_aliases.to_string(),
                AliasStatus::Unavailable { http_status } => format!("unavailable:{http_status}"),
            };
            let persisted = matches!(report.persisted, PersistStatus::Written);
            println!(
                "{}\t{}\t{}\t{}\t{}",
                report.song_count,
                report.version_count,
                aliases,
                persisted,
                report.completed_at.to_rfc3339(),
            );
        }
    }

    Ok(())
}

/// Execute versions subcommand
///
/// # Errors
///
/// Returns an error if output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run_versions(
    args: VersionsArgs,
    source: &SourceArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let store = source.open_store();
    let outcome = block_on(store.load(args.refresh))?;
    report_load(&outcome, verbose);

    let versions = store.versions();
    if !versions.is_populated() {
        eprintln!("Warning: No version labels available from the catalog source.");
    }

    match format {
        OutputFormat::Text => {
            println!("{:<10} Label", "Version");
            println!("{}", "-".repeat(40));
            for (version, label) in versions.iter() {
                println!("{version:<10} {label}");
            }
            println!("\nSongs in catalog: {}", store.song_count());
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "song_count": store.song_count(),
                "versions": versions
                    .iter()
                    .map(|(version, title)| serde_json::json!({"version": version, "title": title}))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("version\tlabel");
            for (version, label) in versions.iter() {
                println!("{version}\t{label}");
            }
        }
    }

    Ok(())
}
