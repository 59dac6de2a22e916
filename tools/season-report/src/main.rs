//! Pooh League season report
//!
//! Folds every period snapshot against the roster and team-name tables and
//! writes the season report (actual vs. max score per team and period,
//! player lines, standings, quota violations) as JSON.

mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use league_reconciler::{League, ReconcilerConfig, SeasonAccumulator, SeasonReport};
use period_snapshot::{parse_period, SnapshotFile};
use player_registry::{RosterRegistry, TeamResolver};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "season-report")]
#[command(about = "Reconcile period snapshots and report actual vs. best-lineup scores")]
#[command(version)]
struct Cli {
    /// Roster export (JSON)
    #[arg(long)]
    roster: PathBuf,

    /// Owner to team-name table (JSON)
    #[arg(long)]
    team_names: Option<PathBuf>,

    /// Snapshot files, or directories of *.json snapshots
    #[arg(long, required = true, num_args = 1..)]
    snapshots: Vec<PathBuf>,

    /// Reconciler configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ignore periods after this one ("7" or "PD7")
    #[arg(long)]
    through: Option<String>,

    /// Solve lineups in parallel
    #[arg(long)]
    parallel: bool,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    logging::initialize_logging(&config.monitoring.log_level)?;
    info!("season-report v{} (reconciler v{})", env!("CARGO_PKG_VERSION"), league_reconciler::VERSION);

    let league = load_league(&cli, config).await?;

    let mut acc = SeasonAccumulator::new();
    let reconciler = league.reconciler();
    for path in snapshot_paths(&cli.snapshots).await? {
        let rows = match read_snapshot(&path).await {
            Ok(snapshot) => snapshot.into_rows(),
            Err(e) => {
                warn!("Skipping snapshot {:?}: {:#}", path, e);
                continue;
            }
        };
        let folded = reconciler.fold_ingested(&mut acc, rows);
        info!("Folded {} rows from {:?}", folded, path);
    }

    let report = league.summarize(&acc)?;
    log_summary(&report);
    write_report(&report, cli.output.as_deref()).await
}

fn load_config(cli: &Cli) -> Result<ReconcilerConfig> {
    let mut config = match &cli.config {
        Some(path) => ReconcilerConfig::from_file(path)
            .with_context(|| format!("Failed to load config {path:?}"))?,
        None => ReconcilerConfig::default(),
    };

    if let Some(through) = &cli.through {
        config.through_period =
            Some(parse_period(through).with_context(|| format!("Invalid --through value '{through}'"))?);
    }
    if cli.parallel {
        config.parallel_solve = true;
    }

    Ok(config)
}

async fn load_league(cli: &Cli, config: ReconcilerConfig) -> Result<League> {
    let resolver = match &cli.team_names {
        Some(path) => Some(TeamResolver::load_from_file(path).await?),
        None => None,
    };

    let fallback = TeamResolver::default();
    let roster = RosterRegistry::load_from_file(&cli.roster, resolver.as_ref().unwrap_or(&fallback)).await?;

    let mut builder = League::builder().config(config).roster(roster);
    if let Some(resolver) = resolver {
        builder = builder.team_names(resolver);
    }
    match builder.build() {
        Ok(league) => Ok(league),
        Err(e) if e.is_missing_input() => Err(anyhow::Error::new(e)
            .context("Supply a non-empty --roster and a --team-names table, or set require_team_names = false")),
        Err(e) => Err(e.into()),
    }
}

/// Expand directories into their *.json files, sorted by file name
async fn snapshot_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if !tokio::fs::metadata(input).await.with_context(|| format!("Cannot read {input:?}"))?.is_dir() {
            paths.push(input.clone());
            continue;
        }

        let mut found = Vec::new();
        let mut entries = tokio::fs::read_dir(input).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                found.push(path);
            }
        }
        found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        paths.extend(found);
    }

    info!("{} snapshot files to fold", paths.len());
    Ok(paths)
}

async fn read_snapshot(path: &Path) -> Result<SnapshotFile> {
    let json = tokio::fs::read_to_string(path).await.context("Failed to read snapshot")?;
    Ok(SnapshotFile::parse(&json)?)
}

fn log_summary(report: &SeasonReport) {
    let stats = &report.fold_stats;
    info!(
        "Through period {}: {} rows folded, {} duplicates, {} skipped, {} rejected at ingestion",
        report.through_period,
        stats.rows_folded,
        stats.duplicates,
        stats.total_skipped(),
        stats.ingest_rejects
    );

    for team in &report.teams {
        info!("{:<24} actual {:>6}  max {:>6}", team.display_name, team.total_actual, team.total_max);
    }

    if !report.violations.is_empty() {
        warn!("{} team/periods exceeded their best legal lineup", report.violations.len());
    }
}

async fn write_report(report: &SeasonReport, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match output {
        Some(path) => {
            tokio::fs::write(path, json).await.with_context(|| format!("Failed to write report {path:?}"))?;
            info!("Report written to {:?}", path);
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_snapshot_directory_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["pd10.json", "pd02.json", "notes.txt", "pd01.json"] {
            tokio::fs::write(dir.path().join(name), "{}").await.unwrap();
        }

        let paths = snapshot_paths(&[dir.path().to_path_buf()]).await.unwrap();
        let names: Vec<_> = paths.iter().map(|p| p.file_name().unwrap().to_str().unwrap()).collect();
        assert_eq!(names, vec!["pd01.json", "pd02.json", "pd10.json"]);
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "season-report",
            "--roster",
            "roster.json",
            "--snapshots",
            "a.json",
            "b.json",
            "--through",
            "PD7",
            "--parallel",
        ]);
        assert_eq!(cli.snapshots.len(), 2);

        let config = load_config(&cli).unwrap();
        assert_eq!(config.through_period, Some(7));
        assert!(config.parallel_solve);
    }

    #[tokio::test]
    async fn test_missing_team_names_explained() {
        let dir = tempfile::tempdir().unwrap();
        let roster = dir.path().join("roster.json");
        tokio::fs::write(&roster, r#"{"season": "2024", "players": [{"name": "Al Guard", "owner": "Acme", "position": "G"}]}"#)
            .await
            .unwrap();

        let cli = Cli::parse_from(["season-report", "--roster", roster.to_str().unwrap(), "--snapshots", "a.json"]);
        let err = load_league(&cli, ReconcilerConfig::default()).await.err().unwrap();
        assert!(format!("{err:#}").contains("--team-names"));
        assert!(matches!(
            err.downcast_ref::<league_reconciler::ReconcileError>(),
            Some(league_reconciler::ReconcileError::MissingTeamNames)
        ));
    }

    #[tokio::test]
    async fn test_end_to_end_report() {
        let dir = tempfile::tempdir().unwrap();
        let roster = dir.path().join("roster.json");
        let teams = dir.path().join("teams.json");
        let snapshot = dir.path().join("pd1.json");
        let output = dir.path().join("report.json");

        tokio::fs::write(
            &roster,
            r#"{"season": "2024", "players": [
                {"name": "Al Guard", "owner": "The Eagles", "position": "G"},
                {"name": "Di Forward", "owner": "Acme", "position": "F"}
            ]}"#,
        )
        .await
        .unwrap();
        tokio::fs::write(&teams, r#"[{"owner": "Acme", "team_name": "The Eagles"}]"#).await.unwrap();
        tokio::fs::write(
            &snapshot,
            r#"{"period": "PD1", "rows": [
                {"owner": "Acme", "player": "Al Guard", "score": "9", "starter": "yes"},
                {"owner": "The Eagles", "player": "Di Forward", "score": "4", "starter": "no"}
            ]}"#,
        )
        .await
        .unwrap();

        let cli = Cli::parse_from([
            "season-report",
            "--roster",
            roster.to_str().unwrap(),
            "--team-names",
            teams.to_str().unwrap(),
            "--snapshots",
            snapshot.to_str().unwrap(),
        ]);
        let league = load_league(&cli, load_config(&cli).unwrap()).await.unwrap();

        let mut acc = SeasonAccumulator::new();
        let rows = read_snapshot(&snapshot).await.unwrap().into_rows();
        assert_eq!(league.reconciler().fold_ingested(&mut acc, rows), 2);

        let report = league.summarize(&acc).unwrap();
        write_report(&report, Some(&output)).await.unwrap();

        let written: SeasonReport =
            serde_json::from_str(&tokio::fs::read_to_string(&output).await.unwrap()).unwrap();
        let team = written.team("Acme").unwrap();
        assert_eq!(team.display_name, "The Eagles");
        assert_eq!(team.total_actual, 9);
        assert_eq!(team.players.len(), 2);
    }
}
