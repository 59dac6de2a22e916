//! Ingestion boundary: text cells in, typed rows out
//!
//! Scalar cells are parsed tolerantly (malformed text becomes 0) because one
//! bad cell must not sink a batch. The period is the one field a row cannot
//! do without, so an unusable period rejects the row.

use crate::types::{PeriodId, PeriodSnapshotRow, StatLine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised while validating snapshot input
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Invalid period '{0}'")]
    InvalidPeriod(String),

    #[error("Row for player '{player}' has no period and the snapshot declares none")]
    MissingPeriod { player: String },

    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Accept string, number, bool or null cells as text
fn cell_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn optional_cell_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = cell_text(deserializer)?;
    Ok(if text.trim().is_empty() { None } else { Some(text) })
}

/// Box-score cells as an external ingester hands them over
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStatLine {
    #[serde(rename = "min", default, deserialize_with = "cell_text")]
    pub minutes: String,
    #[serde(rename = "pts", default, deserialize_with = "cell_text")]
    pub points: String,
    #[serde(rename = "reb", default, deserialize_with = "cell_text")]
    pub rebounds: String,
    #[serde(rename = "ast", default, deserialize_with = "cell_text")]
    pub assists: String,
    #[serde(rename = "stl", default, deserialize_with = "cell_text")]
    pub steals: String,
    #[serde(rename = "blk", default, deserialize_with = "cell_text")]
    pub blocks: String,
    #[serde(rename = "to", default, deserialize_with = "cell_text")]
    pub turnovers: String,
    #[serde(rename = "pf", default, deserialize_with = "cell_text")]
    pub personal_fouls: String,
    /// Field goals as "made-attempted"
    #[serde(rename = "fg", default, deserialize_with = "cell_text")]
    pub field_goals: String,
    #[serde(rename = "three", default, deserialize_with = "cell_text")]
    pub threes: String,
    #[serde(rename = "ft", default, deserialize_with = "cell_text")]
    pub free_throws: String,
}

impl RawStatLine {
    pub fn parse(&self) -> StatLine {
        let (field_goals_made, field_goals_attempted) = parse_made_attempted(&self.field_goals);
        let (threes_made, threes_attempted) = parse_made_attempted(&self.threes);
        let (free_throws_made, free_throws_attempted) = parse_made_attempted(&self.free_throws);

        StatLine {
            minutes: parse_minutes(&self.minutes),
            points: parse_int(&self.points),
            rebounds: parse_int(&self.rebounds),
            assists: parse_int(&self.assists),
            steals: parse_int(&self.steals),
            blocks: parse_int(&self.blocks),
            turnovers: parse_int(&self.turnovers),
            personal_fouls: parse_int(&self.personal_fouls),
            field_goals_made,
            field_goals_attempted,
            threes_made,
            threes_attempted,
            free_throws_made,
            free_throws_attempted,
        }
    }
}

/// One snapshot row before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSnapshotRow {
    /// "7" or "PD7"; falls back to the snapshot's period when absent
    #[serde(default, deserialize_with = "optional_cell_text")]
    pub period: Option<String>,

    #[serde(default, deserialize_with = "cell_text")]
    pub owner: String,

    #[serde(default, deserialize_with = "cell_text")]
    pub player: String,

    #[serde(default, deserialize_with = "cell_text")]
    pub score: String,

    #[serde(default, deserialize_with = "cell_text")]
    pub starter: String,

    #[serde(default, deserialize_with = "optional_cell_text")]
    pub team: Option<String>,

    #[serde(default)]
    pub stats: RawStatLine,
}

impl RawSnapshotRow {
    /// Validate into a typed row, using `default_period` when the row has none
    pub fn into_row(self, default_period: Option<&str>) -> Result<PeriodSnapshotRow, IngestError> {
        let period_text = match (self.period.as_deref(), default_period) {
            (Some(text), _) => text,
            (None, Some(text)) => text,
            (None, None) => return Err(IngestError::MissingPeriod { player: self.player }),
        };
        let period = parse_period(period_text)?;

        Ok(PeriodSnapshotRow {
            period,
            owner: self.owner.trim().to_string(),
            player: self.player.trim().to_string(),
            score: parse_int(&self.score),
            is_starter: parse_starter(&self.starter),
            team: self.team.map(|team| team.trim().to_string()),
            stats: self.stats.parse(),
        })
    }
}

/// One period's snapshot as written by the exporter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Period label for every row that does not carry its own
    #[serde(default)]
    pub period: Option<String>,

    /// When the snapshot was taken
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,

    pub rows: Vec<RawSnapshotRow>,
}

impl SnapshotFile {
    pub fn parse(json: &str) -> Result<Self, IngestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate every row; rejected rows come back as errors in place
    pub fn into_rows(self) -> Vec<Result<PeriodSnapshotRow, IngestError>> {
        let period = self.period;
        debug!("Validating {} snapshot rows (period label {:?})", self.rows.len(), period);
        self.rows.into_iter().map(|row| row.into_row(period.as_deref())).collect()
    }
}

/// Parse an integer cell; decimals truncate, anything malformed is 0
pub fn parse_int(text: &str) -> i64 {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return value;
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

pub fn parse_float(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Minutes as "mm:ss" or a plain number; "--" and blanks are 0
pub fn parse_minutes(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() || text == "--" {
        return 0.0;
    }
    match text.split_once(':') {
        Some((mm, ss)) => match (mm.trim().parse::<u32>(), ss.trim().parse::<u32>()) {
            (Ok(mm), Ok(ss)) => f64::from(mm) + f64::from(ss) / 60.0,
            _ => 0.0,
        },
        None => parse_float(text),
    }
}

/// Shooting split "made-attempted", (0, 0) when malformed
pub fn parse_made_attempted(text: &str) -> (i64, i64) {
    text.trim()
        .split_once('-')
        .and_then(|(made, attempted)| {
            Some((made.trim().parse::<i64>().ok()?, attempted.trim().parse::<i64>().ok()?))
        })
        .unwrap_or((0, 0))
}

/// Period label "7" or "PD7" (any case); 0 is out of range
pub fn parse_period(text: &str) -> Result<PeriodId, IngestError> {
    let upper = text.trim().to_uppercase();
    let digits = upper.strip_prefix("PD").unwrap_or(&upper).trim();

    match digits.parse::<PeriodId>() {
        Ok(period) if period > 0 => Ok(period),
        _ => Err(IngestError::InvalidPeriod(text.to_string())),
    }
}

pub fn parse_starter(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "yes" | "y" | "true" | "1")
}
