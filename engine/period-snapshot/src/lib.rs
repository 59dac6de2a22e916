//! Period Snapshot - box-score rows as the reconciler consumes them
//!
//! External ingesters produce loosely-typed text cells; [`ingest`] validates
//! them once into [`PeriodSnapshotRow`] values so nothing downstream has to
//! second-guess a cell.

pub mod fingerprint;
pub mod ingest;
pub mod types;

pub use fingerprint::RowFingerprint;
pub use ingest::{
    parse_float, parse_int, parse_made_attempted, parse_minutes, parse_period, parse_starter,
    IngestError, RawSnapshotRow, RawStatLine, SnapshotFile,
};
pub use types::{PeriodId, PeriodSnapshotRow, StatLine};
