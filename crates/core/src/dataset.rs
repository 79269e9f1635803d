//! Load state and aggregate figures for a parsed monitoring snapshot.

use serde::{Deserialize, Serialize};

use crate::error::IngestError;
use crate::station::{self, StationRecord};

/// The monitoring snapshot shipped with the binary.
pub const BUNDLED_SNAPSHOT: &str = include_str!("../../../data/monitoring-data.tsv");

/// What consumers should show for the monitoring data.
///
/// `NoData` is distinct from `Loading`: it means the source was read and
/// nothing usable came out of it.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    NoData,
    Ready(Vec<StationRecord>),
}

impl LoadState {
    /// Parse a raw source into a terminal state.
    pub fn from_raw(raw: &str) -> Self {
        let records = station::parse(raw);
        if records.is_empty() {
            Self::NoData
        } else {
            Self::Ready(records)
        }
    }

    /// Read and parse a snapshot file, or the bundled snapshot when `path` is `None`.
    pub fn from_source(path: Option<&std::path::Path>) -> Result<Self, IngestError> {
        let Some(path) = path else {
            return Ok(Self::from_raw(BUNDLED_SNAPSHOT));
        };
        let raw = std::fs::read_to_string(path).map_err(|e| IngestError::SourceUnreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_raw(&raw))
    }

    pub fn records(&self) -> &[StationRecord] {
        match self {
            Self::Ready(records) => records,
            Self::Loading | Self::NoData => &[],
        }
    }

    pub fn into_records(self) -> Vec<StationRecord> {
        match self {
            Self::Ready(records) => records,
            Self::Loading | Self::NoData => Vec::new(),
        }
    }
}

/// Dashboard aggregates across all stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub station_count: usize,
    pub mean_ph: f64,
    /// mS/cm
    pub mean_ec: f64,
    /// ppm, rounded to the nearest integer
    pub mean_tds: u32,
}

impl DatasetSummary {
    /// `None` when there is nothing to average.
    pub fn from_records(records: &[StationRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let n = records.len() as f64;
        let mean_ph = records.iter().map(|r| r.ph).sum::<f64>() / n;
        let mean_ec = records.iter().map(|r| r.ec).sum::<f64>() / n;
        let tds_total: u64 = records.iter().map(|r| u64::from(r.tds)).sum();
        let mean_tds = (tds_total as f64 / n).round() as u32;

        Some(Self {
            station_count: records.len(),
            mean_ph,
            mean_ec,
            mean_tds,
        })
    }
}

impl std::fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} stations | mean pH {:.1} | mean EC {:.2} mS/cm | mean TDS {} ppm",
            self.station_count, self.mean_ph, self.mean_ec, self.mean_tds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, ph: f64, ec: f64, tds: u32) -> StationRecord {
        StationRecord {
            id: id.into(),
            name: id.into(),
            position: (-6.91, 107.77),
            ph,
            ec,
            tds,
        }
    }

    #[test]
    fn bundled_snapshot_has_sixteen_stations() {
        match LoadState::from_raw(BUNDLED_SNAPSHOT) {
            LoadState::Ready(records) => {
                assert_eq!(records.len(), 16);
                assert_eq!(records[0].id, "TA01");
                assert_eq!(records[15].id, "TA16");
            }
            other => panic!("Expected Ready, got: {other:?}"),
        }
    }

    #[test]
    fn unusable_source_is_no_data_not_loading() {
        let state = LoadState::from_raw("Kode\tLatitude\tLongitude\tpH\tEC\tTDS\n");
        assert_eq!(state, LoadState::NoData);
        assert!(state.records().is_empty());
        assert!(LoadState::Loading.records().is_empty());
    }

    #[test]
    fn missing_source_file_is_unreadable() {
        let err = LoadState::from_source(Some(std::path::Path::new("/nonexistent/data.tsv")))
            .unwrap_err();
        assert!(matches!(err, IngestError::SourceUnreadable { .. }));
        assert_eq!(LoadState::from_source(None).unwrap().records().len(), 16);
    }

    #[test]
    fn summary_averages() {
        let records = vec![
            record("TA01", 7.0, 0.40, 300),
            record("TA02", 8.0, 0.60, 401),
        ];
        let summary = DatasetSummary::from_records(&records).unwrap();
        assert_eq!(summary.station_count, 2);
        assert!((summary.mean_ph - 7.5).abs() < 1e-9);
        assert!((summary.mean_ec - 0.5).abs() < 1e-9);
        assert_eq!(summary.mean_tds, 351);
    }

    #[test]
    fn summary_of_nothing_is_none() {
        assert!(DatasetSummary::from_records(&[]).is_none());
    }

    #[test]
    fn summary_display() {
        let summary = DatasetSummary::from_records(&[record("TA01", 7.04, 0.456, 300)]).unwrap();
        assert_eq!(
            summary.to_string(),
            "1 stations | mean pH 7.0 | mean EC 0.46 mS/cm | mean TDS 300 ppm"
        );
    }
}
