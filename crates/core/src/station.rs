//! Station records and the tab-separated monitoring source parser.
//!
//! The source is a static snapshot: one header line, then one station per
//! line with the fixed column order `code, latitude, longitude, ph, ec, tds`.
//! Bad rows are dropped individually; only a source without any data row
//! is treated as unusable.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::IngestError;
use crate::quality::{self, QualityStatus};

/// Number of columns a data row must carry.
pub const FIELD_COUNT: usize = 6;

/// One validated monitoring station reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Station code, e.g. "TA01"
    pub id: String,

    /// Display name (the source has no name column, so this is the code)
    pub name: String,

    /// WGS84 latitude and longitude
    pub position: (f64, f64),

    /// pH, expected within 0–14 but not clamped
    pub ph: f64,

    /// Electrical conductivity in mS/cm
    pub ec: f64,

    /// Total dissolved solids in ppm
    pub tds: u32,
}

impl StationRecord {
    /// The code without its `TA` prefix, used as the map marker label.
    pub fn station_number(&self) -> &str {
        self.id.strip_prefix("TA").unwrap_or(&self.id)
    }

    /// pH-only status used for map markers and the legend.
    pub fn marker_status(&self) -> QualityStatus {
        quality::classify_ph(self.ph)
    }

    /// pH+TDS status used for the table badge.
    pub fn badge_status(&self) -> QualityStatus {
        quality::classify_ph_tds(self.ph, self.tds)
    }
}

/// Outcome of parsing a source: admitted records plus every rejected row.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub records: Vec<StationRecord>,
    /// Always `IngestError::RecordRejected`
    pub rejected: Vec<IngestError>,
}

/// Parse a monitoring source, logging rejected rows.
///
/// Never fails: an unusable source yields an empty vector, which callers
/// must present as "no monitoring data available".
pub fn parse(raw: &str) -> Vec<StationRecord> {
    match parse_report(raw) {
        Ok(report) => {
            for rejected in &report.rejected {
                warn!(error = %rejected, "Monitoring row skipped");
            }
            if report.records.is_empty() {
                error!("No valid records found in monitoring source");
            } else {
                debug!(
                    admitted = report.records.len(),
                    rejected = report.rejected.len(),
                    "Monitoring source parsed"
                );
            }
            report.records
        }
        Err(e) => {
            error!(error = %e, "Monitoring source unusable");
            Vec::new()
        }
    }
}

/// Parse a monitoring source and report every rejected row.
pub fn parse_report(raw: &str) -> Result<ParseReport, IngestError> {
    let lines: Vec<&str> = raw.trim().lines().collect();
    if lines.len() < 2 {
        return Err(IngestError::MalformedSource { lines: lines.len() });
    }

    let mut report = ParseReport::default();

    // Line 1 is the header.
    for (idx, line) in lines.iter().enumerate().skip(1) {
        let line_no = idx + 1;
        match parse_line(line) {
            Ok(record) => report.records.push(record),
            Err(reason) => report.rejected.push(IngestError::RecordRejected {
                line: line_no,
                reason,
            }),
        }
    }

    Ok(report)
}

fn parse_line(line: &str) -> Result<StationRecord, String> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() < FIELD_COUNT {
        return Err(format!(
            "expected {FIELD_COUNT} fields, found {}",
            fields.len()
        ));
    }

    let code = fields[0];
    let latitude = parse_number(fields[1], "latitude")?;
    let longitude = parse_number(fields[2], "longitude")?;
    let ph = parse_number(fields[3], "pH")?;
    let ec = parse_number(fields[4], "EC")?;
    let tds = parse_number(fields[5], "TDS")?;

    if ec < 0.0 {
        return Err(format!("EC must not be negative, got {ec}"));
    }
    if tds < 0.0 {
        return Err(format!("TDS must not be negative, got {tds}"));
    }
    let tds = tds.floor();
    if tds > f64::from(u32::MAX) {
        return Err(format!("TDS out of range: {tds}"));
    }

    Ok(StationRecord {
        id: code.to_string(),
        name: code.to_string(),
        position: (latitude, longitude),
        ph,
        ec,
        tds: tds as u32,
    })
}

fn parse_number(field: &str, column: &str) -> Result<f64, String> {
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("{column} is not a finite number: {field:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Kode\tLatitude\tLongitude\tpH\tEC\tTDS";

    fn source(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn well_formed_row_becomes_one_record() {
        let records = parse(&source(&["TA01\t-6.9105\t107.7762\t7.2\t0.45\t310"]));
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, "TA01");
        assert_eq!(r.name, "TA01");
        assert_eq!(r.position, (-6.9105, 107.7762));
        assert_eq!(r.ph, 7.2);
        assert_eq!(r.ec, 0.45);
        assert_eq!(r.tds, 310);
    }

    #[test]
    fn fields_are_trimmed() {
        let records = parse(&source(&[" TA02 \t -6.91\t107.77 \t 6.8\t0.5 \t 420 \r"]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "TA02");
        assert_eq!(records[0].tds, 420);
    }

    #[test]
    fn non_numeric_field_drops_only_that_line() {
        let text = source(&[
            "TA01\t-6.91\t107.77\t7.0\t0.4\t300",
            "TA02\t-6.91\tnorth\t7.0\t0.4\t300",
            "TA03\t-6.92\t107.78\tabc\t0.4\t300",
            "TA04\t-6.93\t107.79\t7.1\t0.5\tlots",
            "TA05\t-6.94\t107.80\t6.9\t0.6\t350",
        ]);
        let report = parse_report(&text).unwrap();
        let ids: Vec<&str> = report.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["TA01", "TA05"]);
        assert_eq!(report.rejected.len(), 3);
        assert!(matches!(
            report.rejected[0],
            IngestError::RecordRejected { line: 3, .. }
        ));
    }

    #[test]
    fn short_rows_are_rejected() {
        let report = parse_report(&source(&["TA01\t-6.91\t107.77\t7.0\t0.4"])).unwrap();
        assert!(report.records.is_empty());
        match &report.rejected[0] {
            IngestError::RecordRejected { line, reason } => {
                assert_eq!(*line, 2);
                assert!(reason.contains("found 5"));
            }
            other => panic!("Expected RecordRejected, got: {other:?}"),
        }
    }

    #[test]
    fn extra_columns_are_ignored() {
        let records = parse(&source(&["TA01\t-6.91\t107.77\t7.0\t0.4\t300\tnote"]));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let report = parse_report(&source(&[
            "TA01\tNaN\t107.77\t7.0\t0.4\t300",
            "TA02\t-6.91\tinf\t7.0\t0.4\t300",
        ]))
        .unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.rejected.len(), 2);
    }

    #[test]
    fn tds_is_floored() {
        let records = parse(&source(&[
            "TA01\t-6.91\t107.77\t7.0\t0.4\t512.9",
            "TA02\t-6.91\t107.77\t7.0\t0.4\t499.99",
        ]));
        assert_eq!(records[0].tds, 512);
        assert_eq!(records[1].tds, 499);
    }

    #[test]
    fn negative_measurements_are_rejected() {
        let report = parse_report(&source(&[
            "TA01\t-6.91\t107.77\t7.0\t-0.4\t300",
            "TA02\t-6.91\t107.77\t7.0\t0.4\t-3",
        ]))
        .unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.rejected.len(), 2);
    }

    #[test]
    fn header_only_source_is_malformed() {
        assert_eq!(
            parse_report("code\tname\n").unwrap_err(),
            IngestError::MalformedSource { lines: 1 }
        );
        assert!(parse("code\tname\n").is_empty());
    }

    #[test]
    fn empty_source_is_malformed() {
        assert_eq!(
            parse_report("   \n\n").unwrap_err(),
            IngestError::MalformedSource { lines: 0 }
        );
        assert!(parse("").is_empty());
    }

    #[test]
    fn duplicate_codes_are_kept_in_order() {
        let records = parse(&source(&[
            "TA07\t-6.91\t107.77\t7.0\t0.4\t300",
            "TA07\t-6.92\t107.78\t8.0\t0.9\t650",
        ]));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tds, 300);
        assert_eq!(records[1].tds, 650);
    }

    #[test]
    fn station_number_strips_prefix() {
        let records = parse(&source(&[
            "TA09\t-6.91\t107.77\t7.0\t0.4\t300",
            "X1\t-6.91\t107.77\t7.0\t0.4\t300",
        ]));
        assert_eq!(records[0].station_number(), "09");
        assert_eq!(records[1].station_number(), "X1");
    }

    #[test]
    fn record_statuses_use_their_own_rules() {
        let records = parse(&source(&["TA03\t-6.91\t107.77\t7.0\t1.4\t700"]));
        assert_eq!(records[0].marker_status(), QualityStatus::Best);
        assert_eq!(records[0].badge_status(), QualityStatus::Good);
    }
}
