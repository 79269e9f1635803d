//! Station listing for map and table consumers.

use axum::{extract::State, response::Json};
use cileles_core::{DatasetSummary, StationRecord};
use serde::Serialize;

use crate::SharedState;

/// One station with its derived statuses.
#[derive(Debug, Serialize)]
pub struct StationView {
    pub code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub ph: f64,
    pub ec: f64,
    pub tds: u32,
    pub marker_status: &'static str,
    pub marker_label: &'static str,
    pub marker_color: &'static str,
    pub badge_status: &'static str,
    pub badge_label: &'static str,
}

impl From<&StationRecord> for StationView {
    fn from(record: &StationRecord) -> Self {
        let marker = record.marker_status();
        let badge = record.badge_status();
        Self {
            code: record.id.clone(),
            latitude: record.position.0,
            longitude: record.position.1,
            ph: record.ph,
            ec: record.ec,
            tds: record.tds,
            marker_status: marker.as_str(),
            marker_label: marker.marker_label(),
            marker_color: marker.marker_color(),
            badge_status: badge.as_str(),
            badge_label: badge.badge_label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub summary: Option<DatasetSummary>,
    pub stations: Vec<StationView>,
}

pub async fn stations_handler(State(state): State<SharedState>) -> Json<StationsResponse> {
    Json(StationsResponse {
        summary: DatasetSummary::from_records(&state.records),
        stations: state.records.iter().map(StationView::from).collect(),
    })
}
