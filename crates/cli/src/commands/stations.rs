//! `cileles stations`: Show the monitoring snapshot.

use cileles_core::{DatasetSummary, LoadState, StationRecord};
use std::path::PathBuf;

pub async fn run(
    data: Option<PathBuf>,
    map: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(data)?;
    let records = LoadState::from_source(config.data.path.as_deref())?.into_records();

    if records.is_empty() {
        eprintln!("  No monitoring data available.");
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&json_view(&records))?);
        return Ok(());
    }

    println!("💧 Cileles Water Monitor");
    println!("========================");
    if let Some(summary) = DatasetSummary::from_records(&records) {
        println!("  {summary}");
    }
    println!();

    if map {
        println!("  {:<4} {:>10} {:>10}  {:<6} {}", "No", "Lat", "Lon", "Status", "Color");
        for r in &records {
            let status = r.marker_status();
            println!(
                "  {:<4} {:>10.4} {:>10.4}  {:<6} {}",
                r.station_number(),
                r.position.0,
                r.position.1,
                status.marker_label(),
                status.marker_color()
            );
        }
    } else {
        println!(
            "  {:<6} {:>5} {:>6} {:>6}  {}",
            "Code", "pH", "EC", "TDS", "Status"
        );
        for r in &records {
            println!(
                "  {:<6} {:>5.1} {:>6.2} {:>6}  {}",
                r.name,
                r.ph,
                r.ec,
                r.tds,
                r.badge_status().badge_label()
            );
        }
    }

    Ok(())
}

fn json_view(records: &[StationRecord]) -> serde_json::Value {
    let stations: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            serde_json::json!({
                "code": r.id,
                "latitude": r.position.0,
                "longitude": r.position.1,
                "ph": r.ph,
                "ec": r.ec,
                "tds": r.tds,
                "marker_status": r.marker_status().as_str(),
                "badge_status": r.badge_status().as_str(),
            })
        })
        .collect();

    serde_json::json!({
        "summary": DatasetSummary::from_records(records),
        "stations": stations,
    })
}
