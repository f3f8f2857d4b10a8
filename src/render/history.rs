use crate::domain::model::Report;
use crate::utils::error::{CatchError, Result};
use serde::Serialize;

/// One flattened catch as it appears in `history.csv` and the page's recent
/// list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub timestamp: String,
    pub location: String,
    pub area: String,
    pub species: String,
    pub size: String,
    pub count: String,
    pub method: String,
    pub reporter: String,
    pub source: String,
}

/// All catches of the report, newest first by timestamp text, capped at
/// `limit`. Equal timestamps keep spot order.
pub fn history_rows(report: &Report, limit: usize) -> Vec<HistoryRow> {
    let mut rows: Vec<HistoryRow> = report
        .spots
        .iter()
        .flat_map(|spot| {
            spot.catches.iter().map(move |c| HistoryRow {
                timestamp: c.timestamp.clone(),
                location: spot.id.clone(),
                area: spot.area.clone(),
                species: c.species.clone(),
                size: c.size_description.clone(),
                count: c.count.to_string(),
                method: c.method.clone(),
                reporter: c.reporter_label.clone(),
                source: c.source_tag.clone(),
            })
        })
        .collect();

    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    rows.truncate(limit);
    rows
}

pub fn to_csv(rows: &[HistoryRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    // header only when there are no rows
    if rows.is_empty() {
        writer.write_record([
            "timestamp", "location", "area", "species", "size", "count", "method", "reporter",
            "source",
        ])?;
    }

    writer.into_inner().map_err(|e| CatchError::RenderError {
        message: format!("history CSV could not be flushed: {}", e),
    })
}
