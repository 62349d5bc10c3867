use std::path::Path;

use anyhow::Result;
use chrono::NaiveDateTime;
use tracing::info;

use crate::domain::projection::Projection;
use crate::infra::export::csv::{write_bytes, write_table};
use crate::usecase::services::table_view::HeaderLabels;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Localized headers and plain cell text, in projection order.
pub fn projection_table(projection: &Projection, labels: &HeaderLabels) -> ExportTable {
    let headers = projection
        .columns
        .iter()
        .map(|column| labels.label(column))
        .collect();
    let rows = projection
        .rows
        .iter()
        .map(|row| {
            projection
                .columns
                .iter()
                .map(|column| row.get(column).map(|value| value.plain_text()).unwrap_or_default())
                .collect()
        })
        .collect();
    ExportTable { headers, rows }
}

pub fn export_projection_csv(
    path: &Path,
    projection: &Projection,
    labels: &HeaderLabels,
) -> Result<usize> {
    let table = projection_table(projection, labels);
    write_table(path, &table.headers, &table.rows)?;
    info!(path = %path.display(), rows = table.rows.len(), "exported table");
    Ok(table.rows.len())
}

pub fn save_image(path: &Path, bytes: &[u8]) -> Result<()> {
    write_bytes(path, bytes)?;
    info!(path = %path.display(), size = bytes.len(), "saved chart image");
    Ok(())
}

pub fn default_file_name(stem: &str, extension: &str, now: NaiveDateTime) -> String {
    format!("{stem}-{}.{extension}", now.format("%Y%m%d-%H%M%S"))
}

pub fn image_extension(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/svg+xml" => "svg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "png",
    }
}
