use std::path::Path;

use anyhow::{Context, Result};

pub fn write_table(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create csv: {}", path.display()))?;
    writer
        .write_record(headers)
        .context("failed to write csv header")?;
    for row in rows {
        writer
            .write_record(row)
            .context("failed to write csv record")?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush csv: {}", path.display()))?;
    Ok(())
}

pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("failed to write file: {}", path.display()))
}
