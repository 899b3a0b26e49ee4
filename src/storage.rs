use crate::filter::ReportLine;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save report lines as CSV with header. Null readings leave the value empty.
pub fn save_csv<P: AsRef<Path>>(lines: &[ReportLine], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.serialize(("date", "value"))?;
    for line in lines {
        wtr.serialize((&line.date, line.value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save report lines as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(lines: &[ReportLine], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(lines)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
