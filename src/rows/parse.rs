use crate::error::EngineError;
use crate::rows::cell::Cell;
use crate::rows::row::{FIELDS, Record, RowSpec};
use anyhow::{Context, bail};
use std::fs;
use std::path::Path;

/// Read a comma-separated row file into typed rows, in file order.
///
/// Expected shape (header names in any order, extra columns ignored):
/// page,x_pos,start_y_pos,end_y_pos,space_pattern,num_count,start_num,font_size
/// 0,30.60,39.60,752.40,1,60,continue,8
pub fn parse_rows_file(path: &Path) -> anyhow::Result<Vec<RowSpec>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read row file {}", path.display()))?;
    parse_rows(&text, &path.display().to_string())
}

/// Parse row file text. `origin` names the source in error messages.
pub fn parse_rows(text: &str, origin: &str) -> anyhow::Result<Vec<RowSpec>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header: Vec<String> = reader
        .headers()
        .with_context(|| format!("read header of {}", origin))?
        .iter()
        .map(str::to_string)
        .collect();

    let missing: Vec<String> = FIELDS
        .iter()
        .filter(|f| !header.iter().any(|h| h == *f))
        .map(|f| f.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::MissingFields(missing))
            .with_context(|| format!("header of {}", origin));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.with_context(|| format!("row parse error in {}", origin))?;
        let lno = record.position().map(|p| p.line()).unwrap_or_default();

        // Whitespace-only lines.
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() < header.len() {
            bail!(
                "row parse error at {}:{}: expected {} cells, found {}",
                origin,
                lno,
                header.len(),
                record.len()
            );
        }

        let record: Record = header
            .iter()
            .zip(record.iter())
            .map(|(h, c)| (h.clone(), Cell::coerce(c)))
            .collect();

        let row = RowSpec::from_record(&record)
            .with_context(|| format!("row parse error at {}:{}", origin, lno))?;
        rows.push(row);
    }

    Ok(rows)
}
