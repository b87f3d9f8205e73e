use super::model::Table;

/// UTF-8 byte-order mark, so spreadsheet tools pick the right encoding.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Download name for a route's filtered rows.
pub fn export_file_name(route: &str) -> String {
    format!("{route}_mileage_filtered.csv")
}

/// Serialize a table as CSV: BOM, header row, one record per row.
///
/// Fields are quoted only when they contain a delimiter, quote or line break.
/// Output is byte-for-byte deterministic for a given table.
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>, csv::Error> {
    let mut out = UTF8_BOM.to_vec();
    if table.columns().is_empty() {
        return Ok(out);
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(&mut out);
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush()?;
    drop(writer);

    Ok(out)
}
