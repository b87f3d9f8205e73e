/// Data layer: core types, loading, and the per-route pipeline.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .ods (upload or default file)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse bytes → Workbook (cached by content hash)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  route    │  sheet names → active Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  place-name keyword → filtered Table
///   └──────────┘
///        │
///        ├──► summary   row count, max mileage
///        ├──► chart     mileage vs. distance points
///        └──► export    CSV bytes (UTF-8 with BOM)
/// ```
///
/// `pipeline` strings these together for one (route, keyword) pair.

pub mod chart;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod route;
pub mod summary;

#[cfg(test)]
pub(crate) mod fixtures {
    use rust_xlsxwriter::Workbook as XlsxWorkbook;

    use super::model::{CellValue, Table};

    pub type SheetFixture = (&'static str, Vec<String>, Vec<Vec<CellValue>>);

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    fn i(v: i64) -> CellValue {
        CellValue::Integer(v)
    }

    /// The three-stop route used throughout the tests.
    pub fn route_a() -> SheetFixture {
        (
            "RouteA",
            vec![
                "place_name".into(),
                "mileage_position".into(),
                "transport_distance".into(),
            ],
            vec![
                vec![s("Taipei"), i(0), i(0)],
                vec![s("Hsinchu"), i(50), i(55)],
                vec![s("Taichung"), i(120), i(130)],
            ],
        )
    }

    pub fn route_a_table() -> Table {
        let (_, columns, rows) = route_a();
        Table::new(columns, rows)
    }

    /// Serialize sheets into an in-memory xlsx document.
    pub fn xlsx_bytes(sheets: &[SheetFixture]) -> Vec<u8> {
        let mut workbook = XlsxWorkbook::new();
        for (name, columns, rows) in sheets {
            let sheet = workbook.add_worksheet();
            sheet.set_name(*name).unwrap();
            for (col, header) in columns.iter().enumerate() {
                if !header.is_empty() {
                    sheet.write_string(0, col as u16, header.as_str()).unwrap();
                }
            }
            for (row_idx, row) in rows.iter().enumerate() {
                let r = (row_idx + 1) as u32;
                for (col, cell) in row.iter().enumerate() {
                    let c = col as u16;
                    match cell {
                        CellValue::String(v) | CellValue::Date(v) => {
                            sheet.write_string(r, c, v.as_str()).unwrap();
                        }
                        CellValue::Integer(v) => {
                            sheet.write_number(r, c, *v as f64).unwrap();
                        }
                        CellValue::Float(v) => {
                            sheet.write_number(r, c, *v).unwrap();
                        }
                        CellValue::Bool(v) => {
                            sheet.write_boolean(r, c, *v).unwrap();
                        }
                        CellValue::Null => {}
                    }
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }
}
