use std::borrow::Cow;

use super::model::Table;
use crate::error::{AppError, Result};

/// Keep the rows whose place-name cell contains `keyword`.
///
/// * Empty keyword → the table itself, untouched; the column is not consulted.
/// * Column missing → [`AppError::MissingColumn`].
/// * Otherwise an exact, case-sensitive substring match on text cells. Null
///   and non-text cells never match. Row order is preserved.
pub fn filter_by_keyword<'a>(
    table: &'a Table,
    place_column: &str,
    keyword: &str,
) -> Result<Cow<'a, Table>> {
    if keyword.is_empty() {
        return Ok(Cow::Borrowed(table));
    }

    let idx = table
        .column_index(place_column)
        .ok_or_else(|| AppError::MissingColumn {
            column: place_column.to_string(),
        })?;

    let rows = table
        .rows()
        .iter()
        .filter(|row| {
            row[idx]
                .as_text()
                .is_some_and(|place| place.contains(keyword))
        })
        .cloned()
        .collect();

    Ok(Cow::Owned(table.with_rows(rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::route_a_table;
    use crate::data::model::CellValue;

    const PLACE: &str = "place_name";

    fn places(table: &Table) -> Vec<String> {
        table
            .column(PLACE)
            .unwrap()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn empty_keyword_is_identity() {
        let table = route_a_table();
        let out = filter_by_keyword(&table, PLACE, "").unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(*out, table);
    }

    #[test]
    fn keyword_keeps_matching_rows_only() {
        let table = route_a_table();
        let out = filter_by_keyword(&table, PLACE, "chu").unwrap();
        assert_eq!(places(&out), ["Hsinchu", "Taichung"]);
        assert_eq!(out.columns(), table.columns());

        let out = filter_by_keyword(&table, PLACE, "sin").unwrap();
        assert_eq!(places(&out), ["Hsinchu"]);
    }

    #[test]
    fn match_is_case_sensitive() {
        let table = route_a_table();
        assert!(filter_by_keyword(&table, PLACE, "taipei").unwrap().is_empty());
        assert_eq!(places(&filter_by_keyword(&table, PLACE, "Tai").unwrap()), ["Taipei", "Taichung"]);
    }

    #[test]
    fn order_is_preserved_and_rows_contain_keyword() {
        let table = Table::new(
            vec![PLACE.into()],
            ["新竹站", "台北", "竹北", "竹南", "台中"]
                .iter()
                .map(|p| vec![CellValue::String(p.to_string())])
                .collect(),
        );
        let out = filter_by_keyword(&table, PLACE, "竹").unwrap();
        assert_eq!(places(&out), ["新竹站", "竹北", "竹南"]);
        assert!(out.len() <= table.len());
        for place in places(&out) {
            assert!(place.contains('竹'));
        }
    }

    #[test]
    fn null_and_numeric_cells_never_match() {
        let table = Table::new(
            vec![PLACE.into()],
            vec![
                vec![CellValue::Null],
                vec![CellValue::Integer(12)],
                vec![CellValue::String("Stop 12".into())],
            ],
        );
        let out = filter_by_keyword(&table, PLACE, "12").unwrap();
        assert_eq!(places(&out), ["Stop 12"]);
    }

    #[test]
    fn missing_column_errors_only_when_filtering() {
        let table = Table::new(vec!["other".into()], vec![vec![CellValue::Integer(1)]]);
        assert!(filter_by_keyword(&table, PLACE, "").is_ok());
        let err = filter_by_keyword(&table, PLACE, "x").unwrap_err();
        assert!(matches!(err, AppError::MissingColumn { column } if column == PLACE));
    }
}
