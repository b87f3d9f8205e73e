use super::model::Table;

/// Headline metrics for the filtered rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub row_count: usize,
    /// `None` when the mileage column is missing; `Some(None)` when it exists
    /// but has no numeric value in these rows.
    pub max_mileage: Option<Option<f64>>,
}

impl Summary {
    /// Whether the max-mileage metric should be shown at all.
    pub fn has_mileage(&self) -> bool {
        self.max_mileage.is_some()
    }
}

pub fn summarize(table: &Table, mileage_column: &str) -> Summary {
    let max_mileage = table.column(mileage_column).map(|cells| {
        cells
            .filter_map(|c| c.as_f64())
            .filter(|v| !v.is_nan())
            .max_by(f64::total_cmp)
    });

    Summary {
        row_count: table.len(),
        max_mileage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::route_a_table;
    use crate::data::model::CellValue;

    #[test]
    fn counts_rows_and_takes_numeric_max() {
        let summary = summarize(&route_a_table(), "mileage_position");
        assert_eq!(summary.row_count, 3);
        assert_eq!(summary.max_mileage, Some(Some(120.0)));
    }

    #[test]
    fn empty_table_has_absent_max() {
        let table = route_a_table().with_rows(Vec::new());
        let summary = summarize(&table, "mileage_position");
        assert_eq!(summary.row_count, 0);
        assert!(summary.has_mileage());
        assert_eq!(summary.max_mileage, Some(None));
    }

    #[test]
    fn missing_column_hides_metric() {
        let summary = summarize(&route_a_table(), "里程定位");
        assert_eq!(summary.row_count, 3);
        assert!(!summary.has_mileage());
    }

    #[test]
    fn non_numeric_cells_are_skipped() {
        let table = Table::new(
            vec!["km".into()],
            vec![
                vec![CellValue::String("999".into())],
                vec![CellValue::Null],
                vec![CellValue::Float(12.5)],
                vec![CellValue::Integer(9)],
            ],
        );
        assert_eq!(summarize(&table, "km").max_mileage, Some(Some(12.5)));
    }
}
