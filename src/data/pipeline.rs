use super::chart::{build_chart, ChartSpec};
use super::export::{export_file_name, to_csv_bytes};
use super::filter::filter_by_keyword;
use super::model::{Table, Workbook};
use super::route::select;
use super::summary::{summarize, Summary};
use crate::config::ColumnRoles;
use crate::error::Result;

/// Everything shown for one route and keyword.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub route: String,
    pub table: Table,
    pub summary: Summary,
    /// `None` when the table lacks the mileage or distance column.
    pub chart: Option<ChartSpec>,
    pub csv: Vec<u8>,
    pub file_name: String,
}

/// Route → filter → summary → chart → CSV, recomputed from scratch.
///
/// Same inputs always give the same view; nothing is retained between calls.
pub fn run(
    workbook: &Workbook,
    route: &str,
    keyword: &str,
    roles: &ColumnRoles,
) -> Result<RouteView> {
    let table = select(workbook, route)?;
    let filtered = filter_by_keyword(table, &roles.place, keyword)?;

    let summary = summarize(&filtered, &roles.mileage);
    let chart = build_chart(&filtered, roles);
    let csv = to_csv_bytes(&filtered)?;

    log::debug!(
        "Route {route:?} keyword {keyword:?}: {} of {} rows",
        filtered.len(),
        table.len()
    );

    Ok(RouteView {
        route: route.to_string(),
        table: filtered.into_owned(),
        summary,
        chart,
        csv,
        file_name: export_file_name(route),
    })
}
