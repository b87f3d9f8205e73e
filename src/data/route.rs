use super::model::{Table, Workbook};
use crate::error::{AppError, Result};

/// Selectable routes (sheet names) in document order. Empty for a workbook
/// without sheets; the caller decides how to report that.
pub fn routes(workbook: &Workbook) -> Vec<String> {
    workbook.sheet_names().map(str::to_string).collect()
}

/// The table behind a route.
pub fn select<'a>(workbook: &'a Workbook, route: &str) -> Result<&'a Table> {
    workbook
        .sheet(route)
        .ok_or_else(|| AppError::UnknownRoute(route.to_string()))
}

/// Route to show after (re)loading a workbook: keep the current one if the new
/// workbook still has it, otherwise the first route.
pub fn default_route(workbook: &Workbook, current: Option<&str>) -> Option<String> {
    if let Some(current) = current {
        if workbook.sheet(current).is_some() {
            return Some(current.to_string());
        }
    }
    workbook.sheet_names().next().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbook(names: &[&str]) -> Workbook {
        Workbook::from_sheets(names.iter().map(|n| (n.to_string(), Table::default())))
    }

    #[test]
    fn lists_routes_in_order() {
        let wb = workbook(&["北線", "南線", "RouteA"]);
        assert_eq!(routes(&wb), ["北線", "南線", "RouteA"]);
    }

    #[test]
    fn empty_workbook_has_no_routes() {
        let wb = workbook(&[]);
        assert!(routes(&wb).is_empty());
        assert_eq!(default_route(&wb, Some("RouteA")), None);
    }

    #[test]
    fn unknown_route_is_an_error() {
        let wb = workbook(&["RouteA"]);
        assert!(select(&wb, "RouteA").is_ok());
        assert!(matches!(select(&wb, "RouteZ"), Err(AppError::UnknownRoute(r)) if r == "RouteZ"));
    }

    #[test]
    fn default_route_keeps_current_when_present() {
        let wb = workbook(&["A", "B"]);
        assert_eq!(default_route(&wb, Some("B")).as_deref(), Some("B"));
        assert_eq!(default_route(&wb, Some("C")).as_deref(), Some("A"));
        assert_eq!(default_route(&wb, None).as_deref(), Some("A"));
    }
}
