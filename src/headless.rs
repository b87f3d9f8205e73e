use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::{export_target, Args};
use crate::config::AppConfig;
use crate::data::loader::{resolve_input, WorkbookCache};
use crate::data::{pipeline, route};
use crate::error::AppError;

/// Run the pipeline once and write the results instead of opening a window.
pub fn export(args: &Args, config: &AppConfig, target: &Path) -> Result<()> {
    let cache = WorkbookCache::new();
    let source = resolve_input(args.file.as_deref(), &config.default_file)?;
    let workbook = cache.load_path(&source)?;

    let route = match &args.route {
        Some(route) => route.clone(),
        None => route::default_route(&workbook, None).ok_or(AppError::EmptyWorkbook)?,
    };
    let keyword = args.keyword.as_deref().unwrap_or("");
    let view = pipeline::run(&workbook, &route, keyword, &config.columns)?;

    let csv_path = export_target(target, &view.file_name);
    std::fs::write(&csv_path, &view.csv)
        .with_context(|| format!("writing {}", csv_path.display()))?;
    log::info!("Exported {} row(s) to {}", view.summary.row_count, csv_path.display());

    println!("route: {}", view.route);
    println!("rows: {}", view.summary.row_count);
    if let Some(max) = view.summary.max_mileage {
        match max {
            Some(v) => println!("max {}: {v}", config.columns.mileage),
            None => println!("max {}: n/a", config.columns.mileage),
        }
    }
    println!("csv: {}", csv_path.display());

    if let Some(chart_path) = &args.chart_json {
        match &view.chart {
            Some(chart) => {
                let doc = serde_json::to_string_pretty(&chart.to_vega_lite())
                    .context("serializing chart")?;
                std::fs::write(chart_path, doc)
                    .with_context(|| format!("writing {}", chart_path.display()))?;
                println!("chart: {}", chart_path.display());
            }
            None => log::warn!(
                "Route {} lacks {} or {}, no chart written",
                view.route,
                config.columns.mileage,
                config.columns.distance
            ),
        }
    }

    Ok(())
}
