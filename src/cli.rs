//! Command-line options.

use std::path::{Path, PathBuf};

use clap::Parser;

/// Look up route mileage: browse, filter, chart and export spreadsheet routes.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Workbook to open (xlsx, xlsm, xlsb, xls, ods). Falls back to the default file
    pub file: Option<PathBuf>,

    /// Route (sheet name) to select; defaults to the first sheet
    #[arg(long)]
    pub route: Option<String>,

    /// Only keep rows whose place name contains this text (case-sensitive)
    #[arg(long, short = 'k')]
    pub keyword: Option<String>,

    /// Write the filtered rows as CSV without opening a window.
    /// A directory receives `{route}_mileage_filtered.csv`
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// With --export, also write the chart as a Vega-Lite JSON document
    #[arg(long, value_name = "PATH", requires = "export")]
    pub chart_json: Option<PathBuf>,

    /// Config file (TOML); defaults to the user config directory
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Where an export lands: inside `target` if it is a directory, else `target`.
pub fn export_target(target: &Path, file_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(file_name)
    } else {
        target.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_headless_run() {
        let args = Args::try_parse_from([
            "route-mileage",
            "routes.xlsx",
            "--route",
            "北線",
            "-k",
            "竹",
            "--export",
            "out",
        ])
        .unwrap();
        assert_eq!(args.file.as_deref(), Some(Path::new("routes.xlsx")));
        assert_eq!(args.route.as_deref(), Some("北線"));
        assert_eq!(args.keyword.as_deref(), Some("竹"));
        assert_eq!(args.export.as_deref(), Some(Path::new("out")));
    }

    #[test]
    fn chart_json_needs_export() {
        assert!(Args::try_parse_from(["route-mileage", "--chart-json", "c.json"]).is_err());
    }

    #[test]
    fn export_into_directory_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let name = "RouteA_mileage_filtered.csv";
        assert_eq!(export_target(dir.path(), name), dir.path().join(name));
        let file = dir.path().join("custom.csv");
        assert_eq!(export_target(&file, name), file);
    }
}
