use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{AppConfig, ColumnRoles};
use crate::data::loader::{resolve_input, WorkbookCache};
use crate::data::model::Workbook;
use crate::data::pipeline::{self, RouteView};
use crate::data::route;
use crate::error::{AppError, Result};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// One-line message in the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// The full UI state, independent of rendering.
///
/// Only the inputs live here (workbook, route, keyword). Everything derived
/// from them is recomputed by [`AppState::view`] on each frame.
pub struct AppState {
    /// Parsed workbooks by content; survives opening another file.
    pub cache: WorkbookCache,

    pub roles: ColumnRoles,

    /// Fallback file used when nothing has been opened.
    pub default_file: PathBuf,

    /// Loaded workbook (None until something loads successfully).
    pub workbook: Option<Arc<Workbook>>,

    /// Where the current workbook came from, for the status line.
    pub source_label: Option<String>,

    /// Selected route (sheet name).
    pub route: Option<String>,

    /// Place-name keyword, empty means no filtering.
    pub keyword: String,

    /// Why nothing could be loaded. Blocks the whole page.
    pub load_error: Option<AppError>,

    /// Status / error message shown in the top bar.
    pub status: Option<Status>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            cache: WorkbookCache::new(),
            roles: config.columns.clone(),
            default_file: config.default_file.clone(),
            workbook: None,
            source_label: None,
            route: None,
            keyword: String::new(),
            load_error: None,
            status: None,
        }
    }

    /// Load the startup document: an explicit file, else the default file.
    pub fn load_initial(&mut self, upload: Option<&Path>) {
        let loaded = resolve_input(upload, &self.default_file)
            .and_then(|path| self.cache.load_path(&path).map(|wb| (path, wb)));
        match loaded {
            Ok((path, workbook)) => {
                let label = if upload.is_none() {
                    format!("default workbook {}", path.display())
                } else {
                    path.display().to_string()
                };
                self.set_workbook(workbook, label);
            }
            Err(e) => {
                log::error!("Failed to load workbook: {e}");
                self.load_error = Some(e);
            }
        }
    }

    /// Load a file the user picked.
    ///
    /// A failed open keeps the previous workbook if there is one, otherwise the
    /// error becomes the page content.
    pub fn open_path(&mut self, path: &Path) {
        match self.cache.load_path(path) {
            Ok(workbook) => self.set_workbook(workbook, path.display().to_string()),
            Err(e) => self.report_load_error(e),
        }
    }

    /// Load an already-read document, e.g. one dropped onto the window.
    pub fn open_bytes(&mut self, label: &str, bytes: &[u8]) {
        match self.cache.load_bytes(label, bytes) {
            Ok(workbook) => self.set_workbook(workbook, label.to_string()),
            Err(e) => self.report_load_error(e),
        }
    }

    /// Ingest a newly loaded workbook and pick a route.
    pub fn set_workbook(&mut self, workbook: Arc<Workbook>, label: String) {
        self.route = route::default_route(&workbook, self.route.as_deref());
        self.workbook = Some(workbook);
        self.source_label = Some(label);
        self.load_error = None;
        self.status = None;
    }

    fn report_load_error(&mut self, e: AppError) {
        log::error!("Failed to load file: {e}");
        if self.workbook.is_some() {
            self.status = Some(Status::Error(e.to_string()));
        } else {
            self.load_error = Some(e);
        }
    }

    /// Routes of the loaded workbook, empty before anything loads.
    pub fn routes(&self) -> Vec<String> {
        self.workbook
            .as_deref()
            .map(route::routes)
            .unwrap_or_default()
    }

    /// Write the exported CSV of `view` to `path` and report the outcome.
    pub fn save_csv(&mut self, view: &RouteView, path: &Path) {
        match std::fs::write(path, &view.csv) {
            Ok(()) => {
                log::info!(
                    "Exported {} row(s) of {} to {}",
                    view.summary.row_count,
                    view.route,
                    path.display()
                );
                self.status = Some(Status::Info(format!("Saved {}", path.display())));
            }
            Err(e) => {
                log::error!("Failed to write {}: {e}", path.display());
                self.status = Some(Status::Error(format!(
                    "could not write {}: {e}",
                    path.display()
                )));
            }
        }
    }

    /// Run the pipeline for the current inputs. `None` until a workbook is
    /// loaded and a route selected.
    pub fn view(&self) -> Option<Result<RouteView>> {
        let workbook = self.workbook.as_deref()?;
        if workbook.is_empty() {
            return Some(Err(AppError::EmptyWorkbook));
        }
        let route = self.route.as_deref()?;
        Some(pipeline::run(workbook, route, &self.keyword, &self.roles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{route_a, xlsx_bytes};

    fn state_in(dir: &Path) -> AppState {
        let config = AppConfig {
            default_file: dir.join("kmapp.xlsx"),
            columns: ColumnRoles::new("place_name", "mileage_position", "transport_distance"),
        };
        AppState::new(&config)
    }

    #[test]
    fn no_upload_and_no_default_blocks_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.load_initial(None);
        assert!(matches!(state.load_error, Some(AppError::InputMissing { .. })));
        assert!(state.view().is_none());
        assert!(state.routes().is_empty());
    }

    #[test]
    fn default_file_loads_and_selects_first_route() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("kmapp.xlsx"), xlsx_bytes(&[route_a()])).unwrap();
        let mut state = state_in(dir.path());
        state.load_initial(None);

        assert!(state.load_error.is_none());
        assert_eq!(state.route.as_deref(), Some("RouteA"));
        state.keyword = "chu".into();
        let view = state.view().unwrap().unwrap();
        assert_eq!(view.summary.row_count, 2);
        assert_eq!(view.summary.max_mileage, Some(Some(120.0)));
    }

    #[test]
    fn bad_upload_keeps_previous_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.open_bytes("good.xlsx", &xlsx_bytes(&[route_a()]));
        state.open_bytes("bad.xlsx", b"not a workbook");

        assert!(state.load_error.is_none());
        assert!(matches!(state.status, Some(Status::Error(_))));
        assert_eq!(state.source_label.as_deref(), Some("good.xlsx"));
    }

    #[test]
    fn bad_first_upload_becomes_page_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.open_path(&dir.path().join("missing.xlsx"));
        assert!(matches!(state.load_error, Some(AppError::Unreadable { .. })));
    }

    #[test]
    fn reloading_keeps_route_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        let two = xlsx_bytes(&[("RouteB", vec!["place_name".into()], vec![]), route_a()]);
        state.open_bytes("two.xlsx", &two);
        assert_eq!(state.route.as_deref(), Some("RouteB"));
        state.route = Some("RouteA".into());

        state.open_bytes("one.xlsx", &xlsx_bytes(&[route_a()]));
        assert_eq!(state.route.as_deref(), Some("RouteA"));
    }

    #[test]
    fn save_writes_exact_csv_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.open_bytes("a.xlsx", &xlsx_bytes(&[route_a()]));
        let view = state.view().unwrap().unwrap();

        let out = dir.path().join(&view.file_name);
        state.save_csv(&view, &out);
        assert_eq!(std::fs::read(&out).unwrap(), view.csv);
        assert!(matches!(state.status, Some(Status::Info(_))));

        state.save_csv(&view, &dir.path().join("no/such/dir.csv"));
        assert!(matches!(state.status, Some(Status::Error(_))));
    }
}
