use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Coarse category of an [`AppError`], used by the UI to decide how much of
/// the page can still be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing to load at all. Terminal until the user opens a file.
    InputMissing,
    /// The input exists but could not be read or parsed as a spreadsheet.
    Parse,
    /// A feature depends on a sheet or column that is not there.
    Schema,
    /// The filtered rows could not be written out.
    Export,
}

/// Every failure the loading/filtering pipeline can surface to the user.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no spreadsheet was opened and the default file {} does not exist", .default_path.display())]
    InputMissing { default_path: PathBuf },

    #[error("could not read {input}: {source}")]
    Unreadable {
        input: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{input} is not a readable spreadsheet: {source}")]
    Parse {
        input: String,
        #[source]
        source: calamine::Error,
    },

    #[error("the workbook does not contain any sheets")]
    EmptyWorkbook,

    #[error("route \"{0}\" does not exist in the workbook")]
    UnknownRoute(String),

    #[error("column \"{column}\" is missing from this route")]
    MissingColumn { column: String },

    #[error("failed to write CSV: {0}")]
    Export(#[from] csv::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InputMissing { .. } => ErrorKind::InputMissing,
            AppError::Unreadable { .. } | AppError::Parse { .. } => ErrorKind::Parse,
            AppError::EmptyWorkbook
            | AppError::UnknownRoute(_)
            | AppError::MissingColumn { .. } => ErrorKind::Schema,
            AppError::Export(_) => ErrorKind::Export,
        }
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        let missing = AppError::InputMissing {
            default_path: PathBuf::from("kmapp.xlsx"),
        };
        assert_eq!(missing.kind(), ErrorKind::InputMissing);
        assert!(missing.to_string().contains("kmapp.xlsx"));

        let unreadable = AppError::Unreadable {
            input: "a.xlsx".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(unreadable.kind(), ErrorKind::Parse);

        let column = AppError::MissingColumn {
            column: "地名".into(),
        };
        assert_eq!(column.kind(), ErrorKind::Schema);
        assert_eq!(column.to_string(), "column \"地名\" is missing from this route");
        assert_eq!(AppError::EmptyWorkbook.kind(), ErrorKind::Schema);
    }
}
