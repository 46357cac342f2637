use std::path::PathBuf;

use thiserror::Error;

/// Command line error type.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("usage: party-grid-cli <rows.json> [view.json]")]
    Usage,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid json in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("export failed: {0}")]
    Export(#[from] serde_json::Error),
    #[error("export produced no output")]
    NothingExported,
    #[error(transparent)]
    Table(#[from] party_grid::Error),
}
