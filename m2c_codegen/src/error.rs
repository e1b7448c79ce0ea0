use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("failed to read template '{}'", path.display())]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create directory '{}'", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read layout '{}'", path.display())]
    ReadLayout {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid layout '{}'", path.display())]
    InvalidLayout {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
