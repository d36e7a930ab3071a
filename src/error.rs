use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PngCrcError {
    #[error("{}: {source}", .path.display())]
    File {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),
}

impl PngCrcError {
    pub fn file(path: &Path) -> impl FnOnce(io::Error) -> PngCrcError + '_ {
        move |source| PngCrcError::File { path: path.to_path_buf(), source }
    }
}

pub type Result<T> = std::result::Result<T, PngCrcError>;
