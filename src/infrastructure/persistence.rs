use crate::domain::{CsvExporter, FileError, FileResult, ResultGrid};
use std::fs;
use std::path::{Path, PathBuf};

pub const MODEL_FILENAME: &str = "model.yaml";
pub const RESULTS_FILENAME: &str = "results.json";
pub const RESULTS_CSV_FILENAME: &str = "results.csv";

pub struct FileRepository;

impl FileRepository {
    /// Writes the document verbatim to `model.yaml` in `dir`.
    pub fn save_model(dir: &Path, document: &str) -> FileResult<PathBuf> {
        Self::write(dir.join(MODEL_FILENAME), document.as_bytes())
    }

    /// Reads a model file as UTF-8. An empty name means nothing was selected.
    pub fn load_model(filename: &str) -> FileResult<String> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(FileError::NoFileSelected);
        }

        let bytes = fs::read(filename).map_err(|source| FileError::Io {
            path: filename.to_string(),
            source,
        })?;
        String::from_utf8(bytes).map_err(|_| FileError::Encoding(filename.to_string()))
    }

    /// Writes the raw response body to `results.json` in `dir`.
    pub fn save_results(dir: &Path, raw: &str) -> FileResult<PathBuf> {
        Self::write(dir.join(RESULTS_FILENAME), raw.as_bytes())
    }

    pub fn save_results_csv(dir: &Path, grid: &ResultGrid) -> FileResult<PathBuf> {
        let mut out = Vec::new();
        CsvExporter::write_grid(grid, &mut out)?;
        Self::write(dir.join(RESULTS_CSV_FILENAME), &out)
    }

    fn write(path: PathBuf, contents: &[u8]) -> FileResult<PathBuf> {
        match fs::write(&path, contents) {
            Ok(()) => {
                log::info!("Wrote {} bytes to {}", contents.len(), path.display());
                Ok(path)
            }
            Err(source) => Err(FileError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}
