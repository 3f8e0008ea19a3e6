//! Local CSV files.

use crate::{
    Result,
    error::DataError,
    loader::Loader,
    normalize::{NormalizeOptions, normalize_frame},
};
use factorlake_traits::Dataset;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads a dataset from a CSV file with a header row.
///
/// Every cell is read as text and parsed during normalization, so a stray
/// `--` in a numeric column is treated as null instead of failing schema
/// inference.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    path: PathBuf,
    options: NormalizeOptions,
}

impl CsvLoader {
    /// A loader for `path` with default normalization.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: NormalizeOptions::default(),
        }
    }

    /// Replaces the normalization options.
    #[must_use]
    pub fn with_options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    /// The file this loader reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw table without normalizing it.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing or is not valid CSV.
    pub fn read_frame(&self) -> Result<DataFrame> {
        if !self.path.exists() {
            return Err(DataError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", self.path.display()),
            )));
        }
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(self.path.clone()))?
            .finish()?;
        Ok(frame)
    }

    /// Reads and normalizes the file on the current thread.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors and on any integrity error raised by normalization.
    pub fn load_blocking(&self) -> Result<Dataset> {
        let frame = self.read_frame()?;
        info!(
            "Read {} rows x {} columns from {}",
            frame.height(),
            frame.width(),
            self.path.display()
        );
        normalize_frame(&frame, &self.options)
    }
}

impl Loader for CsvLoader {
    fn source(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Dataset> {
        let loader = self.clone();
        tokio::task::spawn_blocking(move || loader.load_blocking())
            .await
            .map_err(|e| DataError::Io(std::io::Error::other(e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "factorlake-{}-{}.csv",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    const TABLE: &str = "\
Ticker,Year,Ending Price,ROE using 9/30 Data,FactSet Industry
AAPL,2010,10.0,0.25,Telecommunications Equipment
MSFT,2010,--,0.10,Packaged Software
AAPL,2011,12.0,,Telecommunications Equipment
";

    #[test]
    fn test_load_blocking() {
        let path = write_temp("blocking", TABLE);
        let dataset = CsvLoader::new(&path).load_blocking().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.years().into_iter().collect::<Vec<_>>(), vec![2010, 2011]);
        assert_eq!(dataset.records()[1].ending_price, None);
        assert_eq!(dataset.records()[2].field("ROE using 9/30 Data"), None);
    }

    #[tokio::test]
    async fn test_async_load() {
        let path = write_temp("async", TABLE);
        let loader = CsvLoader::new(&path);
        let dataset = loader.load().await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(dataset.len(), 3);
        assert!(loader.source().ends_with(".csv"));
    }

    #[test]
    fn test_missing_file() {
        let err = CsvLoader::new("/nonexistent/factorlake.csv")
            .load_blocking()
            .unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }

    #[test]
    fn test_unparseable_cell_reports_row() {
        let path = write_temp(
            "bad",
            "Ticker,Year,Ending Price\nA,2010,1.0\nB,2010,abc\n",
        );
        let err = CsvLoader::new(&path).load_blocking().unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("row 1"));
    }
}
