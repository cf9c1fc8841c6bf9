//! Immutable runtime configuration, built once at startup and passed by
//! reference to the loader and the session.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ExploreError, Result};
use crate::filters::City;

/// Environment variable naming the directory that holds the city CSV files.
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    data_dir: PathBuf,
    city_files: BTreeMap<City, String>,
    page_size: usize,
}

impl ExplorerConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let city_files = [
            (City::Chicago, "chicago.csv"),
            (City::NewYorkCity, "new_york_city.csv"),
            (City::Washington, "washington.csv"),
        ]
        .into_iter()
        .map(|(city, file)| (city, file.to_string()))
        .collect();

        Self {
            data_dir: data_dir.into(),
            city_files,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Data directory from `BIKESHARE_DATA_DIR`, or the working directory.
    pub fn from_env() -> Self {
        let dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn city_file(&self, city: City) -> Result<&str> {
        self.city_files
            .get(&city)
            .map(String::as_str)
            .ok_or_else(|| {
                ExploreError::InvalidData(format!("No data file configured for {city}"))
            })
    }

    pub fn city_path(&self, city: City) -> Result<PathBuf> {
        Ok(self.data_dir.join(self.city_file(city)?))
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
