//! Selection and loading of the static mapping file.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use urlshort_core::{CoreError, RouteTable};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("must provide a file")]
    NoFile,
    #[error("must provide json or yaml but not both at the same time")]
    BothFiles,
    #[error("expected yml or yaml file")]
    ExpectedYaml,
    #[error("expected json file")]
    ExpectedJson,
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Mappings(#[from] CoreError),
}

/// A mapping file together with its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingSource {
    Yaml(PathBuf),
    Json(PathBuf),
}

impl MappingSource {
    /// Picks the file to load from the `--yaml` and `--json` options.
    ///
    /// Exactly one must be given, and its extension must match its format.
    /// Empty paths count as not given.
    pub fn select(yaml: Option<&Path>, json: Option<&Path>) -> Result<Self, SourceError> {
        fn given(p: Option<&Path>) -> Option<&Path> {
            p.filter(|p| !p.as_os_str().is_empty())
        }

        match (given(yaml), given(json)) {
            (Some(_), Some(_)) => Err(SourceError::BothFiles),
            (Some(path), None) => match extension(path) {
                Some("yml" | "yaml") => Ok(MappingSource::Yaml(path.to_path_buf())),
                _ => Err(SourceError::ExpectedYaml),
            },
            (None, Some(path)) => match extension(path) {
                Some("json") => Ok(MappingSource::Json(path.to_path_buf())),
                _ => Err(SourceError::ExpectedJson),
            },
            (None, None) => Err(SourceError::NoFile),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            MappingSource::Yaml(path) | MappingSource::Json(path) => path,
        }
    }

    /// Reads the file and builds the route table.
    pub async fn load(&self) -> Result<RouteTable, SourceError> {
        let path = self.path();
        let data = tokio::fs::read(path).await.map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let table = match self {
            MappingSource::Yaml(_) => RouteTable::from_yaml(&data)?,
            MappingSource::Json(_) => RouteTable::from_json(&data)?,
        };

        info!(path = %path.display(), routes = table.len(), "loaded path mappings");
        Ok(table)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(OsStr::to_str)
}
