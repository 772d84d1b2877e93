use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hostmirror::{DomainMapping, MappingStore, ValidationError};

use crate::{HOSTMIRROR_CONFIG_ENV, HOSTMIRROR_DEFAULT_FILE};

#[derive(Error, Debug)]
pub enum MappingsFileError {
    #[error("could not read the mappings file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("the mappings file at {path} is not valid YAML: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("the mappings file at {path} has an invalid entry: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
    #[error("could not serialize the mappings: {0}")]
    Serialize(serde_yaml::Error),
    #[error("could not write the mappings file at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Deserialize, Serialize)]
struct MappingsDocument {
    mappings: Vec<DomainMapping>,
}

/// The YAML file backing the CLI. The core store never touches the
/// filesystem; every load replays core validation, so a hand-edited file
/// with a duplicate or malformed domain is rejected with the specific
/// error.
pub struct MappingsFile {
    path: PathBuf,
    pub store: MappingStore,
}

impl MappingsFile {
    /// A missing file loads as an empty store so `add` can bootstrap it.
    pub fn load(config_arg: &Option<String>) -> Result<Self, MappingsFileError> {
        let path = file_path(config_arg);

        if !path.exists() {
            log::debug!("no mappings file at {}, starting empty", path.display());
            return Ok(Self {
                path,
                store: MappingStore::new(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| MappingsFileError::Read {
            path: path.clone(),
            source: e,
        })?;

        let document: MappingsDocument =
            serde_yaml::from_str(&content).map_err(|e| MappingsFileError::Parse {
                path: path.clone(),
                source: e,
            })?;

        let store = MappingStore::from_mappings(document.mappings).map_err(|e| {
            MappingsFileError::Invalid {
                path: path.clone(),
                source: e,
            }
        })?;

        log::debug!("loaded {} mapping(s) from {}", store.len(), path.display());

        Ok(Self { path, store })
    }

    pub fn save(&self) -> Result<(), MappingsFileError> {
        let document = MappingsDocument {
            mappings: self.store.mappings().to_vec(),
        };
        let yaml = serde_yaml::to_string(&document).map_err(MappingsFileError::Serialize)?;

        log::debug!(
            "writing {} mapping(s) to {}",
            self.store.len(),
            self.path.display()
        );

        fs::write(&self.path, yaml).map_err(|e| MappingsFileError::Write {
            path: self.path.clone(),
            source: e,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn file_path(config_arg: &Option<String>) -> PathBuf {
    match config_arg {
        Some(path) => PathBuf::from(path),
        None => match env::var(HOSTMIRROR_CONFIG_ENV) {
            Ok(val) => PathBuf::from(val),
            Err(_) => PathBuf::from(HOSTMIRROR_DEFAULT_FILE),
        },
    }
}
