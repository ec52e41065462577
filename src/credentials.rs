// WHY: credentials are loaded once into an explicit value handed to consumers,
// nothing here mutates the process environment

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_ENV_FILE: &str = "OPENAI_KEY.env";
pub const DEFAULT_KEY_VAR: &str = "OPENAI_API_KEY";

/// API credentials for the text-generation client
#[derive(Clone)]
pub struct ApiConfig {
    pub api_key: String,
    /// Environment file the key was resolved against
    pub env_file: PathBuf,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &mask_key(&self.api_key))
            .field("env_file", &self.env_file)
            .finish()
    }
}

impl ApiConfig {
    /// Load the default `OPENAI_KEY.env` / `OPENAI_API_KEY` pair from the current directory upwards
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_ENV_FILE, DEFAULT_KEY_VAR)
    }

    pub fn load(file_name: &str, key_var: &str) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
        Self::load_from(&cwd, file_name, key_var)
    }

    /// Search `start_dir` and its ancestors for `file_name` and read `key_var`
    ///
    /// A value already present in the process environment wins over the file,
    /// matching dotenv's no-override rule.
    pub fn load_from(start_dir: &Path, file_name: &str, key_var: &str) -> Result<Self> {
        let env_file = find_env_file(start_dir, file_name).ok_or_else(|| Error::EnvFileNotFound {
            file_name: file_name.to_string(),
        })?;
        debug!("Using environment file {}", env_file.display());

        let mut file_value = None;
        for item in dotenvy::from_path_iter(&env_file)? {
            let (key, value) = item?;
            if key == key_var {
                file_value = Some(value);
            }
        }

        let api_key = std::env::var(key_var)
            .ok()
            .or(file_value)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::MissingKey {
                key: key_var.to_string(),
                path: env_file.clone(),
            })?;

        Ok(Self { api_key, env_file })
    }

    /// Key with everything but the last four characters hidden
    pub fn masked_key(&self) -> String {
        mask_key(&self.api_key)
    }
}

/// First `file_name` found in `start_dir` or one of its ancestors
pub fn find_env_file(start_dir: &Path, file_name: &str) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(file_name))
        .find(|candidate| candidate.is_file())
}

fn mask_key(key: &str) -> String {
    let visible: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("****{visible}")
}
