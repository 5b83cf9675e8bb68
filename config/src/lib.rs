//! Load configuration from a project `.env` and apply it to the process
//! environment with priority **existing env > .env**, then read typed
//! [`Settings`] for the docent binaries.

mod dotenv;
mod settings;

pub use settings::Settings;

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Loads the project `.env` (current directory, or `override_dir` if given)
/// and sets environment variables only for keys that are **not** already
/// set, so existing env always wins.
pub fn load_and_apply(override_dir: Option<&Path>) -> Result<(), LoadError> {
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;
    for (key, value) in dotenv_map {
        if std::env::var(&key).is_err() {
            std::env::set_var(&key, value);
        }
    }
    Ok(())
}
