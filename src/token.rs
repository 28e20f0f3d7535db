//! Service account token lookup for 1Password.

use crate::error::{Error, Result};
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Picks the token to hand to the 1Password CLI.
///
/// # Arguments
/// * `explicit` - Token from `--token` or the environment
/// * `token_file` - Token file, relative to the home directory
///
/// # Returns
/// * `Result<String>` - The trimmed token
///
/// # Errors
/// * `Error::TokenError` if no explicit token is given and the token file
///   cannot be read or is empty
pub fn resolve_token(explicit: Option<&str>, token_file: &Path) -> Result<String> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }
    read_token_file(&home_token_path(token_file)?)
}

/// Joins `token_file` onto the home directory. An absolute `token_file` is
/// returned unchanged.
pub fn home_token_path(token_file: &Path) -> Result<PathBuf> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| Error::TokenError("could not determine the home directory".to_string()))?;
    Ok(dirs.home_dir().join(token_file))
}

/// Reads and trims a token file.
pub fn read_token_file(path: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::TokenError(format!("can not read the file {}: {e}", path.display()))
    })?;
    let token = contents.trim();
    if token.is_empty() {
        return Err(Error::TokenError(format!(
            "token file {} is empty",
            path.display()
        )));
    }
    Ok(token.to_string())
}
