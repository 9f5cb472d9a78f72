//! Data directory resolution.

use anyhow::Result;
use std::path::PathBuf;

const BRANDFLOW_DIR: &str = ".brandflow";
const SESSIONS_DIR: &str = "sessions";
const LOGS_DIR: &str = "logs";

/// Environment variable to override the BrandFlow directory.
const BRANDFLOW_DIR_ENV: &str = "BRANDFLOW_DIR";

/// Resolve the BrandFlow data directory.
/// Priority: BRANDFLOW_DIR env var > ~/.brandflow/
pub fn resolve_brandflow_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(BRANDFLOW_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|h| h.join(BRANDFLOW_DIR))
        .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))
}

/// Ensure the BrandFlow directory exists and return its path.
pub fn ensure_brandflow_dir() -> Result<PathBuf> {
    let dir = resolve_brandflow_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the session storage root: ~/.brandflow/sessions
pub fn sessions_dir() -> Result<PathBuf> {
    Ok(resolve_brandflow_dir()?.join(SESSIONS_DIR))
}

/// Ensure the session storage root exists and return its path.
pub fn ensure_sessions_dir() -> Result<PathBuf> {
    let dir = sessions_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the log directory: ~/.brandflow/logs
pub fn logs_dir() -> Result<PathBuf> {
    Ok(resolve_brandflow_dir()?.join(LOGS_DIR))
}
