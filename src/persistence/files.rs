use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Environment variable naming the application-data directory
pub const DATA_DIR_ENV: &str = "APP_DATA";

/// Fixed file names inside the data directory
pub const DOCUMENT_FILE: &str = "timebox.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "timebox.log";

/// Resolve the data directory: explicit override, then $APP_DATA, then the
/// platform data dir (e.g. ~/.local/share/timebox)
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }

    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::data_dir().context("Could not determine data directory")?;
    Ok(base.join("timebox"))
}

/// Ensure the data directory exists
pub fn ensure_data_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(())
}

pub fn document_file(dir: &Path) -> PathBuf {
    dir.join(DOCUMENT_FILE)
}

pub fn settings_file(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE)
}

pub fn log_file(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE)
}

/// Create the data directory and an empty document in it
pub fn init_document(dir: &Path) -> Result<PathBuf> {
    ensure_data_dir(dir)?;
    let path = document_file(dir);

    if path.exists() {
        anyhow::bail!("Document already exists: {}", path.display());
    }

    atomic_write(&path, "{\n  \"tasks\": [],\n  \"logs\": []\n}")?;
    Ok(path)
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    // Create temp file in the same directory
    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    // Atomically rename temp file to target
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, return empty string if file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
