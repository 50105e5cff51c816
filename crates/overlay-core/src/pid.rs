use std::fs;
use std::path::PathBuf;

use crate::WindowResult;

/// Returns the data directory (`%LOCALAPPDATA%\overlay-player` on Windows),
/// creating it if needed.
fn data_dir() -> WindowResult<PathBuf> {
    let base = dirs::data_local_dir().ok_or("could not determine local data directory")?;
    let dir = base.join("overlay-player");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Returns the path to the PID file.
pub fn pid_path() -> WindowResult<PathBuf> {
    Ok(data_dir()?.join("overlay-player.pid"))
}

/// Writes the current process's PID to the PID file.
///
/// Lets the CLI detect a running daemon when the pipe does not answer,
/// and kill it if it is stuck.
pub fn write_pid_file() -> WindowResult<()> {
    fs::write(pid_path()?, std::process::id().to_string())?;
    Ok(())
}

/// Reads the PID from the PID file, if it exists.
pub fn read_pid_file() -> WindowResult<Option<u32>> {
    let path = pid_path()?;
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(parse_pid(&fs::read_to_string(&path)?)?))
}

/// Removes the PID file.
pub fn remove_pid_file() -> WindowResult<()> {
    let path = pid_path()?;
    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}

fn parse_pid(contents: &str) -> Result<u32, String> {
    contents
        .trim()
        .parse()
        .map_err(|e| format!("invalid PID file contents: {e}"))
}
