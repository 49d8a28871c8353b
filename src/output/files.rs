use std::fs;
use std::io;
use std::path::Path;

/// Writes `content` to `path`, creating parent directories and replacing any existing file
pub fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Reads a UTF-8 text file
pub fn read_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}
