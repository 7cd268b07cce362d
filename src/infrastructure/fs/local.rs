//! Local file system access for synthesized artifacts

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::StackResult;

/// Local file system with atomic writes
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }

    /// Write through a temp file in the target directory, then rename over
    /// the destination. Readers never observe a half-written file.
    pub fn write_atomic(&self, path: &Path, content: &str) -> StackResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "written");
        Ok(())
    }

    /// Contents of `path`, or `None` when it does not exist
    pub fn read_optional(&self, path: &Path) -> StackResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
