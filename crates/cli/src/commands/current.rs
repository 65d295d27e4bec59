//! The "current item" file: the code of the movo on offer.

use std::io;
use std::path::PathBuf;

pub struct CurrentItem {
    path: PathBuf,
}

impl CurrentItem {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The saved code, if any.
    pub fn load(&self) -> Option<String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn save(&self, code: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, code)
    }

    /// Forget the saved code. A missing file is fine.
    pub fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
