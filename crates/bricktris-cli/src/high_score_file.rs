use std::{
    fs, io,
    path::{Path, PathBuf},
};

use bricktris_engine::{HighScoreError, HighScoreStore};

/// High score kept as a single decimal number in a text file.
///
/// A missing file counts as a high score of 0.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load_high_score(&mut self) -> Result<u64, HighScoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        Ok(text.trim().parse()?)
    }

    fn save_high_score(&mut self, high_score: u64) -> Result<(), HighScoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, format!("{high_score}\n"))?;
        Ok(())
    }
}
