use std::path::PathBuf;

use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};

use crate::{constants::BEST_SCORE_FILE, utils::get_data_dir};

/// Where the best score outlives the process.
pub trait ScoreStore {
    /// The stored best score, 0 when nothing usable is stored.
    fn read(&self) -> u32;

    fn write(&mut self, best: u32) -> Result<()>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn read(&self) -> u32 {
        (**self).read()
    }

    fn write(&mut self, best: u32) -> Result<()> {
        (**self).write(best)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BestScore {
    best: u32,
}

#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_data_dir() -> Self {
        Self::new(get_data_dir().join(BEST_SCORE_FILE))
    }
}

impl ScoreStore for FileScoreStore {
    fn read(&self) -> u32 {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                log::debug!("No best score at {}: {e}", self.path.display());
                return 0;
            },
        };
        match serde_json::from_str::<BestScore>(&raw) {
            Ok(score) => score.best,
            Err(e) => {
                log::warn!("Ignoring corrupt best score at {}: {e}", self.path.display());
                0
            },
        }
    }

    fn write(&mut self, best: u32) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, serde_json::to_string(&BestScore { best })?)?;
        Ok(())
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    pub best: Option<u32>,
    pub writes: Vec<u32>,
    pub fail_writes: bool,
}

#[cfg(test)]
impl ScoreStore for MemoryScoreStore {
    fn read(&self) -> u32 {
        self.best.unwrap_or_default()
    }

    fn write(&mut self, best: u32) -> Result<()> {
        if self.fail_writes {
            color_eyre::eyre::bail!("storage is read-only");
        }
        self.best = Some(best);
        self.writes.push(best);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("flappy-rs-{}-{name}", std::process::id())).join(BEST_SCORE_FILE)
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let store = FileScoreStore::new(scratch_path("missing"));
        assert_eq!(store.read(), 0);
    }

    #[test]
    fn test_write_then_read() -> Result<()> {
        let path = scratch_path("roundtrip");
        let mut store = FileScoreStore::new(path.clone());
        store.write(12)?;
        assert_eq!(FileScoreStore::new(path.clone()).read(), 12);
        assert_eq!(std::fs::read_to_string(&path)?, r#"{"best":12}"#);
        std::fs::remove_dir_all(path.parent().unwrap())?;
        Ok(())
    }

    #[test]
    fn test_corrupt_file_reads_zero() -> Result<()> {
        let path = scratch_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap())?;
        std::fs::write(&path, "not json")?;
        assert_eq!(FileScoreStore::new(path.clone()).read(), 0);
        std::fs::remove_dir_all(path.parent().unwrap())?;
        Ok(())
    }

    #[test]
    fn test_boxed_store() -> Result<()> {
        let mut store: Box<dyn ScoreStore> = Box::new(MemoryScoreStore { best: Some(3), ..Default::default() });
        assert_eq!(store.read(), 3);
        store.write(4)?;
        assert_eq!(store.read(), 4);
        Ok(())
    }
}
