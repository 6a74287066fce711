//! Workout document persistence with file locking.
//!
//! The file holds the workout tree as JSON, exactly as `Workout` serializes.
//! Reads take a shared lock, writes go through a locked temp file that is
//! renamed over the original.

use crate::{Error, Result, Workout};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl Workout {
    /// Load a workout from a file with shared locking
    ///
    /// A missing file is `Error::NotFound`; a document cannot be defaulted.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(format!("no workout file at {:?}", path)));
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        let workout: Workout = serde_json::from_str(&contents)?;
        tracing::debug!(
            "Loaded workout {:?} ({} blocks) from {:?}",
            workout.title,
            workout.blocks.len(),
            path
        );
        Ok(workout)
    }

    /// Save a workout to a file with exclusive locking
    ///
    /// Atomically writes the document by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(parent)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved workout {:?} to {:?}", self.title, path);
        Ok(())
    }

    /// Load a workout, transform it, and save the result
    ///
    /// The file is left untouched if `f` fails.
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&Workout) -> Result<Workout>,
    {
        let current = Self::load(path)?;
        let next = f(&current)?;
        if next != current {
            next.save(path)?;
        } else {
            tracing::debug!("Workout unchanged, not rewriting {:?}", path);
        }
        Ok(next)
    }
}
