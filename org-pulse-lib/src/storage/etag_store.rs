//! Durable mapping from user login to the etag of their last fetched events page.

use crate::Result;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "     etags";

/// User login to cache token, at most one token per user
pub type EtagMap = BTreeMap<String, String>;

/// On-disk representation of one entry
#[derive(Debug, Serialize, Deserialize)]
struct EtagEntry {
    user: String,
    etag: String,
}

/// JSON file holding an array of `{user, etag}` objects, rewritten wholesale on save
#[derive(Debug, Clone)]
pub struct EtagStore {
    path: PathBuf,
}

impl EtagStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted tokens. A missing file is an empty store, not an error.
    pub fn load(&self) -> Result<EtagMap> {
        let path = &self.path;

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!(target: LOG_TARGET, "No etags file at '{}', starting empty", path.display());
                return Ok(EtagMap::new());
            }
            Err(e) => return Err(e).into_app_err_with(|| format!("unable to read etags file '{}'", path.display())),
        };

        // A store saved while empty may hold a JSON `null`
        let entries: Option<Vec<EtagEntry>> =
            serde_json::from_str(&text).into_app_err_with(|| format!("unable to parse etags file '{}'", path.display()))?;

        let etags: EtagMap = entries
            .unwrap_or_default()
            .into_iter()
            .map(|entry| (entry.user, entry.etag))
            .collect();

        log::debug!(target: LOG_TARGET, "Loaded {} etag(s) from '{}'", etags.len(), path.display());
        Ok(etags)
    }

    /// Persist `etags`, replacing the previous file.
    ///
    /// Writes a sibling temporary file and renames it over the target, so a crash
    /// leaves either the old or the new store in place.
    pub fn save(&self, etags: &EtagMap) -> Result<()> {
        let path = &self.path;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{}'", parent.display()))?;
        }

        let entries: Vec<_> = etags
            .iter()
            .map(|(user, etag)| EtagEntry {
                user: user.clone(),
                etag: etag.clone(),
            })
            .collect();

        let tmp_path = self.tmp_path();
        let file = File::create(&tmp_path).into_app_err_with(|| format!("unable to create etags file '{}'", tmp_path.display()))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, &entries)
            .into_app_err_with(|| format!("unable to write etags file '{}'", tmp_path.display()))?;
        writer
            .flush()
            .into_app_err_with(|| format!("unable to flush etags file '{}'", tmp_path.display()))?;
        writer
            .get_ref()
            .sync_all()
            .into_app_err_with(|| format!("unable to sync etags file '{}'", tmp_path.display()))?;
        drop(writer);

        fs::rename(&tmp_path, path).into_app_err_with(|| format!("unable to replace etags file '{}'", path.display()))?;

        log::debug!(target: LOG_TARGET, "Saved {} etag(s) to '{}'", etags.len(), path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
