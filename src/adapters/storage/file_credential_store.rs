use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::storage::CredentialStore,
    domain::entities::credential::Credential,
};

/// File name of the key/value store inside the Luminara home directory.
pub const STORAGE_FILE: &str = "storage.json";
/// Key the bearer credential is stored under.
pub const CREDENTIAL_KEY: &str = "token";

#[derive(Default)]
struct StoredMap {
    entries: BTreeMap<String, String>,
    corrupt: bool,
}

/// Client-local key/value storage backed by a single JSON object on disk.
///
/// Other keys in the file are preserved. Writes go to a temporary sibling
/// file that is renamed over the original, with owner-only permissions on unix.
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store at `<home>/storage.json`.
    pub fn in_dir(home: &Path) -> Self {
        Self::new(home.join(STORAGE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored map. A file that does not parse is treated as empty
    /// and reported as `corrupt`, so the next write replaces it.
    fn read_map(&self) -> AppResult<StoredMap> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StoredMap::default()),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if contents.trim().is_empty() {
            return Ok(StoredMap::default());
        }

        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(StoredMap {
                entries,
                corrupt: false,
            }),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt storage file");
                Ok(StoredMap {
                    entries: BTreeMap::new(),
                    corrupt: true,
                })
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> AppResult<()> {
        let storage_err =
            |what: &str, e: std::io::Error| AppError::Storage(format!("failed to {}: {}", what, e));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| storage_err("create storage directory", e))?;
        }

        let contents = serde_json::to_string_pretty(map)
            .map_err(|e| AppError::Storage(format!("failed to serialize storage: {}", e)))?;

        let tmp = self.path.with_extension("json.tmp");
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&tmp)
            .map_err(|e| storage_err("open temporary storage file", e))?;
        file.write_all(contents.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| storage_err("write storage file", e))?;
        drop(file);

        fs::rename(&tmp, &self.path).map_err(|e| storage_err("replace storage file", e))?;
        debug!(path = %self.path.display(), keys = map.len(), "storage written");
        Ok(())
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> AppResult<Option<Credential>> {
        let _guard = self.guard();
        Ok(self
            .read_map()?
            .entries
            .remove(CREDENTIAL_KEY)
            .and_then(Credential::new))
    }

    fn save(&self, credential: &Credential) -> AppResult<()> {
        let _guard = self.guard();
        let mut map = self.read_map()?.entries;
        map.insert(CREDENTIAL_KEY.to_string(), credential.expose().to_string());
        self.write_map(&map)
    }

    fn clear(&self) -> AppResult<()> {
        let _guard = self.guard();
        let StoredMap {
            mut entries,
            corrupt,
        } = self.read_map()?;
        if entries.remove(CREDENTIAL_KEY).is_none() && !corrupt {
            return Ok(());
        }
        self.write_map(&entries)
    }
}
