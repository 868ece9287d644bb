// ============================================================================
// Stockage local persistant
// ============================================================================
// Petit magasin clé/valeur qui survit aux redémarrages :
// - "token"         : jeton d'authentification (un seul à la fois)
// - "accountNumber" : numéro de compte du dernier utilisateur connecté
// - "profilePic"    : photo de profil en data URI
//
// Le contenu est un objet JSON écrit en entier à chaque modification
// (fichier temporaire puis rename, pour ne jamais laisser un fichier tronqué).
//
// CONCEPT RUST : Mutabilité intérieure
// - Mutex<BTreeMap> : modifiable depuis &self
// - Le magasin est partagé via Arc entre la session et le client HTTP
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, warn};

pub const TOKEN_KEY: &str = "token";
pub const ACCOUNT_NUMBER_KEY: &str = "accountNumber";
pub const PROFILE_PIC_KEY: &str = "profilePic";

/// Nom du fichier dans le répertoire de données
pub const STORAGE_FILE: &str = "storage.json";

/// Magasin clé/valeur persistant (ou en mémoire pour les tests)
#[derive(Debug)]
pub struct LocalStorage {
    /// None : magasin purement en mémoire
    path: Option<PathBuf>,
    entries: Mutex<BTreeMap<String, String>>,
}

impl LocalStorage {
    /// Ouvre (ou crée) le magasin dans le fichier donné
    ///
    /// Un fichier illisible ou corrompu est ignoré avec un warning :
    /// l'utilisateur devra simplement se reconnecter.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Corrupt storage file, starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e),
        };

        debug!(path = %path.display(), keys = entries.len(), "Local storage opened");
        Ok(Self {
            path: Some(path),
            entries: Mutex::new(entries),
        })
    }

    /// Magasin non persistant
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Écrit une valeur (écrase la précédente)
    ///
    /// En cas d'échec d'écriture, la mémoire garde l'ancien contenu.
    pub fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.lock();
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());
        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }

    /// Supprime une clé ; retourne true si elle existait
    pub fn remove(&self, key: &str) -> io::Result<bool> {
        let mut entries = self.lock();
        if !entries.contains_key(key) {
            return Ok(false);
        }
        let mut updated = entries.clone();
        updated.remove(key);
        self.persist(&updated)?;
        *entries = updated;
        Ok(true)
    }

    /// Jeton courant, en ignorant une valeur vide
    pub fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    // CONCEPT RUST : PoisonError::into_inner
    // - Un thread qui panique en tenant le lock "empoisonne" le Mutex
    // - Les données restent cohérentes ici (map simple), on les récupère
    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        restrict_permissions(&tmp)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

// Le fichier contient un jeton : lecture/écriture réservées au propriétaire
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

// ============================================================================
// Photo de profil : data URI
// ============================================================================

/// Lit une image et la convertit en "data:<mime>;base64,<...>"
pub fn data_uri_from_file(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    let mime = mime_from_extension(path).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unsupported image type: {}", path.display()),
        )
    })?;
    Ok(encode_data_uri(mime, &bytes))
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_in_memory_set_get_remove() {
        let storage = LocalStorage::in_memory();
        assert!(storage.get(TOKEN_KEY).is_none());

        storage.set(TOKEN_KEY, "tok123").unwrap();
        assert_eq!(storage.token().as_deref(), Some("tok123"));

        // Un nouveau login écrase l'ancien jeton
        storage.set(TOKEN_KEY, "tok456").unwrap();
        assert_eq!(storage.token().as_deref(), Some("tok456"));

        assert!(storage.remove(TOKEN_KEY).unwrap());
        assert!(!storage.remove(TOKEN_KEY).unwrap());
        assert!(storage.token().is_none());
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let storage = LocalStorage::in_memory();
        storage.set(TOKEN_KEY, "  ").unwrap();
        assert!(storage.token().is_none());
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(STORAGE_FILE);

        {
            let storage = LocalStorage::open(&path).unwrap();
            storage.set(TOKEN_KEY, "tok123").unwrap();
            storage.set(ACCOUNT_NUMBER_KEY, "2024000001").unwrap();
        }

        let reopened = LocalStorage::open(&path).unwrap();
        assert_eq!(reopened.token().as_deref(), Some("tok123"));
        assert_eq!(reopened.get(ACCOUNT_NUMBER_KEY).as_deref(), Some("2024000001"));
    }

    #[test]
    fn test_failed_write_keeps_previous_entries() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("data");
        let storage = LocalStorage::open(folder.join(STORAGE_FILE)).unwrap();
        storage.set(ACCOUNT_NUMBER_KEY, "2024000001").unwrap();

        // Le répertoire disparaît : toute écriture échoue
        fs::remove_dir_all(&folder).unwrap();

        assert!(storage.set(TOKEN_KEY, "tok123").is_err());
        assert!(storage.token().is_none());

        assert!(storage.remove(ACCOUNT_NUMBER_KEY).is_err());
        assert_eq!(storage.get(ACCOUNT_NUMBER_KEY).as_deref(), Some("2024000001"));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);
        fs::write(&path, "{not json").unwrap();

        let storage = LocalStorage::open(&path).unwrap();
        assert!(storage.token().is_none());

        // Le magasin reste utilisable et réécrit un fichier valide
        storage.set(TOKEN_KEY, "fresh").unwrap();
        let reopened = LocalStorage::open(&path).unwrap();
        assert_eq!(reopened.token().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_data_uri() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("me.PNG");
        fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

        let uri = data_uri_from_file(&image).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(uri, encode_data_uri("image/png", &[0x89, b'P', b'N', b'G']));

        let text = dir.path().join("notes.txt");
        fs::write(&text, "hello").unwrap();
        assert!(data_uri_from_file(&text).is_err());
    }
}
