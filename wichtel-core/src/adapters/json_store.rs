//! JSON file store - collections persisted as whole-file JSON arrays
//!
//! Each collection lives in its own file in the data directory, named
//! after the keys the stored records have always used
//! (`secret-santa-parties.json` etc.), holding one JSON array; the session
//! is a single-object file. A mutation reads the whole collection, applies
//! one record change, and atomically replaces the file via a temp file and
//! rename.
//!
//! Two layers of locking: an in-process mutex serializes operations within
//! this process, and an advisory `fs2` lock on `store.lock` serializes
//! read-modify-write cycles against other processes using the same
//! directory.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::domain::result::{Error, Result};
use crate::domain::{normalize_email, GiftSuggestion, Invitation, Party, SessionUser, User};
use crate::ports::{InvitationStore, PartyStore, SessionStore, SuggestionStore, UserStore};

const USERS_FILE: &str = "secret-santa-users.json";
const SESSION_FILE: &str = "secret-santa-user.json";
const PARTIES_FILE: &str = "secret-santa-parties.json";
const INVITATIONS_FILE: &str = "secret-santa-invitations.json";
const SUGGESTIONS_FILE: &str = "secret-santa-gift-suggestions.json";
const LOCK_FILE: &str = "store.lock";

/// File-backed store implementing every repository port
pub struct JsonFileStore {
    dir: PathBuf,
    // Serializes operations within this process; the file lock covers
    // other processes.
    guard: Mutex<()>,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            guard: Mutex::new(()),
        })
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Take the cross-process advisory lock; released when the handle drops
    fn lock_store(&self) -> Result<File> {
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .open(self.path(LOCK_FILE))?;
        lock.lock_exclusive()
            .map_err(|e| Error::storage(format!("could not lock store: {}", e)))?;
        Ok(lock)
    }

    /// Read a whole collection; a missing file is an empty collection
    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        match fs::read_to_string(self.path(file)) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Atomically replace a collection file (write temp, then rename)
    fn write_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        let tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&tmp, items)?;
        tmp.persist(self.path(file))
            .map_err(|e| Error::storage(format!("could not replace {}: {}", file, e)))?;
        Ok(())
    }

    /// Append one record to a collection under the store lock
    fn append<T: Serialize + DeserializeOwned>(&self, file: &str, record: &T) -> Result<()> {
        let _guard = self.guard.lock().unwrap();
        let _lock = self.lock_store()?;
        let mut items: Vec<T> = self.read_collection(file)?;
        items.push(serde_json::from_value(serde_json::to_value(record)?)?);
        self.write_collection(file, &items)
    }
}

#[async_trait]
impl UserStore for JsonFileStore {
    async fn add_user(&self, user: &User) -> Result<()> {
        self.append(USERS_FILE, user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let _guard = self.guard.lock().unwrap();
        let email = normalize_email(email);
        let users: Vec<User> = self.read_collection(USERS_FILE)?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let _guard = self.guard.lock().unwrap();
        self.read_collection(USERS_FILE)
    }
}

#[async_trait]
impl SessionStore for JsonFileStore {
    async fn put_session(&self, user: &SessionUser) -> Result<()> {
        let _guard = self.guard.lock().unwrap();
        let _lock = self.lock_store()?;
        let tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&tmp, user)?;
        tmp.persist(self.path(SESSION_FILE))
            .map_err(|e| Error::storage(format!("could not write session: {}", e)))?;
        Ok(())
    }

    async fn get_session(&self) -> Result<Option<SessionUser>> {
        let _guard = self.guard.lock().unwrap();
        match fs::read_to_string(self.path(SESSION_FILE)) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear_session(&self) -> Result<()> {
        let _guard = self.guard.lock().unwrap();
        match fs::remove_file(self.path(SESSION_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl PartyStore for JsonFileStore {
    async fn add_party(&self, party: &Party) -> Result<()> {
        party.check_integrity()?;
        self.append(PARTIES_FILE, party)
    }

    async fn get_party(&self, id: &str) -> Result<Option<Party>> {
        let _guard = self.guard.lock().unwrap();
        let parties: Vec<Party> = self.read_collection(PARTIES_FILE)?;
        Ok(parties.into_iter().find(|p| p.id == id))
    }

    async fn list_parties(&self) -> Result<Vec<Party>> {
        let _guard = self.guard.lock().unwrap();
        self.read_collection(PARTIES_FILE)
    }

    async fn parties_for_user(&self, user_id: &str) -> Result<Vec<Party>> {
        let _guard = self.guard.lock().unwrap();
        let parties: Vec<Party> = self.read_collection(PARTIES_FILE)?;
        Ok(parties
            .into_iter()
            .filter(|p| p.created_by == user_id || p.is_member(user_id))
            .collect())
    }

    async fn update_party(&self, party: &Party, base_version: u64) -> Result<Party> {
        party.check_integrity()?;
        let _guard = self.guard.lock().unwrap();
        let _lock = self.lock_store()?;
        let mut parties: Vec<Party> = self.read_collection(PARTIES_FILE)?;
        let slot = parties
            .iter_mut()
            .find(|p| p.id == party.id)
            .ok_or_else(|| Error::not_found(format!("party {}", party.id)))?;
        if slot.version != base_version {
            return Err(Error::conflict(format!(
                "party '{}' was changed by someone else; reload and try again",
                party.name
            )));
        }
        let mut updated = party.clone();
        updated.version = base_version + 1;
        *slot = updated.clone();
        self.write_collection(PARTIES_FILE, &parties)?;
        Ok(updated)
    }
}

#[async_trait]
impl InvitationStore for JsonFileStore {
    async fn add_invitation(&self, invitation: &Invitation) -> Result<()> {
        self.append(INVITATIONS_FILE, invitation)
    }

    async fn get_invitation(&self, id: &str) -> Result<Option<Invitation>> {
        let _guard = self.guard.lock().unwrap();
        let invitations: Vec<Invitation> = self.read_collection(INVITATIONS_FILE)?;
        Ok(invitations.into_iter().find(|i| i.id == id))
    }

    async fn update_invitation(&self, invitation: &Invitation) -> Result<()> {
        let _guard = self.guard.lock().unwrap();
        let _lock = self.lock_store()?;
        let mut invitations: Vec<Invitation> = self.read_collection(INVITATIONS_FILE)?;
        let slot = invitations
            .iter_mut()
            .find(|i| i.id == invitation.id)
            .ok_or_else(|| Error::not_found(format!("invitation {}", invitation.id)))?;
        *slot = invitation.clone();
        self.write_collection(INVITATIONS_FILE, &invitations)
    }

    async fn invitations_for_email(&self, email: &str) -> Result<Vec<Invitation>> {
        let _guard = self.guard.lock().unwrap();
        let email = normalize_email(email);
        let mut invitations: Vec<Invitation> = self.read_collection(INVITATIONS_FILE)?;
        invitations.retain(|i| i.invited_user_email == email);
        invitations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invitations)
    }

    async fn list_invitations(&self) -> Result<Vec<Invitation>> {
        let _guard = self.guard.lock().unwrap();
        self.read_collection(INVITATIONS_FILE)
    }
}

#[async_trait]
impl SuggestionStore for JsonFileStore {
    async fn add_suggestion(&self, suggestion: &GiftSuggestion) -> Result<()> {
        self.append(SUGGESTIONS_FILE, suggestion)
    }

    async fn get_suggestion(&self, id: &str) -> Result<Option<GiftSuggestion>> {
        let _guard = self.guard.lock().unwrap();
        let suggestions: Vec<GiftSuggestion> = self.read_collection(SUGGESTIONS_FILE)?;
        Ok(suggestions.into_iter().find(|s| s.id == id))
    }

    async fn delete_suggestion(&self, id: &str) -> Result<()> {
        let _guard = self.guard.lock().unwrap();
        let _lock = self.lock_store()?;
        let mut suggestions: Vec<GiftSuggestion> = self.read_collection(SUGGESTIONS_FILE)?;
        let before = suggestions.len();
        suggestions.retain(|s| s.id != id);
        if suggestions.len() == before {
            return Err(Error::not_found(format!("suggestion {}", id)));
        }
        self.write_collection(SUGGESTIONS_FILE, &suggestions)
    }

    async fn list_suggestions(&self) -> Result<Vec<GiftSuggestion>> {
        let _guard = self.guard.lock().unwrap();
        self.read_collection(SUGGESTIONS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, JsonFileStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_missing_collection_reads_empty() {
        let (_dir, store) = store();
        assert!(store.list_users().await.unwrap().is_empty());
        assert!(store.get_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_round_trip() {
        let (_dir, store) = store();
        let user = User::new("Kim", "Kim@Example.com", "pw").unwrap();
        store.add_user(&user).await.unwrap();

        let found = store.find_user_by_email("KIM@example.com").await.unwrap();
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn test_session_put_get_clear() {
        let (_dir, store) = store();
        let user = SessionUser {
            id: "u1".to_string(),
            name: "Kim".to_string(),
            email: "kim@example.com".to_string(),
        };
        store.put_session(&user).await.unwrap();
        assert_eq!(store.get_session().await.unwrap(), Some(user));
        store.clear_session().await.unwrap();
        assert_eq!(store.get_session().await.unwrap(), None);
        // Idempotent
        store.clear_session().await.unwrap();
    }

    #[tokio::test]
    async fn test_stale_party_update_conflicts() {
        let (_dir, store) = store();
        let creator = SessionUser {
            id: "u1".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        let party = Party::new(&creator, "Party", "desc", None).unwrap();
        store.add_party(&party).await.unwrap();

        // Two sessions read version 0; the first write wins.
        let mut first = store.get_party(&party.id).await.unwrap().unwrap();
        let mut second = store.get_party(&party.id).await.unwrap().unwrap();

        first.update_basic_info("First edit", "desc", None).unwrap();
        let stored = store.update_party(&first, first.version).await.unwrap();
        assert_eq!(stored.version, 1);

        second.update_basic_info("Second edit", "desc", None).unwrap();
        let err = store.update_party(&second, second.version).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        let current = store.get_party(&party.id).await.unwrap().unwrap();
        assert_eq!(current.name, "First edit");
    }

    #[tokio::test]
    async fn test_collection_file_uses_camel_case_keys() {
        let (dir, store) = store();
        let creator = SessionUser {
            id: "u1".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        let party = Party::new(&creator, "Party", "desc", None).unwrap();
        store.add_party(&party).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join(PARTIES_FILE)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(parsed[0].get("createdBy").is_some());
        assert!(parsed[0].get("participantDetails").is_some());
        assert!(parsed[0].get("created_by").is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_suggestion_is_not_found() {
        let (_dir, store) = store();
        let err = store.delete_suggestion("nope").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
