//! File-backed leaderboard store.
//!
//! # Durability
//!
//! Every mutation is staged on a copy of the document, written to a
//! temporary file, synced and renamed over the backing file. Only after the
//! rename succeeds does the copy replace the in-memory document, so a failed
//! write leaves the store exactly as it was last persisted.
//!
//! # Concurrency
//!
//! One process is assumed to own the backing file. Two processes sharing a
//! file will race; the last full rewrite wins.

use chrono::Utc;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::schema::{GameLogRecord, LeaderboardDocument, LeaderboardEntry, PlayerKey, PlayerRecord};
use crate::core::LeaderboardError;

/// Players and match history backed by a JSON document.
#[derive(Debug)]
pub struct Leaderboard {
    path: PathBuf,
    doc: LeaderboardDocument,
}

impl Leaderboard {
    /// Open the store at `path`.
    ///
    /// A missing, unreadable or malformed document is replaced by an empty
    /// one; a document in an older shape is normalized. Either way the
    /// result is written back immediately. Only that write can fail.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LeaderboardError> {
        let path = path.into();

        let (doc, dirty) = match fs::read(&path) {
            Ok(bytes) => match LeaderboardDocument::parse(&bytes) {
                Ok(mut doc) => {
                    let changed = doc.normalize();
                    (doc, changed)
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "leaderboard document is corrupt; starting empty");
                    (LeaderboardDocument::empty(), true)
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no leaderboard document; creating one");
                (LeaderboardDocument::empty(), true)
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "leaderboard document is unreadable; starting empty");
                (LeaderboardDocument::empty(), true)
            }
        };

        if dirty {
            write_document(&path, &doc)?;
        }

        Ok(Self { path, doc })
    }

    /// Register `name`, or return the id it already has.
    ///
    /// Registering an existing name in any letter case is a no-op that keeps
    /// the stored display name.
    pub fn register_player(&mut self, name: &str) -> Result<PlayerKey, LeaderboardError> {
        let id = PlayerKey::canonicalize(name).ok_or(LeaderboardError::EmptyName)?;
        if self.doc.players.contains_key(&id) {
            return Ok(id);
        }

        let mut next = self.doc.clone();
        next.players.insert(id.clone(), PlayerRecord::new(name.trim(), Utc::now()));
        self.commit(next)?;

        info!(%id, name = name.trim(), "registered player");
        Ok(id)
    }

    /// Change a player's display name and return their id afterwards.
    ///
    /// The id changes only when the canonical form of the name does. Past
    /// match records keep the id they were written with, so after a re-key
    /// the old id is free again: registering the old name later creates a
    /// fresh player whose id matches those older records.
    pub fn rename_player(&mut self, id: &PlayerKey, new_name: &str) -> Result<PlayerKey, LeaderboardError> {
        if !self.doc.players.contains_key(id) {
            return Err(unknown(id));
        }
        let new_id = PlayerKey::canonicalize(new_name).ok_or(LeaderboardError::EmptyName)?;
        if new_id != *id && self.doc.players.contains_key(&new_id) {
            return Err(LeaderboardError::NameTaken {
                name: new_name.trim().to_string(),
                owner: new_id.to_string(),
            });
        }

        let mut next = self.doc.clone();
        if let Some(mut record) = next.players.remove(id) {
            record.name = new_name.trim().to_string();
            record.last_updated = Some(Utc::now());
            next.players.insert(new_id.clone(), record);
        }
        self.commit(next)?;

        info!(old = %id, new = %new_id, name = new_name.trim(), "renamed player");
        Ok(new_id)
    }

    /// Credit a win and a loss and append the match to the log.
    ///
    /// Nothing is touched unless both ids exist and differ.
    pub fn record_result(
        &mut self,
        winner: &PlayerKey,
        loser: &PlayerKey,
        score_for: u32,
        score_against: u32,
        duration_secs: u64,
    ) -> Result<GameLogRecord, LeaderboardError> {
        if winner == loser {
            return Err(LeaderboardError::SelfPlay { id: winner.to_string() });
        }
        for id in [winner, loser] {
            if !self.doc.players.contains_key(id) {
                return Err(unknown(id));
            }
        }

        let now = Utc::now();
        let record = GameLogRecord {
            players: [winner.clone(), loser.clone()],
            winner: winner.clone(),
            loser: loser.clone(),
            score_for,
            score_against,
            duration_secs,
            timestamp: now,
        };

        let mut next = self.doc.clone();
        if let Some(w) = next.players.get_mut(winner) {
            w.wins = w.wins.saturating_add(1);
            w.last_updated = Some(now);
        }
        if let Some(l) = next.players.get_mut(loser) {
            l.losses = l.losses.saturating_add(1);
            l.last_updated = Some(now);
        }
        next.games.push(record.clone());
        self.commit(next)?;

        info!(%winner, %loser, score_for, score_against, duration_secs, "recorded result");
        Ok(record)
    }

    /// All players ranked by wins (desc), losses (asc), then name
    /// case-insensitively (asc).
    #[must_use]
    pub fn table(&self) -> Vec<LeaderboardEntry> {
        let mut rows: Vec<LeaderboardEntry> = self
            .doc
            .players
            .iter()
            .map(|(id, record)| LeaderboardEntry::from_record(id, record))
            .collect();

        rows.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| a.losses.cmp(&b.losses))
                .then_with(|| a.display_name.to_lowercase().cmp(&b.display_name.to_lowercase()))
                .then_with(|| a.id.cmp(&b.id))
        });
        rows
    }

    /// Look up a player by id.
    #[must_use]
    pub fn entry(&self, id: &PlayerKey) -> Option<LeaderboardEntry> {
        self.doc
            .players
            .get(id)
            .map(|record| LeaderboardEntry::from_record(id, record))
    }

    /// Look up a player by any spelling of their name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<LeaderboardEntry> {
        PlayerKey::canonicalize(name).and_then(|id| self.entry(&id))
    }

    /// Match history, oldest first.
    #[must_use]
    pub fn games(&self) -> &[GameLogRecord] {
        &self.doc.games
    }

    /// Number of registered players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.doc.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doc.players.is_empty()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn document(&self) -> &LeaderboardDocument {
        &self.doc
    }

    /// Rewrite the backing document from memory.
    pub fn save(&self) -> Result<(), LeaderboardError> {
        write_document(&self.path, &self.doc)
    }

    fn commit(&mut self, next: LeaderboardDocument) -> Result<(), LeaderboardError> {
        write_document(&self.path, &next)?;
        self.doc = next;
        Ok(())
    }
}

fn unknown(id: &PlayerKey) -> LeaderboardError {
    LeaderboardError::UnknownPlayer { id: id.to_string() }
}

/// Atomically replace `path` with the encoded document (write-sync-rename).
fn write_document(path: &Path, doc: &LeaderboardDocument) -> Result<(), LeaderboardError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let data = serde_json::to_vec_pretty(doc)?;

    let mut temp_path = path.as_os_str().to_owned();
    temp_path.push(".tmp");
    let temp_path = PathBuf::from(temp_path);

    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
    }
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open() -> (TempDir, Leaderboard) {
        let dir = tempfile::tempdir().unwrap();
        let board = Leaderboard::open(dir.path().join("highscores.json")).unwrap();
        (dir, board)
    }

    #[test]
    fn test_open_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("hs.json");
        assert!(!path.exists());

        let board = Leaderboard::open(&path).unwrap();
        assert!(path.exists());
        assert!(board.is_empty());
        assert!(!path.with_file_name("hs.json.tmp").exists());
    }

    #[test]
    fn test_register_is_case_insensitive() {
        let (_dir, mut board) = open();
        let a = board.register_player("Alice").unwrap();
        let b = board.register_player("  alice ").unwrap();
        let c = board.register_player("Bob").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(board.len(), 2);
        assert_eq!(board.entry(&a).unwrap().display_name, "Alice");
    }

    #[test]
    fn test_register_rejects_blank() {
        let (_dir, mut board) = open();
        assert!(matches!(board.register_player("   "), Err(LeaderboardError::EmptyName)));
        assert!(board.is_empty());
    }

    #[test]
    fn test_rename_case_only_keeps_id() {
        let (_dir, mut board) = open();
        let a = board.register_player("alice").unwrap();
        let renamed = board.rename_player(&a, "ALICE").unwrap();
        assert_eq!(renamed, a);
        assert_eq!(board.entry(&a).unwrap().display_name, "ALICE");
    }

    #[test]
    fn test_rename_rekeys() {
        let (_dir, mut board) = open();
        let a = board.register_player("Alice").unwrap();
        let new_id = board.rename_player(&a, "Alicia").unwrap();

        assert_eq!(new_id.as_str(), "alicia");
        assert!(board.entry(&a).is_none());
        assert_eq!(board.entry(&new_id).unwrap().display_name, "Alicia");
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_old_id_is_reusable_after_rekey() {
        let (_dir, mut board) = open();
        let alice = board.register_player("Alice").unwrap();
        let bob = board.register_player("Bob").unwrap();
        board.record_result(&alice, &bob, 100, 10, 5).unwrap();

        let alicia = board.rename_player(&alice, "Alicia").unwrap();
        assert_eq!(board.entry(&alicia).unwrap().wins, 1);
        assert_eq!(board.games()[0].winner, alice);

        let again = board.register_player("alice").unwrap();
        assert_eq!(again, alice);
        let fresh = board.entry(&again).unwrap();
        assert_eq!((fresh.wins, fresh.losses), (0, 0));
        assert_eq!(board.games()[0].winner, again);
    }

    #[test]
    fn test_rename_unknown_and_blank() {
        let (_dir, mut board) = open();
        let ghost = PlayerKey::canonicalize("ghost").unwrap();
        assert!(matches!(
            board.rename_player(&ghost, "Casper"),
            Err(LeaderboardError::UnknownPlayer { .. })
        ));

        let a = board.register_player("Alice").unwrap();
        assert!(matches!(board.rename_player(&a, " "), Err(LeaderboardError::EmptyName)));
    }

    #[test]
    fn test_table_tie_breaks_on_name() {
        let (_dir, mut board) = open();
        board.register_player("bravo").unwrap();
        board.register_player("Alpha").unwrap();
        board.register_player("charlie").unwrap();

        let names: Vec<_> = board.table().into_iter().map(|e| e.display_name).collect();
        assert_eq!(names, vec!["Alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_failed_write_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hs.json");
        let mut board = Leaderboard::open(&path).unwrap();
        let a = board.register_player("Alice").unwrap();

        // A directory squatting on the temp path makes the next write fail.
        fs::create_dir(dir.path().join("hs.json.tmp")).unwrap();

        assert!(matches!(board.register_player("Bob"), Err(LeaderboardError::Io(_))));
        assert_eq!(board.len(), 1);
        assert!(board.entry(&a).is_some());

        let on_disk = LeaderboardDocument::parse(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(&on_disk, board.document());
    }
}
