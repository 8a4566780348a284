//! Persisted leaderboard document.
//!
//! ```json
//! {
//!   "version": 1,
//!   "players": { "alice": { "name": "Alice", "wins": 2, "losses": 0, "last_updated": "..." } },
//!   "games": [ { "players": ["alice", "bob"], "winner": "alice", "loser": "bob", ... } ]
//! }
//! ```
//!
//! Missing keys fall back to defaults when parsing. Documents written before
//! versioning used `winner_pid`/`loser_pid`/`date` for matches and naive
//! timestamps; both are accepted on read. [`LeaderboardDocument::normalize`]
//! is the single migration step, run once per load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Schema version written by this crate.
pub const SCHEMA_VERSION: u32 = 1;

/// Canonical player identity: the trimmed, lowercased display name.
///
/// Lowercasing is Unicode-aware but is not full case folding: `"ÉMILE"` and
/// `"émile"` share an id, while `"STRASSE"` and `"straße"` do not.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerKey(String);

impl PlayerKey {
    /// Canonical form of `name`, or `None` if it is blank.
    ///
    /// ```
    /// use pig_dice::leaderboard::PlayerKey;
    ///
    /// assert_eq!(PlayerKey::canonicalize("  Alice ").unwrap().as_str(), "alice");
    /// assert!(PlayerKey::canonicalize("   ").is_none());
    /// ```
    #[must_use]
    pub fn canonicalize(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_lowercase()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlayerKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Stored per-player record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl PlayerRecord {
    pub(crate) fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            wins: 0,
            losses: 0,
            last_updated: Some(now),
        }
    }
}

/// One ranked row of the leaderboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: PlayerKey,
    pub display_name: String,
    pub wins: u32,
    pub losses: u32,
    pub last_updated: Option<DateTime<Utc>>,
}

impl LeaderboardEntry {
    pub(crate) fn from_record(id: &PlayerKey, record: &PlayerRecord) -> Self {
        Self {
            id: id.clone(),
            display_name: record.name.clone(),
            wins: record.wins,
            losses: record.losses,
            last_updated: record.last_updated,
        }
    }

    /// Wins plus losses.
    #[must_use]
    pub fn games_played(&self) -> u32 {
        self.wins.saturating_add(self.losses)
    }
}

/// Append-only record of one finished match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawGameLogRecord")]
pub struct GameLogRecord {
    /// Both participants, winner first.
    pub players: [PlayerKey; 2],
    pub winner: PlayerKey,
    pub loser: PlayerKey,
    /// Winner's final score.
    pub score_for: u32,
    /// Loser's final score.
    pub score_against: u32,
    pub duration_secs: u64,
    pub timestamp: DateTime<Utc>,
}

/// Any shape of match record this crate has written.
///
/// Unversioned documents carry neither participants nor scores; those read
/// as winner-then-loser and zero. A missing or unreadable timestamp reads as
/// the Unix epoch.
#[derive(Deserialize)]
struct RawGameLogRecord {
    #[serde(default)]
    players: Option<[PlayerKey; 2]>,
    #[serde(alias = "winner_pid")]
    winner: PlayerKey,
    #[serde(alias = "loser_pid")]
    loser: PlayerKey,
    #[serde(default)]
    score_for: u32,
    #[serde(default)]
    score_against: u32,
    #[serde(default)]
    duration_secs: u64,
    #[serde(default, alias = "date", deserialize_with = "timestamp::lenient")]
    timestamp: Option<DateTime<Utc>>,
}

impl From<RawGameLogRecord> for GameLogRecord {
    fn from(raw: RawGameLogRecord) -> Self {
        let players = match raw.players {
            Some(players) => players,
            None => [raw.winner.clone(), raw.loser.clone()],
        };
        Self {
            players,
            winner: raw.winner,
            loser: raw.loser,
            score_for: raw.score_for,
            score_against: raw.score_against,
            duration_secs: raw.duration_secs,
            timestamp: raw.timestamp.unwrap_or_default(),
        }
    }
}

mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// RFC 3339, naive ISO 8601 (taken as UTC), a bare date, or Unix seconds.
    /// Anything else reads as absent.
    pub(super) fn lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(raw)) => parse(&raw),
            Some(Value::Number(secs)) => secs
                .as_f64()
                .filter(|secs| secs.is_finite())
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs as i64, 0)),
            _ => None,
        })
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(stamp.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .map(|naive| naive.and_utc())
    }
}

/// The whole backing document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardDocument {
    /// 0 when the field is absent (documents that predate versioning).
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub players: BTreeMap<PlayerKey, PlayerRecord>,
    #[serde(default)]
    pub games: Vec<GameLogRecord>,
}

impl LeaderboardDocument {
    /// A fresh, valid, empty document.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: SCHEMA_VERSION,
            ..Self::default()
        }
    }

    /// Parse a document; the caller decides what to do with malformed input.
    pub fn parse(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Bring a freshly parsed document to the current schema.
    ///
    /// - players keyed by anything other than their canonical name are
    ///   re-keyed, and match records are rewritten to the new keys
    /// - players whose names collide after canonicalization are merged
    /// - blank names fall back to the old key; records with neither are dropped
    ///
    /// Returns `true` if anything changed and the document should be rewritten.
    pub fn normalize(&mut self) -> bool {
        let mut changed = self.version != SCHEMA_VERSION;
        self.version = SCHEMA_VERSION;

        let mut players: BTreeMap<PlayerKey, PlayerRecord> = BTreeMap::new();
        let mut renamed: HashMap<PlayerKey, PlayerKey> = HashMap::new();

        for (old_key, mut record) in std::mem::take(&mut self.players) {
            if record.name.trim().is_empty() {
                record.name = old_key.as_str().trim().to_string();
                changed = true;
            }
            let Some(key) = PlayerKey::canonicalize(&record.name) else {
                changed = true;
                continue;
            };
            if key != old_key {
                renamed.insert(old_key, key.clone());
                changed = true;
            }

            match players.get_mut(&key) {
                Some(existing) => {
                    existing.wins = existing.wins.saturating_add(record.wins);
                    existing.losses = existing.losses.saturating_add(record.losses);
                    existing.last_updated = existing.last_updated.max(record.last_updated);
                    changed = true;
                }
                None => {
                    players.insert(key, record);
                }
            }
        }
        self.players = players;

        if !renamed.is_empty() {
            let remap = |key: &mut PlayerKey| {
                if let Some(new_key) = renamed.get(&*key) {
                    *key = new_key.clone();
                }
            };
            for game in &mut self.games {
                game.players.iter_mut().for_each(remap);
                remap(&mut game.winner);
                remap(&mut game.loser);
            }
        }

        changed
    }
}
