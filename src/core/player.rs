//! Player slots and per-slot data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat index. Pig is strictly two-player, so only slots 0 and 1
//! exist.
//!
//! ## PlayerPair
//!
//! Fixed two-entry storage indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier, 0 or 1.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`, displayed
/// as "Player 1".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player who rolls first.
    pub const FIRST: PlayerId = PlayerId(0);
    /// The player who rolls second.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a player id from a raw slot index.
    ///
    /// Returns `None` for anything other than 0 or 1.
    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::FIRST),
            1 => Some(Self::SECOND),
            _ => None,
        }
    }

    /// Get the raw slot index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn other(self) -> Self {
        PlayerId(1 - self.0)
    }

    /// Both seats in turn order.
    ///
    /// ```
    /// use pig_dice::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::both().collect();
    /// assert_eq!(seats, vec![PlayerId::FIRST, PlayerId::SECOND]);
    /// ```
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::FIRST, Self::SECOND].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// A participant in a match.
///
/// The engine and the leaderboard both consume this one shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// Whether the seat is driven by a hold policy.
    pub is_computer: bool,
}

impl Player {
    /// A human-controlled player.
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_computer: false,
        }
    }

    /// A policy-controlled player.
    pub fn computer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_computer: true,
        }
    }
}

impl From<&str> for Player {
    fn from(name: &str) -> Self {
        Player::human(name)
    }
}

impl From<String> for Player {
    fn from(name: String) -> Self {
        Player::human(name)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use pig_dice::core::{PlayerId, PlayerPair};
///
/// let mut scores: PlayerPair<u32> = PlayerPair::with_value(0);
/// scores[PlayerId::SECOND] += 12;
/// assert_eq!(scores.into_array(), [0, 12]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; 2],
}

impl<T> PlayerPair<T> {
    /// Create a pair from the first and second seat's values.
    pub fn new(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Create a pair with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value)
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::both().zip(self.data.iter())
    }

    /// Borrow as a plain array in seat order.
    #[must_use]
    pub fn as_array(&self) -> &[T; 2] {
        &self.data
    }

    /// Consume into a plain array in seat order.
    #[must_use]
    pub fn into_array(self) -> [T; 2] {
        self.data
    }
}

impl<T> Index<PlayerId> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerPair<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
