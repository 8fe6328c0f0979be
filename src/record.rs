//! The record type shared by every search structure.
//!
//! A [`Record`] is a national-team player entry keyed by `country`. Equality
//! and ordering look at the key only, so many records may compare equal while
//! carrying different payloads.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A player record keyed by country.
#[derive(Clone, Debug, Default)]
pub struct Record {
    /// Search key.
    pub country: String,
    /// Player name.
    pub name: String,
    /// Club the player is signed to.
    pub club: String,
    /// Field position.
    pub position: String,
    /// Number of games played.
    pub games: u32,
    /// Number of goals scored.
    pub goals: i32,
}

impl Record {
    /// Create a record with an empty payload.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            country: key.into(),
            ..Self::default()
        }
    }

    /// The field every structure orders, hashes and compares by.
    #[inline]
    pub fn key(&self) -> &str {
        &self.country
    }

    /// Compare every field, not just the key.
    pub fn same_payload(&self, other: &Record) -> bool {
        self.country == other.country
            && self.name == other.name
            && self.club == other.club
            && self.position == other.position
            && self.games == other.games
            && self.goals == other.goals
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.country == other.country
    }
}

impl Eq for Record {}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.country.cmp(&other.country)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.country, self.name, self.club, self.position, self.games, self.goals
        )
    }
}

/// Parses `country,name,club,position,games,goals`.
///
/// Parse errors carry line `0`; the loader rewrites it.
impl FromStr for Record {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let mut field = |name: &str| {
            parts.next().ok_or_else(|| Error::Parse {
                line: 0,
                reason: format!("missing {name}"),
            })
        };

        let country = field("country")?.to_owned();
        let name = field("name")?.to_owned();
        let club = field("club")?.to_owned();
        let position = field("position")?.to_owned();
        let games_str = field("games")?;
        let goals_str = field("goals")?;

        let games = games_str.parse().map_err(|e| Error::Parse {
            line: 0,
            reason: format!("invalid games '{games_str}': {e}"),
        })?;
        let goals = goals_str.parse().map_err(|e| Error::Parse {
            line: 0,
            reason: format!("invalid goals '{goals_str}': {e}"),
        })?;

        if parts.next().is_some() {
            return Err(Error::Parse {
                line: 0,
                reason: "trailing fields".into(),
            });
        }

        Ok(Record {
            country,
            name,
            club,
            position,
            games,
            goals,
        })
    }
}
