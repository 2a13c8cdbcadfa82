//! Player record types and the position value type.
//!
//! This module defines the data stored for each joined player, the key
//! used to look players up, and the wire-parseable 3D position type.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

/// Opaque identity of one connection, derived from its remote endpoint.
///
/// Exactly one live connection maps to a given key at any time, so all
/// registry lookups key on it. The key stays stable for the lifetime of
/// the session and is never reused while the session is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerKey(SocketAddr);

impl From<SocketAddr> for PlayerKey {
    fn from(addr: SocketAddr) -> Self {
        Self(addr)
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A 3D position with signed integer coordinates.
///
/// The origin `(0, 0, 0)` is the spawn position assigned on JOIN. The wire
/// form is `<x>,<y>,<z>` - exactly three comma-separated signed integers
/// with no spaces - and parses via [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// X coordinate
    pub x: i64,
    /// Y coordinate
    pub y: i64,
    /// Z coordinate
    pub z: i64,
}

impl Position {
    /// The spawn position assigned to a player on JOIN.
    pub const ORIGIN: Position = Position { x: 0, y: 0, z: 0 };

    /// Creates a position from explicit coordinates.
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Error returned when a wire payload is not a valid position triple.
///
/// Carries no detail: every deviation (wrong token count, empty token,
/// non-numeric token, embedded whitespace) is rejected the same way, and
/// no partial update ever happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid position payload")]
pub struct ParsePositionError;

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parses the wire form `<x>,<y>,<z>`.
    ///
    /// Exactly three comma-separated tokens are required, each a signed
    /// integer with no surrounding whitespace. `i64::from_str` already
    /// rejects empty tokens, spaces, and non-numeric input, so splitting
    /// and counting is all the extra validation needed here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 {
            return Err(ParsePositionError);
        }
        let x = parts[0].parse().map_err(|_| ParsePositionError)?;
        let y = parts[1].parse().map_err(|_| ParsePositionError)?;
        let z = parts[2].parse().map_err(|_| ParsePositionError)?;
        Ok(Position { x, y, z })
    }
}

/// The record stored in the registry for one joined player.
///
/// A `Player` exists in the registry if and only if its connection has
/// successfully JOINed and has not yet LEFT or disconnected.
#[derive(Debug, Clone)]
pub struct Player {
    /// Identity of the owning connection
    pub key: PlayerKey,

    /// Nickname announced in the JOIN command
    pub nickname: String,

    /// Last reported position, starting at the origin
    pub position: Position,
}

impl Player {
    /// Creates a new player record at the spawn position.
    pub fn new(key: PlayerKey, nickname: impl Into<String>) -> Self {
        Self {
            key,
            nickname: nickname.into(),
            position: Position::ORIGIN,
        }
    }
}
