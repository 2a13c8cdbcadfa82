//! Player registry for tracking joined players across all sessions.
//!
//! This module provides the single process-wide store mapping connection
//! identity to player record. It is the only state shared between
//! concurrently running sessions.

use super::player::{Player, PlayerKey, Position};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

/// Errors returned by registry operations that violate its contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// An insert targeted a key that already holds a player
    #[error("player already registered")]
    AlreadyRegistered,

    /// A position update targeted a key with no player
    #[error("player not registered")]
    NotRegistered,
}

/// Central store for all joined players.
///
/// The `PlayerRegistry` maps each connection's [`PlayerKey`] to its
/// [`Player`] record. Keys are guaranteed unique at all times; an insert
/// on an occupied key fails without touching the existing record.
///
/// # Concurrency
///
/// * Uses `RwLock<HashMap>` for async-safe shared access
/// * The lock is held only for the duration of the map operation itself,
///   never across network I/O
/// * Operations on different keys may proceed from any number of sessions;
///   operations on the same key are serialized by the single session that
///   owns it
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    /// Map of connection identity to player record
    players: RwLock<HashMap<PlayerKey, Player>>,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    ///
    /// One registry is created at process start and shared (via `Arc`)
    /// with every session handler for the process lifetime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a player under its key.
    ///
    /// Fails with [`RegistryError::AlreadyRegistered`] if the key is
    /// already present; the existing record is left untouched in that
    /// case.
    ///
    /// # Arguments
    ///
    /// * `key` - The identity of the owning connection
    /// * `player` - The record to store
    pub async fn insert(&self, key: PlayerKey, player: Player) -> Result<(), RegistryError> {
        let mut players = self.players.write().await;
        if players.contains_key(&key) {
            return Err(RegistryError::AlreadyRegistered);
        }
        info!("👋 Player {} joined from {}", player.nickname, key);
        players.insert(key, player);
        Ok(())
    }

    /// Returns a copy of the player stored under `key`, if any.
    ///
    /// Absence is not an error; the caller decides what it means.
    pub async fn get(&self, key: PlayerKey) -> Option<Player> {
        let players = self.players.read().await;
        players.get(&key).cloned()
    }

    /// Replaces the stored position of the player under `key`.
    ///
    /// Fails with [`RegistryError::NotRegistered`] if the key is absent;
    /// no record is created or modified in that case.
    pub async fn update_position(
        &self,
        key: PlayerKey,
        position: Position,
    ) -> Result<(), RegistryError> {
        let mut players = self.players.write().await;
        match players.get_mut(&key) {
            Some(player) => {
                player.position = position;
                Ok(())
            }
            None => Err(RegistryError::NotRegistered),
        }
    }

    /// Removes and returns the player stored under `key`.
    ///
    /// Removing an absent key is not an error and returns `None`, so the
    /// session cleanup path can call this unconditionally after a LEAVE
    /// already emptied the slot.
    pub async fn remove(&self, key: PlayerKey) -> Option<Player> {
        let mut players = self.players.write().await;
        let removed = players.remove(&key);
        if let Some(player) = &removed {
            info!("👋 Player {} left ({})", player.nickname, key);
        }
        removed
    }

    /// Returns whether a player is stored under `key`.
    pub async fn contains(&self, key: PlayerKey) -> bool {
        let players = self.players.read().await;
        players.contains_key(&key)
    }

    /// Returns the number of currently joined players.
    pub async fn len(&self) -> usize {
        let players = self.players.read().await;
        players.len()
    }

    /// Returns whether no player is currently joined.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::Arc;

    fn key(port: u16) -> PlayerKey {
        SocketAddr::from(([127, 0, 0, 1], port)).into()
    }

    #[tokio::test]
    async fn insert_and_get_round_trip() {
        let registry = PlayerRegistry::new();
        let k = key(4001);
        registry.insert(k, Player::new(k, "Alice")).await.unwrap();

        let player = registry.get(k).await.expect("player should be stored");
        assert_eq!(player.nickname, "Alice");
        assert_eq!(player.position, Position::ORIGIN);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected_and_keeps_first_record() {
        let registry = PlayerRegistry::new();
        let k = key(4002);
        registry.insert(k, Player::new(k, "Alice")).await.unwrap();

        let err = registry.insert(k, Player::new(k, "Bob")).await.unwrap_err();
        assert_eq!(err, RegistryError::AlreadyRegistered);
        assert_eq!(registry.get(k).await.unwrap().nickname, "Alice");
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn update_position_mutates_in_place() {
        let registry = PlayerRegistry::new();
        let k = key(4003);
        registry.insert(k, Player::new(k, "Alice")).await.unwrap();

        registry
            .update_position(k, Position::new(10, -5, 3))
            .await
            .unwrap();
        assert_eq!(registry.get(k).await.unwrap().position, Position::new(10, -5, 3));
    }

    #[tokio::test]
    async fn update_on_absent_key_fails_without_creating_a_record() {
        let registry = PlayerRegistry::new();
        let k = key(4004);

        let err = registry
            .update_position(k, Position::new(1, 2, 3))
            .await
            .unwrap_err();
        assert_eq!(err, RegistryError::NotRegistered);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let registry = PlayerRegistry::new();
        let k = key(4005);
        registry.insert(k, Player::new(k, "Alice")).await.unwrap();

        let removed = registry.remove(k).await.expect("first remove yields the record");
        assert_eq!(removed.nickname, "Alice");
        assert!(registry.remove(k).await.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_sessions_with_distinct_keys_do_not_interfere() {
        let registry = Arc::new(PlayerRegistry::new());

        let mut handles = Vec::new();
        for port in 5000..5032u16 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                let k = key(port);
                registry
                    .insert(k, Player::new(k, format!("player_{port}")))
                    .await
                    .unwrap();
                registry
                    .update_position(k, Position::new(port as i64, 0, 0))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(registry.len().await, 32);
        for port in 5000..5032u16 {
            let player = registry.get(key(port)).await.unwrap();
            assert_eq!(player.position.x, port as i64);
        }
    }
}
