//! Command processing logic for client sessions.
//!
//! This module interprets parsed commands against the player registry and
//! decides the reply and whether the session continues. It contains no
//! I/O - the session handler owns the socket on both sides of a call.
//!
//! Each session moves through a two-state machine, Anonymous → Joined,
//! with session close as the terminal step. The state is not stored
//! separately: a session is Joined exactly while the registry holds a
//! player under its key, so registry occupancy is the single source of
//! truth and cannot drift from the session's actual lifecycle.

use crate::protocol::types::{Command, ProtocolError, Reply};
use crate::registry::{Player, PlayerKey, PlayerRegistry, Position};
use tracing::debug;

/// What the session handler should do after writing the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Keep reading lines from this connection
    Continue,

    /// Close the connection (a LEAVE was acknowledged)
    Close,
}

/// The result of processing one client line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// The reply to write back, if the command produces one
    pub reply: Option<Reply>,

    /// Whether the session continues after this line
    pub disposition: Disposition,
}

impl Outcome {
    fn reply(reply: Reply) -> Self {
        Self {
            reply: Some(reply),
            disposition: Disposition::Continue,
        }
    }

    fn rejected(err: ProtocolError) -> Self {
        Self::reply(Reply::from(err))
    }

    fn silent() -> Self {
        Self {
            reply: None,
            disposition: Disposition::Continue,
        }
    }

    fn closing(reply: Reply) -> Self {
        Self {
            reply: Some(reply),
            disposition: Disposition::Close,
        }
    }
}

/// Processes one raw line from a client.
///
/// Parse failures are turned into `ERROR:<reason>` replies here so that a
/// malformed line can never crash or close the session; everything else
/// is delegated to [`process_command`].
pub async fn process_line(line: &str, key: PlayerKey, registry: &PlayerRegistry) -> Outcome {
    match Command::parse(line) {
        Ok(command) => process_command(command, key, registry).await,
        Err(err) => {
            debug!("Rejected line from {}: {}", key, err);
            Outcome::rejected(err)
        }
    }
}

/// Executes one parsed command against the registry.
///
/// # Transitions
///
/// | Command | Anonymous | Joined |
/// |---|---|---|
/// | JOIN | insert player at origin, `WELCOME` | `ERROR:Already joined` |
/// | MOVE | `ERROR:Not joined` | update position, no reply |
/// | LEAVE | `ERROR:Not joined` | remove player, `GOODBYE`, close |
///
/// For MOVE the joined-state check precedes payload validation, so a
/// garbage payload from an anonymous session is answered `Not joined`.
/// A bad payload from a joined session is answered `Invalid coordinates`
/// and performs no mutation at all - partial updates are not possible.
pub async fn process_command(
    command: Command,
    key: PlayerKey,
    registry: &PlayerRegistry,
) -> Outcome {
    match command {
        Command::Join { nickname } => {
            let player = Player::new(key, nickname.clone());
            match registry.insert(key, player).await {
                Ok(()) => Outcome::reply(Reply::Welcome(nickname)),
                Err(_) => Outcome::rejected(ProtocolError::AlreadyJoined),
            }
        }

        Command::Move { payload } => {
            if !registry.contains(key).await {
                return Outcome::rejected(ProtocolError::NotJoined);
            }
            match payload.parse::<Position>() {
                Ok(position) => match registry.update_position(key, position).await {
                    Ok(()) => Outcome::silent(),
                    Err(_) => Outcome::rejected(ProtocolError::NotJoined),
                },
                Err(_) => Outcome::rejected(ProtocolError::InvalidCoordinates),
            }
        }

        Command::Leave => match registry.remove(key).await {
            Some(player) => Outcome::closing(Reply::Goodbye(player.nickname)),
            None => Outcome::rejected(ProtocolError::NotJoined),
        },
    }
}
