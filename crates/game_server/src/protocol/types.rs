//! Wire protocol types for client-server communication.
//!
//! This module defines the commands a client may send, the replies the
//! server writes back, and the protocol-level rejection reasons. The
//! protocol is ASCII text, one `COMMAND:payload` line per message.

use std::fmt;

/// A protocol-level rejection of one client line.
///
/// Protocol errors are reported to the offending client only, as an
/// `ERROR:<reason>` reply, and never terminate the session. The `Display`
/// string of each variant is exactly the `<reason>` text put on the wire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The line had no `:` separator or an empty command word
    #[error("Malformed line")]
    MalformedLine,

    /// The command word is none of JOIN, MOVE, LEAVE
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// JOIN on a session that already owns a player
    #[error("Already joined")]
    AlreadyJoined,

    /// MOVE or LEAVE on a session that owns no player
    #[error("Not joined")]
    NotJoined,

    /// MOVE payload that is not exactly three signed integers
    #[error("Invalid coordinates")]
    InvalidCoordinates,
}

/// A parsed client command.
///
/// The MOVE payload is kept unparsed here: coordinate validation is
/// deferred to the processor because the joined-state check must come
/// first - `MOVE:a,b,c` from an anonymous session is answered with
/// `Not joined`, not `Invalid coordinates`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `JOIN:<nickname>` - claim a nickname and enter the world
    Join {
        /// The nickname to register under
        nickname: String,
    },

    /// `MOVE:<x>,<y>,<z>` - report a new position
    Move {
        /// The raw coordinate payload, validated by the processor
        payload: String,
    },

    /// `LEAVE:` - leave the world and close the session (payload ignored)
    Leave,
}

impl Command {
    /// Parses one line of client input.
    ///
    /// The line is split into command word and payload at the first `:`.
    /// A line without a separator, or with an empty command word, is a
    /// [`ProtocolError::MalformedLine`]; an unrecognized command word is
    /// a [`ProtocolError::UnknownCommand`]. Parsing never indexes past
    /// the input.
    pub fn parse(line: &str) -> Result<Command, ProtocolError> {
        let (command, payload) = line.split_once(':').ok_or(ProtocolError::MalformedLine)?;
        if command.is_empty() {
            return Err(ProtocolError::MalformedLine);
        }

        match command {
            "JOIN" => Ok(Command::Join {
                nickname: payload.to_string(),
            }),
            "MOVE" => Ok(Command::Move {
                payload: payload.to_string(),
            }),
            "LEAVE" => Ok(Command::Leave),
            unknown => Err(ProtocolError::UnknownCommand(unknown.to_string())),
        }
    }
}

/// A reply written back to the originating client.
///
/// The `Display` form is the exact wire text; the session handler appends
/// the line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `WELCOME:<nickname>` - the JOIN succeeded
    Welcome(String),

    /// `GOODBYE:<nickname>` - the LEAVE succeeded, session closes next
    Goodbye(String),

    /// `ERROR:<reason>` - the command was rejected, session stays open
    Error(String),
}

impl From<ProtocolError> for Reply {
    fn from(err: ProtocolError) -> Self {
        Reply::Error(err.to_string())
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Welcome(nickname) => write!(f, "WELCOME:{nickname}"),
            Reply::Goodbye(nickname) => write!(f, "GOODBYE:{nickname}"),
            Reply::Error(reason) => write!(f, "ERROR:{reason}"),
        }
    }
}
