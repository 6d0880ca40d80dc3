//! Error types for the board controller.
//!
//! Interactive failures (self-links, drops without a move effect, presses
//! on nothing) are not errors: they degrade to an ignored gesture. What is
//! left here are caller mistakes.

use mb_core::{ElementId, NodeId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    /// An event arrived before `initialize` or after `teardown`.
    #[error("board is not initialized ({operation} needs a bound viewport)")]
    NotInitialized { operation: &'static str },

    #[error("board is already initialized")]
    AlreadyInitialized,

    #[error("element {0:?} is not part of the scene")]
    UnknownElement(ElementId),

    #[error("invalid board config: {0}")]
    InvalidConfig(String),

    #[error("effect serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type BoardResult<T> = Result<T, BoardError>;

/// Why the connection graph refused a link.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectError {
    #[error("node {0} cannot connect to itself")]
    SelfLoop(NodeId),

    #[error("node {0} is not registered for connections")]
    UnregisteredNode(NodeId),
}
