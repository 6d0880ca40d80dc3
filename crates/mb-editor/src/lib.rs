//! Mind Board editor: the board controller, gesture modes, viewport and connection managers.

pub mod board;
pub mod effects;
pub mod error;
pub mod gesture;
pub mod graph;
pub mod input;
pub mod nodes;
pub mod viewport;

pub use board::Board;
pub use effects::Effect;
pub use error::{BoardError, BoardResult, ConnectError};
pub use gesture::GestureMode;
pub use graph::{Connection, ConnectionGraph, Selectors};
pub use input::{DropEffect, InputEvent, Modifiers, ZoomDirection};
pub use nodes::{NodeLifecycle, NodeStore};
pub use viewport::ViewportManager;
