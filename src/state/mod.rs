//! Per-view state records.
//!
//! Each view builds its own record when it mounts and drops it when it
//! unmounts; no record is shared between views. Transitions are plain
//! methods so the views can apply them inside signal updates, with the
//! backend calls awaited in between.

pub mod chat;
pub mod entries;
pub mod manual;
