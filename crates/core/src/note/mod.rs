//! Note management

pub mod model;

pub use model::{Note, NoteKind, NoteStats};
