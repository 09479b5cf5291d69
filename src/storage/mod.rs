pub mod memory;

pub use memory::{Note, NoteStore, Rating};
