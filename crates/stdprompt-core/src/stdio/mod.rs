//! Standard input plumbing.
//!
//! [`stream`] models a readable byte stream with `fgetc`/`ungetc`
//! semantics; [`line`] builds the Line Reader on top of it.

pub mod line;
pub mod stream;

pub use line::{INITIAL_CAPACITY, Line, RawLine, Terminator, read_raw_line};
pub use stream::{InputStream, StreamFlags};
