//! stream: the byte-stream side of the pipeline.
//!
//! - `io`: shareable stream handle that raced workers can own
//! - `timeout`: per-operation deadline races
//! - `chunked`: message <-> frame sequence terminated by a sentinel

pub mod io;
pub mod timeout;
pub mod chunked;

pub use io::SharedStream;
pub use timeout::{race, Deadline};
pub use chunked::{read_message, write_message};
