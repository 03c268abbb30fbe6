//! Length-value (LV) wire framing.
//!
//! Responsibilities:
//! - Encode a payload as `u32 BE length || payload`
//! - Decode one frame from a byte stream, telling the sentinel apart from truncation
//!
//! Non-responsibilities:
//! - Chunking (see `stream::chunked`)
//! - Timeouts
//! - Cryptography

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{Frame, FrameError};
pub use encode::{encode_frame, write_field, write_frame, write_sentinel};
pub use decode::{read_field, read_frame, FrameReader};
