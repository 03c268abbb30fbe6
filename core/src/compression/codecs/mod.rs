//! compression/codecs/mod.rs
//! Concrete compressor backends.

pub mod deflate;

pub use deflate::ZlibCompressor;
