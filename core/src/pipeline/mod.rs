//! Transform pipeline.
//!
//! ```text
//! write: value -> encode -> stage_1 .. stage_n -> chunked frames -> stream
//! read:  stream -> chunked frames -> invert_n .. invert_1 -> decode -> value
//! ```
//!
//! Sender and receiver can be built separately, each holding only its own
//! keys and nonce callback. A built pipeline is immutable and can be shared
//! across threads; each call owns the stream it is given.

pub mod builder;
pub mod read;
pub mod write;

pub use builder::{PipelineBuilder, ReadPipelineBuilder, WritePipelineBuilder};
pub use read::ReadPipeline;
pub use write::WritePipeline;

use std::io::{Read, Write};

use crate::stream::SharedStream;
use crate::types::PipelineError;

pub struct Pipeline<T> {
    pub(crate) writer: WritePipeline<T>,
    pub(crate) reader: ReadPipeline<T>,
}

impl<T> Clone for Pipeline<T> {
    fn clone(&self) -> Self {
        Self { writer: self.writer.clone(), reader: self.reader.clone() }
    }
}

impl<T> Pipeline<T> {
    pub fn write<S>(&self, value: &T, stream: &SharedStream<S>) -> Result<usize, PipelineError>
    where
        S: Write + Send + 'static,
    {
        self.writer.write(value, stream)
    }

    pub fn read<S>(&self, stream: &SharedStream<S>) -> Result<(T, usize), PipelineError>
    where
        S: Read + Send + 'static,
    {
        self.reader.read(stream)
    }

    pub fn writer(&self) -> &WritePipeline<T> {
        &self.writer
    }

    pub fn reader(&self) -> &ReadPipeline<T> {
        &self.reader
    }

    /// Separate halves, e.g. for a sender thread and a receiver thread.
    pub fn split(self) -> (ReadPipeline<T>, WritePipeline<T>) {
        (self.reader, self.writer)
    }
}
