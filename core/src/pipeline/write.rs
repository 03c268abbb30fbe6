use std::io::Write;
use std::sync::Arc;

use tracing::{debug, Dispatch};

use crate::codec::Codec;
use crate::logging;
use crate::stage::Step;
use crate::stream::{write_message, Deadline, SharedStream};
use crate::types::PipelineError;

/// Write half: value -> encode -> steps in configured order -> frames.
pub struct WritePipeline<T> {
    codec: Arc<dyn Codec<T>>,
    steps: Arc<[Step]>,
    deadline: Deadline,
    dispatch: Option<Dispatch>,
}

impl<T> Clone for WritePipeline<T> {
    fn clone(&self) -> Self {
        Self {
            codec: Arc::clone(&self.codec),
            steps: Arc::clone(&self.steps),
            deadline: self.deadline,
            dispatch: self.dispatch.clone(),
        }
    }
}

impl<T> WritePipeline<T> {
    pub(crate) fn new(
        codec: Arc<dyn Codec<T>>,
        steps: Arc<[Step]>,
        deadline: Deadline,
        dispatch: Option<Dispatch>,
    ) -> Self {
        Self { codec, steps, deadline, dispatch }
    }

    /// Send one value. Returns the bytes placed on the wire.
    ///
    /// On error the stream may hold a partial message and must not be reused.
    pub fn write<S>(&self, value: &T, stream: &SharedStream<S>) -> Result<usize, PipelineError>
    where
        S: Write + Send + 'static,
    {
        logging::scoped(self.dispatch.as_ref(), || -> Result<usize, PipelineError> {
            let mut data = self.codec.encode(value)?;
            debug!(codec = self.codec.name(), bytes = data.len(), "encoded");

            for step in self.steps.iter() {
                data = step.run(data, &self.deadline)?;
                debug!(step = %step.kind(), bytes = data.len(), "applied step");
            }

            write_message(stream, data, &self.deadline)
        })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}
