use std::io::Read;
use std::sync::Arc;

use tracing::{debug, Dispatch};

use crate::codec::Codec;
use crate::logging;
use crate::stage::Step;
use crate::stream::{read_message, Deadline, SharedStream};
use crate::types::PipelineError;

/// Read half: frames -> inverse steps in reverse order -> decode.
pub struct ReadPipeline<T> {
    codec: Arc<dyn Codec<T>>,
    /// Already reversed relative to the configured order.
    steps: Arc<[Step]>,
    deadline: Deadline,
    dispatch: Option<Dispatch>,
}

impl<T> Clone for ReadPipeline<T> {
    fn clone(&self) -> Self {
        Self {
            codec: Arc::clone(&self.codec),
            steps: Arc::clone(&self.steps),
            deadline: self.deadline,
            dispatch: self.dispatch.clone(),
        }
    }
}

impl<T> ReadPipeline<T> {
    pub(crate) fn new(
        codec: Arc<dyn Codec<T>>,
        steps: Arc<[Step]>,
        deadline: Deadline,
        dispatch: Option<Dispatch>,
    ) -> Self {
        Self { codec, steps, deadline, dispatch }
    }

    /// Receive one value. Returns it with the bytes consumed from the wire.
    pub fn read<S>(&self, stream: &SharedStream<S>) -> Result<(T, usize), PipelineError>
    where
        S: Read + Send + 'static,
    {
        logging::scoped(self.dispatch.as_ref(), || -> Result<(T, usize), PipelineError> {
            let (mut data, consumed) = read_message(stream, &self.deadline)?;

            for step in self.steps.iter() {
                data = step.run(data, &self.deadline)?;
                debug!(step = %step.kind(), bytes = data.len(), "inverted step");
            }

            let value = self.codec.decode(&data)?;
            debug!(codec = self.codec.name(), bytes = consumed, "decoded");
            Ok((value, consumed))
        })
    }

    /// Steps in the order they run.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}
