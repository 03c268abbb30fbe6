//! Configuration phase of a pipeline.
//!
//! Steps are recorded in the order they are added. Nothing touches a key,
//! a nonce callback or a stream until the built pipeline is used.
//!
//! - `WritePipelineBuilder`: sender side, holds only what encoding needs
//!   (public key to encrypt, private key to sign, nonce generator)
//! - `ReadPipelineBuilder`: receiver side, holds the opposite halves
//! - `PipelineBuilder`: both sides at once, for peers that own both key sets

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn, Dispatch};

use crate::codec::{BincodeCodec, Codec, CodecError, CodecKind, FnCodec, JsonCodec};
use crate::compression::{compress_fn, decompress_fn, Compressor, ZlibCompressor};
use crate::config::{ConfigError, PipelineConfig};
use crate::crypto::{
    decrypt_fn, encrypt_fn, open_fn, seal_fn, sign_fn, verify_fn, NonceAcceptFn,
    NonceGenerateFn, PrivateKeyFn, PublicKeyFn,
};
use crate::logging;
use crate::pipeline::read::ReadPipeline;
use crate::pipeline::write::WritePipeline;
use crate::pipeline::Pipeline;
use crate::stage::{Stage, StageKind, Step};
use crate::stream::Deadline;
use crate::types::PipelineError;

/// Fields shared by both one-sided builders.
struct Setup<T> {
    codec: Option<Arc<dyn Codec<T>>>,
    steps: Vec<Step>,
    timeout: Option<Duration>,
    zlib: ZlibCompressor,
    dispatch: Option<Dispatch>,
}

impl<T> Setup<T> {
    fn new() -> Self {
        Self {
            codec: None,
            steps: Vec::new(),
            timeout: None,
            zlib: ZlibCompressor::default(),
            dispatch: None,
        }
    }

    fn step_names(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.kind().to_string()).collect()
    }
}

impl<T> Setup<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    fn from_config(config: &PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let zlib = ZlibCompressor::new(config.compression_level)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let mut setup = Self::new();
        setup.codec = Some(default_codec(config.codec));
        setup.timeout = config.timeout();
        setup.zlib = zlib;
        Ok(setup)
    }

    /// Configured codec, or bincode with a warning.
    fn codec_or_default(&mut self) -> Arc<dyn Codec<T>> {
        match self.codec.take() {
            Some(codec) => codec,
            None => {
                logging::scoped(self.dispatch.as_ref(), || {
                    warn!("no codec configured; defaulting to bincode");
                });
                default_codec(CodecKind::Bincode)
            }
        }
    }
}

fn default_codec<T>(kind: CodecKind) -> Arc<dyn Codec<T>>
where
    T: Serialize + DeserializeOwned + 'static,
{
    match kind {
        CodecKind::Bincode => Arc::new(BincodeCodec),
        CodecKind::Json => Arc::new(JsonCodec),
    }
}

// -----------------------------------------------------------------------------
// Write side
// -----------------------------------------------------------------------------

pub struct WritePipelineBuilder<T> {
    setup: Setup<T>,
}

impl<T: 'static> Default for WritePipelineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> WritePipelineBuilder<T> {
    pub fn new() -> Self {
        Self { setup: Setup::new() }
    }

    pub fn use_codec<C>(self, codec: C) -> Self
    where
        C: Codec<T> + 'static,
    {
        self.use_shared_codec(Arc::new(codec))
    }

    /// Codec instance that may also back a read pipeline.
    pub fn use_shared_codec(mut self, codec: Arc<dyn Codec<T>>) -> Self {
        self.setup.codec = Some(codec);
        self
    }

    pub fn use_codec_fns<E, D>(self, encode: E, decode: D) -> Self
    where
        E: Fn(&T) -> Result<Vec<u8>, CodecError> + Send + Sync + 'static,
        D: Fn(&[u8]) -> Result<T, CodecError> + Send + Sync + 'static,
    {
        self.use_codec(FnCodec::new(encode, decode))
    }

    /// zlib at the builder's level (6 unless set through `from_config`).
    pub fn use_compression(self) -> Self {
        let zlib = self.setup.zlib;
        self.use_compressor(Arc::new(zlib))
    }

    pub fn use_compressor(self, compressor: Arc<dyn Compressor>) -> Self {
        self.use_step(Step::apply(StageKind::Compression, compress_fn(compressor)))
    }

    /// Encrypt with the receiver's public key.
    pub fn use_asymmetric_encryption(self, public: PublicKeyFn) -> Self {
        self.use_step(Step::apply(StageKind::Encryption, encrypt_fn(public)))
    }

    /// Sign with the sender's private key.
    pub fn use_signing(self, private: PrivateKeyFn) -> Self {
        self.use_step(Step::apply(StageKind::Signing, sign_fn(private)))
    }

    pub fn use_nonce(self, generate: NonceGenerateFn) -> Self {
        self.use_step(Step::apply(StageKind::Nonce, seal_fn(generate)))
    }

    pub fn use_custom_step<F>(self, name: impl Into<String>, apply: F) -> Self
    where
        F: Fn(Vec<u8>) -> Result<Vec<u8>, PipelineError> + Send + Sync + 'static,
    {
        self.use_step(Step::apply(StageKind::Custom(name.into()), Arc::new(apply)))
    }

    pub fn use_step(mut self, step: Step) -> Self {
        self.setup.steps.push(step);
        self
    }

    /// Limit every frame write and every step to `limit`, each with its own timer.
    pub fn use_timeout(mut self, limit: Duration) -> Self {
        self.setup.timeout = Some(limit);
        self
    }

    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.setup.dispatch = Some(dispatch);
        self
    }

    /// Finish with an explicitly chosen codec.
    pub fn build_custom(mut self) -> Result<WritePipeline<T>, ConfigError> {
        match self.setup.codec.take() {
            Some(codec) => Ok(self.finish(codec)),
            None => Err(ConfigError::MissingCodec),
        }
    }

    fn finish(self, codec: Arc<dyn Codec<T>>) -> WritePipeline<T> {
        let setup = self.setup;
        let deadline = Deadline::from_option(setup.timeout);

        logging::scoped(setup.dispatch.as_ref(), || {
            debug!(
                codec = codec.name(),
                steps = ?setup.step_names(),
                timeout = ?deadline.limit(),
                "built write pipeline"
            );
        });

        WritePipeline::new(codec, setup.steps.into(), deadline, setup.dispatch)
    }
}

impl<T> WritePipelineBuilder<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    /// Builder preloaded with timeout, codec and zlib level from `config`.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, ConfigError> {
        Ok(Self { setup: Setup::from_config(config)? })
    }

    pub fn use_codec_kind(self, kind: CodecKind) -> Self {
        self.use_shared_codec(default_codec(kind))
    }

    pub fn use_bincode(self) -> Self {
        self.use_codec_kind(CodecKind::Bincode)
    }

    pub fn use_json(self) -> Self {
        self.use_codec_kind(CodecKind::Json)
    }

    /// Finish, falling back to bincode when no codec was chosen.
    pub fn build(mut self) -> WritePipeline<T> {
        let codec = self.setup.codec_or_default();
        self.finish(codec)
    }
}

// -----------------------------------------------------------------------------
// Read side
// -----------------------------------------------------------------------------

/// Steps are given in the writer's order; the built pipeline inverts them
/// last-added first.
pub struct ReadPipelineBuilder<T> {
    setup: Setup<T>,
}

impl<T: 'static> Default for ReadPipelineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ReadPipelineBuilder<T> {
    pub fn new() -> Self {
        Self { setup: Setup::new() }
    }

    pub fn use_codec<C>(self, codec: C) -> Self
    where
        C: Codec<T> + 'static,
    {
        self.use_shared_codec(Arc::new(codec))
    }

    pub fn use_shared_codec(mut self, codec: Arc<dyn Codec<T>>) -> Self {
        self.setup.codec = Some(codec);
        self
    }

    pub fn use_codec_fns<E, D>(self, encode: E, decode: D) -> Self
    where
        E: Fn(&T) -> Result<Vec<u8>, CodecError> + Send + Sync + 'static,
        D: Fn(&[u8]) -> Result<T, CodecError> + Send + Sync + 'static,
    {
        self.use_codec(FnCodec::new(encode, decode))
    }

    pub fn use_compression(self) -> Self {
        let zlib = self.setup.zlib;
        self.use_compressor(Arc::new(zlib))
    }

    pub fn use_compressor(self, compressor: Arc<dyn Compressor>) -> Self {
        self.use_step(Step::invert(StageKind::Compression, decompress_fn(compressor)))
    }

    /// Decrypt with the receiver's private key.
    pub fn use_asymmetric_encryption(self, private: PrivateKeyFn) -> Self {
        self.use_step(Step::invert(StageKind::Encryption, decrypt_fn(private)))
    }

    /// Verify with the sender's public key.
    pub fn use_signing(self, public: PublicKeyFn) -> Self {
        self.use_step(Step::invert(StageKind::Signing, verify_fn(public)))
    }

    pub fn use_nonce(self, accept: NonceAcceptFn) -> Self {
        self.use_step(Step::invert(StageKind::Nonce, open_fn(accept)))
    }

    pub fn use_custom_step<F>(self, name: impl Into<String>, invert: F) -> Self
    where
        F: Fn(Vec<u8>) -> Result<Vec<u8>, PipelineError> + Send + Sync + 'static,
    {
        self.use_step(Step::invert(StageKind::Custom(name.into()), Arc::new(invert)))
    }

    pub fn use_step(mut self, step: Step) -> Self {
        self.setup.steps.push(step);
        self
    }

    /// Limit every frame read and every step to `limit`, each with its own timer.
    pub fn use_timeout(mut self, limit: Duration) -> Self {
        self.setup.timeout = Some(limit);
        self
    }

    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.setup.dispatch = Some(dispatch);
        self
    }

    pub fn build_custom(mut self) -> Result<ReadPipeline<T>, ConfigError> {
        match self.setup.codec.take() {
            Some(codec) => Ok(self.finish(codec)),
            None => Err(ConfigError::MissingCodec),
        }
    }

    fn finish(self, codec: Arc<dyn Codec<T>>) -> ReadPipeline<T> {
        let setup = self.setup;
        let deadline = Deadline::from_option(setup.timeout);

        logging::scoped(setup.dispatch.as_ref(), || {
            debug!(
                codec = codec.name(),
                steps = ?setup.step_names(),
                timeout = ?deadline.limit(),
                "built read pipeline"
            );
        });

        let read_order: Arc<[Step]> = setup.steps.into_iter().rev().collect();
        ReadPipeline::new(codec, read_order, deadline, setup.dispatch)
    }
}

impl<T> ReadPipelineBuilder<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    pub fn from_config(config: &PipelineConfig) -> Result<Self, ConfigError> {
        Ok(Self { setup: Setup::from_config(config)? })
    }

    pub fn use_codec_kind(self, kind: CodecKind) -> Self {
        self.use_shared_codec(default_codec(kind))
    }

    pub fn use_bincode(self) -> Self {
        self.use_codec_kind(CodecKind::Bincode)
    }

    pub fn use_json(self) -> Self {
        self.use_codec_kind(CodecKind::Json)
    }

    pub fn build(mut self) -> ReadPipeline<T> {
        let codec = self.setup.codec_or_default();
        self.finish(codec)
    }
}

// -----------------------------------------------------------------------------
// Both sides
// -----------------------------------------------------------------------------

/// Write and read builders fed the same configuration.
///
/// Each `use_*` call splits its stage into the write step and the read
/// step, so both key halves (or both nonce callbacks) are required here.
pub struct PipelineBuilder<T> {
    writer: WritePipelineBuilder<T>,
    reader: ReadPipelineBuilder<T>,
}

impl<T: 'static> Default for PipelineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> PipelineBuilder<T> {
    pub fn new() -> Self {
        Self { writer: WritePipelineBuilder::new(), reader: ReadPipelineBuilder::new() }
    }

    pub fn use_codec<C>(self, codec: C) -> Self
    where
        C: Codec<T> + 'static,
    {
        self.use_shared_codec(Arc::new(codec))
    }

    pub fn use_shared_codec(self, codec: Arc<dyn Codec<T>>) -> Self {
        Self {
            writer: self.writer.use_shared_codec(Arc::clone(&codec)),
            reader: self.reader.use_shared_codec(codec),
        }
    }

    /// Codec from a pair of plain functions.
    pub fn use_codec_fns<E, D>(self, encode: E, decode: D) -> Self
    where
        E: Fn(&T) -> Result<Vec<u8>, CodecError> + Send + Sync + 'static,
        D: Fn(&[u8]) -> Result<T, CodecError> + Send + Sync + 'static,
    {
        self.use_codec(FnCodec::new(encode, decode))
    }

    /// zlib at the builder's level (6 unless set through `from_config`).
    pub fn use_compression(self) -> Self {
        Self { writer: self.writer.use_compression(), reader: self.reader.use_compression() }
    }

    pub fn use_compressor(self, compressor: Arc<dyn Compressor>) -> Self {
        Self {
            writer: self.writer.use_compressor(Arc::clone(&compressor)),
            reader: self.reader.use_compressor(compressor),
        }
    }

    /// Public key encrypts on write; private key decrypts on read.
    pub fn use_asymmetric_encryption(self, public: PublicKeyFn, private: PrivateKeyFn) -> Self {
        Self {
            writer: self.writer.use_asymmetric_encryption(public),
            reader: self.reader.use_asymmetric_encryption(private),
        }
    }

    /// Private key signs on write; public key verifies on read.
    pub fn use_signing(self, public: PublicKeyFn, private: PrivateKeyFn) -> Self {
        Self { writer: self.writer.use_signing(private), reader: self.reader.use_signing(public) }
    }

    pub fn use_nonce(self, generate: NonceGenerateFn, accept: NonceAcceptFn) -> Self {
        Self { writer: self.writer.use_nonce(generate), reader: self.reader.use_nonce(accept) }
    }

    pub fn use_custom_stage<A, I>(self, name: impl Into<String>, apply: A, invert: I) -> Self
    where
        A: Fn(Vec<u8>) -> Result<Vec<u8>, PipelineError> + Send + Sync + 'static,
        I: Fn(Vec<u8>) -> Result<Vec<u8>, PipelineError> + Send + Sync + 'static,
    {
        self.use_stage(Stage::custom(name, apply, invert))
    }

    pub fn use_stage(self, stage: Stage) -> Self {
        Self {
            writer: self.writer.use_step(stage.apply_step()),
            reader: self.reader.use_step(stage.invert_step()),
        }
    }

    /// Limit every frame operation and every stage invocation to `limit`,
    /// each with its own fresh timer. Position among the stages is irrelevant.
    pub fn use_timeout(self, limit: Duration) -> Self {
        Self { writer: self.writer.use_timeout(limit), reader: self.reader.use_timeout(limit) }
    }

    /// Send this pipeline's logs to `dispatch` instead of the global subscriber.
    pub fn with_dispatch(self, dispatch: Dispatch) -> Self {
        Self {
            writer: self.writer.with_dispatch(dispatch.clone()),
            reader: self.reader.with_dispatch(dispatch),
        }
    }

    /// Finish with an explicitly chosen codec.
    pub fn build_custom(self) -> Result<Pipeline<T>, ConfigError> {
        Ok(Pipeline { writer: self.writer.build_custom()?, reader: self.reader.build_custom()? })
    }
}

impl<T> PipelineBuilder<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    /// Builder preloaded with timeout, codec and zlib level from `config`.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, ConfigError> {
        let setup = Setup::<T>::from_config(config)?;
        let mut builder = Self::new();
        for side in [&mut builder.writer.setup, &mut builder.reader.setup] {
            side.timeout = setup.timeout;
            side.zlib = setup.zlib;
        }
        Ok(match setup.codec {
            Some(codec) => builder.use_shared_codec(codec),
            None => builder,
        })
    }

    pub fn use_codec_kind(self, kind: CodecKind) -> Self {
        self.use_shared_codec(default_codec(kind))
    }

    pub fn use_bincode(self) -> Self {
        self.use_codec_kind(CodecKind::Bincode)
    }

    pub fn use_json(self) -> Self {
        self.use_codec_kind(CodecKind::Json)
    }

    /// Finish, falling back to bincode when no codec was chosen. Both halves
    /// share the one codec instance and the fallback is reported once.
    pub fn build(mut self) -> Pipeline<T> {
        let codec = self.writer.setup.codec_or_default();
        self.reader.setup.codec = Some(Arc::clone(&codec));
        Pipeline {
            writer: self.writer.finish(codec),
            reader: self.reader.build(),
        }
    }
}
