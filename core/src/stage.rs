//! Reversible byte-to-byte stages.
//!
//! A stage is a tagged pair of functions: `apply` runs on the write side,
//! `invert` on the read side. Stages hold no per-call state; anything
//! stateful (keys, nonce counters) lives in caller-supplied callbacks.

use std::fmt;
use std::sync::Arc;

use crate::stream::timeout::Deadline;
use crate::types::PipelineError;

/// One direction of a stage.
pub type StageFn = Arc<dyn Fn(Vec<u8>) -> Result<Vec<u8>, PipelineError> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StageKind {
    Compression,
    Encryption,
    Signing,
    Nonce,
    Custom(String),
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Compression => f.write_str("compression"),
            StageKind::Encryption  => f.write_str("encryption"),
            StageKind::Signing     => f.write_str("signing"),
            StageKind::Nonce       => f.write_str("nonce"),
            StageKind::Custom(name) => write!(f, "custom:{}", name),
        }
    }
}

#[derive(Clone)]
pub struct Stage {
    kind: StageKind,
    apply: StageFn,
    invert: StageFn,
}

impl Stage {
    pub fn new(kind: StageKind, apply: StageFn, invert: StageFn) -> Self {
        Self { kind, apply, invert }
    }

    /// Build a caller-defined stage from plain closures.
    pub fn custom<A, I>(name: impl Into<String>, apply: A, invert: I) -> Self
    where
        A: Fn(Vec<u8>) -> Result<Vec<u8>, PipelineError> + Send + Sync + 'static,
        I: Fn(Vec<u8>) -> Result<Vec<u8>, PipelineError> + Send + Sync + 'static,
    {
        Self::new(StageKind::Custom(name.into()), Arc::new(apply), Arc::new(invert))
    }

    pub fn kind(&self) -> &StageKind {
        &self.kind
    }

    /// Write-side transform, run inline.
    pub fn apply(&self, data: Vec<u8>) -> Result<Vec<u8>, PipelineError> {
        (self.apply)(data)
    }

    /// Read-side transform, run inline.
    pub fn invert(&self, data: Vec<u8>) -> Result<Vec<u8>, PipelineError> {
        (self.invert)(data)
    }

    /// Write-side half, for pipelines built one direction at a time.
    pub fn apply_step(&self) -> Step {
        Step::apply(self.kind.clone(), Arc::clone(&self.apply))
    }

    /// Read-side half.
    pub fn invert_step(&self) -> Step {
        Step::invert(self.kind.clone(), Arc::clone(&self.invert))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Apply,
    Invert,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Apply  => f.write_str("apply"),
            Direction::Invert => f.write_str("invert"),
        }
    }
}

/// One direction of a stage, as held by a built write or read pipeline.
///
/// A writer only needs the sender's material (public key to encrypt,
/// private key to sign, nonce generator) and a reader only the receiver's,
/// so each side is assembled from its own steps.
#[derive(Clone)]
pub struct Step {
    kind: StageKind,
    direction: Direction,
    run: StageFn,
}

impl Step {
    pub fn apply(kind: StageKind, run: StageFn) -> Self {
        Self { kind, direction: Direction::Apply, run }
    }

    pub fn invert(kind: StageKind, run: StageFn) -> Self {
        Self { kind, direction: Direction::Invert, run }
    }

    pub fn kind(&self) -> &StageKind {
        &self.kind
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Race the step against `deadline` (inline when no limit is set).
    pub(crate) fn run(&self, data: Vec<u8>, deadline: &Deadline) -> Result<Vec<u8>, PipelineError> {
        let f = Arc::clone(&self.run);
        deadline.run(&format!("{} {}", self.kind, self.direction), move || f(data))
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("kind", &self.kind)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage").field("kind", &self.kind).finish_non_exhaustive()
    }
}
