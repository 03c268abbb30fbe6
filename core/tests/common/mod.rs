#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::io::{self, Read, Write};
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};

use onwire_core::crypto::{fixed_pair, PrivateKeyFn, PublicKeyFn};

/// Key generation is slow; every test in a binary shares these.
pub fn private_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap())
}

/// A second, unrelated key pair for wrong-key tests.
pub fn other_private_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap())
}

pub fn public_key() -> RsaPublicKey {
    RsaPublicKey::from(private_key())
}

pub fn key_fns() -> (PublicKeyFn, PrivateKeyFn) {
    fixed_pair(private_key().clone())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestStruct {
    pub id: u64,
    pub name: String,
    pub tags: Vec<String>,
    pub scores: BTreeMap<String, i32>,
    pub blob: Vec<u8>,
    pub nested: Option<Box<TestStruct>>,
}

pub fn sample_struct() -> TestStruct {
    let mut scores = BTreeMap::new();
    scores.insert("alpha".into(), 3);
    scores.insert("beta".into(), -7);

    TestStruct {
        id: 42,
        name: "frame".into(),
        tags: vec!["a".into(), "bb".into(), "ccc".into()],
        scores,
        blob: (0..=255u8).cycle().take(3000).collect(),
        nested: Some(Box::new(TestStruct {
            id: 7,
            name: "inner".into(),
            tags: vec![],
            scores: BTreeMap::new(),
            blob: vec![1, 2, 3],
            nested: None,
        })),
    }
}

/// In-memory pipe that sleeps before every read and write call.
#[derive(Debug, Default)]
pub struct DelayStream {
    buf: VecDeque<u8>,
    delay: Duration,
}

impl DelayStream {
    pub fn new(delay: Duration) -> Self {
        Self { buf: VecDeque::new(), delay }
    }

    /// Wraps bytes that are already "on the wire".
    pub fn with_bytes(bytes: Vec<u8>, delay: Duration) -> Self {
        Self { buf: bytes.into(), delay }
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.into()
    }
}

impl Read for DelayStream {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.buf.read(out)
    }
}

impl Write for DelayStream {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.buf.write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that accepts at most `limit` bytes in total, then reports 0.
#[derive(Debug)]
pub struct ShortWriter {
    pub written: Vec<u8>,
    limit: usize,
}

impl ShortWriter {
    pub fn new(limit: usize) -> Self {
        Self { written: Vec::new(), limit }
    }
}

impl Write for ShortWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let room = self.limit.saturating_sub(self.written.len());
        let n = room.min(data.len());
        self.written.extend_from_slice(&data[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
