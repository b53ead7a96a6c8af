//! Pooled 16-byte scratch buffers.
//!
//! A lease is taken and returned within a single decode call. Returning
//! happens in [`Drop`], so every exit path (including errors and unwinding)
//! gives the buffer back.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;
use log::trace;

use crate::limits::{GUID_LEN, MAX_POOLED_BUFFERS};

type Buffer = Box<[u8; GUID_LEN]>;

lazy_static! {
    static ref SHARED: ScratchPool = ScratchPool::new(MAX_POOLED_BUFFERS);
}

/// A bounded pool of reusable 16-byte buffers.
///
/// Leased buffers keep whatever bytes the previous borrower left in them.
/// Callers must overwrite the full buffer before reading from it.
#[derive(Debug)]
pub struct ScratchPool {
    idle: Mutex<Vec<Buffer>>,
    max_idle: usize,
}

impl ScratchPool {
    /// Creates an empty pool retaining at most `max_idle` returned buffers.
    pub fn new(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// The process-wide pool.
    pub fn shared() -> &'static ScratchPool {
        &SHARED
    }

    /// Takes a buffer from the pool, allocating when none is idle.
    pub fn lease(&self) -> ScratchLease<'_> {
        let buf = self.lock().pop().unwrap_or_else(|| {
            trace!("scratch pool empty, allocating");
            Box::new([0u8; GUID_LEN])
        });
        ScratchLease {
            pool: self,
            buf: Some(buf),
        }
    }

    /// Number of idle buffers currently held.
    pub fn idle_len(&self) -> usize {
        self.lock().len()
    }

    /// Adds a buffer filled with `fill` to the idle set.
    ///
    /// Used to pre-warm the pool, and by tests to plant a sentinel pattern.
    pub fn seed(&self, fill: u8) {
        self.give_back(Box::new([fill; GUID_LEN]));
    }

    fn give_back(&self, buf: Buffer) {
        let mut idle = self.lock();
        if idle.len() < self.max_idle {
            idle.push(buf);
        } else {
            trace!("scratch pool full ({}), dropping buffer", self.max_idle);
        }
    }

    // A panic while holding the lock cannot leave a buffer half-pushed, so
    // recovering from poisoning is safe.
    fn lock(&self) -> MutexGuard<'_, Vec<Buffer>> {
        self.idle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A leased buffer, returned to its pool on drop.
#[derive(Debug)]
pub struct ScratchLease<'a> {
    pool: &'a ScratchPool,
    buf: Option<Buffer>,
}

impl Deref for ScratchLease<'_> {
    type Target = [u8; GUID_LEN];

    fn deref(&self) -> &Self::Target {
        match &self.buf {
            Some(buf) => &**buf,
            None => unreachable!("lease accessed after release"),
        }
    }
}

impl DerefMut for ScratchLease<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match &mut self.buf {
            Some(buf) => &mut **buf,
            None => unreachable!("lease accessed after release"),
        }
    }
}

impl Drop for ScratchLease<'_> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.give_back(buf);
        }
    }
}
