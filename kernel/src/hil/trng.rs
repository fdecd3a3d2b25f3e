// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interface for polled true random number generators.
//!
//! A TRNG peripheral produces 32-bit words of entropy from a physical noise
//! source. This interface is synchronous: `generate()` busy-waits on the
//! peripheral for a bounded number of polls and then either returns a word or
//! gives up. There is no client callback; interrupt-driven retrieval is not
//! part of this interface.
//!
//! The expected call sequence is:
//!
//! ```rust,ignore
//! trng.init();
//! if trng.is_ready() {
//!     let word = trng.generate()?;
//! }
//! ```
//!
//! `is_ready()` reports whether the peripheral is *configured* to signal new
//! data, not whether a word is available right now. Callers check it once
//! before a burst of `generate()` calls rather than before every call.

use crate::ErrorCode;

/// Number of polls in the default window.
pub const DEFAULT_MAX_POLLS: usize = 101;

/// Which word a polling window hands back when the peripheral signals data
/// more than once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sampling {
    /// Poll for the whole window and return the last word captured. The
    /// window always costs `max_polls` status reads.
    LastInWindow,
    /// Return the first word captured and stop polling.
    FirstReady,
}

/// Bound on how long `generate()` busy-waits for a word.
///
/// The bound is a number of status-register polls, not wall-clock time, so
/// the real duration scales with the core clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_polls: usize,
    pub sampling: Sampling,
}

impl PollPolicy {
    pub const fn new(max_polls: usize, sampling: Sampling) -> PollPolicy {
        PollPolicy {
            max_polls,
            sampling,
        }
    }

    /// Run one polling window.
    ///
    /// `sample` is called up to `max_polls` times and returns `Some(word)`
    /// when the peripheral had data on that poll. Returns the selected word
    /// along with the number of polls performed, or `ErrorCode::BUSY` if no
    /// poll produced data.
    pub fn poll<F>(&self, mut sample: F) -> (Result<u32, ErrorCode>, usize)
    where
        F: FnMut() -> Option<u32>,
    {
        let mut captured = None;
        let mut polls = 0;
        while polls < self.max_polls {
            polls += 1;
            if let Some(word) = sample() {
                captured = Some(word);
                if self.sampling == Sampling::FirstReady {
                    break;
                }
            }
        }
        (captured.ok_or(ErrorCode::BUSY), polls)
    }
}

impl Default for PollPolicy {
    fn default() -> PollPolicy {
        PollPolicy::new(DEFAULT_MAX_POLLS, Sampling::LastInWindow)
    }
}

/// A polled true random number generator.
pub trait Trng {
    /// One-time hardware activation: enable the peripheral clock, start the
    /// generator, and enable its data-ready signal. Must be called exactly
    /// once before any other method.
    fn init(&self);

    /// Whether the peripheral is configured to signal data readiness.
    fn is_ready(&self) -> bool;

    /// Attempt to read one 32-bit entropy word.
    ///
    /// Returns `ErrorCode::BUSY` if the polling budget was exhausted without
    /// the peripheral reporting data.
    fn generate(&self) -> Result<u32, ErrorCode>;
}
