// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Key generation from a polled TRNG.
//!
//! `KeyGen` owns a TRNG, initializes it once when constructed, and fills
//! caller-provided key buffers with entropy words packed least-significant
//! byte first.
//!
//! A key is either produced in full or the call fails. The TRNG's readiness
//! is checked once per key; if it is not configured to signal data the
//! buffer is left untouched. If a word cannot be read within the TRNG's
//! polling window, assembly stops immediately and the error reports how many
//! leading bytes of the buffer were filled; the remaining bytes keep whatever
//! the caller had in them.
//!
//! Usage
//! -----
//!
//! ```rust,ignore
//! let key_gen = capsules_core::key_gen::KeyGen::new(trng);
//! let mut key = [0; capsules_core::key_gen::KEY128_LEN];
//! key_gen.get_key128(&mut key)?;
//! ```

use kernel::config::CONFIG;
use kernel::debug;
use kernel::hil::trng::Trng;
use kernel::ErrorCode;

/// Length in bytes of a 128-bit key.
pub const KEY128_LEN: usize = 16;

const WORD_LEN: usize = 4;

/// Why a key could not be produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyError {
    /// The TRNG is not configured to signal data. Nothing was written.
    NotReady,
    /// A word could not be read in time. Only the first `valid` bytes of the
    /// buffer hold fresh entropy.
    Incomplete { valid: usize },
}

impl From<KeyError> for ErrorCode {
    fn from(err: KeyError) -> ErrorCode {
        match err {
            KeyError::NotReady => ErrorCode::OFF,
            KeyError::Incomplete { .. } => ErrorCode::FAIL,
        }
    }
}

pub struct KeyGen<T: Trng> {
    trng: T,
}

impl<T: Trng> KeyGen<T> {
    pub fn new(trng: T) -> KeyGen<T> {
        trng.init();
        KeyGen { trng }
    }

    /// Fill `key` with a 128-bit key from four entropy words.
    pub fn get_key128(&self, key: &mut [u8; KEY128_LEN]) -> Result<(), KeyError> {
        self.get_key(key)
    }

    /// Fill `key` with entropy, one word per four bytes.
    ///
    /// A trailing chunk shorter than a word takes the low-order bytes of its
    /// word.
    pub fn get_key(&self, key: &mut [u8]) -> Result<(), KeyError> {
        if !self.trng.is_ready() {
            if CONFIG.trace_key_gen {
                debug!("KeyGen: TRNG not ready");
            }
            return Err(KeyError::NotReady);
        }

        let len = key.len();
        let mut valid = 0;
        for chunk in key.chunks_mut(WORD_LEN) {
            let word = match self.trng.generate() {
                Ok(word) => word,
                Err(_) => {
                    if CONFIG.trace_key_gen {
                        debug!("KeyGen: {} of {} bytes before timeout", valid, len);
                    }
                    return Err(KeyError::Incomplete { valid });
                }
            };
            let bytes = word.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
            valid += chunk.len();
        }

        if CONFIG.trace_key_gen {
            debug!("KeyGen: {} byte key", valid);
        }
        Ok(())
    }

    pub fn trng(&self) -> &T {
        &self.trng
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyError, KeyGen, KEY128_LEN};
    use core::cell::{Cell, RefCell};
    use kernel::hil::trng::Trng;
    use kernel::ErrorCode;
    use std::collections::VecDeque;
    use std::vec::Vec;

    /// TRNG returning a scripted sequence of results; once the script runs
    /// out every `generate()` times out.
    struct ScriptedTrng {
        ready: Cell<bool>,
        inits: Cell<usize>,
        readiness_checks: Cell<usize>,
        generates: Cell<usize>,
        script: RefCell<VecDeque<Result<u32, ErrorCode>>>,
    }

    impl ScriptedTrng {
        fn new(ready: bool, script: &[Result<u32, ErrorCode>]) -> ScriptedTrng {
            ScriptedTrng {
                ready: Cell::new(ready),
                inits: Cell::new(0),
                readiness_checks: Cell::new(0),
                generates: Cell::new(0),
                script: RefCell::new(script.iter().copied().collect()),
            }
        }

        fn push(&self, results: &[Result<u32, ErrorCode>]) {
            self.script.borrow_mut().extend(results.iter().copied());
        }
    }

    impl Trng for ScriptedTrng {
        fn init(&self) {
            self.inits.set(self.inits.get() + 1);
        }

        fn is_ready(&self) -> bool {
            self.readiness_checks.set(self.readiness_checks.get() + 1);
            self.ready.get()
        }

        fn generate(&self) -> Result<u32, ErrorCode> {
            self.generates.set(self.generates.get() + 1);
            self.script
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(ErrorCode::BUSY))
        }
    }

    const WORDS: [Result<u32, ErrorCode>; 4] = [
        Ok(0x1122_3344),
        Ok(0x5566_7788),
        Ok(0x99AA_BBCC),
        Ok(0xDDEE_FF00),
    ];

    const PACKED: [u8; KEY128_LEN] = [
        0x44, 0x33, 0x22, 0x11, 0x88, 0x77, 0x66, 0x55, 0xCC, 0xBB, 0xAA, 0x99, 0x00, 0xFF, 0xEE,
        0xDD,
    ];

    #[test]
    fn construction_initializes_trng_once() {
        let key_gen = KeyGen::new(ScriptedTrng::new(true, &[]));
        assert_eq!(key_gen.trng().inits.get(), 1);
        assert_eq!(key_gen.trng().generates.get(), 0);
    }

    #[test]
    fn not_ready_leaves_buffer_untouched() {
        let key_gen = KeyGen::new(ScriptedTrng::new(false, &WORDS));
        let mut key = [0xA5; KEY128_LEN];

        assert_eq!(key_gen.get_key128(&mut key), Err(KeyError::NotReady));
        assert_eq!(key, [0xA5; KEY128_LEN]);
        assert_eq!(key_gen.trng().generates.get(), 0);
    }

    #[test]
    fn words_are_packed_little_endian() {
        let key_gen = KeyGen::new(ScriptedTrng::new(true, &WORDS));
        let mut key = [0; KEY128_LEN];

        assert_eq!(key_gen.get_key128(&mut key), Ok(()));
        assert_eq!(key, PACKED);
        assert_eq!(key_gen.trng().generates.get(), 4);
        assert_eq!(key_gen.trng().readiness_checks.get(), 1);
    }

    #[test]
    fn failed_attempt_aborts_with_valid_prefix() {
        for k in 0..4 {
            let mut script: Vec<_> = WORDS.to_vec();
            script[k] = Err(ErrorCode::BUSY);
            let key_gen = KeyGen::new(ScriptedTrng::new(true, &script));
            let mut key = [0xA5; KEY128_LEN];

            assert_eq!(
                key_gen.get_key128(&mut key),
                Err(KeyError::Incomplete { valid: 4 * k })
            );
            assert_eq!(key[..4 * k], PACKED[..4 * k]);
            assert!(key[4 * k..].iter().all(|&b| b == 0xA5));
            // No attempts after the failing one.
            assert_eq!(key_gen.trng().generates.get(), k + 1);
        }
    }

    #[test]
    fn repeated_calls_are_independent() {
        let key_gen = KeyGen::new(ScriptedTrng::new(true, &[Ok(1), Err(ErrorCode::BUSY)]));
        let mut key = [0; KEY128_LEN];
        assert_eq!(
            key_gen.get_key128(&mut key),
            Err(KeyError::Incomplete { valid: 4 })
        );

        key_gen.trng().push(&WORDS);
        assert_eq!(key_gen.get_key128(&mut key), Ok(()));
        assert_eq!(key, PACKED);
        assert_eq!(key_gen.trng().inits.get(), 1);

        key_gen.trng().ready.set(false);
        assert_eq!(key_gen.get_key128(&mut key), Err(KeyError::NotReady));
        assert_eq!(key, PACKED);
    }

    #[test]
    fn short_trailing_chunk_takes_low_bytes() {
        let key_gen = KeyGen::new(ScriptedTrng::new(
            true,
            &[Ok(0x0403_0201), Ok(0x0807_0605)],
        ));
        let mut key = [0; 6];

        assert_eq!(key_gen.get_key(&mut key), Ok(()));
        assert_eq!(key, [0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
    }

    #[test]
    fn empty_key_only_checks_readiness() {
        let key_gen = KeyGen::new(ScriptedTrng::new(true, &[]));
        assert_eq!(key_gen.get_key(&mut []), Ok(()));
        assert_eq!(key_gen.trng().generates.get(), 0);
    }

    #[test]
    fn errors_map_to_error_codes() {
        assert_eq!(ErrorCode::from(KeyError::NotReady), ErrorCode::OFF);
        assert_eq!(
            ErrorCode::from(KeyError::Incomplete { valid: 8 }),
            ErrorCode::FAIL
        );
    }
}
