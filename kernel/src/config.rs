// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Data structure for storing compile-time configuration options.
//!
//! Configuration is a `const` object rather than scattered `#[cfg]`
//! attributes so that every code path is type-checked, even the disabled
//! ones. After type-checking, the compiler folds the constants and removes
//! the dead branches, so a disabled trace has no cost in the final binary.

/// Data structure holding compile-time configuration options.
///
/// To change the configuration, enable the matching Cargo feature on the
/// kernel crate from the board crate.
pub struct Config {
    /// Whether TRNG drivers should trace the outcome of each polling window
    /// to the debug output.
    ///
    /// If enabled, the driver prints how many polls a `generate()` call took
    /// and whether a word was captured.
    pub trace_trng: bool,

    /// Whether the key generator should trace key assembly to the debug
    /// output.
    ///
    /// If enabled, each call prints the requested key length and the number
    /// of valid bytes produced. Key material itself is never printed.
    pub trace_key_gen: bool,
}

/// A unique instance of `Config` where compile-time configuration options are
/// defined. This is the only location where `#[cfg(x)]` is used to configure
/// code based on Cargo features.
pub const CONFIG: Config = Config {
    trace_trng: cfg!(feature = "trace_trng"),
    trace_key_gen: cfg!(feature = "trace_key_gen"),
};
