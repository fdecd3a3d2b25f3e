// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Core kernel crate for the entropy drivers.
//!
//! The kernel crate holds the code shared by the chip crates, capsules, and
//! components: the Hardware Interface Layer (HIL) definitions, the standard
//! error type, compile-time configuration, and the `debug!()` output path.
//!
//! Most `unsafe` code lives in this crate and in the chip crates.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod component;
pub mod config;
pub mod debug;
pub mod hil;
pub mod platform;
pub mod utilities;

mod errorcode;

pub use crate::errorcode::ErrorCode;
pub use crate::platform::chip::{ClockInterface, NoClockControl, NO_CLOCK_CONTROL};
