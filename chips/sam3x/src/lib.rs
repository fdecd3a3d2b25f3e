// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Peripheral implementations for the Atmel SAM3X8E MCU.
//!
//! SAM3X8E: <https://www.microchip.com/en-us/product/ATSAM3X8E>

#![no_std]

#[cfg(test)]
extern crate std;

pub mod chipid;
pub mod pmc;
pub mod trng;
