// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Chip-independent capsules built on the kernel HILs.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod key_gen;
