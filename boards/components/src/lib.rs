// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Components that select and wire up TRNG hardware for boards.

#![no_std]

pub mod key_gen;
pub mod trng;
