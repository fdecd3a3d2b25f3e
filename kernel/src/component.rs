// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Components extend the functionality of the kernel through a simple
//! factory method interface.

/// A component encapsulates peripheral-specific and capsule-specific
/// initialization in a factory method, which reduces repeated code and
/// simplifies the boot sequence.
///
/// The `Component` trait encapsulates all of the initialization and
/// configuration of a kernel extension inside the `finalize()` function call.
/// The `Output` type defines what type this component generates. All required
/// resources and configuration are passed via the component's `new()`
/// function; nothing is looked up from global state.
///
/// Using a component is as follows:
///
/// ```rust,ignore
/// let key_gen = KeyGenComponent::new(peripheral, &trng_clock).finalize(());
/// ```
pub trait Component {
    /// Chip or board specific memory that a component needs to set up the
    /// output object(s). Components that build their output by value use
    /// `()`.
    type StaticInput;

    /// The type (e.g., capsule, peripheral) that this implementation of
    /// Component produces via `finalize()`.
    type Output;

    /// A factory method that returns an instance of the Output type of this
    /// Component implementation. This factory method may only be called once
    /// per Component instance, which `self` being consumed enforces.
    fn finalize(self, static_memory: Self::StaticInput) -> Self::Output;
}
