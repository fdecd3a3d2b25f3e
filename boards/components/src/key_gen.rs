// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Component for 128-bit key generation from the chip TRNG.
//!
//! Usage
//! -----
//! ```rust,ignore
//! let pmc = sam3x::pmc::Pmc::new();
//! let trng_clock = sam3x::pmc::PeripheralClock::new(&pmc, sam3x::pmc::ID_TRNG);
//! let peripheral = components::trng::TrngPeripheral::detect()?;
//! let key_gen = components::key_gen::KeyGenComponent::new(peripheral, &trng_clock)
//!     .finalize(());
//! ```

use capsules_core::key_gen::KeyGen;
use kernel::component::Component;
use kernel::hil::trng::PollPolicy;
use kernel::platform::chip::ClockInterface;
use kernel::utilities::StaticRef;
use sam3x::trng::{TrngRegisterBank, TrngRegisters, TRNG_BASE};

use crate::trng::{trng_device, TrngDevice, TrngPeripheral};

pub struct KeyGenComponent<'a, R: TrngRegisterBank = StaticRef<TrngRegisters>> {
    peripheral: TrngPeripheral,
    registers: R,
    clock: &'a dyn ClockInterface,
    policy: PollPolicy,
}

impl<'a> KeyGenComponent<'a> {
    /// Key generation on the memory-mapped TRNG with the default polling
    /// window.
    pub fn new(peripheral: TrngPeripheral, clock: &'a dyn ClockInterface) -> KeyGenComponent<'a> {
        KeyGenComponent::with_registers(peripheral, TRNG_BASE, clock, PollPolicy::default())
    }
}

impl<'a, R: TrngRegisterBank> KeyGenComponent<'a, R> {
    pub fn with_registers(
        peripheral: TrngPeripheral,
        registers: R,
        clock: &'a dyn ClockInterface,
        policy: PollPolicy,
    ) -> KeyGenComponent<'a, R> {
        KeyGenComponent {
            peripheral,
            registers,
            clock,
            policy,
        }
    }
}

impl<'a, R: TrngRegisterBank> Component for KeyGenComponent<'a, R> {
    type StaticInput = ();
    type Output = KeyGen<TrngDevice<'a, R>>;

    fn finalize(self, _static_input: Self::StaticInput) -> Self::Output {
        let trng = trng_device(self.peripheral, self.registers, self.clock, self.policy);
        KeyGen::new(trng)
    }
}
