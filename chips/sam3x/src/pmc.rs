// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Power Management Controller (PMC), peripheral clock gating only.
//!
//! Each peripheral has an identifier (its NVIC line); identifiers 0 to 31
//! are gated through `PCER0`/`PCDR0`/`PCSR0` and 32 to 63 through
//! `PCER1`/`PCDR1`/`PCSR1`.

use kernel::platform::chip::ClockInterface;
use kernel::utilities::registers::interfaces::{Readable, Writeable};
use kernel::utilities::registers::{register_structs, ReadOnly, WriteOnly};
use kernel::utilities::StaticRef;

register_structs! {
    PmcRegisters {
        (0x000 => _reserved0),
        /// Peripheral Clock Enable Register 0
        (0x010 => pcer0: WriteOnly<u32>),
        /// Peripheral Clock Disable Register 0
        (0x014 => pcdr0: WriteOnly<u32>),
        /// Peripheral Clock Status Register 0
        (0x018 => pcsr0: ReadOnly<u32>),
        (0x01C => _reserved1),
        /// Peripheral Clock Enable Register 1
        (0x100 => pcer1: WriteOnly<u32>),
        /// Peripheral Clock Disable Register 1
        (0x104 => pcdr1: WriteOnly<u32>),
        /// Peripheral Clock Status Register 1
        (0x108 => pcsr1: ReadOnly<u32>),
        (0x10C => @END),
    }
}

const PMC_BASE: StaticRef<PmcRegisters> =
    unsafe { StaticRef::new(0x400E_0600 as *const PmcRegisters) };

/// Peripheral identifier of the TRNG.
pub const ID_TRNG: u32 = 41;

/// Which enable/disable/status register bank gates peripheral `id`, and the
/// bit within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockBank {
    Bank0(u32),
    Bank1(u32),
}

pub fn clock_bank(id: u32) -> Option<ClockBank> {
    match id {
        0..=31 => Some(ClockBank::Bank0(1 << id)),
        32..=63 => Some(ClockBank::Bank1(1 << (id - 32))),
        _ => None,
    }
}

pub struct Pmc {
    registers: StaticRef<PmcRegisters>,
}

impl Pmc {
    pub const fn new() -> Pmc {
        Pmc {
            registers: PMC_BASE,
        }
    }

    pub fn enable_peripheral_clock(&self, id: u32) {
        match clock_bank(id) {
            Some(ClockBank::Bank0(bit)) => self.registers.pcer0.set(bit),
            Some(ClockBank::Bank1(bit)) => self.registers.pcer1.set(bit),
            None => {}
        }
    }

    pub fn disable_peripheral_clock(&self, id: u32) {
        match clock_bank(id) {
            Some(ClockBank::Bank0(bit)) => self.registers.pcdr0.set(bit),
            Some(ClockBank::Bank1(bit)) => self.registers.pcdr1.set(bit),
            None => {}
        }
    }

    pub fn is_peripheral_clock_enabled(&self, id: u32) -> bool {
        match clock_bank(id) {
            Some(ClockBank::Bank0(bit)) => self.registers.pcsr0.get() & bit != 0,
            Some(ClockBank::Bank1(bit)) => self.registers.pcsr1.get() & bit != 0,
            None => false,
        }
    }
}

/// Clock gate of a single peripheral.
pub struct PeripheralClock<'a> {
    pmc: &'a Pmc,
    id: u32,
}

impl<'a> PeripheralClock<'a> {
    pub const fn new(pmc: &'a Pmc, id: u32) -> PeripheralClock<'a> {
        PeripheralClock { pmc, id }
    }
}

impl ClockInterface for PeripheralClock<'_> {
    fn is_enabled(&self) -> bool {
        self.pmc.is_peripheral_clock_enabled(self.id)
    }

    fn enable(&self) {
        self.pmc.enable_peripheral_clock(self.id);
    }

    fn disable(&self) {
        self.pmc.disable_peripheral_clock(self.id);
    }
}
