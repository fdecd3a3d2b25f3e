// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Implementation of the SAM3X8E TRNG.
//!
//! The TRNG is started by writing the access key together with the enable
//! bit to `CR`, and signals a fresh 32-bit word through the `DATRDY` bit of
//! `ISR`. Reading `ODATA` consumes the word. This driver polls `ISR`; the
//! `DATRDY` interrupt is enabled so that `IMR` reports the peripheral as
//! configured, but no interrupt handler is installed.
//!
//! Usage
//! -----
//!
//! ```rust,ignore
//! let pmc = sam3x::pmc::Pmc::new();
//! let clock = sam3x::pmc::PeripheralClock::new(&pmc, sam3x::pmc::ID_TRNG);
//! let trng = sam3x::trng::Trng::new(&clock);
//! trng.init();
//! ```

use kernel::config::CONFIG;
use kernel::debug;
use kernel::hil;
use kernel::hil::trng::PollPolicy;
use kernel::platform::chip::ClockInterface;
use kernel::utilities::registers::interfaces::{Readable, Writeable};
use kernel::utilities::registers::{
    register_bitfields, register_structs, FieldValue, LocalRegisterCopy, ReadOnly, WriteOnly,
};
use kernel::utilities::StaticRef;
use kernel::ErrorCode;

register_structs! {
    pub TrngRegisters {
        /// Control Register
        (0x00 => cr: WriteOnly<u32, Control::Register>),
        (0x04 => _reserved0),
        /// Interrupt Enable Register
        (0x10 => ier: WriteOnly<u32, Interrupt::Register>),
        /// Interrupt Disable Register
        (0x14 => idr: WriteOnly<u32, Interrupt::Register>),
        /// Interrupt Mask Register
        (0x18 => imr: ReadOnly<u32, Interrupt::Register>),
        /// Interrupt Status Register
        (0x1C => isr: ReadOnly<u32, Interrupt::Register>),
        (0x20 => _reserved1),
        /// Output Data Register
        (0x50 => odata: ReadOnly<u32, OutputData::Register>),
        (0x54 => @END),
    }
}

register_bitfields![u32,
    pub Control [
        /// Writes to `CR` are ignored unless this field holds the key.
        KEY OFFSET(8) NUMBITS(24) [
            Passkey = 0x524E47
        ],
        ENABLE OFFSET(0) NUMBITS(1) []
    ],
    // Shared layout of IER, IDR, IMR and ISR.
    pub Interrupt [
        DATRDY OFFSET(0) NUMBITS(1) []
    ],
    pub OutputData [
        ODATA OFFSET(0) NUMBITS(32) []
    ]
];

pub const TRNG_BASE: StaticRef<TrngRegisters> =
    unsafe { StaticRef::new(0x400B_C000 as *const TrngRegisters) };

/// Access to the TRNG register block.
///
/// The driver only touches the hardware through this trait, so that a
/// software model of the peripheral can stand in for the memory-mapped
/// registers.
pub trait TrngRegisterBank {
    fn write_control(&self, value: FieldValue<u32, Control::Register>);
    fn enable_interrupts(&self, value: FieldValue<u32, Interrupt::Register>);
    fn disable_interrupts(&self, value: FieldValue<u32, Interrupt::Register>);
    fn interrupt_mask(&self) -> LocalRegisterCopy<u32, Interrupt::Register>;
    fn interrupt_status(&self) -> LocalRegisterCopy<u32, Interrupt::Register>;
    fn output_data(&self) -> u32;
}

impl TrngRegisterBank for StaticRef<TrngRegisters> {
    fn write_control(&self, value: FieldValue<u32, Control::Register>) {
        self.cr.write(value);
    }

    fn enable_interrupts(&self, value: FieldValue<u32, Interrupt::Register>) {
        self.ier.write(value);
    }

    fn disable_interrupts(&self, value: FieldValue<u32, Interrupt::Register>) {
        self.idr.write(value);
    }

    fn interrupt_mask(&self) -> LocalRegisterCopy<u32, Interrupt::Register> {
        self.imr.extract()
    }

    fn interrupt_status(&self) -> LocalRegisterCopy<u32, Interrupt::Register> {
        self.isr.extract()
    }

    fn output_data(&self) -> u32 {
        self.odata.read(OutputData::ODATA)
    }
}

impl<T: TrngRegisterBank + ?Sized> TrngRegisterBank for &T {
    fn write_control(&self, value: FieldValue<u32, Control::Register>) {
        (**self).write_control(value);
    }

    fn enable_interrupts(&self, value: FieldValue<u32, Interrupt::Register>) {
        (**self).enable_interrupts(value);
    }

    fn disable_interrupts(&self, value: FieldValue<u32, Interrupt::Register>) {
        (**self).disable_interrupts(value);
    }

    fn interrupt_mask(&self) -> LocalRegisterCopy<u32, Interrupt::Register> {
        (**self).interrupt_mask()
    }

    fn interrupt_status(&self) -> LocalRegisterCopy<u32, Interrupt::Register> {
        (**self).interrupt_status()
    }

    fn output_data(&self) -> u32 {
        (**self).output_data()
    }
}

pub struct Trng<'a, R: TrngRegisterBank = StaticRef<TrngRegisters>> {
    registers: R,
    clock: &'a dyn ClockInterface,
    policy: PollPolicy,
}

impl<'a> Trng<'a> {
    /// TRNG at its memory-mapped address, with the default polling window.
    pub fn new(clock: &'a dyn ClockInterface) -> Trng<'a> {
        Trng::with_registers(TRNG_BASE, clock, PollPolicy::default())
    }
}

impl<'a, R: TrngRegisterBank> Trng<'a, R> {
    pub fn with_registers(
        registers: R,
        clock: &'a dyn ClockInterface,
        policy: PollPolicy,
    ) -> Trng<'a, R> {
        Trng {
            registers,
            clock,
            policy,
        }
    }

    /// Stop the generator and gate its clock.
    pub fn disable(&self) {
        self.registers.disable_interrupts(Interrupt::DATRDY::SET);
        self.registers
            .write_control(Control::KEY::Passkey + Control::ENABLE::CLEAR);
        self.clock.disable();
    }

    fn sample(&self) -> Option<u32> {
        if self.registers.interrupt_status().is_set(Interrupt::DATRDY) {
            Some(self.registers.output_data())
        } else {
            None
        }
    }
}

impl<R: TrngRegisterBank> hil::trng::Trng for Trng<'_, R> {
    fn init(&self) {
        self.clock.enable();
        self.registers
            .write_control(Control::KEY::Passkey + Control::ENABLE::SET);
        self.registers.enable_interrupts(Interrupt::DATRDY::SET);
    }

    fn is_ready(&self) -> bool {
        // The whole mask must read back as exactly DATRDY.
        self.registers.interrupt_mask().get() == Interrupt::DATRDY::SET.value
    }

    fn generate(&self) -> Result<u32, ErrorCode> {
        let (result, polls) = self.policy.poll(|| self.sample());
        if CONFIG.trace_trng {
            match result {
                Ok(_) => debug!("TRNG: word captured in {} polls", polls),
                Err(_) => debug!("TRNG: no data after {} polls", polls),
            }
        }
        result
    }
}
