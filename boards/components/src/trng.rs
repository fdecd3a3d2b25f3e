// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Selection of the TRNG peripheral for the running chip.
//!
//! Every supported TRNG is a variant of [`TrngDevice`], and calls are
//! dispatched with a `match` rather than through a trait object. Supporting a
//! new peripheral means adding a variant to [`TrngPeripheral`] and
//! [`TrngDevice`].
//!
//! Usage
//! -----
//!
//! ```rust,ignore
//! let peripheral = components::trng::TrngPeripheral::detect()?;
//! let trng = components::trng::trng_device(
//!     peripheral,
//!     sam3x::trng::TRNG_BASE,
//!     &trng_clock,
//!     PollPolicy::default(),
//! );
//! ```

use kernel::hil;
use kernel::hil::trng::PollPolicy;
use kernel::platform::chip::ClockInterface;
use kernel::utilities::StaticRef;
use kernel::ErrorCode;
use sam3x::trng::{TrngRegisterBank, TrngRegisters};

/// TRNG peripherals this crate knows how to drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrngPeripheral {
    Sam3x8e,
}

impl TrngPeripheral {
    /// Map a chip identification value to its TRNG peripheral.
    ///
    /// Returns `ErrorCode::NODEVICE` for chips without a supported TRNG.
    pub fn from_chip_id(cidr: u32) -> Result<TrngPeripheral, ErrorCode> {
        if sam3x::chipid::is_sam3x8e(cidr) {
            Ok(TrngPeripheral::Sam3x8e)
        } else {
            Err(ErrorCode::NODEVICE)
        }
    }

    /// Identify the TRNG of the chip we are running on.
    pub fn detect() -> Result<TrngPeripheral, ErrorCode> {
        TrngPeripheral::from_chip_id(sam3x::chipid::read_cidr())
    }
}

pub enum TrngDevice<'a, R: TrngRegisterBank = StaticRef<TrngRegisters>> {
    Sam3x8e(sam3x::trng::Trng<'a, R>),
}

/// Build the driver for `peripheral`. The device is not initialized.
pub fn trng_device<'a, R: TrngRegisterBank>(
    peripheral: TrngPeripheral,
    registers: R,
    clock: &'a dyn ClockInterface,
    policy: PollPolicy,
) -> TrngDevice<'a, R> {
    match peripheral {
        TrngPeripheral::Sam3x8e => TrngDevice::Sam3x8e(sam3x::trng::Trng::with_registers(
            registers, clock, policy,
        )),
    }
}

impl<R: TrngRegisterBank> TrngDevice<'_, R> {
    pub fn peripheral(&self) -> TrngPeripheral {
        match self {
            TrngDevice::Sam3x8e(_) => TrngPeripheral::Sam3x8e,
        }
    }

    /// Stop the generator and gate its clock.
    pub fn disable(&self) {
        match self {
            TrngDevice::Sam3x8e(trng) => trng.disable(),
        }
    }
}

impl<R: TrngRegisterBank> hil::trng::Trng for TrngDevice<'_, R> {
    fn init(&self) {
        match self {
            TrngDevice::Sam3x8e(trng) => hil::trng::Trng::init(trng),
        }
    }

    fn is_ready(&self) -> bool {
        match self {
            TrngDevice::Sam3x8e(trng) => hil::trng::Trng::is_ready(trng),
        }
    }

    fn generate(&self) -> Result<u32, ErrorCode> {
        match self {
            TrngDevice::Sam3x8e(trng) => hil::trng::Trng::generate(trng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TrngPeripheral;
    use kernel::ErrorCode;
    use sam3x::chipid::SAM3X8E_CIDR;

    #[test]
    fn sam3x8e_is_selected() {
        assert_eq!(
            TrngPeripheral::from_chip_id(SAM3X8E_CIDR),
            Ok(TrngPeripheral::Sam3x8e)
        );
        assert_eq!(
            TrngPeripheral::from_chip_id(SAM3X8E_CIDR | 0x2),
            Ok(TrngPeripheral::Sam3x8e)
        );
    }

    #[test]
    fn unknown_chip_has_no_device() {
        assert_eq!(
            TrngPeripheral::from_chip_id(0x2844_0960),
            Err(ErrorCode::NODEVICE)
        );
        assert_eq!(TrngPeripheral::from_chip_id(0), Err(ErrorCode::NODEVICE));
    }
}
