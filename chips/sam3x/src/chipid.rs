// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Chip Identifier (CHIPID).

use kernel::utilities::registers::interfaces::Readable;
use kernel::utilities::registers::{register_bitfields, register_structs, ReadOnly};
use kernel::utilities::StaticRef;

register_structs! {
    ChipIdRegisters {
        /// Chip ID Register
        (0x00 => cidr: ReadOnly<u32, CIDR::Register>),
        (0x04 => @END),
    }
}

register_bitfields![u32,
    CIDR [
        /// Version of the device
        VERSION OFFSET(0) NUMBITS(5) []
    ]
];

const CHIPID_BASE: StaticRef<ChipIdRegisters> =
    unsafe { StaticRef::new(0x400E_0940 as *const ChipIdRegisters) };

/// CIDR of the SAM3X8E with the version field cleared.
pub const SAM3X8E_CIDR: u32 = 0x285E_0A60;

/// Whether `cidr` identifies a SAM3X8E, in any silicon revision.
pub fn is_sam3x8e(cidr: u32) -> bool {
    cidr & !CIDR::VERSION.mask == SAM3X8E_CIDR
}

/// Read the CIDR of the chip we are running on.
pub fn read_cidr() -> u32 {
    CHIPID_BASE.cidr.get()
}

#[cfg(test)]
mod tests {
    use super::{is_sam3x8e, SAM3X8E_CIDR};

    #[test]
    fn revision_does_not_affect_identification() {
        assert!(is_sam3x8e(SAM3X8E_CIDR));
        assert!(is_sam3x8e(SAM3X8E_CIDR | 0x1));
    }

    #[test]
    fn other_parts_are_rejected() {
        // Different family and different flash size.
        assert!(!is_sam3x8e(0x2855_0960));
        assert!(!is_sam3x8e(0x283E_0A60));
        assert!(!is_sam3x8e(0));
    }
}
