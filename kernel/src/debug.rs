// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Support for in-kernel debugging.
//!
//! For printing, this module provides the `debug!()` macro, which prefixes
//! each line with the source location:
//!
//! ```rust,ignore
//! use kernel::debug;
//!
//! debug!("Yes the code gets here with value {}", i);
//! ```
//!
//! Output goes to the writer installed by the board with
//! [`set_debug_writer()`]. Until a writer is installed, debug output is
//! dropped.

use core::fmt::{self, Arguments, Write};
use core::ptr::{addr_of, addr_of_mut};

/// Byte sink for debug output, typically a polled UART.
pub trait IoWrite {
    /// Write `buf` to the sink and return the number of bytes accepted.
    fn write(&mut self, buf: &[u8]) -> usize;
}

/// Adapts an `IoWrite` sink to `core::fmt::Write`.
struct DebugLine<'a>(&'a mut dyn IoWrite);

impl Write for DebugLine<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        if self.0.write(bytes) < bytes.len() {
            // Sink is full, the rest of this line is lost.
            return Err(fmt::Error);
        }
        Ok(())
    }
}

static mut DEBUG_WRITER: Option<&'static mut dyn IoWrite> = None;

/// Install the sink that `debug!()` writes to.
///
/// # Safety
///
/// Must be called from the single kernel execution context, before any
/// `debug!()` output is expected and never concurrently with it.
pub unsafe fn set_debug_writer(writer: &'static mut dyn IoWrite) {
    // SAFETY: the caller guarantees exclusive access to the writer slot.
    unsafe {
        *addr_of_mut!(DEBUG_WRITER) = Some(writer);
    }
}

/// Format one debug line, `"<file>:<line>: <args>\r\n"`, onto `writer`.
pub fn debug_write_line(
    writer: &mut dyn IoWrite,
    args: Arguments,
    file_line: &(&'static str, u32),
) -> fmt::Result {
    let (file, line) = *file_line;
    let mut out = DebugLine(writer);
    out.write_fmt(format_args!("{}:{}: ", file, line))?;
    out.write_fmt(args)?;
    out.write_str("\r\n")
}

#[doc(hidden)]
pub fn debug_fmt(args: Arguments, file_line: &(&'static str, u32)) {
    // SAFETY: the writer slot is only modified by `set_debug_writer()`, whose
    // caller guarantees it never runs concurrently with debug output.
    if unsafe { (*addr_of!(DEBUG_WRITER)).is_none() } {
        return;
    }
    // SAFETY: as above; a writer is installed and this is the only live
    // reference to it.
    if let Some(writer) = unsafe { (*addr_of_mut!(DEBUG_WRITER)).as_deref_mut() } {
        let _ = debug_write_line(writer, args, file_line);
    }
}

/// In-kernel `println()` debugging.
#[macro_export]
macro_rules! debug {
    () => ({
        // Allow an empty debug!() to print the location when hit
        $crate::debug!("")
    });
    ($($arg:tt)+) => ({
        $crate::debug::debug_fmt(format_args!($($arg)+), {
            static _FILE_LINE: (&'static str, u32) = (file!(), line!());
            &_FILE_LINE
        })
    });
}

#[cfg(test)]
mod tests {
    use super::{debug_write_line, IoWrite};
    use std::vec::Vec;

    struct Capture {
        bytes: Vec<u8>,
        capacity: usize,
    }

    impl IoWrite for Capture {
        fn write(&mut self, buf: &[u8]) -> usize {
            let room = self.capacity - self.bytes.len();
            let n = buf.len().min(room);
            self.bytes.extend_from_slice(&buf[..n]);
            n
        }
    }

    #[test]
    fn line_carries_location_prefix() {
        let mut sink = Capture {
            bytes: Vec::new(),
            capacity: 128,
        };
        static LOC: (&str, u32) = ("chips/sam3x/src/trng.rs", 42);
        debug_write_line(&mut sink, format_args!("captured after {} polls", 7), &LOC).unwrap();
        assert_eq!(
            sink.bytes.as_slice(),
            b"chips/sam3x/src/trng.rs:42: captured after 7 polls\r\n"
        );
    }

    #[test]
    fn full_sink_truncates_and_reports() {
        let mut sink = Capture {
            bytes: Vec::new(),
            capacity: 8,
        };
        static LOC: (&str, u32) = ("lib.rs", 1);
        assert!(debug_write_line(&mut sink, format_args!("overflowing"), &LOC).is_err());
        assert_eq!(sink.bytes.as_slice(), b"lib.rs:1");
    }

    #[test]
    fn debug_without_writer_is_dropped() {
        crate::debug!("nobody is listening: {}", 1);
        crate::debug!();
    }
}
