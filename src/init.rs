//! Power-up register sequence.
//!
//! Entries are laid out as `<<opcode:u8, delay:b1, nargs:b7, args:nargs*u8>>`,
//! the list ends at a zero opcode. A set delay bit asks for 150ms after the command.

use crate::command::Command::*;

/// Delay flag in the length byte.
pub const DELAY: u8 = 0x80;

/// Settle time after flagged entries and after a reset, in microseconds.
pub const DELAY_US: u32 = 150_000;

// Vendor sequence, values as given by the panel maker.
#[rustfmt::skip]
pub const INIT_SEQUENCE: &[u8] = &[
    0xEF, 3, 0x03, 0x80, 0x02,
    0xCF, 3, 0x00, 0xC1, 0x30,
    0xED, 4, 0x64, 0x03, 0x12, 0x81,
    0xE8, 3, 0x85, 0x00, 0x78,
    0xCB, 5, 0x39, 0x2C, 0x00, 0x34, 0x02,
    0xF7, 1, 0x20,
    0xEA, 2, 0x00, 0x00,
    PowerControl1 as u8, 1, 0x23, // VRH[5:0]
    PowerControl2 as u8, 1, 0x10, // SAP[2:0];BT[3:0]
    VcomControl1 as u8, 2, 0x3e, 0x28,
    VcomControl2 as u8, 1, 0x86,
    MemoryAccessControl as u8, 1, 0x48,
    VerticalScrollAddr as u8, 1, 0x00,
    PixelFormatSet as u8, 1, 0x55,
    FrameRateControl1 as u8, 2, 0x00, 0x18,
    DisplayFunctionControl as u8, 3, 0x08, 0x82, 0x27,
    0xF2, 1, 0x00, // 3Gamma Function Disable
    GammaSet as u8, 1, 0x01,
    PositiveGammaCorrection as u8, 15,
        0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08, 0x4E, 0xF1,
        0x37, 0x07, 0x10, 0x03, 0x0E, 0x09, 0x00,
    NegativeGammaCorrection as u8, 15,
        0x00, 0x0E, 0x14, 0x03, 0x11, 0x07, 0x31, 0xC1,
        0x48, 0x08, 0x0F, 0x0C, 0x31, 0x36, 0x0F,
    SleepOut as u8, DELAY,
    DisplayOn as u8, DELAY,
    0x00,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitEntry<'a> {
    pub command: u8,
    pub args: &'a [u8],
    /// Wait [`DELAY_US`] after the command.
    pub delay: bool,
}

/// Walks an init table, stops at the terminating zero opcode or at a truncated entry.
#[derive(Clone, Debug)]
pub struct InitSequence<'a> {
    table: &'a [u8],
}

impl<'a> InitSequence<'a> {
    pub fn new(table: &'a [u8]) -> Self {
        Self { table }
    }
}

impl Default for InitSequence<'static> {
    fn default() -> Self {
        Self::new(INIT_SEQUENCE)
    }
}

impl<'a> Iterator for InitSequence<'a> {
    type Item = InitEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (&command, rest) = self.table.split_first()?;
        if command == 0 {
            self.table = &[];
            return None;
        }
        let (&x, rest) = rest.split_first()?;
        let n = (x & !DELAY) as usize;
        if rest.len() < n {
            self.table = &[];
            return None;
        }
        let (args, rest) = rest.split_at(n);
        self.table = rest;

        Some(InitEntry {
            command,
            args,
            delay: x & DELAY != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_table_parses_to_the_end_marker() {
        let entries: Vec<_> = InitSequence::default().collect();

        assert_eq!(entries.len(), 22);
        assert_eq!(
            entries[0],
            InitEntry {
                command: 0xEF,
                args: &[0x03, 0x80, 0x02],
                delay: false,
            }
        );
        assert_eq!(entries[18].command, 0xE0);
        assert_eq!(entries[18].args.len(), 15);
        assert_eq!(entries[19].args[14], 0x0F);

        let delayed: Vec<u8> = entries
            .iter()
            .filter(|e| e.delay)
            .map(|e| e.command)
            .collect();
        assert_eq!(delayed, vec![0x11, 0x29]);
        assert!(entries[20].args.is_empty());
    }

    #[test]
    fn table_byte_count_covers_every_entry() {
        let consumed: usize = InitSequence::default().map(|e| 2 + e.args.len()).sum();
        // plus the terminating zero
        assert_eq!(consumed + 1, INIT_SEQUENCE.len());
    }

    #[test]
    fn stops_at_zero_opcode() {
        let table = [0x01, 0x00, 0x00, 0x36, 1, 0x48];
        let entries: Vec<_> = InitSequence::new(&table).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].command, 0x01);
    }

    #[test]
    fn truncated_entry_ends_the_walk() {
        let table = [0x3a, 1, 0x55, 0xb1, 2, 0x00];
        let entries: Vec<_> = InitSequence::new(&table).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].args, &[0x55]);
    }
}
