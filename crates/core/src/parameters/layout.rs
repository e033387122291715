//! Fixed-slot record layout
//!
//! Every field lives at a fixed offset from the record base so it can be
//! inspected or patched with a hardware programmer.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ EUI-64: [u8; 8]              │  +0x00
//! ├──────────────────────────────┤
//! │ Channel, !Channel: [u8; 2]   │  +0x08
//! ├──────────────────────────────┤
//! │ PAN ID: u16 (LE)             │  +0x0A
//! ├──────────────────────────────┤
//! │ PAN address: u16 (LE)        │  +0x0C
//! ├──────────────────────────────┤
//! │ TX power: u8                 │  +0x0E
//! ├──────────────────────────────┤
//! │ Server name: [u8; 16]        │  +0x0F  (web server builds)
//! ├──────────────────────────────┤
//! │ Domain name: [u8; 30]        │  +0x1F  (web server builds)
//! └──────────────────────────────┘
//! ```

use super::channel::CHANNEL_RECORD_SIZE;

/// Length of the stored web server host name
pub const SERVER_NAME_LEN: usize = 16;

/// Length of the stored web server domain name
pub const DOMAIN_NAME_LEN: usize = 30;

/// A fixed region of non-volatile storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Absolute byte offset
    pub offset: u16,
    /// Size in bytes
    pub size: u16,
}

impl Slot {
    /// First offset past the slot
    pub fn end(&self) -> u16 {
        self.offset + self.size
    }
}

/// Fields of the fixed-slot record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Eui64,
    Channel,
    PanId,
    PanAddress,
    TxPower,
    ServerName,
    DomainName,
}

impl Field {
    const fn relative(self) -> (u16, u16) {
        match self {
            Field::Eui64 => (0x00, 8),
            Field::Channel => (0x08, CHANNEL_RECORD_SIZE as u16),
            Field::PanId => (0x0A, 2),
            Field::PanAddress => (0x0C, 2),
            Field::TxPower => (0x0E, 1),
            Field::ServerName => (0x0F, SERVER_NAME_LEN as u16),
            Field::DomainName => (0x1F, DOMAIN_NAME_LEN as u16),
        }
    }
}

/// Placement of the fixed-slot record in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSlotLayout {
    base: u16,
}

impl FixedSlotLayout {
    /// Record starting at offset 0
    pub const DEFAULT: Self = Self { base: 0 };

    /// Total record size including the web identity strings
    pub const RECORD_SIZE: u16 = 0x1F + DOMAIN_NAME_LEN as u16;

    /// Record starting at `base`
    pub const fn at(base: u16) -> Self {
        Self { base }
    }

    /// Record base offset
    pub const fn base(&self) -> u16 {
        self.base
    }

    /// Absolute slot for `field`
    pub const fn slot(&self, field: Field) -> Slot {
        let (offset, size) = field.relative();
        Slot {
            offset: self.base + offset,
            size,
        }
    }

    /// First offset past the record
    pub const fn end(&self) -> u16 {
        self.base + Self::RECORD_SIZE
    }
}

impl Default for FixedSlotLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: [Field; 7] = [
        Field::Eui64,
        Field::Channel,
        Field::PanId,
        Field::PanAddress,
        Field::TxPower,
        Field::ServerName,
        Field::DomainName,
    ];

    #[test]
    fn test_slots_are_contiguous() {
        let layout = FixedSlotLayout::DEFAULT;
        let mut expected = layout.base();
        for field in FIELDS {
            let slot = layout.slot(field);
            assert_eq!(slot.offset, expected, "{:?}", field);
            expected = slot.end();
        }
        assert_eq!(expected, layout.end());
    }

    #[test]
    fn test_base_offset_shifts_every_slot() {
        let layout = FixedSlotLayout::at(0x100);
        assert_eq!(layout.slot(Field::Eui64).offset, 0x100);
        assert_eq!(layout.slot(Field::Channel).offset, 0x108);
        assert_eq!(layout.slot(Field::Channel).end(), 0x10A);
        assert_eq!(layout.end(), 0x100 + FixedSlotLayout::RECORD_SIZE);
    }
}
