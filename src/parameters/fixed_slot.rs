//! Redundant fixed-slot backend
//!
//! Every parameter lives at a fixed EEPROM offset (see
//! [`FixedSlotLayout`]). Only the channel is stored with a redundancy
//! check: the channel and its complement form the sentinel for the whole
//! record. When the sentinel fails, every field is rewritten from the
//! compiled defaults in one critical section.
//!
//! # Record Layout
//!
//! ```text
//! 0x00  EUI-64          8 bytes
//! 0x08  channel, !channel
//! 0x0A  PAN id          u16 LE
//! 0x0C  PAN address     u16 LE
//! 0x0E  tx power        u8
//! 0x0F  server name     16 bytes   (web identity only)
//! 0x1F  domain name     30 bytes   (web identity only)
//! ```
//!
//! The constructor verifies the sentinel, so the plain getters never see an
//! unchecked record. If a repair cannot be written, the record is marked
//! degraded and the getters answer from the defaults until a later check
//! finds a valid sentinel.

use micropnp_core::config::{StoreConfig, WebIdentity};
use micropnp_core::parameters::channel::{self, ChannelCheck};
use micropnp_core::parameters::{
    generate_local_eui64, Eui64, Field, FixedSlotLayout, HardwareAddress, ParamDefaults,
};
use micropnp_core::traits::NoiseSource;

use super::store::ParameterStore;
use crate::platform::critical::CriticalSectionGuard;
use crate::platform::traits::EepromInterface;
use crate::platform::Result;

/// Counters kept by the fixed-slot backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepairStats {
    /// Sentinel checks performed
    pub checks: u32,
    /// Repairs performed
    pub repairs: u32,
    /// Repairs whose write-back failed
    pub write_failures: u32,
}

/// Backend storing parameters at fixed EEPROM offsets
#[derive(Debug)]
pub struct FixedSlotBackend<E: EepromInterface, N: NoiseSource> {
    eeprom: E,
    layout: FixedSlotLayout,
    defaults: ParamDefaults,
    randomize_address: bool,
    web_identity: Option<WebIdentity>,
    noise: N,
    /// Address in storage was generated by a repair this session
    fresh_address: bool,
    /// Address generated by the last repair
    generated: Option<Eui64>,
    /// Last repair failed to write; storage contents are not trusted
    record_degraded: bool,
    stats: RepairStats,
}

impl<E: EepromInterface, N: NoiseSource> FixedSlotBackend<E, N> {
    /// Open the record at the default location and verify it
    pub fn new(eeprom: E, config: &StoreConfig, noise: N) -> Self {
        Self::with_layout(eeprom, FixedSlotLayout::DEFAULT, config, noise)
    }

    /// Open the record at `layout` and verify it
    pub fn with_layout(eeprom: E, layout: FixedSlotLayout, config: &StoreConfig, noise: N) -> Self {
        let mut backend = Self {
            eeprom,
            layout,
            defaults: config.defaults.with_valid_channel(),
            randomize_address: config.randomize_address,
            web_identity: config.web_identity,
            noise,
            fresh_address: false,
            generated: None,
            record_degraded: false,
            stats: RepairStats::default(),
        };
        backend.ensure_valid();
        backend
    }

    /// Check the channel sentinel and repair the record if it fails
    ///
    /// Returns the verified (or freshly restored) channel. A second call
    /// without intervening corruption is a pure read.
    pub fn ensure_valid(&mut self) -> u8 {
        self.stats.checks += 1;

        let offset = self.layout.slot(Field::Channel).offset;
        let word = self.eeprom.read_word(offset).unwrap_or_else(|e| {
            crate::log_warn!("channel read failed: {}", e);
            // Erased pattern never verifies
            0xFFFF
        });

        match channel::check_word(word) {
            ChannelCheck::Valid(channel) => {
                self.record_degraded = false;
                channel
            }
            ChannelCheck::Corrupt => {
                let [stored, complement] = word.to_le_bytes();
                crate::log_warn!(
                    "parameter record corrupt (channel {}, complement {}), restoring defaults",
                    stored,
                    complement
                );
                self.repair();
                self.defaults.channel
            }
        }
    }

    /// Address in storage was generated by a repair this session
    pub fn fresh_address(&self) -> bool {
        self.fresh_address
    }

    /// Last repair could not be written, getters answer from defaults
    pub fn is_degraded(&self) -> bool {
        self.record_degraded
    }

    /// Repair counters
    pub fn stats(&self) -> RepairStats {
        self.stats
    }

    /// Web identity strings, if this build keeps them
    ///
    /// Falls back to the compiled strings if storage cannot be read.
    pub fn web_identity(&mut self) -> Option<WebIdentity> {
        let mut identity = self.web_identity?;
        if self.record_degraded {
            return Some(identity);
        }
        let server = self.layout.slot(Field::ServerName);
        let domain = self.layout.slot(Field::DomainName);

        let mut stored = identity;
        let result = self
            .eeprom
            .read(server.offset, &mut stored.server_name)
            .and_then(|_| self.eeprom.read(domain.offset, &mut stored.domain_name));
        match result {
            Ok(()) => identity = stored,
            Err(e) => crate::log_warn!("web identity read failed: {}", e),
        }
        Some(identity)
    }

    /// Access the underlying EEPROM
    pub fn eeprom(&self) -> &E {
        &self.eeprom
    }

    /// Mutable access to the underlying EEPROM
    pub fn eeprom_mut(&mut self) -> &mut E {
        &mut self.eeprom
    }

    /// Give back the underlying EEPROM
    pub fn into_inner(self) -> E {
        self.eeprom
    }

    /// Rewrite the whole record from defaults
    fn repair(&mut self) {
        self.stats.repairs += 1;

        let retry = if self.record_degraded { self.generated } else { None };
        let eui64 = match retry {
            // Keep the address stable while retrying a failed write
            Some(bytes) => bytes,
            None if self.randomize_address => {
                crate::log_info!("generating random EUI-64");
                let bytes = generate_local_eui64(&mut self.noise);
                self.generated = Some(bytes);
                bytes
            }
            None => self.defaults.eui64,
        };

        let result = {
            let _guard = CriticalSectionGuard::acquire();
            self.write_record(&eui64)
        };

        match result {
            Ok(()) => {
                self.record_degraded = false;
                crate::log_info!("parameter record restored");
            }
            Err(e) => {
                self.record_degraded = true;
                self.stats.write_failures += 1;
                crate::log_error!("parameter record write failed: {}", e);
            }
        }

        self.fresh_address = self.randomize_address;
    }

    /// Write every field; the channel pair goes last so a torn repair still
    /// fails the sentinel on the next boot
    fn write_record(&mut self, eui64: &Eui64) -> Result<()> {
        let layout = self.layout;
        self.eeprom.write(layout.slot(Field::Eui64).offset, eui64)?;

        if let Some(identity) = &self.web_identity {
            self.eeprom
                .write(layout.slot(Field::ServerName).offset, &identity.server_name)?;
            self.eeprom
                .write(layout.slot(Field::DomainName).offset, &identity.domain_name)?;
        }

        self.eeprom
            .write_word(layout.slot(Field::PanId).offset, self.defaults.pan_id)?;
        self.eeprom
            .write_word(layout.slot(Field::PanAddress).offset, self.defaults.pan_address)?;
        self.eeprom
            .write_byte(layout.slot(Field::TxPower).offset, self.defaults.tx_power)?;
        self.eeprom.write_word(
            layout.slot(Field::Channel).offset,
            channel::encode_word(self.defaults.channel),
        )
    }
}

impl<E: EepromInterface, N: NoiseSource> ParameterStore for FixedSlotBackend<E, N> {
    fn get_channel(&mut self) -> u8 {
        self.ensure_valid()
    }

    fn get_hardware_address(&mut self) -> HardwareAddress {
        if self.record_degraded {
            return match self.generated {
                Some(bytes) => HardwareAddress::generated(bytes),
                None => HardwareAddress::stored(self.defaults.eui64),
            };
        }

        let offset = self.layout.slot(Field::Eui64).offset;
        let mut bytes = [0u8; 8];

        let result = {
            let _guard = CriticalSectionGuard::acquire();
            self.eeprom.read(offset, &mut bytes)
        };

        match result {
            Ok(()) => HardwareAddress {
                bytes,
                freshly_generated: self.fresh_address,
            },
            Err(e) => {
                crate::log_warn!("EUI-64 read failed: {}", e);
                HardwareAddress::stored(self.defaults.eui64)
            }
        }
    }

    fn get_pan_id(&mut self) -> u16 {
        if self.record_degraded {
            return self.defaults.pan_id;
        }
        let offset = self.layout.slot(Field::PanId).offset;
        self.eeprom.read_word(offset).unwrap_or_else(|e| {
            crate::log_warn!("PAN id read failed: {}", e);
            self.defaults.pan_id
        })
    }

    fn get_pan_address(&mut self) -> u16 {
        if self.record_degraded {
            return self.defaults.pan_address;
        }
        let offset = self.layout.slot(Field::PanAddress).offset;
        self.eeprom.read_word(offset).unwrap_or_else(|e| {
            crate::log_warn!("PAN address read failed: {}", e);
            self.defaults.pan_address
        })
    }

    fn get_tx_power(&mut self) -> u8 {
        if self.record_degraded {
            return self.defaults.tx_power;
        }
        let offset = self.layout.slot(Field::TxPower).offset;
        self.eeprom.read_byte(offset).unwrap_or_else(|e| {
            crate::log_warn!("tx power read failed: {}", e);
            self.defaults.tx_power
        })
    }
}
