use bitflags::bitflags;
use ubx_layout_derive::{ubx_message, ubx_record};

use crate::{error::LayoutError, ubx_packets::types::GnssId};

/// Multi-GNSS config
///
/// ```
/// use ubx_layout::{CfgGnss, CfgGnssBlock, GnssId, RepeatedMessage, UbxMessage};
///
/// let blocks = [
///     CfgGnssBlock::new(true, GnssId::Gps, 8, 16, 0x01),
///     CfgGnssBlock::new(false, GnssId::Glonass, 8, 14, 0x01),
/// ];
/// let body = CfgGnss {
///     msg_ver: 0,
///     num_trk_ch_hw: 32,
///     num_trk_ch_use: 32,
///     num_config_blocks: 0,
/// }
/// .with_block_count(&blocks)
/// .unwrap();
///
/// let payload = body.encode_with_records(&blocks);
/// assert_eq!(payload.len(), CfgGnss::size(2));
/// ```
#[ubx_message]
#[ubx(class = 0x06, id = 0x3e, fixed_payload_len = 4, repeated = CfgGnssBlock)]
pub struct CfgGnss {
    /// Message version (0 for this version)
    msg_ver: u8,
    /// Number of tracking channels hardware (read only)
    num_trk_ch_hw: u8,
    /// Number of tracking channels to use (<= numTrkChHw)
    num_trk_ch_use: u8,
    /// Number of config blocks to follow
    num_config_blocks: u8,
}

/// One GNSS system's channel reservation
#[ubx_record]
#[ubx(record_len = 8)]
pub struct CfgGnssBlock {
    gnss_id: u8,
    /// Number of reserved (minimum) tracking channels
    res_trk_ch: u8,
    /// Maximum number of tracking channels
    max_trk_ch: u8,
    reserved1: u8,
    flags: u32,
}

bitflags! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct GnssConfigFlags: u32 {
        /// System is enabled
        const ENABLE = 0x01;
    }
}

impl GnssConfigFlags {
    const SIG_CFG_SHIFT: u32 = 16;

    /// Signal configuration mask, bits 16-23. Its meaning depends on the GNSS.
    pub fn sig_cfg_mask(self) -> u8 {
        (self.bits() >> Self::SIG_CFG_SHIFT) as u8
    }

    pub fn with_sig_cfg_mask(self, mask: u8) -> Self {
        let cleared = self.bits() & !(0xff << Self::SIG_CFG_SHIFT);
        Self::from_bits_retain(cleared | (u32::from(mask) << Self::SIG_CFG_SHIFT))
    }
}

impl CfgGnss {
    /// Set `num_config_blocks` to match `blocks`. The count is a single
    /// byte, so more than 255 blocks are refused.
    pub fn with_block_count(mut self, blocks: &[CfgGnssBlock]) -> Result<Self, LayoutError> {
        self.num_config_blocks =
            u8::try_from(blocks.len()).map_err(|_| LayoutError::TooManyRecords {
                message: "CfgGnss",
                max: u8::MAX.into(),
                got: blocks.len(),
            })?;
        Ok(self)
    }
}

impl CfgGnssBlock {
    pub fn new(
        enabled: bool,
        gnss_id: GnssId,
        res_trk_ch: u8,
        max_trk_ch: u8,
        sig_cfg_mask: u8,
    ) -> Self {
        let flags = if enabled {
            GnssConfigFlags::ENABLE
        } else {
            GnssConfigFlags::empty()
        };
        Self {
            gnss_id: gnss_id.into(),
            res_trk_ch,
            max_trk_ch,
            reserved1: 0,
            flags: flags.with_sig_cfg_mask(sig_cfg_mask).bits(),
        }
    }
}

impl CfgGnssBlockRef<'_> {
    pub fn gnss(&self) -> Option<GnssId> {
        GnssId::try_from(self.gnss_id()).ok()
    }

    pub fn config_flags(&self) -> GnssConfigFlags {
        GnssConfigFlags::from_bits_retain(self.flags())
    }

    pub fn enabled(&self) -> bool {
        self.config_flags().contains(GnssConfigFlags::ENABLE)
    }
}
