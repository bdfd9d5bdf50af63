use bitflags::bitflags;
use ubx_layout_derive::{ubx_message, ubx_record};

use crate::ubx_packets::types::GnssId;

/// Satellite Information
#[ubx_message]
#[ubx(class = 0x01, id = 0x35, fixed_payload_len = 8, repeated = NavSatSvInfo)]
pub struct NavSat {
    /// GPS time of week in ms
    itow: u32,

    /// Message version, should be 1
    version: u8,

    num_svs: u8,

    reserved0: [u8; 2],
}

#[ubx_record]
#[ubx(record_len = 12)]
pub struct NavSatSvInfo {
    gnss_id: u8,
    sv_id: u8,
    /// Carrier to noise ratio, dBHz
    cno: u8,
    /// Elevation, deg (+/-90)
    elev: i8,
    /// Azimuth, deg (0-360)
    azim: i16,
    /// Pseudorange residual, 0.1 m
    pr_res: i16,
    flags: u32,
}

impl NavSatSvInfoRef<'_> {
    /// `None` for identifiers this crate doesn't know
    pub fn gnss(&self) -> Option<GnssId> {
        GnssId::try_from(self.gnss_id()).ok()
    }

    pub fn pr_res_meters(&self) -> f32 {
        f32::from(self.pr_res()) * 0.1
    }

    pub fn sv_flags(&self) -> NavSatSvFlags {
        NavSatSvFlags::from_bits_retain(self.flags())
    }
}

bitflags! {
    /// Single-bit fields of the NAV-SAT `flags` word. The multi-bit fields
    /// are read with the accessor methods.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NavSatSvFlags: u32 {
        const SV_USED = 1 << 3;
        const DIFF_CORR = 1 << 6;
        const SMOOTHED = 1 << 7;
        const EPH_AVAIL = 1 << 11;
        const ALM_AVAIL = 1 << 12;
        const ANO_AVAIL = 1 << 13;
        const AOP_AVAIL = 1 << 14;
        const SBAS_CORR_USED = 1 << 16;
        const RTCM_CORR_USED = 1 << 17;
        const SLAS_CORR_USED = 1 << 18;
        const SPARTN_CORR_USED = 1 << 19;
        const PR_CORR_USED = 1 << 20;
        const CR_CORR_USED = 1 << 21;
        const DO_CORR_USED = 1 << 22;
    }
}

impl NavSatSvFlags {
    pub fn quality_ind(self) -> NavSatQualityIndicator {
        match self.bits() & 0x7 {
            0 => NavSatQualityIndicator::NoSignal,
            1 => NavSatQualityIndicator::Searching,
            2 => NavSatQualityIndicator::SignalAcquired,
            3 => NavSatQualityIndicator::SignalDetected,
            4 => NavSatQualityIndicator::CodeLock,
            _ => NavSatQualityIndicator::CarrierLock,
        }
    }

    pub fn health(self) -> NavSatSvHealth {
        match (self.bits() >> 4) & 0x3 {
            1 => NavSatSvHealth::Healthy,
            2 => NavSatSvHealth::Unhealthy,
            x => NavSatSvHealth::Unknown(x as u8),
        }
    }

    pub fn orbit_source(self) -> NavSatOrbitSource {
        match (self.bits() >> 8) & 0x7 {
            0 => NavSatOrbitSource::NoInfoAvailable,
            1 => NavSatOrbitSource::Ephemeris,
            2 => NavSatOrbitSource::Almanac,
            3 => NavSatOrbitSource::AssistNowOffline,
            4 => NavSatOrbitSource::AssistNowAutonomous,
            x => NavSatOrbitSource::Other(x as u8),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavSatQualityIndicator {
    NoSignal,
    Searching,
    SignalAcquired,
    SignalDetected,
    CodeLock,
    /// Code and carrier locked, time synchronized (raw values 5 to 7)
    CarrierLock,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavSatSvHealth {
    Healthy,
    Unhealthy,
    Unknown(u8),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavSatOrbitSource {
    NoInfoAvailable,
    Ephemeris,
    Almanac,
    AssistNowOffline,
    AssistNowAutonomous,
    Other(u8),
}
