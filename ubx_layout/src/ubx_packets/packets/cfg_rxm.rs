use ubx_layout_derive::ubx_message;

/// RXM configuration
///
/// Only used for receivers with protocol versions before 23. Newer
/// firmware configures power modes through CFG-PMS.
#[ubx_message]
#[ubx(class = 0x06, id = 0x11, fixed_payload_len = 2)]
pub struct CfgRxm {
    /// Always set to 8
    reserved1: u8,
    /// Low power mode, see [`CfgRxmLpMode`]
    lp_mode: u8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CfgRxmLpMode {
    Continuous,
    PowerSave,
    /// Legacy continuous mode, same as `Continuous` on current firmware
    Legacy,
    Other(u8),
}

impl From<u8> for CfgRxmLpMode {
    fn from(raw: u8) -> Self {
        match raw {
            0 => CfgRxmLpMode::Continuous,
            1 => CfgRxmLpMode::PowerSave,
            4 => CfgRxmLpMode::Legacy,
            x => CfgRxmLpMode::Other(x),
        }
    }
}

impl From<CfgRxmLpMode> for u8 {
    fn from(mode: CfgRxmLpMode) -> u8 {
        match mode {
            CfgRxmLpMode::Continuous => 0,
            CfgRxmLpMode::PowerSave => 1,
            CfgRxmLpMode::Legacy => 4,
            CfgRxmLpMode::Other(x) => x,
        }
    }
}

impl CfgRxmRef<'_> {
    pub fn mode(&self) -> CfgRxmLpMode {
        self.lp_mode().into()
    }
}

impl CfgRxm {
    pub fn new(mode: CfgRxmLpMode) -> Self {
        Self {
            reserved1: 8,
            lp_mode: mode.into(),
        }
    }
}
