use core::str::Utf8Error;

use ubx_layout_derive::{ubx_message, ubx_record};

use crate::error::LayoutError;

/// Receiver/Software Version
#[ubx_message]
#[ubx(class = 0x0a, id = 0x04, fixed_payload_len = 40, repeated = MonVerExtension)]
pub struct MonVer {
    /// Software version, NUL padded
    #[ubx(text)]
    software_version: [u8; 30],
    /// Hardware version, NUL padded
    #[ubx(text)]
    hardware_version: [u8; 10],
}

/// Extended software information string
#[ubx_record]
#[ubx(record_len = 30)]
pub struct MonVerExtension {
    #[ubx(text)]
    extension: [u8; 30],
}

impl<'a> MonVerRef<'a> {
    /// Extension strings with their padding stripped
    pub fn extensions(
        self,
    ) -> Result<impl Iterator<Item = Result<&'a str, Utf8Error>> + 'a, LayoutError> {
        Ok(self.records()?.map(|ext| ext.extension_str()))
    }
}

impl MonVerExtension {
    pub fn new(value: &str) -> Self {
        Self {
            extension: crate::text::text_array(value),
        }
    }
}
