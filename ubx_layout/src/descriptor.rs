use core::fmt;

use log::debug;

use crate::error::LayoutError;

/// Byte-level shape of one message type: a fixed body, optionally
/// followed by any number of equally sized records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MessageDescriptor {
    pub name: &'static str,
    pub class: u8,
    pub id: u8,
    pub fixed_len: usize,
    /// 0 when the message has no repeated part
    pub record_len: usize,
}

impl MessageDescriptor {
    pub const fn new(
        name: &'static str,
        class: u8,
        id: u8,
        fixed_len: usize,
        record_len: usize,
    ) -> Self {
        Self {
            name,
            class,
            id,
            fixed_len,
            record_len,
        }
    }

    #[inline]
    pub const fn key(&self) -> (u8, u8) {
        (self.class, self.id)
    }

    #[inline]
    pub const fn has_records(&self) -> bool {
        self.record_len != 0
    }

    /// Payload length of a message carrying `repeat_count` records.
    /// Saturates at `usize::MAX`.
    #[inline]
    pub const fn size(&self, repeat_count: usize) -> usize {
        self.fixed_len.saturating_add(repeat_count.saturating_mul(self.record_len))
    }

    pub fn check_fixed_len(&self, payload_len: usize) -> Result<(), LayoutError> {
        if payload_len < self.fixed_len {
            debug!(
                "{}: payload of {} bytes is shorter than the {}-byte fixed body",
                self.name, payload_len, self.fixed_len
            );
            return Err(LayoutError::LengthMismatch {
                message: self.name,
                expect: self.fixed_len,
                got: payload_len,
            });
        }
        Ok(())
    }

    /// First `fixed_len` bytes of `payload`
    pub fn fixed_body<'a>(&self, payload: &'a [u8]) -> Result<&'a [u8], LayoutError> {
        self.check_fixed_len(payload.len())?;
        Ok(&payload[..self.fixed_len])
    }

    /// Number of records in a payload of `payload_len` bytes.
    ///
    /// Messages without a repeated part always report 0, whatever follows
    /// their fixed body.
    pub fn repeat_count(&self, payload_len: usize) -> Result<usize, LayoutError> {
        self.check_fixed_len(payload_len)?;
        if self.record_len == 0 {
            return Ok(0);
        }
        let trailing = payload_len - self.fixed_len;
        if trailing % self.record_len != 0 {
            debug!(
                "{}: {} trailing bytes do not split into {}-byte records",
                self.name, trailing, self.record_len
            );
            return Err(LayoutError::AlignmentMismatch {
                message: self.name,
                trailing,
                record_len: self.record_len,
            });
        }
        Ok(trailing / self.record_len)
    }
}

impl fmt::Display for MessageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#04x}, {:#04x})", self.name, self.class, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION: MessageDescriptor = MessageDescriptor::new("MonVer", 0x0a, 0x04, 40, 30);
    const RXM: MessageDescriptor = MessageDescriptor::new("CfgRxm", 0x06, 0x11, 2, 0);

    #[test]
    fn test_size() {
        assert_eq!(VERSION.size(0), 40);
        assert_eq!(VERSION.size(2), 100);
        assert_eq!(RXM.size(7), 2);
        assert_eq!(RXM.size(usize::MAX), 2);
        assert_eq!(VERSION.size(usize::MAX / 2), usize::MAX);
        assert!(VERSION.has_records());
        assert!(!RXM.has_records());
    }

    #[test]
    fn test_repeat_count() {
        assert_eq!(VERSION.repeat_count(40), Ok(0));
        assert_eq!(VERSION.repeat_count(100), Ok(2));
        assert_eq!(
            VERSION.repeat_count(95),
            Err(LayoutError::AlignmentMismatch {
                message: "MonVer",
                trailing: 55,
                record_len: 30,
            })
        );
        assert_eq!(
            VERSION.repeat_count(30),
            Err(LayoutError::LengthMismatch {
                message: "MonVer",
                expect: 40,
                got: 30,
            })
        );
    }

    #[test]
    fn test_trailing_bytes_without_records() {
        assert_eq!(RXM.repeat_count(2), Ok(0));
        assert_eq!(RXM.repeat_count(5), Ok(0));
        assert_eq!(RXM.fixed_body(&[0x48, 0, 1, 2, 3]), Ok(&[0x48, 0][..]));
    }

    #[test]
    fn test_display() {
        assert_eq!(VERSION.to_string(), "MonVer (0x0a, 0x04)");
        assert_eq!(VERSION.key(), (0x0a, 0x04));
    }
}
