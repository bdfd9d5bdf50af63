use core::fmt;

/// Error raised while overlaying a layout on a payload or looking one up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// Payload or output buffer is shorter than the fixed body
    LengthMismatch {
        message: &'static str,
        expect: usize,
        got: usize,
    },
    /// Bytes after the fixed body are not a whole number of records
    AlignmentMismatch {
        message: &'static str,
        trailing: usize,
        record_len: usize,
    },
    UnknownMessageType {
        class: u8,
        id: u8,
    },
    DuplicateMessageType {
        class: u8,
        id: u8,
    },
    /// More records than the message's count field can express
    TooManyRecords {
        message: &'static str,
        max: usize,
        got: usize,
    },
}

impl LayoutError {
    /// `true` when the (class, id) pair has no registered layout. Callers
    /// usually skip such payloads instead of treating them as corrupt.
    pub fn is_unknown_message(&self) -> bool {
        matches!(self, LayoutError::UnknownMessageType { .. })
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::LengthMismatch {
                message,
                expect,
                got,
            } => write!(
                f,
                "Invalid payload({}) length, expect at least {}, got {}",
                message, expect, got
            ),
            LayoutError::AlignmentMismatch {
                message,
                trailing,
                record_len,
            } => write!(
                f,
                "Payload({}) has {} trailing bytes, not a multiple of the {}-byte record",
                message, trailing, record_len
            ),
            LayoutError::UnknownMessageType { class, id } => {
                write!(f, "No layout for message class {:#04x} id {:#04x}", class, id)
            }
            LayoutError::DuplicateMessageType { class, id } => write!(
                f,
                "Message class {:#04x} id {:#04x} is already registered",
                class, id
            ),
            LayoutError::TooManyRecords { message, max, got } => write!(
                f,
                "Payload({}) can describe at most {} records, got {}",
                message, max, got
            ),
        }
    }
}

impl core::error::Error for LayoutError {}
