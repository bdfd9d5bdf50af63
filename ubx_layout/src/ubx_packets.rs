pub mod packets;
pub mod types;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

pub use packets::*;
pub use types::*;

use crate::{
    codec::FixedLayout, descriptor::MessageDescriptor, error::LayoutError, iter::RepeatedIter,
};

/// Information about a concrete UBX message type
pub trait UbxMessage: FixedLayout {
    const CLASS: u8;
    const ID: u8;
    const DESCRIPTOR: MessageDescriptor;

    /// Payload length with `repeat_count` trailing records
    #[inline]
    fn size(repeat_count: usize) -> usize {
        Self::DESCRIPTOR.size(repeat_count)
    }
}

/// Message whose fixed body is followed by a run of `Record`s
pub trait RepeatedMessage: UbxMessage {
    type Record: FixedLayout;

    /// Records of a complete payload, validated before the first one is
    /// yielded
    fn iterate<'a>(
        payload: &'a [u8],
    ) -> Result<RepeatedIter<'a, <Self::Record as FixedLayout>::Ref<'a>>, LayoutError> {
        RepeatedIter::new(payload, &Self::DESCRIPTOR)
    }

    /// Append the fixed body and then `records`, returns the bytes written
    fn extend_with_records<'r, E, I>(&self, buf: &mut E, records: I) -> usize
    where
        E: Extend<u8>,
        I: IntoIterator<Item = &'r Self::Record>,
        Self::Record: 'r,
    {
        let mut written = self.extend_to(buf);
        for record in records {
            written += record.extend_to(buf);
        }
        written
    }

    #[cfg(feature = "alloc")]
    fn encode_with_records(&self, records: &[Self::Record]) -> Vec<u8> {
        let mut ret = Vec::with_capacity(Self::size(records.len()));
        self.extend_with_records(&mut ret, records);
        ret
    }
}

/// Poll for one message: the receiver answers a message of this class
/// and id sent with an empty payload. Framing is left to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UbxPollRequest {
    pub class: u8,
    pub msg_id: u8,
}

impl UbxPollRequest {
    #[inline]
    pub const fn request_for<T: UbxMessage>() -> Self {
        Self {
            class: T::CLASS,
            msg_id: T::ID,
        }
    }

    #[inline]
    pub const fn request_for_unknown(class: u8, msg_id: u8) -> Self {
        Self { class, msg_id }
    }

    #[inline]
    pub const fn payload(&self) -> &'static [u8] {
        &[]
    }
}

/// Payload of a message type not defined in this crate
#[derive(Debug, Clone, Copy)]
pub struct UnknownMessageRef<'a> {
    pub payload: &'a [u8],
    pub class: u8,
    pub msg_id: u8,
}
