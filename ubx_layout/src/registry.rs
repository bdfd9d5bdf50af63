//! Lookup of message layouts by (class, id)

#[cfg(feature = "alloc")]
use alloc::collections::{btree_map::Entry, BTreeMap};

use log::{debug, trace};

#[cfg(feature = "alloc")]
use crate::ubx_packets::UbxMessage;
use crate::{descriptor::MessageDescriptor, error::LayoutError, iter::RepeatedIter};

/// Source of message descriptors keyed by (class, id)
pub trait MessageLookup {
    fn lookup(&self, class: u8, msg_id: u8) -> Result<&MessageDescriptor, LayoutError>;

    /// Find the layout for `(class, msg_id)` and check `payload` holds its
    /// fixed body.
    fn decode<'p>(
        &self,
        class: u8,
        msg_id: u8,
        payload: &'p [u8],
    ) -> Result<RawMessage<'_, 'p>, LayoutError> {
        let descriptor = self.lookup(class, msg_id)?;
        descriptor.check_fixed_len(payload.len())?;
        Ok(RawMessage {
            descriptor,
            payload,
        })
    }
}

/// Payload paired with the descriptor it was checked against, for callers
/// that work with descriptors rather than the typed views.
#[derive(Debug, Clone, Copy)]
pub struct RawMessage<'d, 'p> {
    descriptor: &'d MessageDescriptor,
    payload: &'p [u8],
}

impl<'d, 'p> RawMessage<'d, 'p> {
    pub fn descriptor(&self) -> &'d MessageDescriptor {
        self.descriptor
    }

    pub fn payload(&self) -> &'p [u8] {
        self.payload
    }

    pub fn fixed_body(&self) -> &'p [u8] {
        &self.payload[..self.descriptor.fixed_len]
    }

    pub fn repeat_count(&self) -> Result<usize, LayoutError> {
        self.descriptor.repeat_count(self.payload.len())
    }

    /// Raw record slices, in payload order
    pub fn records(&self) -> Result<RepeatedIter<'p, &'p [u8]>, LayoutError> {
        RepeatedIter::new(self.payload, self.descriptor)
    }
}

/// Read-only table, usable without an allocator
#[derive(Debug, Clone, Copy)]
pub struct StaticRegistry {
    descriptors: &'static [MessageDescriptor],
}

impl StaticRegistry {
    /// `descriptors` should not repeat a (class, id) pair, the first match
    /// wins otherwise.
    pub const fn new(descriptors: &'static [MessageDescriptor]) -> Self {
        Self { descriptors }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'static, MessageDescriptor> {
        self.descriptors.iter()
    }
}

impl MessageLookup for StaticRegistry {
    fn lookup(&self, class: u8, msg_id: u8) -> Result<&MessageDescriptor, LayoutError> {
        trace!("lookup ({:#04x}, {:#04x})", class, msg_id);
        self.descriptors
            .iter()
            .find(|d| d.key() == (class, msg_id))
            .ok_or_else(|| unknown_message(class, msg_id))
    }
}

/// Registry that takes new message types at runtime.
///
/// ```
/// use ubx_layout::{MessageDescriptor, MessageLookup, Registry};
///
/// let mut registry = Registry::with_builtin_messages();
/// registry
///     .register(MessageDescriptor::new("Custom", 0xf0, 0x01, 4, 2))
///     .unwrap();
/// let msg = registry.decode(0xf0, 0x01, &[0, 0, 0, 0, 1, 2, 3, 4]).unwrap();
/// assert_eq!(msg.repeat_count(), Ok(2));
/// ```
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, Default)]
pub struct Registry {
    descriptors: BTreeMap<(u8, u8), MessageDescriptor>,
}

#[cfg(feature = "alloc")]
impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every message defined in this crate
    pub fn with_builtin_messages() -> Self {
        let mut ret = Self::new();
        for descriptor in crate::BUILTIN_MESSAGES.iter() {
            ret.descriptors.insert(descriptor.key(), *descriptor);
        }
        ret
    }

    /// Add a message type. Fails if its (class, id) pair is taken, the
    /// registered descriptor is left untouched then.
    pub fn register(&mut self, descriptor: MessageDescriptor) -> Result<(), LayoutError> {
        match self.descriptors.entry(descriptor.key()) {
            Entry::Occupied(existing) => {
                debug!(
                    "refusing to register {}, slot is held by {}",
                    descriptor,
                    existing.get()
                );
                Err(LayoutError::DuplicateMessageType {
                    class: descriptor.class,
                    id: descriptor.id,
                })
            }
            Entry::Vacant(slot) => {
                trace!("register {}", descriptor);
                slot.insert(descriptor);
                Ok(())
            }
        }
    }

    pub fn register_message<M: UbxMessage>(&mut self) -> Result<(), LayoutError> {
        self.register(M::DESCRIPTOR)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors ordered by (class, id)
    pub fn iter(&self) -> impl Iterator<Item = &MessageDescriptor> {
        self.descriptors.values()
    }
}

#[cfg(feature = "alloc")]
impl MessageLookup for Registry {
    fn lookup(&self, class: u8, msg_id: u8) -> Result<&MessageDescriptor, LayoutError> {
        trace!("lookup ({:#04x}, {:#04x})", class, msg_id);
        self.descriptors
            .get(&(class, msg_id))
            .ok_or_else(|| unknown_message(class, msg_id))
    }
}

fn unknown_message(class: u8, msg_id: u8) -> LayoutError {
    debug!("no layout for ({:#04x}, {:#04x})", class, msg_id);
    LayoutError::UnknownMessageType { class, id: msg_id }
}
