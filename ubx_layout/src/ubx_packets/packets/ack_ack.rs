use ubx_layout_derive::ubx_message;

use crate::ubx_packets::UbxMessage;

/// Message acknowledged
#[ubx_message]
#[ubx(class = 0x05, id = 0x01, fixed_payload_len = 2)]
pub struct AckAck {
    /// Class ID of the acknowledged message
    class: u8,
    /// Message ID of the acknowledged message
    msg_id: u8,
}

impl AckAckRef<'_> {
    pub fn is_ack_for<T: UbxMessage>(&self) -> bool {
        self.class() == T::CLASS && self.msg_id() == T::ID
    }
}

impl AckAck {
    pub fn for_message<T: UbxMessage>() -> Self {
        Self {
            class: T::CLASS,
            msg_id: T::ID,
        }
    }
}
