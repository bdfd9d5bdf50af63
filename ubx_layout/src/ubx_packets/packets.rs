use ubx_layout_derive::define_messages;

use super::UnknownMessageRef;

pub mod ack_ack;
pub mod cfg_gnss;
pub mod cfg_rxm;
pub mod mon_ver;
pub mod nav_sat;

pub use ack_ack::*;
pub use cfg_gnss::*;
pub use cfg_rxm::*;
pub use mon_ver::*;
pub use nav_sat::*;

define_messages!(
    enum MessageRef {
        _ = UnknownMessageRef,
        MonVer,
        NavSat,
        CfgGnss,
        CfgRxm,
        AckAck,
    }
);

#[cfg(test)]
mod test {
    use super::*;
    use crate::{LayoutError, MessageLookup, UbxPollRequest};

    #[test]
    fn test_match_message() {
        let payload = [0x48, 0x00];
        let msg = match_message(0x06, 0x11, &payload).unwrap();
        assert_eq!(msg.class_and_msg_id(), (0x06, 0x11));
        match msg {
            MessageRef::CfgRxm(rxm) => assert_eq!(rxm.reserved1(), 0x48),
            other => panic!("decoded as {:?}", other),
        }

        let msg = match_message(0x0a, 0x05, &payload).unwrap();
        assert_eq!(msg.class_and_msg_id(), (0x0a, 0x05));
        assert_eq!(msg.payload(), &payload);
        assert!(matches!(msg, MessageRef::Unknown(_)));

        assert_eq!(
            match_message(0x0a, 0x04, &payload).unwrap_err(),
            LayoutError::LengthMismatch {
                message: "MonVer",
                expect: 40,
                got: 2,
            }
        );
    }

    #[test]
    fn test_descriptor_table() {
        let names: Vec<&str> = MESSAGE_DESCRIPTORS.iter().map(|d| d.name).collect();
        assert_eq!(names, ["MonVer", "NavSat", "CfgGnss", "CfgRxm", "AckAck"]);
        let d = BUILTIN_MESSAGES.lookup(0x01, 0x35).unwrap();
        assert_eq!((d.fixed_len, d.record_len), (8, 12));
        let d = BUILTIN_MESSAGES.lookup(0x05, 0x01).unwrap();
        assert!(!d.has_records());
    }

    #[test]
    fn test_poll_request() {
        let poll = UbxPollRequest::request_for::<MonVer>();
        assert_eq!((poll.class, poll.msg_id), (0x0a, 0x04));
        assert!(poll.payload().is_empty());
        assert_eq!(
            UbxPollRequest::request_for::<CfgGnss>(),
            UbxPollRequest::request_for_unknown(0x06, 0x3e)
        );
    }
}
