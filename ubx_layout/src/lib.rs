//! # ubx_layout
//!
//! Fixed-layout message bodies for the u-blox UBX protocol. A message body is
//! a fixed run of little-endian fields, optionally followed by any number of
//! equally sized records. Frame sync, length and checksum handling live
//! elsewhere: everything here starts from a bare payload.
//!
//! Declaring messages
//! ==================
//!
//! Messages are plain structs run through [`macro@ubx_message`], records
//! through [`macro@ubx_record`]. The macros check that the fields add up to
//! the declared length and generate an owned type, a borrowed `XxxRef` view
//! and the [`FixedLayout`]/[`UbxMessage`] impls.
//!
//! Reading payloads
//! ================
//!
//! ```
//! use ubx_layout::{match_message, MessageRef};
//!
//! let payload = [
//!     0xb0, 0x1b, 0x48, 0x14, 0x01, 0x01, 0x00, 0x00, // NAV-SAT fixed body
//!     0x00, 0x01, 0x21, 0x01, 0x8a, 0x00, 0x18, 0xfd, 0x17, 0x09, 0x00, 0x00,
//! ];
//! match match_message(0x01, 0x35, &payload) {
//!     Ok(MessageRef::NavSat(sat)) => {
//!         assert_eq!(sat.num_svs(), 1);
//!         for sv in sat.records().unwrap() {
//!             assert_eq!(sv.cno(), 33);
//!         }
//!     }
//!     Ok(MessageRef::Unknown(_)) => {
//!         // Not a message this crate knows about
//!     }
//!     Ok(_) => {}
//!     Err(_) => {
//!         // Payload too short for the fixed body
//!     }
//! }
//! ```
//!
//! Building payloads
//! =================
//!
//! ```
//! use ubx_layout::{CfgRxm, CfgRxmLpMode, FixedLayout};
//!
//! let payload: [u8; 2] = CfgRxm::new(CfgRxmLpMode::PowerSave).to_bytes();
//! assert_eq!(payload, [0x08, 0x01]);
//!
//! let mut buf = [0u8; 16];
//! let n = CfgRxm::new(CfgRxmLpMode::Continuous).encode_into(&mut buf).unwrap();
//! assert_eq!(&buf[..n], &[0x08, 0x00]);
//! ```
//!
//! no_std Support
//! ==============
//!
//! Views, iterators and [`StaticRegistry`] need no allocator. Disable the
//! default features to drop `std`, enable `alloc` to keep [`Registry`] and
//! the `Vec`-returning encoders.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;
extern crate core;
#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    codec::{decode_fixed_body, ByteView, FixedLayout, FixedView},
    descriptor::MessageDescriptor,
    error::LayoutError,
    iter::RepeatedIter,
    registry::{MessageLookup, RawMessage, StaticRegistry},
    ubx_packets::*,
};
#[cfg(feature = "alloc")]
pub use crate::registry::Registry;
pub use ubx_layout_derive::{ubx_message, ubx_record};

mod codec;
mod descriptor;
mod error;
mod iter;
mod registry;
pub mod text;
mod ubx_packets;
