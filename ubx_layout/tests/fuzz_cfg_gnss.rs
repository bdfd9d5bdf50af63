//! A proptest generator for CFG-GNSS payloads, checked through decode and
//! re-encode.

use byteorder::{LittleEndian, WriteBytesExt};
use proptest::prelude::*;
use ubx_layout::{CfgGnss, CfgGnssBlock, FixedView, RepeatedMessage};

#[derive(Debug, Clone)]
pub struct GnssBlock {
    pub gnss_id: u8,
    pub res_trk_ch: u8,
    pub max_trk_ch: u8,
    pub reserved1: u8,
    pub flags: u32,
}

fn block_strategy() -> impl Strategy<Value = GnssBlock> {
    (0..=6u8, any::<u8>(), any::<u8>(), any::<u8>(), any::<u32>()).prop_map(
        |(gnss_id, res_trk_ch, max_trk_ch, reserved1, flags)| GnssBlock {
            gnss_id,
            res_trk_ch,
            max_trk_ch,
            reserved1,
            flags,
        },
    )
}

fn cfg_gnss_payload_strategy() -> impl Strategy<Value = (Vec<GnssBlock>, Vec<u8>)> {
    (
        any::<u8>(),
        any::<u8>(),
        prop::collection::vec(block_strategy(), 0..=16),
    )
        .prop_map(|(hw, used, blocks)| {
            let mut wtr = Vec::with_capacity(4 + blocks.len() * 8);
            wtr.push(0);
            wtr.push(hw);
            wtr.push(used);
            wtr.push(blocks.len() as u8);
            for b in &blocks {
                wtr.push(b.gnss_id);
                wtr.push(b.res_trk_ch);
                wtr.push(b.max_trk_ch);
                wtr.push(b.reserved1);
                wtr.write_u32::<LittleEndian>(b.flags).unwrap();
            }
            (blocks, wtr)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn test_generated_cfg_gnss_payloads((expected, payload) in cfg_gnss_payload_strategy()) {
        let cfg = CfgGnss::decode(&payload).unwrap();
        prop_assert_eq!(cfg.num_config_blocks() as usize, expected.len());

        let blocks: Vec<CfgGnssBlock> = CfgGnss::iterate(&payload)
            .unwrap()
            .map(|b| b.into_owned())
            .collect();
        prop_assert_eq!(blocks.len(), expected.len());
        for (block, exp) in blocks.iter().zip(&expected) {
            prop_assert_eq!(block.gnss_id, exp.gnss_id);
            prop_assert_eq!(block.res_trk_ch, exp.res_trk_ch);
            prop_assert_eq!(block.max_trk_ch, exp.max_trk_ch);
            prop_assert_eq!(block.reserved1, exp.reserved1);
            prop_assert_eq!(block.flags, exp.flags);
        }

        let body = cfg.into_owned();
        prop_assert_eq!(body.encode_with_records(&blocks), payload.clone());

        let mut extended: Vec<u8> = Vec::new();
        let written = body.extend_with_records(&mut extended, blocks.iter().rev());
        prop_assert_eq!(written, payload.len());
        let reversed: Vec<u8> = CfgGnss::iterate(&extended)
            .unwrap()
            .rev()
            .map(|b| b.gnss_id())
            .collect();
        let original: Vec<u8> = expected.iter().map(|b| b.gnss_id).collect();
        prop_assert_eq!(reversed, original);
    }
}
