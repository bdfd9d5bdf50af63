use proptest::prelude::*;
use ubx_layout::{
    decode_fixed_body, match_message, text::text_array, FixedLayout, FixedView, LayoutError,
    MessageDescriptor, MessageLookup, MonVer, MonVerExtension, MonVerExtensionRef, NavSat,
    NavSatSvInfo, NavSatSvInfoRef, Registry, RepeatedIter, RepeatedMessage, UbxMessage,
    BUILTIN_MESSAGES,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn version_payload(extensions: &[&str]) -> Vec<u8> {
    let body = MonVer {
        software_version: text_array("ROM CORE 3.01 (107888)"),
        hardware_version: text_array("00080000"),
    };
    let records: Vec<MonVerExtension> = extensions
        .iter()
        .map(|e| MonVerExtension::new(e))
        .collect();
    body.encode_with_records(&records)
}

#[test]
fn test_version_layout() {
    init_logger();
    let descriptor = MonVer::DESCRIPTOR;
    assert_eq!(descriptor.fixed_len, 40);
    assert_eq!(descriptor.record_len, 30);
    assert_eq!(descriptor.size(0), 40);
    assert_eq!(descriptor.size(2), 100);

    let payload = version_payload(&["FWVER=SPG 3.01", "PROTVER=18.00"]);
    assert_eq!(payload.len(), 100);
    assert_eq!(descriptor.repeat_count(100), Ok(2));
    let extensions: Vec<&str> = MonVer::iterate(&payload)
        .unwrap()
        .map(|r| r.extension_str().unwrap())
        .collect();
    assert_eq!(extensions, ["FWVER=SPG 3.01", "PROTVER=18.00"]);

    assert_eq!(
        MonVer::iterate(&payload[..95]).unwrap_err(),
        LayoutError::AlignmentMismatch {
            message: "MonVer",
            trailing: 55,
            record_len: 30,
        }
    );
    assert_eq!(
        MonVer::decode(&payload[..30]).unwrap_err(),
        LayoutError::LengthMismatch {
            message: "MonVer",
            expect: 40,
            got: 30,
        }
    );
}

#[test]
fn test_lookup() {
    init_logger();
    let registry = Registry::with_builtin_messages();
    for lookup in [&registry as &dyn MessageLookup, &BUILTIN_MESSAGES] {
        let descriptor = lookup.lookup(0x0a, 0x04).unwrap();
        assert_eq!(*descriptor, MonVer::DESCRIPTOR);
        let err = lookup.lookup(0x0a, 0x05).unwrap_err();
        assert_eq!(err, LayoutError::UnknownMessageType { class: 0x0a, id: 0x05 });
        assert!(err.is_unknown_message());
    }
}

#[test]
fn test_custom_registration() {
    init_logger();
    let mut registry = Registry::new();
    registry.register_message::<MonVer>().unwrap();
    let custom = MessageDescriptor::new("Custom", 0xf5, 0x01, 3, 5);
    registry.register(custom).unwrap();
    assert_eq!(
        registry.register(custom),
        Err(LayoutError::DuplicateMessageType { class: 0xf5, id: 0x01 })
    );

    let payload = [1, 2, 3, 10, 11, 12, 13, 14, 20, 21, 22, 23, 24];
    let msg = registry.decode(0xf5, 0x01, &payload).unwrap();
    assert_eq!(msg.fixed_body(), &[1, 2, 3]);
    assert_eq!(msg.repeat_count(), Ok(2));
    let firsts: Vec<u8> = msg.records().unwrap().map(|r| r[0]).collect();
    assert_eq!(firsts, [10, 20]);
}

#[test]
fn test_iterator_from_decoded_body() {
    let mut buf = version_payload(&["GPS;GLO;GAL;BDS", "SBAS;IMES;QZSS"]);
    // a larger read buffer holding one message
    let total_len = buf.len();
    buf.extend_from_slice(&[0xff; 7]);

    let body = MonVer::decode(&buf).unwrap();
    let it: RepeatedIter<'_, MonVerExtensionRef<'_>> =
        RepeatedIter::from_body(body, total_len, &MonVer::DESCRIPTOR).unwrap();
    let exts: Vec<&str> = it.map(|r| r.extension_str().unwrap()).collect();
    assert_eq!(exts, ["GPS;GLO;GAL;BDS", "SBAS;IMES;QZSS"]);

    assert!(matches!(
        RepeatedIter::<&[u8]>::from_body(body, buf.len() + 1, &MonVer::DESCRIPTOR),
        Err(LayoutError::LengthMismatch { .. })
    ));
}

#[test]
fn test_short_buffers_never_build_views() {
    init_logger();
    let payload = version_payload(&[]);
    for len in 0..MonVer::LEN {
        let short = &payload[..len];
        let expected = LayoutError::LengthMismatch {
            message: "MonVer",
            expect: 40,
            got: len,
        };
        assert_eq!(MonVer::decode(short).unwrap_err(), expected);
        assert_eq!(decode_fixed_body::<MonVer>(short).unwrap_err(), expected);
        assert_eq!(match_message(0x0a, 0x04, short).unwrap_err(), expected);
    }
    assert!(matches!(
        decode_fixed_body::<MonVerExtension>(&payload[..29]),
        Err(LayoutError::LengthMismatch {
            expect: 30,
            got: 29,
            ..
        })
    ));

    // records narrower than the view they are read as
    let narrow = MessageDescriptor::new("Narrow", 0xf0, 0x02, 0, 4);
    assert_eq!(
        RepeatedIter::<NavSatSvInfoRef>::new(&[0; 8], &narrow).unwrap_err(),
        LayoutError::LengthMismatch {
            message: "Narrow",
            expect: 12,
            got: 4,
        }
    );
}

fn descriptor_strategy() -> impl Strategy<Value = MessageDescriptor> {
    (0..64usize, 0..32usize).prop_map(|(fixed_len, record_len)| {
        MessageDescriptor::new("Arbitrary", 0xf0, 0x00, fixed_len, record_len)
    })
}

proptest! {
    #[test]
    fn test_size_is_linear(descriptor in descriptor_strategy(), n in 0..100usize) {
        prop_assert_eq!(
            descriptor.size(n),
            descriptor.fixed_len + n * descriptor.record_len
        );
    }

    #[test]
    fn test_whole_records_are_counted(descriptor in descriptor_strategy(), n in 0..50usize) {
        prop_assume!(descriptor.record_len > 0);
        let payload: Vec<u8> = (0..descriptor.size(n)).map(|i| i as u8).collect();
        prop_assert_eq!(descriptor.repeat_count(payload.len()), Ok(n));

        let records: Vec<&[u8]> = RepeatedIter::new(&payload, &descriptor).unwrap().collect();
        prop_assert_eq!(records.len(), n);
        for (i, record) in records.iter().enumerate() {
            let start = descriptor.size(i);
            prop_assert_eq!(*record, &payload[start..start + descriptor.record_len]);
        }
    }

    #[test]
    fn test_partial_record_is_refused(
        descriptor in descriptor_strategy(),
        n in 0..50usize,
        partial in 1..32usize,
    ) {
        prop_assume!(partial < descriptor.record_len);
        let len = descriptor.size(n) + partial;
        prop_assert_eq!(
            descriptor.repeat_count(len),
            Err(LayoutError::AlignmentMismatch {
                message: "Arbitrary",
                trailing: n * descriptor.record_len + partial,
                record_len: descriptor.record_len,
            })
        );
    }

    #[test]
    fn test_short_payload_is_refused(descriptor in descriptor_strategy(), short in 1..64usize) {
        prop_assume!(short <= descriptor.fixed_len);
        let len = descriptor.fixed_len - short;
        prop_assert_eq!(
            descriptor.repeat_count(len),
            Err(LayoutError::LengthMismatch {
                message: "Arbitrary",
                expect: descriptor.fixed_len,
                got: len,
            })
        );
        let payload = vec![0u8; len];
        prop_assert!(descriptor.fixed_body(&payload).is_err());
    }

    #[test]
    fn test_encoded_body_reads_back(
        software in "[ -~]{0,30}",
        hardware in "[0-9A-F]{0,10}",
    ) {
        let mut body = MonVer {
            software_version: [0; 30],
            hardware_version: [0; 10],
        };
        body.set_software_version(&software);
        body.set_hardware_version(&hardware);
        let bytes = body.to_bytes();
        let view = MonVer::decode(&bytes).unwrap();
        prop_assert_eq!(view.software_version_str().unwrap(), software.as_str());
        prop_assert_eq!(view.hardware_version_str().unwrap(), hardware.as_str());
        prop_assert_eq!(body.encode(), bytes.to_vec());
    }

    #[test]
    fn test_numeric_fields_round_trip(
        itow in any::<u32>(),
        version in any::<u8>(),
        num_svs in any::<u8>(),
        reserved0 in any::<[u8; 2]>(),
        sv in (
            any::<u8>(),
            any::<u8>(),
            any::<u8>(),
            any::<i8>(),
            any::<i16>(),
            any::<i16>(),
            any::<u32>(),
        ),
    ) {
        let body = NavSat {
            itow,
            version,
            num_svs,
            reserved0,
        };
        prop_assert_eq!(NavSat::decode(&body.to_bytes()).unwrap().into_owned(), body);

        let (gnss_id, sv_id, cno, elev, azim, pr_res, flags) = sv;
        let info = NavSatSvInfo {
            gnss_id,
            sv_id,
            cno,
            elev,
            azim,
            pr_res,
            flags,
        };
        prop_assert_eq!(NavSatSvInfo::decode(&info.to_bytes()).unwrap().into_owned(), info);

        let payload = body.encode_with_records(&[info, info]);
        let decoded: Vec<NavSatSvInfo> = NavSat::iterate(&payload)
            .unwrap()
            .map(FixedView::into_owned)
            .collect();
        prop_assert_eq!(decoded, vec![info, info]);
    }
}
