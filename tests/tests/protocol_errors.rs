//! Malformed frames are fatal for the frame; bad entries are only reported.

use std::io::Cursor;

use fixity_tests::prelude::*;

fn sample_bytes(config: &ExchangeConfig) -> Vec<u8> {
    let nodes = grid_nodes(3);
    encode_nested(&mixed_container(&nodes, 2, 1, 1), config).unwrap()
}

#[test]
fn test_truncated_frame() {
    let config = ExchangeConfig::default();
    let bytes = sample_bytes(&config);

    for cut in [4, 8 * 4, bytes.len() / 2, bytes.len() - 1] {
        let mut target = ConstraintContainer::new();
        let result = decode_nested(&mut target, &bytes[..cut], &config);
        assert!(
            matches!(result, Err(ExchangeError::Truncated { .. })),
            "cut at {}: {:?}",
            cut,
            result
        );
    }
}

#[test]
fn test_manifest_count_mismatch() {
    // GIVEN - the count word claims one entry fewer than the blocks hold
    let config = ExchangeConfig::default();
    let mut bytes = sample_bytes(&config);
    bytes[16] -= 1;

    // WHEN
    let result = decode_nested(&mut ConstraintContainer::new(), &bytes, &config);

    // THEN
    assert!(matches!(
        result,
        Err(ExchangeError::CountMismatch {
            declared: 3,
            actual: 4,
            ..
        })
    ));
}

#[test]
fn test_trailing_bytes() {
    let config = ExchangeConfig::default();
    let mut bytes = sample_bytes(&config);
    bytes.push(0);

    let result = decode_nested(&mut ConstraintContainer::new(), &bytes, &config);

    assert!(matches!(result, Err(ExchangeError::TrailingBytes(1))));
}

#[test]
fn test_wrong_frame_kind() {
    let config = ExchangeConfig::default();
    let bytes = sample_bytes(&config);

    let result = decode_nested(&mut HypothesisRegistry::new(), &bytes, &config);

    assert!(matches!(result, Err(ExchangeError::WrongKind { .. })));
}

#[test]
fn test_oversized_frame() {
    let nodes = grid_nodes(3);
    let big = mixed_container(&nodes, 200, 0, 0);
    let config = ExchangeConfig::minimal();

    let result = encode_nested(&big, &config);

    assert!(matches!(result, Err(ExchangeError::Oversized { .. })));
}

#[test]
fn test_truncated_stream_frame() {
    // GIVEN - the stream ends halfway through the frame bytes
    let peer = PeerTag::new(1);
    let mut channel = StreamChannel::new(Cursor::new(Vec::new()));
    send_self(&mixed_container(&grid_nodes(3), 2, 0, 0), &mut channel, peer).unwrap();
    let mut written = channel.into_inner().into_inner();
    written.truncate(written.len() - 5);
    let mut channel = StreamChannel::new(Cursor::new(written));

    // WHEN
    let result = recv_self(&mut ConstraintContainer::new(), &mut channel, peer);

    // THEN
    assert!(matches!(result, Err(ExchangeError::Truncated { .. })));
}

#[test]
fn test_bad_entry_does_not_abort_frame() {
    // GIVEN - entry 1 of 3 carries garbage
    let config = ExchangeConfig::default();
    let source = mixed_container(&grid_nodes(3), 3, 0, 0);
    let good = source.send_data(&config).unwrap();
    let mut body = FrameBody::new(FrameKind::Container, 0, good.next_tag());
    for (i, label, payload) in good.entries() {
        let payload = if i == 1 { vec![0xff] } else { payload.to_vec() };
        body.push_entry(label, payload);
    }
    body.set_trailer(good.trailer().to_vec());
    let bytes = body.encode(&config).unwrap();

    // WHEN
    let mut target = ConstraintContainer::new();
    let report = decode_nested(&mut target, &bytes, &config).unwrap();

    // THEN
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.failures[0].index, Some(1));
    assert_eq!(report.restored_count(), 2);
    Counts::new().single(2).assert(&target);
    assert!(target.get(ConstraintTag::new(1)).is_none());
}

#[test]
fn test_exhausted_container_counter_is_rejected() {
    // GIVEN - a container frame whose counter has nothing left to issue
    let config = ExchangeConfig::default();
    let mut body = FrameBody::new(FrameKind::Container, 0, u64::MAX);
    body.set_trailer_value(&Vec::<PatternTag>::new(), &config).unwrap();
    let bytes = body.encode(&config).unwrap();

    // WHEN
    let mut target = ConstraintContainer::new();
    let result = decode_nested(&mut target, &bytes, &config);

    // THEN - the frame is refused and the container still issues tags
    assert!(matches!(
        result,
        Err(ExchangeError::TagCounterOutOfRange { next_tag: u64::MAX })
    ));
    let dof = DofRef::new(NodeId::new(1), 0);
    let sp = SingleFreedom::fixed(&grid_nodes(1), dof, PatternTag::new(0)).unwrap();
    assert_eq!(target.add(sp), Ok(ConstraintTag::new(0)));
}

#[test]
fn test_exhausted_registry_counter_is_rejected() {
    // GIVEN
    let config = ExchangeConfig::default();
    let mut body = FrameBody::new(FrameKind::Registry, 0, u64::MAX);
    body.set_trailer_value(&None::<String>, &config).unwrap();
    let bytes = body.encode(&config).unwrap();

    // WHEN
    let mut target = HypothesisRegistry::new();
    let result = decode_nested(&mut target, &bytes, &config);

    // THEN
    assert!(matches!(result, Err(ExchangeError::TagCounterOutOfRange { .. })));
    let created = target.create("X").map(|h| h.tag());
    assert_eq!(created, Some(HypothesisTag::new(0)));
}

#[test]
fn test_entry_at_last_tag_is_reported() {
    // GIVEN - entry 0 claims the last representable tag, entry 1 is ordinary
    let config = ExchangeConfig::default();
    let nodes = grid_nodes(1);
    let dof = DofRef::new(NodeId::new(1), 0);
    let sp = SingleFreedom::fixed(&nodes, dof, PatternTag::new(0)).unwrap();
    let payload = encode_payload(&sp, &config).unwrap();
    let last = ConstraintTag::new(u64::MAX);
    let mut body = FrameBody::new(FrameKind::Container, 0, 5);
    body.push_entry(entry_label(ConstraintKind::SingleFreedom, last), payload.clone());
    body.push_entry(entry_label(ConstraintKind::SingleFreedom, ConstraintTag::new(4)), payload);
    body.set_trailer_value(&Vec::<PatternTag>::new(), &config).unwrap();
    let bytes = body.encode(&config).unwrap();

    // WHEN
    let mut target = ConstraintContainer::new();
    let report = decode_nested(&mut target, &bytes, &config).unwrap();

    // THEN - only the out-of-range entry fails and local tags keep increasing
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.failures[0].index, Some(0));
    assert!(report.failures[0].reason.contains("out of range"));
    assert!(!target.contains(last));
    assert_eq!(target.add(sp), Ok(ConstraintTag::new(5)));
}
