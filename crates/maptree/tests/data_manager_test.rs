use maptree::data_manager::DataManager;
use maptree::error::MapTreeError;

fn toy_dataset() -> (Vec<Vec<bool>>, Vec<bool>) {
    let features = vec![
        vec![true, false, true],
        vec![false, false, true],
        vec![true, true, false],
        vec![false, true, false],
        vec![true, false, false],
    ];
    let labels = vec![true, false, true, false, true];
    (features, labels)
}

fn mask_bit(mask: &maptree::fixed_bitset::FixedBitset, i: usize) -> bool {
    mask.get_block(i / 64) >> (i % 64) & 1 == 1
}

#[test]
fn feature_masks_match_the_data() {
    let (features, labels) = toy_dataset();
    let dm = DataManager::new(&features, &labels).unwrap();

    assert_eq!(dm.num_samples(), 5);
    assert_eq!(dm.num_features(), 3);

    for f in 0..dm.num_features() {
        for (i, row) in features.iter().enumerate() {
            assert_eq!(mask_bit(dm.feature_mask(f, true), i), row[f]);
            assert_eq!(mask_bit(dm.feature_mask(f, false), i), !row[f]);
        }
    }
}

#[test]
fn label_masks_partition_the_samples() {
    let (features, labels) = toy_dataset();
    let dm = DataManager::new(&features, &labels).unwrap();

    for (i, &label) in labels.iter().enumerate() {
        assert_eq!(mask_bit(dm.label_mask(true), i), label);
        assert_eq!(mask_bit(dm.label_mask(false), i), !label);
    }
}

#[test]
fn rejects_empty_dataset() {
    let err = DataManager::new(&[], &[]).unwrap_err();
    assert!(matches!(err, MapTreeError::InvalidInput(_)));
}

#[test]
fn rejects_zero_features() {
    let err = DataManager::new(&[vec![]], &[true]).unwrap_err();
    assert!(matches!(err, MapTreeError::InvalidInput(_)));
}

#[test]
fn rejects_ragged_rows() {
    let features = vec![vec![true, false], vec![true]];
    let err = DataManager::new(&features, &[true, false]).unwrap_err();
    match err {
        MapTreeError::InvalidInput(msg) => assert!(msg.contains("row 1"), "unexpected: {msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_label_length_mismatch() {
    let features = vec![vec![true], vec![false]];
    let err = DataManager::new(&features, &[true]).unwrap_err();
    assert!(matches!(err, MapTreeError::InvalidInput(_)));
}
