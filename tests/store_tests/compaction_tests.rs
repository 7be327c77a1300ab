//! Store Compaction Tests
//!
//! Tests verify:
//! - Merge threshold: touching segments merge only up to `min_contiguous`
//! - Gaps are never bridged
//! - Cascading merges resolve within one write
//! - Idempotence of repeated identical writes
//! - Construction and configuration

use sparsestore::{Config, SparseError, Store, DEFAULT_MIN_CONTIGUOUS};

// =============================================================================
// Helper Functions
// =============================================================================

fn layout(store: &Store<u8>) -> Vec<(usize, usize)> {
    store
        .segments()
        .map(|(offset, data)| (offset, data.len()))
        .collect()
}

// =============================================================================
// Merge Threshold Tests
// =============================================================================

#[test]
fn test_never_merge_keeps_touching_segments_apart() {
    let mut store = Store::<u8>::with_min_contiguous(1).unwrap();
    for offset in 0..8 {
        store.set(offset, vec![offset as u8]);
    }

    assert_eq!(store.segment_count(), 8);
    assert!(store.has(0, 8));
}

#[test]
fn test_touching_segments_merge_up_to_threshold() {
    let mut store = Store::<u8>::with_min_contiguous(4).unwrap();
    store.set(0, vec![0, 1]);
    store.set(2, vec![2, 3]);
    assert_eq!(layout(&store), vec![(0, 4)]);

    store.set(4, vec![4]);
    assert_eq!(layout(&store), vec![(0, 4), (4, 1)]);

    store.set(5, vec![5, 6, 7]);
    assert_eq!(layout(&store), vec![(0, 4), (4, 4)]);
}

#[test]
fn test_gap_is_never_bridged() {
    let mut store = Store::<u8>::new();
    store.set(0, vec![1]);
    store.set(2, vec![1]);

    assert_eq!(layout(&store), vec![(0, 1), (2, 1)]);
    assert_eq!(store.occupancy(), 2);
}

#[test]
fn test_cascading_merge_in_one_write() {
    let mut store = Store::<u8>::new();
    for offset in (0..10).step_by(2) {
        store.set(offset, vec![1]);
    }
    assert_eq!(store.segment_count(), 5);

    // Each odd write closes one gap and joins both of its neighbours.
    for offset in [1, 3, 7] {
        store.set(offset, vec![2]);
    }
    assert_eq!(layout(&store), vec![(0, 5), (6, 3)]);

    store.set(5, vec![2]);
    assert_eq!(layout(&store), vec![(0, 9)]);
}

#[test]
fn test_write_across_many_segments_replaces_them() {
    let mut store = Store::<u8>::with_min_contiguous(1).unwrap();
    for offset in (0..20).step_by(4) {
        store.set(offset, vec![1, 1]);
    }
    assert_eq!(store.segment_count(), 5);

    store.set(1, vec![2; 16]);

    assert_eq!(layout(&store), vec![(0, 1), (1, 16), (17, 1)]);
    assert_eq!(store.occupancy(), 18);

    let mut buf = [0u8; 18];
    assert!(store.get(0, &mut buf));
    assert_eq!(buf[0], 1);
    assert!(buf[1..17].iter().all(|v| *v == 2));
    assert_eq!(buf[17], 1);
}

#[test]
fn test_default_threshold_bounds_segment_size() {
    let mut store = Store::<u8>::new();
    let chunk = DEFAULT_MIN_CONTIGUOUS / 4;
    for n in 0..8 {
        store.set(n * chunk, vec![n as u8; chunk]);
    }

    assert_eq!(
        layout(&store),
        vec![
            (0, DEFAULT_MIN_CONTIGUOUS),
            (DEFAULT_MIN_CONTIGUOUS, DEFAULT_MIN_CONTIGUOUS)
        ]
    );
}

// =============================================================================
// Idempotence Tests
// =============================================================================

#[test]
fn test_identical_writes_are_idempotent() {
    for min_contiguous in [1, 3, DEFAULT_MIN_CONTIGUOUS] {
        let writes: &[(usize, &[u8])] =
            &[(0, &[1, 2, 3]), (5, &[6, 7]), (2, &[9, 9, 9, 9])];

        let mut once = Store::with_min_contiguous(min_contiguous).unwrap();
        let mut twice = Store::with_min_contiguous(min_contiguous).unwrap();
        for (offset, data) in writes {
            once.set(*offset, data.to_vec());
            twice.set(*offset, data.to_vec());
            twice.set(*offset, data.to_vec());
        }

        assert_eq!(once.occupancy(), twice.occupancy());
        assert_eq!(once.length(), twice.length());

        let mut a = [0u8; 8];
        let mut b = [0u8; 8];
        assert_eq!(once.get(0, &mut a), twice.get(0, &mut b));
        assert_eq!(a, b);
    }
}

// =============================================================================
// Stats Tests
// =============================================================================

#[test]
fn test_stats_snapshot() {
    let mut store = Store::<u8>::with_min_contiguous(1).unwrap();
    store.set(0, vec![1, 2]);
    store.set(4, vec![3]);
    store.set(8, Vec::new());

    let stats = store.stats();
    assert_eq!(stats.length, 8);
    assert_eq!(stats.occupancy, 3);
    assert_eq!(stats.segments, 2);
    assert_eq!(stats.writes, 2);
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_default_store_uses_default_threshold() {
    let store = Store::<u8>::default();
    assert_eq!(store.min_contiguous(), DEFAULT_MIN_CONTIGUOUS);
    assert!(store.is_empty());
    assert_eq!(store.length(), 0);
    assert_eq!(store.occupancy(), 0);
}

#[test]
fn test_with_config() {
    let config = Config::builder().min_contiguous(64).build();
    let store = Store::<u8>::with_config(config).unwrap();

    assert_eq!(store.config(), &config);
    assert_eq!(store.min_contiguous(), 64);
}

#[test]
fn test_zero_threshold_rejected() {
    let result = Store::<u8>::with_min_contiguous(0);
    assert!(matches!(result, Err(SparseError::Config(_))));
}
