//! # Aggregate Tests
//!
//! Versioned aggregate semantics: per-slot sequential folds, cross-slot
//! combines, and multi-threaded update streams.

use std::sync::{Arc, Barrier};
use std::thread;

use kiroku_core::ConcurrencyConfig;
use kiroku_store::aggregate::{ops, Aggregate, AggregateList};

mod list_tests {
    use super::*;

    #[test]
    fn test_sequential_fold_matches_manual_fold() {
        let list = AggregateList::new(ops::sum_i64());
        let values = [3i64, -1, 10, 7, 2];
        let mut expected = 0;
        for (i, &value) in values.iter().enumerate() {
            expected += value;
            list.seq_update(value, (i + 1) as u64);
            assert_eq!(list.get((i + 1) as u64), expected);
        }
        assert_eq!(list.get(values.len() as u64), expected);
        assert_eq!(list.get(0), 0);
    }

    #[test]
    fn test_version_gaps_resolve_to_latest_at_or_below() {
        let list = AggregateList::new(ops::sum_i64());
        list.seq_update(10, 2);
        list.seq_update(5, 8);

        assert_eq!(list.get(1), 0);
        assert_eq!(list.get(2), 10);
        assert_eq!(list.get(5), 10);
        assert_eq!(list.get(8), 15);
        assert_eq!(list.get(u64::MAX), 15);
    }

    #[test]
    fn test_comb_update_on_list() {
        let list = AggregateList::new(ops::max_i64());
        list.comb_update(4, 1);
        list.comb_update(9, 2);
        list.comb_update(2, 3);
        assert_eq!(list.get(1), 4);
        assert_eq!(list.get(2), 9);
        assert_eq!(list.get(3), 9);
        assert_eq!(list.zero(), i64::MIN);
    }

    #[test]
    fn test_concurrent_readers_during_updates() {
        let list = Arc::new(AggregateList::new(ops::sum_i64()));
        let writer = {
            let list = Arc::clone(&list);
            thread::spawn(move || {
                for v in 1..=10_000u64 {
                    list.seq_update(1, v);
                }
            })
        };

        // A single writer updates while readers poll: any observed value at
        // version v must equal some prefix length <= v.
        for _ in 0..200 {
            let at = list.get(5_000);
            assert!(at <= 5_000);
            let total = list.get(u64::MAX);
            assert!(total <= 10_000);
        }
        writer.join().unwrap();
        assert_eq!(list.get(5_000), 5_000);
        assert_eq!(list.get(10_000), 10_000);
    }
}

mod aggregate_tests {
    use super::*;

    #[test]
    fn test_fold_across_slots() {
        let agg = Aggregate::new(ops::sum_i64(), 4);
        assert_eq!(agg.num_slots(), 4);
        agg.seq_update(0, 10, 1);
        agg.seq_update(1, 20, 1);
        agg.seq_update(2, 30, 2);
        assert_eq!(agg.get(0), 0);
        assert_eq!(agg.get(1), 30);
        assert_eq!(agg.get(2), 60);
    }

    #[test]
    fn test_min_max_and_count() {
        let min = Aggregate::new(ops::min_i64(), 2);
        min.seq_update(0, 12, 1);
        min.seq_update(1, -3, 1);
        assert_eq!(min.get(1), -3);
        assert_eq!(min.get(0), i64::MAX);

        let max = Aggregate::new(ops::max_f64(), 2);
        max.seq_update(0, 1.5, 1);
        max.seq_update(1, 2.25, 1);
        assert_eq!(max.get(1), 2.25);

        let count = Aggregate::new(ops::count(), 2);
        count.seq_update(0, 99, 1);
        count.seq_update(0, 99, 2);
        count.seq_update(1, 99, 2);
        assert_eq!(count.get(2), 3);
        assert_eq!(count.get(1), 1);
    }

    #[test]
    fn test_comb_update_merges_across_versions() {
        let agg = Aggregate::new(ops::sum_i64(), 2);
        agg.comb_update(0, 5, 1);
        agg.comb_update(0, 5, 2);
        agg.comb_update(1, 7, 2);
        assert_eq!(agg.get(1), 5);
        assert_eq!(agg.get(2), 17);
    }

    #[test]
    fn test_threaded_update_streams() {
        let threads = 4usize;
        let config = ConcurrencyConfig {
            max_threads: threads,
        };
        let agg = Arc::new(Aggregate::with_config(ops::sum_i64(), &config));
        assert_eq!(agg.num_slots(), threads);
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|slot| {
                let agg = Arc::clone(&agg);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for v in 1..=100u64 {
                        agg.seq_update(slot, 1, v);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(agg.get(100), 400);
        assert_eq!(agg.get(50), 200);
        assert_eq!(agg.get(0), 0);
    }

    #[test]
    #[should_panic]
    fn test_zero_slots_rejected() {
        let _ = Aggregate::new(ops::sum_i64(), 0);
    }
}
