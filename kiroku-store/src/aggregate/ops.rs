//! Stock aggregator constructors.
//!
//! All combine operators here are associative and commutative, as the
//! sharded fold requires.

use super::Aggregator;

pub fn sum_i64() -> Aggregator<i64> {
    Aggregator {
        zero: 0,
        seq_op: |a, b| a + b,
        comb_op: |a, b| a + b,
    }
}

pub fn sum_f64() -> Aggregator<f64> {
    Aggregator {
        zero: 0.0,
        seq_op: |a, b| a + b,
        comb_op: |a, b| a + b,
    }
}

pub fn min_i64() -> Aggregator<i64> {
    Aggregator {
        zero: i64::MAX,
        seq_op: |a, b| a.min(b),
        comb_op: |a, b| a.min(b),
    }
}

pub fn max_i64() -> Aggregator<i64> {
    Aggregator {
        zero: i64::MIN,
        seq_op: |a, b| a.max(b),
        comb_op: |a, b| a.max(b),
    }
}

pub fn min_f64() -> Aggregator<f64> {
    Aggregator {
        zero: f64::INFINITY,
        seq_op: |a, b| a.min(b),
        comb_op: |a, b| a.min(b),
    }
}

pub fn max_f64() -> Aggregator<f64> {
    Aggregator {
        zero: f64::NEG_INFINITY,
        seq_op: |a, b| a.max(b),
        comb_op: |a, b| a.max(b),
    }
}

/// Counts updates: the sequential operator ignores the value, the combine
/// operator sums per-slot counts.
pub fn count() -> Aggregator<u64> {
    Aggregator {
        zero: 0,
        seq_op: |a, _| a + 1,
        comb_op: |a, b| a + b,
    }
}
