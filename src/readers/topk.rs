// src/readers/topk.rs

//! Implements a [`TopKSelector`], a bounded selection of the longest-duration
//! [`Record`s].
//!
//! [`TopKSelector`]: self::TopKSelector
//! [`Record`s]: crate::data::record::Record

use crate::common::Count;
use crate::config::{validate_top, ConfigError};
use crate::data::record::{Record, Records};

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ::more_asserts::debug_assert_le;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// A `Record` with its arrival order.
#[derive(Debug)]
struct Entry {
    record: Record,
    seq: Count,
}

/// Ordered so the `BinaryHeap` root is the entry to evict: the shortest
/// duration and, among equal durations, the latest arrival.
impl Ord for Entry {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        other
            .record
            .duration()
            .cmp(&self.record.duration())
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Keeps the `k` longest-duration `Record`s offered so far.
///
/// Once full, an offered record replaces the current shortest only if its
/// duration is strictly greater, so among equal durations the earliest
/// offered is kept. Each `offer` is O(log k).
#[derive(Debug)]
pub struct TopKSelector {
    k: usize,
    heap: BinaryHeap<Entry>,
    /// arrival counter
    seq: Count,
}

impl TopKSelector {
    /// Create a selector of capacity `k`. `k == 0` is a [`ConfigError`].
    pub fn new(k: usize) -> Result<TopKSelector, ConfigError> {
        let k: usize = validate_top(k)?;

        Ok(TopKSelector {
            k,
            heap: BinaryHeap::with_capacity(k + 1),
            seq: 0,
        })
    }

    pub const fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Offer one record. Returns `true` if it was kept.
    pub fn offer(
        &mut self,
        record: Record,
    ) -> bool {
        let seq: Count = self.seq;
        self.seq += 1;
        if self.heap.len() < self.k {
            self.heap.push(Entry { record, seq });
            return true;
        }
        match self.heap.peek() {
            Some(min) if record.duration() > min.record.duration() => {
                defñ!("evict {:?} for {:?}", min.record.duration(), record.duration());
                self.heap.pop();
                self.heap.push(Entry { record, seq });
                debug_assert_le!(self.heap.len(), self.k);
                true
            }
            _ => false,
        }
    }

    /// Offer every record in `records`, in order.
    pub fn offer_all(
        &mut self,
        records: Records,
    ) {
        for record in records.into_iter() {
            self.offer(record);
        }
    }

    /// The kept records, sorted by duration descending; equal durations in
    /// the order they were offered.
    pub fn results(&self) -> Records {
        let mut entries: Vec<&Entry> = self.heap.iter().collect();
        entries.sort_by(|a, b| {
            b.record
                .duration()
                .cmp(&a.record.duration())
                .then_with(|| a.seq.cmp(&b.seq))
        });

        entries
            .into_iter()
            .map(|entry| entry.record.clone())
            .collect()
    }

    /// Consume the selector and return [`results`](Self::results).
    pub fn into_results(self) -> Records {
        let mut entries: Vec<Entry> = self.heap.into_vec();
        entries.sort_by(|a, b| {
            b.record
                .duration()
                .cmp(&a.record.duration())
                .then_with(|| a.seq.cmp(&b.seq))
        });

        entries
            .into_iter()
            .map(|entry| entry.record)
            .collect()
    }
}
