//! Fair interleaving of grouped participants under a shared capacity.
//!
//! One pass of `flat_zip` takes column-major sweeps across the groups: the
//! first entry of every group, then the second of every group, and so on,
//! until the limit is hit or every group runs dry. Groups are visited in
//! declaration order, so ties inside a sweep break toward earlier groups.
//! Larger groups keep contributing after smaller ones empty out, but never
//! at the cost of another group's earlier entries.

use std::collections::VecDeque;

/// Interleave `groups` round-robin into a single sequence of at most `limit`
/// entries. Order within each group is preserved; relative order across
/// groups follows the sweep. Deterministic for identical input.
pub fn flat_zip<T>(groups: Vec<Vec<T>>, limit: usize) -> Vec<T> {
    if limit == 0 {
        return Vec::new();
    }

    let mut queues: Vec<VecDeque<T>> = groups.into_iter().map(VecDeque::from).collect();
    let mut out = Vec::with_capacity(limit.min(queues.iter().map(VecDeque::len).sum()));

    'sweep: loop {
        let mut emitted = false;
        for queue in &mut queues {
            if let Some(item) = queue.pop_front() {
                out.push(item);
                emitted = true;
                if out.len() == limit {
                    break 'sweep;
                }
            }
        }
        if !emitted {
            break;
        }
    }

    out
}
