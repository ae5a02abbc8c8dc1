//! Per-step invariants and the completion cross-check
//!
//! `check` must hold after every single step, not only at the end. A failure
//! here is always a defect in a state machine.

use std::collections::HashSet;

use super::bubble::BubbleState;
use super::counting::{CountingPhase, CountingState};
use super::element::{Element, is_sorted};
use super::heap::{HeapState, children};
use super::insertion::InsertionState;
use super::merge::MergeState;
use super::quick::QuickState;
use super::radix::{RadixPhase, RadixState, digit_at};
use super::selection::SelectionState;
use super::state::{AlgorithmId, ExecutionState};
use crate::error::InvariantViolation;

type Check = std::result::Result<(), String>;

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Check {
    if condition { Ok(()) } else { Err(message()) }
}

/// Verify the invariant of whichever algorithm `state` belongs to
pub fn check(state: &ExecutionState) -> Result<(), InvariantViolation> {
    let result = unique_ids(state.dataset()).and_then(|()| match state {
        ExecutionState::Bubble(s) => check_bubble(s),
        ExecutionState::Selection(s) => check_selection(s),
        ExecutionState::Insertion(s) => check_insertion(s),
        ExecutionState::Merge(s) => check_merge(s),
        ExecutionState::Quick(s) => check_quick(s),
        ExecutionState::Heap(s) => check_heap(s),
        ExecutionState::Counting(s) => check_counting(s),
        ExecutionState::Radix(s) => check_radix(s),
    });
    let result = result.and_then(|()| {
        ensure(!state.is_complete() || is_sorted_by_key(state), || {
            "marked complete but not sorted".to_string()
        })
    });
    result.map_err(|message| InvariantViolation::new(state.algorithm(), message))
}

/// Whether the dataset is in final order: ascending by value, and for
/// counting sort also grouped by color rank
pub fn is_sorted_by_key(state: &ExecutionState) -> bool {
    let by_value = is_sorted(state.dataset());
    match state.algorithm() {
        AlgorithmId::Counting => {
            by_value
                && state
                    .dataset()
                    .windows(2)
                    .all(|w| w[0].tag.map(|c| c.rank()) <= w[1].tag.map(|c| c.rank()))
        }
        _ => by_value,
    }
}

fn unique_ids(dataset: &[Element]) -> Check {
    let mut seen = HashSet::with_capacity(dataset.len());
    ensure(dataset.iter().all(|e| seen.insert(e.id)), || {
        "an element id appears twice in the dataset".to_string()
    })
}

fn max_value(elements: &[Element]) -> Option<u32> {
    elements.iter().map(|e| e.value).max()
}

fn min_value(elements: &[Element]) -> Option<u32> {
    elements.iter().map(|e| e.value).min()
}

/// `[..split)` is all `<=` `[split..)`
fn partitioned_at(elements: &[Element], split: usize) -> bool {
    match (max_value(&elements[..split]), min_value(&elements[split..])) {
        (Some(low), Some(high)) => low <= high,
        _ => true,
    }
}

fn check_bubble(s: &BubbleState) -> Check {
    let end = s.unsorted_end();
    let tail = &s.dataset[end..];
    ensure(is_sorted(tail), || format!("tail {}.. is not sorted", end))?;
    ensure(partitioned_at(&s.dataset, end), || {
        format!("tail {}.. is smaller than the region before it", end)
    })?;
    ensure(s.complete || s.compare_index + 1 < end, || {
        format!("compare index {} past region end {}", s.compare_index, end)
    })
}

fn check_selection(s: &SelectionState) -> Check {
    let boundary = s.sorted_boundary;
    ensure(boundary <= s.dataset.len(), || {
        format!("boundary {} past the end", boundary)
    })?;
    ensure(is_sorted(&s.dataset[..boundary]), || {
        format!("prefix ..{} is not sorted", boundary)
    })?;
    ensure(partitioned_at(&s.dataset, boundary), || {
        format!("prefix ..{} exceeds the unsorted region", boundary)
    })
}

fn check_insertion(s: &InsertionState) -> Check {
    ensure(is_sorted(&s.destination), || {
        "destination is not sorted".to_string()
    })?;
    let visible: Vec<Element> = s
        .destination
        .iter()
        .chain(s.pending.iter())
        .chain(s.source_queue.iter())
        .copied()
        .collect();
    ensure(visible == s.dataset, || {
        "dataset does not mirror destination, pending and queue".to_string()
    })
}

fn check_merge(s: &MergeState) -> Check {
    ensure(is_sorted(&s.merged), || "merged run is not sorted".to_string())?;
    ensure(s.merged.len() == s.left_pointer + s.right_pointer, || {
        "merged length does not match consumed prefixes".to_string()
    })?;
    let left_ids: HashSet<u32> = s.left[..s.left_pointer].iter().map(|e| e.id).collect();
    let from_left: Vec<Element> = s
        .merged
        .iter()
        .filter(|e| left_ids.contains(&e.id))
        .copied()
        .collect();
    let from_right: Vec<Element> = s
        .merged
        .iter()
        .filter(|e| !left_ids.contains(&e.id))
        .copied()
        .collect();
    ensure(from_left == s.left[..s.left_pointer], || {
        "left prefix was reordered".to_string()
    })?;
    ensure(from_right == s.right[..s.right_pointer], || {
        "right prefix was reordered".to_string()
    })?;
    if let Some(last) = s.merged.last() {
        let pending = [s.left.get(s.left_pointer), s.right.get(s.right_pointer)];
        ensure(
            pending.iter().flatten().all(|e| last.value <= e.value),
            || "merged run overtook a pending element".to_string(),
        )?;
    }
    Ok(())
}

fn check_quick(s: &QuickState) -> Check {
    let data = &s.dataset;
    let mut settled = vec![false; data.len()];
    for &(start, end) in &s.sorted_ranges {
        ensure(start <= end && end < data.len(), || {
            format!("sorted range {}..={} out of bounds", start, end)
        })?;
        for index in start..=end {
            settled[index] = true;
            ensure(
                partitioned_at(data, index) && partitioned_at(data, index + 1),
                || format!("index {} is marked sorted but not final", index),
            )?;
        }
    }
    for &(start, end) in &s.range_stack {
        ensure(start < end && end < data.len(), || {
            format!("stacked range {}..={} is trivial or out of bounds", start, end)
        })?;
        ensure(!settled[start..=end].iter().any(|&x| x), || {
            format!("stacked range {}..={} overlaps a sorted index", start, end)
        })?;
    }
    if let Some(p) = s.active {
        let (start, end) = p.range;
        let pivot = data[p.pivot_index].value;
        ensure(
            start <= p.boundary_index && p.boundary_index <= p.scan_pointer && p.scan_pointer <= end,
            || "partition cursors out of order".to_string(),
        )?;
        ensure(data[start..p.boundary_index].iter().all(|e| e.value < pivot), || {
            "element at or above pivot left of boundary".to_string()
        })?;
        ensure(
            data[p.boundary_index..p.scan_pointer].iter().all(|e| e.value >= pivot),
            || "element below pivot right of boundary".to_string(),
        )?;
    }
    Ok(())
}

fn check_heap(s: &HeapState) -> Check {
    let data = &s.dataset;
    let size = s.heap_size;
    let first_node = if s.build_phase_complete { 0 } else { s.heapify_root };
    for node in first_node..size {
        if Some(node) == s.sift_cursor {
            continue;
        }
        ensure(
            children(node, size).all(|c| data[node].value >= data[c].value),
            || format!("node {} does not dominate its children", node),
        )?;
    }
    ensure(is_sorted(&data[size..]), || {
        "extracted tail is not sorted".to_string()
    })?;
    ensure(partitioned_at(data, size), || {
        "extracted tail is smaller than the heap".to_string()
    })?;
    ensure(s.extracted == data[size..], || {
        "extracted list does not mirror the tail".to_string()
    })
}

fn check_counting(s: &CountingState) -> Check {
    let counted = s.counted.iter().filter(|&&c| c).count();
    ensure(s.counted_total() == counted, || {
        format!(
            "color counts sum to {} but {} elements were counted",
            s.counted_total(),
            counted
        )
    })?;
    ensure(s.phase == CountingPhase::Counting || counted == s.source.len(), || {
        "placing started before every element was counted".to_string()
    })?;
    let placed = s.placed.iter().filter(|&&p| p).count();
    ensure(placed == s.output.len(), || {
        "placed flags disagree with output".to_string()
    })?;
    ensure(
        s.output
            .windows(2)
            .all(|w| w[0].tag.map(|c| c.rank()) <= w[1].tag.map(|c| c.rank())),
        || "output is not grouped in color order".to_string(),
    )
}

fn check_radix(s: &RadixState) -> Check {
    let place = s.digit_place;
    // everything collected so far is ordered by the lower digits
    let lower = |e: &Element| u64::from(e.value) % place;
    let settled = s.complete || (s.phase == RadixPhase::Distribute && s.item_cursor == 0);
    if settled {
        let ordered = s
            .working
            .iter()
            .zip(s.working.iter().skip(1))
            .all(|(a, b)| lower(a) <= lower(b));
        ensure(ordered, || {
            format!("working sequence not ordered below place {}", place)
        })?;
    }
    if s.complete {
        return Ok(());
    }
    for (bucket, contents) in s.buckets.iter().enumerate() {
        ensure(
            contents.iter().all(|e| usize::from(digit_at(e.value, place)) == bucket),
            || format!("bucket {} holds a foreign digit", bucket),
        )?;
        ensure(
            contents.iter().zip(contents.iter().skip(1)).all(|(a, b)| lower(a) <= lower(b)),
            || format!("bucket {} lost lower-digit order", bucket),
        )?;
    }
    Ok(())
}
