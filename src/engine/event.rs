//! Human-readable record of what a single step did

use std::fmt;

use serde::{Deserialize, Serialize};

use super::element::Color;

/// Which merge input an element was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Outcome of one `step` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepEvent {
    /// The state was already complete; nothing changed
    NoOp,
    /// Bubble: adjacent pair compared (and swapped if out of order)
    Compared {
        left: usize,
        right: usize,
        swapped: bool,
    },
    /// Selection: minimum of the unsorted region moved to the boundary
    MinimumSelected { boundary: usize, min_index: usize },
    /// Insertion: element taken from the source queue
    Dequeued { id: u32 },
    /// Insertion: pending element spliced into the destination
    Inserted { id: u32, position: usize },
    /// Merge: element appended to the merged sequence
    Merged { id: u32, side: Side },
    /// Quick: range popped and its pivot chosen
    PartitionStarted { start: usize, end: usize, pivot: u32 },
    /// Quick: one element compared against the pivot
    Scanned {
        index: usize,
        pivot: u32,
        moved_to: Option<usize>,
    },
    /// Quick: pivot swapped into its final position
    PivotPlaced { index: usize },
    /// Quick: trivial range recorded as sorted
    RangeSorted { start: usize, end: usize },
    /// Heap: one sift-down comparison at `node`
    Sifted {
        node: usize,
        swapped_with: Option<usize>,
    },
    /// Heap: root moved behind the shrunken heap
    Extracted { id: u32, heap_size: usize },
    /// Counting: element tallied under its color
    Counted { id: u32, color: Color },
    /// Counting: element moved into the output
    Placed { id: u32, color: Color },
    /// Radix: element dropped into a digit bucket
    Distributed { id: u32, digit: u8 },
    /// Radix: element drained from a bucket back into the working sequence
    Collected { id: u32, bucket: u8 },
}

impl StepEvent {
    pub fn is_noop(&self) -> bool {
        matches!(self, StepEvent::NoOp)
    }
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            StepEvent::NoOp => write!(f, "Already sorted, nothing to do"),
            StepEvent::Compared {
                left,
                right,
                swapped: true,
            } => write!(f, "Swapped positions {} and {}", left, right),
            StepEvent::Compared { left, right, .. } => {
                write!(f, "Positions {} and {} are in order", left, right)
            }
            StepEvent::MinimumSelected {
                boundary,
                min_index,
            } => {
                if boundary == min_index {
                    write!(f, "Position {} already holds the minimum", boundary)
                } else {
                    write!(f, "Moved minimum from {} to {}", min_index, boundary)
                }
            }
            StepEvent::Dequeued { id } => write!(f, "Picked up element #{}", id),
            StepEvent::Inserted { id, position } => {
                write!(f, "Inserted element #{} at position {}", id, position)
            }
            StepEvent::Merged { id, side } => {
                let side = match side {
                    Side::Left => "left",
                    Side::Right => "right",
                };
                write!(f, "Took element #{} from the {} run", id, side)
            }
            StepEvent::PartitionStarted { start, end, pivot } => {
                write!(f, "Partitioning {}..={} around pivot {}", start, end, pivot)
            }
            StepEvent::Scanned {
                index,
                pivot,
                moved_to: Some(to),
            } => write!(f, "Position {} is below {}, moved to {}", index, pivot, to),
            StepEvent::Scanned { index, pivot, .. } => {
                write!(f, "Position {} is not below {}", index, pivot)
            }
            StepEvent::PivotPlaced { index } => write!(f, "Pivot settled at position {}", index),
            StepEvent::RangeSorted { start, end } => {
                write!(f, "Range {}..={} is sorted", start, end)
            }
            StepEvent::Sifted {
                node,
                swapped_with: Some(child),
            } => write!(f, "Sifted node {} down to {}", node, child),
            StepEvent::Sifted { node, .. } => write!(f, "Node {} dominates its children", node),
            StepEvent::Extracted { id, heap_size } => {
                write!(f, "Extracted element #{}, heap size now {}", id, heap_size)
            }
            StepEvent::Counted { id, color } => {
                write!(f, "Counted element #{} as {}", id, color.as_str())
            }
            StepEvent::Placed { id, color } => {
                write!(f, "Placed {} element #{}", color.as_str(), id)
            }
            StepEvent::Distributed { id, digit } => {
                write!(f, "Dropped element #{} into bucket {}", id, digit)
            }
            StepEvent::Collected { id, bucket } => {
                write!(f, "Collected element #{} from bucket {}", id, bucket)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_positions() {
        let event = StepEvent::Compared {
            left: 2,
            right: 3,
            swapped: true,
        };
        assert_eq!(event.to_string(), "Swapped positions 2 and 3");
        assert!(StepEvent::NoOp.is_noop());
        assert!(!event.is_noop());
    }
}
