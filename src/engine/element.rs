//! The unit being sorted
//!
//! Elements are created once per session from the seed dataset and only ever
//! moved between positions afterwards. `id` never changes and is what the
//! presentation layer animates; `value` is the sort key.

use serde::{Deserialize, Serialize};

/// Fixed key domain for counting sort, declared in its placement order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Color {
    /// Every color, in the order counting sort places them
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
    ];

    /// Position of this color in [`Color::ALL`]
    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
        }
    }

    /// Pick a color for `value` by splitting `0..=max_value` into equal bands,
    /// so that color order agrees with value order.
    pub fn for_value(value: u32, max_value: u32) -> Self {
        let span = u64::from(max_value) + 1;
        let band = u64::from(value.min(max_value)) * Self::ALL.len() as u64 / span;
        Self::ALL[band as usize]
    }
}

/// A single sortable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: u32,
    pub value: u32,
    /// Optional display tag; required (and used as the key) by counting sort
    #[serde(default)]
    pub tag: Option<Color>,
}

impl Element {
    pub fn new(id: u32, value: u32) -> Self {
        Self {
            id,
            value,
            tag: None,
        }
    }

    /// An element keyed by color whose value is the color's rank
    pub fn colored(id: u32, color: Color) -> Self {
        Self {
            id,
            value: color.rank() as u32,
            tag: Some(color),
        }
    }

    pub fn with_tag(mut self, color: Color) -> Self {
        self.tag = Some(color);
        self
    }
}

/// Values of a sequence, in order
pub fn values(elements: &[Element]) -> Vec<u32> {
    elements.iter().map(|e| e.value).collect()
}

/// Ids of a sequence, in order
pub fn ids(elements: &[Element]) -> Vec<u32> {
    elements.iter().map(|e| e.id).collect()
}

/// True if `elements` is non-decreasing by value
pub fn is_sorted(elements: &[Element]) -> bool {
    elements.windows(2).all(|w| w[0].value <= w[1].value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_for_value_is_monotonic() {
        let colors: Vec<Color> = (0..=99).map(|v| Color::for_value(v, 99)).collect();
        assert_eq!(colors[0], Color::Red);
        assert_eq!(colors[99], Color::Purple);
        assert!(colors.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_color_for_value_clamps_to_max() {
        assert_eq!(Color::for_value(500, 10), Color::Purple);
        assert_eq!(Color::for_value(0, 0), Color::Red);
    }

    #[test]
    fn test_colored_element_uses_rank() {
        let e = Element::colored(3, Color::Green);
        assert_eq!(e.value, 3);
        assert_eq!(e.tag, Some(Color::Green));
    }

    #[test]
    fn test_is_sorted() {
        let sorted = [Element::new(0, 1), Element::new(1, 1), Element::new(2, 4)];
        let unsorted = [Element::new(0, 3), Element::new(1, 1)];
        assert!(is_sorted(&sorted));
        assert!(!is_sorted(&unsorted));
        assert!(is_sorted(&[]));
    }
}
