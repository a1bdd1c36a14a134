//! Size comparators used to order the offline packing queue.

use crate::geom::Size;
use std::cmp::Ordering;
use std::str::FromStr;

/// Comparator applied to the packing queue before dispatch to the
/// algorithm. All orders are descending; the packer's `reverse` flag flips
/// them. Ties keep insertion order (the sort is stable).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKind {
    /// Descending area. The default.
    #[default]
    Area,
    /// Descending perimeter.
    Perimeter,
    /// Descending width/height difference.
    SideDiff,
    /// Descending shorter side.
    MinSide,
    /// Descending longer side.
    MaxSide,
    /// Descending width-to-height ratio.
    Ratio,
}

impl SortKind {
    pub fn compare(self, a: &Size, b: &Size) -> Ordering {
        match self {
            SortKind::Area => b.area().cmp(&a.area()),
            SortKind::Perimeter => b.perimeter().cmp(&a.perimeter()),
            SortKind::SideDiff => {
                let da = (a.width - a.height).abs();
                let db = (b.width - b.height).abs();
                db.cmp(&da)
            }
            SortKind::MinSide => b.min_side().cmp(&a.min_side()),
            SortKind::MaxSide => b.max_side().cmp(&a.max_side()),
            SortKind::Ratio => b.ratio().total_cmp(&a.ratio()),
        }
    }
}

impl FromStr for SortKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "area" => Ok(Self::Area),
            "perimeter" => Ok(Self::Perimeter),
            "side_diff" | "diff" => Ok(Self::SideDiff),
            "min_side" => Ok(Self::MinSide),
            "max_side" => Ok(Self::MaxSide),
            "ratio" => Ok(Self::Ratio),
            _ => Err(()),
        }
    }
}
