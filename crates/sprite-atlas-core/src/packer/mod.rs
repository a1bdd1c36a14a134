//! The algorithm interface and the [`Packer`] façade.
//!
//! The three engines (MaxRects, Guillotine, Skyline) implement a common
//! [`Algorithm`] trait and are dispatched as trait objects; behavioural
//! variation inside an engine is selected by the heuristic bitmask, not by
//! further types.

use crate::error::{AtlasError, Result};
use crate::geom::{pad_size, Rect, Size};
use crate::heuristic::{AlgorithmKind, Heuristic};
use crate::sort::SortKind;
use std::collections::HashMap;
use std::mem;
use tracing::{debug, warn};

pub mod guillotine;
pub mod maxrects;
pub mod skyline;

pub use guillotine::GuillotineBin;
pub use maxrects::MaxRectsBin;
pub use skyline::SkylineBin;

/// Hard cap on the side length explored by the shrink search.
const SHRINK_SIDE_CAP: i32 = 10_000;

/// Operations every bin algorithm implements.
///
/// `insert` applies padding internally: each size is expanded before
/// fit-testing and the chosen placement is unpadded before it is stored.
pub trait Algorithm {
    /// Clears all placements and resizes the bin. Rotation counts are kept;
    /// they accumulate across re-insertions and only their parity matters.
    fn reset(&mut self, width: i32, height: i32);

    /// Attempts to place every size, returning the ones that did not fit.
    fn insert(&mut self, padding: i32, sizes: Vec<Size>) -> Vec<Size>;

    /// Successfully placed rectangles.
    fn packed(&self) -> &[Rect];

    /// Sum of the areas of the stored placements.
    fn used_area(&self) -> i32;

    fn allow_rotate(&mut self, enabled: bool);

    fn max_size(&self) -> Size;

    /// Cumulative 90-degree rotation count per caller id.
    fn rotation_counts(&self) -> &HashMap<i32, i32>;
}

/// State shared by all engines: bin bounds, placements, rotation ledger.
#[derive(Debug, Default)]
pub(crate) struct BinState {
    max_width: i32,
    max_height: i32,
    used_area: i32,
    allow_rotate: bool,
    packed: Vec<Rect>,
    rotations: HashMap<i32, i32>,
}

impl BinState {
    pub(crate) fn new(width: i32, height: i32) -> Self {
        Self {
            max_width: width,
            max_height: height,
            ..Default::default()
        }
    }

    pub(crate) fn reset(&mut self, width: i32, height: i32) {
        self.max_width = width;
        self.max_height = height;
        self.used_area = 0;
        self.packed.clear();
    }

    pub(crate) fn max_width(&self) -> i32 {
        self.max_width
    }

    pub(crate) fn max_height(&self) -> i32 {
        self.max_height
    }

    pub(crate) fn max_size(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }

    pub(crate) fn allow_rotate(&self) -> bool {
        self.allow_rotate
    }

    pub(crate) fn set_allow_rotate(&mut self, enabled: bool) {
        self.allow_rotate = enabled;
    }

    pub(crate) fn packed(&self) -> &[Rect] {
        &self.packed
    }

    pub(crate) fn used_area(&self) -> i32 {
        self.used_area
    }

    pub(crate) fn rotations(&self) -> &HashMap<i32, i32> {
        &self.rotations
    }

    /// Stores a placement chosen by an engine. `node` carries the padded
    /// dimensions; the stored rectangle is unpadded.
    pub(crate) fn record(&mut self, mut node: Rect, padding: i32, flipped: bool) {
        if flipped {
            *self.rotations.entry(node.size.id).or_insert(0) += 1;
        }
        let count = self.rotations.get(&node.size.id).copied().unwrap_or(0);
        node.rotate_count = count;
        node.rotated = count & 1 == 1;
        crate::geom::unpad_rect(&mut node, padding);
        self.used_area += node.size.area();
        self.packed.push(node);
    }
}

/// Orchestrates one bin: queueing, sorting, packing and the shrink search.
pub struct Packer {
    algo: Box<dyn Algorithm + Send + Sync>,
    heuristic: Heuristic,
    unpacked: Vec<Size>,
    padding: i32,
    sort: SortKind,
    sort_reverse: bool,
    online: bool,
}

impl Packer {
    /// Creates a packer for a bin of the given maximum size.
    ///
    /// Fails when either dimension is not positive or the heuristic names
    /// no algorithm.
    pub fn new(max_width: i32, max_height: i32, heuristic: Heuristic) -> Result<Self> {
        if max_width <= 0 || max_height <= 0 {
            return Err(AtlasError::InvalidDimensions {
                width: max_width,
                height: max_height,
            });
        }
        let algo: Box<dyn Algorithm + Send + Sync> = match heuristic.kind() {
            Some(AlgorithmKind::MaxRects) => {
                Box::new(MaxRectsBin::new(max_width, max_height, heuristic))
            }
            Some(AlgorithmKind::Guillotine) => {
                Box::new(GuillotineBin::new(max_width, max_height, heuristic))
            }
            Some(AlgorithmKind::Skyline) => Box::new(SkylineBin::new(max_width, max_height)),
            None => {
                return Err(AtlasError::InvalidConfig(format!(
                    "heuristic {:#06x} names no algorithm",
                    heuristic.bits()
                )))
            }
        };
        Ok(Self {
            algo,
            heuristic,
            unpacked: Vec::new(),
            padding: 0,
            sort: SortKind::Area,
            sort_reverse: false,
            online: false,
        })
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn padding(&self) -> i32 {
        self.padding
    }

    pub fn set_padding(&mut self, padding: i32) {
        self.padding = padding;
    }

    /// Switches between online (place immediately) and offline (collect,
    /// then [`pack`](Self::pack)) insertion. Offline is the default.
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    pub fn set_sorter(&mut self, kind: SortKind, reverse: bool) {
        self.sort = kind;
        self.sort_reverse = reverse;
    }

    pub fn allow_rotate(&mut self, enabled: bool) {
        self.algo.allow_rotate(enabled);
    }

    /// Queues sizes for packing. In online mode they are placed
    /// immediately and the call's leftovers are returned; in offline mode
    /// the returned list is empty.
    pub fn insert<I>(&mut self, sizes: I) -> Vec<Size>
    where
        I: IntoIterator<Item = Size>,
    {
        if self.online {
            return self.algo.insert(self.padding, sizes.into_iter().collect());
        }
        self.unpacked.extend(sizes);
        Vec::new()
    }

    /// Queues a single size; returns whether it was (or still can be)
    /// placed.
    pub fn insert_size(&mut self, id: i32, width: i32, height: i32) -> bool {
        let leftover = self.insert([Size::with_id(id, width, height)]);
        !(self.online && !leftover.is_empty())
    }

    /// Sorts the queue and hands it to the algorithm. Returns `true` iff
    /// everything was placed; the failures stay queued and can be read via
    /// [`unpacked`](Self::unpacked).
    pub fn pack(&mut self) -> bool {
        if self.unpacked.is_empty() {
            return true;
        }
        let kind = self.sort;
        let reverse = self.sort_reverse;
        self.unpacked.sort_by(|a, b| {
            let ord = kind.compare(a, b);
            if reverse {
                ord.reverse()
            } else {
                ord
            }
        });
        let queue = mem::take(&mut self.unpacked);
        self.unpacked = self.algo.insert(self.padding, queue);
        self.unpacked.is_empty()
    }

    pub fn packed(&self) -> &[Rect] {
        self.algo.packed()
    }

    pub fn unpacked(&self) -> &[Size] {
        &self.unpacked
    }

    pub fn used_area(&self) -> i32 {
        self.algo.used_area()
    }

    pub fn max_size(&self) -> Size {
        self.algo.max_size()
    }

    /// Smallest size containing every placed rectangle, `(0, 0)` when
    /// nothing is packed.
    pub fn min_size(&self) -> Size {
        let mut size = Size::default();
        for rect in self.algo.packed() {
            size.width = size.width.max(rect.right() + self.padding);
            size.height = size.height.max(rect.bottom() + self.padding);
        }
        size
    }

    /// Space utilisation in `0.0..=1.0`; against the current extent when
    /// `current` is set, against the bin maximum otherwise.
    pub fn used_rate(&self, current: bool) -> f64 {
        let size = if current {
            self.min_size()
        } else {
            self.algo.max_size()
        };
        let area = size.width as f64 * size.height as f64;
        if area <= 0.0 {
            return 0.0;
        }
        self.algo.used_area() as f64 / area
    }

    pub fn rotation_counts(&self) -> &HashMap<i32, i32> {
        self.algo.rotation_counts()
    }

    /// Whether the sprite with this id must be rotated at composition time.
    pub fn rotation_parity(&self, id: i32) -> bool {
        self.algo
            .rotation_counts()
            .get(&id)
            .is_some_and(|count| count & 1 == 1)
    }

    /// Drops all placements and queued sizes, keeping the configuration.
    pub fn clear(&mut self) {
        let size = self.algo.max_size();
        self.algo.reset(size.width, size.height);
        self.unpacked.clear();
    }

    /// Shrinks the bin to a tighter bounding box after a fully successful
    /// pack.
    ///
    /// Searches for the smallest feasible square by doubling and binary
    /// search, then shaves height and width independently. On any terminal
    /// failure the original bin size and placements are restored. Returns
    /// whether a (possibly equal) feasible size was committed.
    pub fn shrink(&mut self) -> bool {
        if !self.unpacked.is_empty() || self.algo.packed().is_empty() {
            return false;
        }
        let original = self.algo.max_size();
        let mut current: Vec<Size> = self.algo.packed().iter().map(|r| r.size).collect();

        let mut total_area: i64 = 0;
        let mut max_w = 0;
        let mut max_h = 0;
        for size in &current {
            let mut padded = *size;
            pad_size(&mut padded, self.padding);
            total_area += padded.area() as i64;
            max_w = max_w.max(padded.width);
            max_h = max_h.max(padded.height);
        }

        let initial = ((1.2 * total_area as f64).sqrt().ceil() as i32)
            .max(max_w)
            .max(max_h);

        // Find a feasible square, doubling from the area estimate.
        let mut side = initial;
        let mut last_fail = 0;
        let mut feasible = None;
        while side <= SHRINK_SIDE_CAP {
            if self.try_repack(side, side, &mut current) {
                feasible = Some(side);
                break;
            }
            last_fail = side;
            side = side.saturating_mul(2);
        }
        let Some(mut hi) = feasible else {
            self.restore(original, &mut current);
            return false;
        };

        // Minimal feasible square between the last failure and the first
        // success. When the estimate succeeded outright, the area bound is
        // the known-infeasible floor.
        let mut lo = if last_fail > 0 {
            last_fail
        } else {
            (((total_area as f64).sqrt()) as i32 - 1).clamp(0, hi - 1)
        };
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.try_repack(mid, mid, &mut current) {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        let best_side = hi;

        // Shave height at fixed width, then width at the shrunk height,
        // both bounded below by half the square side.
        let floor_side = best_side / 2;
        let mut best_h = best_side;
        while best_h > floor_side && self.try_repack(best_side, best_h - 1, &mut current) {
            best_h -= 1;
        }
        let mut best_w = best_side;
        while best_w > floor_side && self.try_repack(best_w - 1, best_h, &mut current) {
            best_w -= 1;
        }

        if self.try_repack(best_w, best_h, &mut current) {
            debug!(
                from = ?(original.width, original.height),
                to = ?(best_w, best_h),
                "bin shrunk"
            );
            true
        } else {
            self.restore(original, &mut current);
            false
        }
    }

    /// Resets the bin to `width x height` and re-inserts the current
    /// placement set. On success the set is refreshed from the new
    /// placements so rotation parity stays truthful across attempts.
    fn try_repack(&mut self, width: i32, height: i32, current: &mut Vec<Size>) -> bool {
        self.algo.reset(width, height);
        let leftover = self.algo.insert(self.padding, current.clone());
        if leftover.is_empty() {
            *current = self.algo.packed().iter().map(|r| r.size).collect();
            true
        } else {
            false
        }
    }

    fn restore(&mut self, original: Size, current: &mut Vec<Size>) {
        if !self.try_repack(original.width, original.height, current) {
            // The set packed at this size before; reaching this means an
            // engine invariant broke.
            warn!(
                size = ?(original.width, original.height),
                "failed to restore placements at the original bin size"
            );
        }
    }
}
