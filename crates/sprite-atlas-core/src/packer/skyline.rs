//! Skyline: keeps the staircase upper boundary of the packed region as a
//! min-heap of segments and places the best-scoring rectangle into the
//! pocket between the walls adjacent to the lowest segment.

use super::{Algorithm, BinState};
use crate::geom::{pad_size, Rect, Size};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// A horizontal span of the skyline. `seq` makes the heap order total so
/// equal `(y, x)` segments pop in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    x: i32,
    y: i32,
    len: i32,
    seq: u64,
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y
            .cmp(&other.y)
            .then(self.x.cmp(&other.x))
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

pub struct SkylineBin {
    state: BinState,
    heap: BinaryHeap<Reverse<Segment>>,
    seq: u64,
}

impl SkylineBin {
    pub fn new(width: i32, height: i32) -> Self {
        let mut bin = Self {
            state: BinState::new(width, height),
            heap: BinaryHeap::new(),
            seq: 0,
        };
        bin.seed(width);
        bin
    }

    fn seed(&mut self, width: i32) {
        self.heap.clear();
        self.seq = 0;
        self.push_segment(0, 0, width);
    }

    fn push_segment(&mut self, x: i32, y: i32, len: i32) {
        if len > 0 {
            self.seq += 1;
            self.heap.push(Reverse(Segment {
                x,
                y,
                len,
                seq: self.seq,
            }));
        }
    }

    /// Heights of the walls flanking the popped segment. A missing
    /// neighbour means the wall is the bin top. Segments have disjoint
    /// spans, so each side matches at most once.
    fn walls(&self, seg: &Segment) -> (i32, i32) {
        let mut hl = self.state.max_height() - seg.y;
        let mut hr = hl;
        let mut found = 0;
        for Reverse(line) in self.heap.iter() {
            if line.x + line.len == seg.x {
                hl = line.y - seg.y;
                found += 1;
            } else if line.x == seg.x + seg.len {
                hr = line.y - seg.y;
                found += 1;
            }
            if found == 2 {
                break;
            }
        }
        (hl, hr)
    }

    /// Discrete quality of placing a `w x h` rectangle on the segment,
    /// from 7 (fills the pocket exactly) down to 0 (merely fits); -1 means
    /// it does not fit. The arms are exhaustive over the fitting cases;
    /// the trailing arm is unreachable.
    fn score(&self, w: i32, h: i32, seg: &Segment, hl: i32, hr: i32) -> i32 {
        if w > seg.len {
            return -1;
        }
        if seg.y + h > self.state.max_height() {
            return -1;
        }
        if hl >= hr {
            if w == seg.len && h == hl {
                7
            } else if w == seg.len && h == hr {
                6
            } else if w == seg.len && h > hl {
                5
            } else if w < seg.len && h == hl {
                4
            } else if w == seg.len && h < hl && h > hr {
                3
            } else if w < seg.len && h == hr {
                2
            } else if w == seg.len && h < hr {
                1
            } else if w < seg.len && h != hl {
                0
            } else {
                debug_assert!(false, "unscored skyline case: w={w} h={h} hl={hl} hr={hr}");
                -1
            }
        } else if w == seg.len && h == hr {
            7
        } else if w == seg.len && h == hl {
            6
        } else if w == seg.len && h > hr {
            5
        } else if w < seg.len && h == hr {
            4
        } else if w == seg.len && h < hr && h > hl {
            3
        } else if w < seg.len && h == hl {
            2
        } else if w == seg.len && h < hl {
            1
        } else if w < seg.len && h != hr {
            0
        } else {
            debug_assert!(false, "unscored skyline case: w={w} h={h} hl={hl} hr={hr}");
            -1
        }
    }

    /// Merges a segment nothing fits on with an abutting neighbour that is
    /// at least as high, re-inserting the union at the neighbour's height.
    /// Without a neighbour the segment is a dead pocket and is dropped.
    fn combine(&mut self, seg: Segment) {
        let mut segments: Vec<Segment> = std::mem::take(&mut self.heap)
            .into_iter()
            .map(|r| r.0)
            .collect();
        let mut merged = None;
        for (i, line) in segments.iter().enumerate() {
            if seg.y <= line.y {
                if seg.x == line.x + line.len {
                    merged = Some((i, line.x, line.y, line.len + seg.len));
                    break;
                }
                if seg.x + seg.len == line.x {
                    merged = Some((i, seg.x, line.y, line.len + seg.len));
                    break;
                }
            }
        }
        if let Some((i, x, y, len)) = merged {
            segments.swap_remove(i);
            self.seq += 1;
            segments.push(Segment {
                x,
                y,
                len,
                seq: self.seq,
            });
        }
        self.heap = segments.into_iter().map(Reverse).collect();
    }
}

impl Algorithm for SkylineBin {
    fn reset(&mut self, width: i32, height: i32) {
        self.state.reset(width, height);
        self.seed(width);
    }

    fn insert(&mut self, padding: i32, sizes: Vec<Size>) -> Vec<Size> {
        let mut pending = sizes;
        while !pending.is_empty() {
            let Some(Reverse(seg)) = self.heap.pop() else {
                break;
            };
            let (hl, hr) = self.walls(&seg);

            let mut best: Option<(usize, bool, i32)> = None;
            for (index, size) in pending.iter().enumerate() {
                let mut padded = *size;
                pad_size(&mut padded, padding);
                let score = self.score(padded.width, padded.height, &seg, hl, hr);
                if score > best.map_or(-1, |(_, _, s)| s) {
                    best = Some((index, false, score));
                }
                if self.state.allow_rotate() {
                    let score = self.score(padded.height, padded.width, &seg, hl, hr);
                    if score > best.map_or(-1, |(_, _, s)| s) {
                        best = Some((index, true, score));
                    }
                }
            }

            let Some((index, flipped, score)) = best else {
                self.combine(seg);
                continue;
            };
            let size = pending.remove(index);
            let mut padded = size;
            pad_size(&mut padded, padding);
            let (w, h) = if flipped {
                (padded.height, padded.width)
            } else {
                (padded.width, padded.height)
            };

            // Left-align against the higher wall unless the score singles
            // out the opposite corner.
            let place_right = if hl >= hr {
                score == 2
            } else {
                score == 4 || score == 0
            };
            let mut node = if place_right {
                let x = seg.x + seg.len - w;
                self.push_segment(seg.x, seg.y, seg.len - w);
                self.push_segment(x, seg.y + h, w);
                Rect::new(x, seg.y, w, h)
            } else {
                self.push_segment(seg.x, seg.y + h, w);
                self.push_segment(seg.x + w, seg.y, seg.len - w);
                Rect::new(seg.x, seg.y, w, h)
            };
            node.size.id = size.id;
            self.state.record(node, padding, flipped);
        }
        pending
    }

    fn packed(&self) -> &[Rect] {
        self.state.packed()
    }

    fn used_area(&self) -> i32 {
        self.state.used_area()
    }

    fn allow_rotate(&mut self, enabled: bool) {
        self.state.set_allow_rotate(enabled);
    }

    fn max_size(&self) -> Size {
        self.state.max_size()
    }

    fn rotation_counts(&self) -> &HashMap<i32, i32> {
        self.state.rotations()
    }
}
