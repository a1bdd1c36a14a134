//! MaxRects: maintains a list of free rectangles, places the best-scoring
//! candidate, splits every intersecting free rectangle into up to four
//! children and prunes contained leftovers.

use super::{Algorithm, BinState};
use crate::geom::{pad_size, Rect, Size};
use crate::heuristic::{FitRule, Heuristic};
use std::collections::HashMap;

pub struct MaxRectsBin {
    state: BinState,
    free: Vec<Rect>,
    /// Padded placements, kept for contact-point scoring.
    used: Vec<Rect>,
    fit: FitRule,
}

struct Candidate {
    score: (i32, i32),
    top: i32,
    left: i32,
    size_index: usize,
    node: Rect,
    flipped: bool,
}

impl Candidate {
    /// Lexicographic comparison: primary and secondary score, then the
    /// lower placement, then the leftmost.
    fn beats(&self, other: &Candidate) -> bool {
        (self.score, self.top, self.left) < (other.score, other.top, other.left)
    }
}

impl MaxRectsBin {
    pub fn new(width: i32, height: i32, heuristic: Heuristic) -> Self {
        Self {
            state: BinState::new(width, height),
            free: vec![Rect::new(0, 0, width, height)],
            used: Vec::new(),
            fit: heuristic.fit(),
        }
    }

    fn find_best(&self, padding: i32, sizes: &[Size]) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for (index, size) in sizes.iter().enumerate() {
            let mut padded = *size;
            pad_size(&mut padded, padding);
            let (w, h) = (padded.width, padded.height);
            for fr in &self.free {
                if fr.width() >= w && fr.height() >= h {
                    let candidate = self.candidate(fr, w, h, index, false, padded.id);
                    if fr.width() == w && fr.height() == h {
                        return Some(candidate);
                    }
                    if best.as_ref().map_or(true, |b| candidate.beats(b)) {
                        best = Some(candidate);
                    }
                }
                if self.state.allow_rotate() && fr.width() >= h && fr.height() >= w {
                    let candidate = self.candidate(fr, h, w, index, true, padded.id);
                    if fr.width() == h && fr.height() == w {
                        return Some(candidate);
                    }
                    if best.as_ref().map_or(true, |b| candidate.beats(b)) {
                        best = Some(candidate);
                    }
                }
            }
        }
        best
    }

    fn candidate(
        &self,
        fr: &Rect,
        w: i32,
        h: i32,
        size_index: usize,
        flipped: bool,
        id: i32,
    ) -> Candidate {
        let mut node = Rect::new(fr.x(), fr.y(), w, h);
        node.size.id = id;
        Candidate {
            score: self.score(fr, w, h),
            top: fr.y() + h,
            left: fr.x(),
            size_index,
            node,
            flipped,
        }
    }

    /// Scores a placement against a free rectangle; lower wins. The second
    /// component breaks ties.
    fn score(&self, fr: &Rect, w: i32, h: i32) -> (i32, i32) {
        let leftover_h = (fr.width() - w).abs();
        let leftover_v = (fr.height() - h).abs();
        let short_fit = leftover_h.min(leftover_v);
        let long_fit = leftover_h.max(leftover_v);
        let area_fit = fr.area() - w * h;
        match self.fit {
            FitRule::BestArea => (area_fit, short_fit),
            FitRule::BestLongSide => (long_fit, short_fit),
            FitRule::BottomLeft => (fr.y() + h, fr.x()),
            FitRule::ContactPoint => (-self.contact_score(fr.x(), fr.y(), w, h), area_fit),
            // BestShortSideFit, and the fallback for rules that do not
            // apply to this engine.
            _ => (short_fit, long_fit),
        }
    }

    /// Total edge length the placement would share with the bin boundary
    /// and previously placed rectangles.
    fn contact_score(&self, x: i32, y: i32, w: i32, h: i32) -> i32 {
        let mut score = 0;
        if x == 0 {
            score += h;
        }
        if y == 0 {
            score += w;
        }
        if x + w == self.state.max_width() {
            score += h;
        }
        if y + h == self.state.max_height() {
            score += w;
        }
        for u in &self.used {
            if u.x() == x + w || u.right() == x {
                score += overlap_span(y, y + h, u.y(), u.bottom());
            }
            if u.y() == y + h || u.bottom() == y {
                score += overlap_span(x, x + w, u.x(), u.right());
            }
        }
        score
    }

    /// Subtracts the placed node from every intersecting free rectangle:
    /// full-width strips above and below the intersection, left and right
    /// strips within its band. The children partition the removed space.
    fn place(&mut self, node: Rect) {
        let mut next: Vec<Rect> = Vec::with_capacity(self.free.len() + 4);
        for fr in &self.free {
            if !fr.intersects(node) {
                next.push(*fr);
                continue;
            }
            let cut = fr.intersect(node);
            if cut.y() > fr.y() {
                next.push(Rect::new(fr.x(), fr.y(), fr.width(), cut.y() - fr.y()));
            }
            if cut.bottom() < fr.bottom() {
                next.push(Rect::new(
                    fr.x(),
                    cut.bottom(),
                    fr.width(),
                    fr.bottom() - cut.bottom(),
                ));
            }
            if cut.x() > fr.x() {
                next.push(Rect::new(
                    fr.x(),
                    cut.y(),
                    cut.x() - fr.x(),
                    cut.height(),
                ));
            }
            if cut.right() < fr.right() {
                next.push(Rect::new(
                    cut.right(),
                    cut.y(),
                    fr.right() - cut.right(),
                    cut.height(),
                ));
            }
        }
        self.free = next;
        self.prune();
        self.used.push(node);
    }

    /// Removes any free rectangle fully contained in another.
    fn prune(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let mut removed = false;
            let mut j = i + 1;
            while j < self.free.len() {
                if self.free[j].contains_rect(self.free[i]) {
                    self.free.remove(i);
                    removed = true;
                    break;
                }
                if self.free[i].contains_rect(self.free[j]) {
                    self.free.remove(j);
                    continue;
                }
                j += 1;
            }
            if !removed {
                i += 1;
            }
        }
    }
}

impl Algorithm for MaxRectsBin {
    fn reset(&mut self, width: i32, height: i32) {
        self.state.reset(width, height);
        self.free.clear();
        self.free.push(Rect::new(0, 0, width, height));
        self.used.clear();
    }

    fn insert(&mut self, padding: i32, mut sizes: Vec<Size>) -> Vec<Size> {
        while !sizes.is_empty() {
            let Some(best) = self.find_best(padding, &sizes) else {
                break;
            };
            sizes.remove(best.size_index);
            self.place(best.node);
            self.state.record(best.node, padding, best.flipped);
        }
        sizes
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

fn overlap_span(a1: i32, a2: i32, b1: i32, b2: i32) -> i32 {
    (a2.min(b2) - a1.max(b1)).max(0)
}
