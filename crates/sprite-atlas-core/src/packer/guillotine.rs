//! Guillotine: scored placement into a free-rectangle list, one straight
//! cut per placement directed by the split rule, optional coalescing of
//! the free list.

use super::{Algorithm, BinState};
use crate::geom::{pad_size, Rect, Size};
use crate::heuristic::{FitRule, Heuristic, SplitRule};
use std::collections::HashMap;

pub struct GuillotineBin {
    state: BinState,
    free: Vec<Rect>,
    fit: FitRule,
    split: SplitRule,
    /// Coalesce collinear adjacent free rectangles after each placement.
    merge: bool,
}

impl GuillotineBin {
    pub fn new(width: i32, height: i32, heuristic: Heuristic) -> Self {
        Self {
            state: BinState::new(width, height),
            free: vec![Rect::new(0, 0, width, height)],
            fit: heuristic.fit(),
            split: heuristic.split(),
            merge: true,
        }
    }

    pub fn set_merge(&mut self, enabled: bool) {
        self.merge = enabled;
    }

    /// Lower wins; worst-fit variants negate their best-fit counterpart.
    fn score(&self, fr: &Rect, w: i32, h: i32) -> i32 {
        let area_fit = fr.area() - w * h;
        let leftover_h = (fr.width() - w).abs();
        let leftover_v = (fr.height() - h).abs();
        let short_fit = leftover_h.min(leftover_v);
        let long_fit = leftover_h.max(leftover_v);
        match self.fit {
            FitRule::BestShortSide => short_fit,
            FitRule::BestLongSide => long_fit,
            FitRule::WorstArea => -area_fit,
            FitRule::WorstShortSide => -short_fit,
            FitRule::WorstLongSide => -long_fit,
            _ => area_fit,
        }
    }

    /// Splits `fr` around the placed node with one straight cut, pushing
    /// the bottom and right children (either may be empty).
    fn split(&mut self, fr: &Rect, node: &Rect) {
        let leftover_w = fr.width() - node.width();
        let leftover_h = fr.height() - node.height();
        let horizontal = match self.split {
            SplitRule::ShorterLeftoverAxis => leftover_w <= leftover_h,
            SplitRule::LongerLeftoverAxis => leftover_w > leftover_h,
            SplitRule::MinimizeArea => node.width() * leftover_h > leftover_w * node.height(),
            SplitRule::MaximizeArea => node.width() * leftover_h <= leftover_w * node.height(),
            SplitRule::ShorterAxis => fr.width() <= fr.height(),
            SplitRule::LongerAxis => fr.width() > fr.height(),
        };

        let mut bottom = Rect::new(fr.x(), fr.y() + node.height(), 0, leftover_h);
        let mut right = Rect::new(fr.x() + node.width(), fr.y(), leftover_w, 0);
        if horizontal {
            bottom.size.width = fr.width();
            right.size.height = node.height();
        } else {
            bottom.size.width = node.width();
            right.size.height = fr.height();
        }
        if !bottom.is_empty() {
            self.free.push(bottom);
        }
        if !right.is_empty() {
            self.free.push(right);
        }
    }

    /// Coalesces pairs of free rectangles that abut along a full edge:
    /// same row and height with touching x-ranges, or same column and
    /// width with touching y-ranges.
    fn merge_free_list(&mut self) {
        let mut merged = true;
        while merged {
            merged = false;
            'scan: for i in 0..self.free.len() {
                for j in i + 1..self.free.len() {
                    let a = self.free[i];
                    let b = self.free[j];
                    if a.y() == b.y() && a.height() == b.height() {
                        if a.right() == b.x() {
                            self.free[i] = Rect::new(a.x(), a.y(), a.width() + b.width(), a.height());
                            self.free.remove(j);
                            merged = true;
                            break 'scan;
                        } else if b.right() == a.x() {
                            self.free[i] = Rect::new(b.x(), a.y(), a.width() + b.width(), a.height());
                            self.free.remove(j);
                            merged = true;
                            break 'scan;
                        }
                    }
                    if a.x() == b.x() && a.width() == b.width() {
                        if a.bottom() == b.y() {
                            self.free[i] = Rect::new(a.x(), a.y(), a.width(), a.height() + b.height());
                            self.free.remove(j);
                            merged = true;
                            break 'scan;
                        } else if b.bottom() == a.y() {
                            self.free[i] = Rect::new(a.x(), b.y(), a.width(), a.height() + b.height());
                            self.free.remove(j);
                            merged = true;
                            break 'scan;
                        }
                    }
                }
            }
        }
    }
}

impl Algorithm for GuillotineBin {
    fn reset(&mut self, width: i32, height: i32) {
        self.state.reset(width, height);
        self.free.clear();
        self.free.push(Rect::new(0, 0, width, height));
    }

    fn insert(&mut self, padding: i32, mut sizes: Vec<Size>) -> Vec<Size> {
        while !sizes.is_empty() {
            let mut best_score = i32::MAX;
            let mut best: Option<(usize, usize, bool)> = None;
            'scan: for (i, fr) in self.free.iter().enumerate() {
                for (j, size) in sizes.iter().enumerate() {
                    let mut padded = *size;
                    pad_size(&mut padded, padding);
                    let (w, h) = (padded.width, padded.height);
                    if w == fr.width() && h == fr.height() {
                        best = Some((i, j, false));
                        break 'scan;
                    } else if self.state.allow_rotate() && h == fr.width() && w == fr.height() {
                        best = Some((i, j, true));
                        break 'scan;
                    } else if w <= fr.width() && h <= fr.height() {
                        let score = self.score(fr, w, h);
                        if score < best_score {
                            best = Some((i, j, false));
                            best_score = score;
                        }
                    } else if self.state.allow_rotate() && h <= fr.width() && w <= fr.height() {
                        let score = self.score(fr, h, w);
                        if score < best_score {
                            best = Some((i, j, true));
                            best_score = score;
                        }
                    }
                }
            }
            let Some((free_index, size_index, flipped)) = best else {
                break;
            };
            let size = sizes.remove(size_index);
            let fr = self.free.remove(free_index);
            let mut padded = size;
            pad_size(&mut padded, padding);
            let (w, h) = if flipped {
                (padded.height, padded.width)
            } else {
                (padded.width, padded.height)
            };
            let mut node = Rect::new(fr.x(), fr.y(), w, h);
            node.size.id = size.id;
            self.split(&fr, &node);
            if self.merge {
                self.merge_free_list();
            }
            self.state.record(node, padding, flipped);
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
