//! Geometry primitives shared by every packing algorithm.

/// A position in 2D space. `y` grows downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Moves the point by the given relative amount.
    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

/// Dimensions of an entity in 2D space.
///
/// `id` is an opaque caller token used to correlate placements with their
/// source sprites; it is preserved end-to-end and never influences packing
/// decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
    pub id: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            id: 0,
        }
    }

    pub fn with_id(id: i32, width: i32, height: i32) -> Self {
        Self { width, height, id }
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    pub fn perimeter(&self) -> i32 {
        (self.width + self.height) * 2
    }

    pub fn max_side(&self) -> i32 {
        self.width.max(self.height)
    }

    pub fn min_side(&self) -> i32 {
        self.width.min(self.height)
    }

    /// Width-to-height ratio.
    pub fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// An axis-aligned rectangle: top-left corner plus dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub point: Point,
    pub size: Size,
    /// Whether the stored orientation is rotated 90 degrees from the source.
    pub rotated: bool,
    /// Cumulative number of 90-degree rotations applied across re-packs.
    /// Only the parity matters to consumers.
    pub rotate_count: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            point: Point::new(x, y),
            size: Size::new(width, height),
            rotated: false,
            rotate_count: 0,
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.point.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.point.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.height
    }

    pub fn left(&self) -> i32 {
        self.point.x
    }

    pub fn top(&self) -> i32 {
        self.point.y
    }

    /// Exclusive right edge coordinate (`x + width`).
    pub fn right(&self) -> i32 {
        self.point.x + self.size.width
    }

    /// Exclusive bottom edge coordinate (`y + height`).
    pub fn bottom(&self) -> i32 {
        self.point.y + self.size.height
    }

    pub fn top_left(&self) -> Point {
        self.point
    }

    pub fn area(&self) -> i32 {
        self.size.area()
    }

    /// A rectangle is empty when either dimension is less than 1.
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0 || self.size.height <= 0
    }

    /// Tests whether `other` lies fully inside `self` (inclusive edges).
    pub fn contains_rect(&self, other: Rect) -> bool {
        self.x() <= other.x()
            && other.right() <= self.right()
            && self.y() <= other.y()
            && other.bottom() <= self.bottom()
    }

    /// Tests whether the coordinate lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.x() <= x && x < self.right() && self.y() <= y && y < self.bottom()
    }

    /// Strict overlap test: rectangles that merely share an edge do not
    /// intersect.
    pub fn intersects(&self, other: Rect) -> bool {
        other.x() < self.right()
            && self.x() < other.right()
            && other.y() < self.bottom()
            && self.y() < other.bottom()
    }

    /// Returns the overlapping region of the two rectangles, or an empty
    /// rectangle when there is none.
    pub fn intersect(&self, other: Rect) -> Rect {
        let x1 = self.x().max(other.x());
        let x2 = self.right().min(other.right());
        let y1 = self.y().max(other.y());
        let y2 = self.bottom().min(other.bottom());
        if x2 >= x1 && y2 >= y1 {
            Rect::new(x1, y1, x2 - x1, y2 - y1)
        } else {
            Rect::default()
        }
    }

    /// Returns the smallest rectangle containing both rectangles.
    pub fn union(&self, other: Rect) -> Rect {
        let x1 = self.x().min(other.x());
        let x2 = self.right().max(other.right());
        let y1 = self.y().min(other.y());
        let y2 = self.bottom().max(other.bottom());
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }
}

/// Grows a size by `padding` on both axes before it is tested against free
/// space. Padding separates neighbours; the gap is reserved once per
/// rectangle.
pub fn pad_size(size: &mut Size, padding: i32) {
    if padding <= 0 {
        return;
    }
    size.width += padding;
    size.height += padding;
}

/// Removes the reserved padding from a chosen placement before it is stored.
pub fn unpad_rect(rect: &mut Rect, padding: i32) {
    if padding <= 0 {
        return;
    }
    if rect.point.x == 0 {
        rect.point.x += padding;
        rect.size.width -= padding * 2;
    } else {
        rect.size.width -= padding;
    }
    if rect.point.y == 0 {
        rect.point.y += padding;
        rect.size.height -= padding * 2;
    } else {
        rect.size.height -= padding;
    }
}
