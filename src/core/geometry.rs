//=========================================================================
// Geometry
//=========================================================================
//
// Integer pixel rectangles and surface sizes used by the compositor.
//
// Rectangles follow the left/top/right/bottom convention with exclusive
// right and bottom edges. Coordinates are signed: parallax destination
// rectangles routinely start left of or above the surface origin.
//
//=========================================================================

//=== Rect ================================================================

/// Axis-aligned pixel rectangle (`right`/`bottom` exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Rectangle anchored at the origin with the given extent.
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub const fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// True when the rectangle covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Returns the overlap of two rectangles, or `None` when they are disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let clipped = Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        (!clipped.is_empty()).then_some(clipped)
    }

    /// Moves the rectangle by `(dx, dy)`, saturating at the `i32` limits.
    pub const fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.left.saturating_add(dx),
            self.top.saturating_add(dy),
            self.right.saturating_add(dx),
            self.bottom.saturating_add(dy),
        )
    }
}

//=== SurfaceSize =========================================================

/// Output surface extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Either dimension is zero; nothing can be laid out against it.
    pub const fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width as i32, self.height as i32)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
