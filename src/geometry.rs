// =============================================================================
// GEOMETRY.RS — Screen-space rectangles for window placement
//
// Operations needed to keep a window on screen:
// - Edge and center queries (for clamping against usable bounds)
// - Overlap area (for deciding which display a window rectangle lives on)
// - Nearest-display fallback (for windows placed entirely off-screen)
// =============================================================================

use glam::IVec2;

/// Axis-aligned rectangle in desktop pixel coordinates.
///
/// `x`/`y` are the top-left corner; `w`/`h` may be zero but are never
/// expected to be negative.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    #[inline]
    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn center(&self) -> IVec2 {
        IVec2::new(
            self.x.saturating_add(self.w / 2),
            self.y.saturating_add(self.h / 2),
        )
    }

    pub fn contains_point(&self, p: IVec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Area of the overlap between `self` and `other`, or 0 when disjoint.
    ///
    /// Computed in `i64`, saturating for rectangles spanning the whole
    /// coordinate range.
    pub fn intersection_area(&self, other: &Rect) -> i64 {
        let left = self.x.max(other.x) as i64;
        let top = self.y.max(other.y) as i64;
        let right = self.right().min(other.right()) as i64;
        let bottom = self.bottom().min(other.bottom()) as i64;
        if right <= left || bottom <= top {
            return 0;
        }
        (right - left).saturating_mul(bottom - top)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection_area(other) > 0
    }
}

/// Squared distance between two points.
///
/// Points at opposite ends of the `i32` range are further apart than `i64`
/// can express squared; such distances saturate at `i64::MAX`.
#[inline]
pub fn distance_squared(a: IVec2, b: IVec2) -> i64 {
    let dx = a.x as i64 - b.x as i64;
    let dy = a.y as i64 - b.y as i64;
    dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
}

// =============================================================================
// DISPLAY LOOKUP
// =============================================================================

/// Pick the display that a window rectangle belongs to.
///
/// `displays` yields `(id, bounds)` pairs in platform order.  The display
/// with the largest overlap wins; if the rectangle touches no display at all,
/// the display whose center is closest to the rectangle's center is chosen.
/// Ties keep the earlier display.  Returns `0` when `displays` is empty.
pub fn display_for_rect<I>(rect: &Rect, displays: I) -> u32
where
    I: IntoIterator<Item = (u32, Rect)>,
{
    let mut best_overlap: Option<(u32, i64)> = None;
    let mut nearest: Option<(u32, i64)> = None;
    let center = rect.center();

    for (id, bounds) in displays {
        let overlap = rect.intersection_area(&bounds);
        if overlap > 0 && best_overlap.is_none_or(|(_, a)| overlap > a) {
            best_overlap = Some((id, overlap));
        }
        let dist = distance_squared(center, bounds.center());
        if nearest.is_none_or(|(_, d)| dist < d) {
            nearest = Some((id, dist));
        }
    }

    best_overlap.or(nearest).map_or(0, |(id, _)| id)
}
