use glam::Vec2;

/// Axis-aligned box in world units, stored as left/top/right/bottom edges.
/// Y grows downward, so `t <= b` for a well-formed box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub l: f32,
    pub t: f32,
    pub r: f32,
    pub b: f32,
}

impl Aabb {
    pub const fn new(l: f32, t: f32, r: f32, b: f32) -> Self {
        Self { l, t, r, b }
    }

    /// Box from a top-left corner and a size.
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, pos.x + size.x, pos.y + size.y)
    }

    /// Smallest box enclosing all `points`. Returns `None` for an empty slice.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = min.min(*p);
            max = max.max(*p);
        }
        Some(Self::new(min.x, min.y, max.x, max.y))
    }

    pub fn width(&self) -> f32 {
        self.r - self.l
    }

    pub fn height(&self) -> f32 {
        self.b - self.t
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.l + self.r) * 0.5, (self.t + self.b) * 0.5)
    }

    /// A box with non-positive extent on either axis covers no area.
    pub fn is_degenerate(&self) -> bool {
        !(self.r > self.l && self.b > self.t)
    }

    /// Translate by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.l + delta.x, self.t + delta.y, self.r + delta.x, self.b + delta.y)
    }

    /// Open-interval overlap test; boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.l < other.r && self.r > other.l && self.t < other.b && self.b > other.t
    }

    /// Overlapping region of two boxes, or `None` when it has no area.
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let inter = Aabb::new(
            self.l.max(other.l),
            self.t.max(other.t),
            self.r.min(other.r),
            self.b.min(other.b),
        );
        if inter.is_degenerate() {
            None
        } else {
            Some(inter)
        }
    }

    /// Outward-rounded copy (floor min edges, ceil max edges).
    pub fn rounded_out(&self) -> Self {
        Self::new(self.l.floor(), self.t.floor(), self.r.ceil(), self.b.ceil())
    }

    /// Half-open containment used by per-pixel sampling: `[l, r) x [t, b)`.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.l && x < self.r && y >= self.t && y < self.b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_of_overlapping_boxes() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 2.0, 20.0, 8.0);
        assert_eq!(a.intersection(&b), Some(Aabb::new(5.0, 2.0, 10.0, 8.0)));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 20.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn degenerate_box_never_intersects() {
        let flat = Aabb::new(0.0, 5.0, 10.0, 5.0);
        assert!(flat.is_degenerate());
        assert!(flat.intersection(&Aabb::new(-5.0, -5.0, 50.0, 50.0)).is_none());
    }

    #[test]
    fn from_points_encloses_all() {
        let aabb = Aabb::from_points(&[
            Vec2::new(3.0, -1.0),
            Vec2::new(-2.0, 4.0),
            Vec2::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(aabb, Aabb::new(-2.0, -1.0, 3.0, 4.0));
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn translated_keeps_size() {
        let a = Aabb::new(1.0, 2.0, 5.0, 8.0).translated(Vec2::new(10.0, -2.0));
        assert_eq!(a, Aabb::new(11.0, 0.0, 15.0, 6.0));
        assert_eq!(a.width(), 4.0);
        assert_eq!(a.height(), 6.0);
    }
}
