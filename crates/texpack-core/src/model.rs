use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
///
/// Edges are exclusive: `right = x + w`, `bottom = y + h`. Setters are pure and
/// saturate at zero instead of producing negative extents.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size at the origin.
    pub fn sized(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn left(&self) -> u32 {
        self.x
    }
    pub fn top(&self) -> u32 {
        self.y
    }
    /// Exclusive right edge (`x + w`).
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }
    /// Exclusive bottom edge (`y + h`).
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    pub fn area(&self) -> u64 {
        u64::from(self.w) * u64::from(self.h)
    }

    /// True when both extents are zero.
    pub fn is_empty(&self) -> bool {
        self.w == 0 && self.h == 0
    }

    pub fn with_position(self, x: u32, y: u32) -> Self {
        Self { x, y, ..self }
    }
    pub fn with_width(self, w: u32) -> Self {
        Self { w, ..self }
    }
    pub fn with_height(self, h: u32) -> Self {
        Self { h, ..self }
    }
    /// Moves the right edge, keeping `x`; a right edge left of `x` yields zero width.
    pub fn with_right(self, right: u32) -> Self {
        Self {
            w: right.saturating_sub(self.x),
            ..self
        }
    }
    /// Moves the bottom edge, keeping `y`; a bottom edge above `y` yields zero height.
    pub fn with_bottom(self, bottom: u32) -> Self {
        Self {
            h: bottom.saturating_sub(self.y),
            ..self
        }
    }

    /// Same position with width and height swapped.
    pub fn transposed(self) -> Self {
        Self {
            w: self.h,
            h: self.w,
            ..self
        }
    }

    /// Open-interval overlap on both axes. Rectangles that merely touch, or that
    /// have a zero extent, do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x.max(other.x) < self.right().min(other.right())
            && self.y.max(other.y) < self.bottom().min(other.bottom())
    }

    /// Returns true if `other` is fully inside `self` (edges may coincide).
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Overlapping region; degenerate (zero extent) when the inputs are disjoint.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Rect::new(x, y, 0, 0)
            .with_right(self.right().min(other.right()))
            .with_bottom(self.bottom().min(other.bottom()))
    }

    /// Smallest rectangle enclosing both inputs.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(x, y, 0, 0)
            .with_right(self.right().max(other.right()))
            .with_bottom(self.bottom().max(other.bottom()))
    }
}

/// A rectangle to be packed: display name, current geometry and orientation.
///
/// `rect.w`/`rect.h` always describe the current (possibly rotated) orientation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sprite {
    pub name: String,
    pub rect: Rect,
    /// True when the sprite is turned 90° relative to its source.
    pub rotated: bool,
}

impl Sprite {
    pub fn new(name: impl Into<String>, w: u32, h: u32) -> Self {
        Self {
            name: name.into(),
            rect: Rect::sized(w, h),
            rotated: false,
        }
    }

    pub fn x(&self) -> u32 {
        self.rect.x
    }
    pub fn y(&self) -> u32 {
        self.rect.y
    }
    pub fn width(&self) -> u32 {
        self.rect.w
    }
    pub fn height(&self) -> u32 {
        self.rect.h
    }

    /// Swaps width and height and toggles `rotated`.
    pub fn rotate(&mut self) {
        self.rect = self.rect.transposed();
        self.rotated = !self.rotated;
    }

    pub fn set_position(&mut self, x: u32, y: u32) {
        self.rect = self.rect.with_position(x, y);
    }

    /// Source size, independent of the current orientation.
    pub fn source_size(&self) -> (u32, u32) {
        if self.rotated {
            (self.rect.h, self.rect.w)
        } else {
            (self.rect.w, self.rect.h)
        }
    }

    /// Back to source orientation at the origin.
    pub fn reset(&mut self) {
        if self.rotated {
            self.rotate();
        }
        self.set_position(0, 0);
    }
}

/// A finalized sheet: its size and the sprites placed on it, in placement order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackedSheet {
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub sprites: Vec<Sprite>,
}

impl PackedSheet {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn used_area(&self) -> u64 {
        self.sprites.iter().map(|s| s.rect.area()).sum()
    }

    /// Used area over sheet area. Values above 1.0 indicate overlapping placements.
    pub fn coverage(&self) -> f64 {
        let area = self.area();
        if area == 0 {
            return 0.0;
        }
        self.used_area() as f64 / area as f64
    }

    /// Returns true when `rect` lies within the sheet.
    pub fn check(&self, rect: &Rect) -> bool {
        rect.right() <= self.width && rect.bottom() <= self.height
    }
}

/// Result of a packing run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackOutcome {
    pub sheets: Vec<PackedSheet>,
    /// Sprites that fit on no sheet under the configured constraints.
    pub unplaced: Vec<Sprite>,
}

impl PackOutcome {
    /// Every placed sprite together with the index of its sheet.
    pub fn placements(&self) -> impl Iterator<Item = (usize, &Sprite)> + '_ {
        self.sheets
            .iter()
            .flat_map(|sheet| sheet.sprites.iter().map(move |s| (sheet.index, s)))
    }

    /// Looks up a placed sprite by name.
    pub fn find(&self, name: &str) -> Option<(usize, &Sprite)> {
        self.placements().find(|(_, s)| s.name == name)
    }

    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Computes packing statistics for this outcome.
    pub fn stats(&self) -> PackStats {
        let mut stats = PackStats {
            num_sheets: self.sheets.len(),
            num_unplaced: self.unplaced.len(),
            ..PackStats::default()
        };
        for sheet in &self.sheets {
            stats.total_sheet_area += sheet.area();
            stats.max_sheet_width = stats.max_sheet_width.max(sheet.width);
            stats.max_sheet_height = stats.max_sheet_height.max(sheet.height);
            for sprite in &sheet.sprites {
                stats.num_sprites += 1;
                stats.used_sprite_area += sprite.rect.area();
                if sprite.rotated {
                    stats.num_rotated += 1;
                }
            }
        }
        if stats.total_sheet_area > 0 {
            stats.occupancy = stats.used_sprite_area as f64 / stats.total_sheet_area as f64;
        }
        stats
    }
}

/// Statistics about packing efficiency.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PackStats {
    pub num_sheets: usize,
    /// Number of sprites placed on some sheet.
    pub num_sprites: usize,
    pub num_unplaced: usize,
    pub num_rotated: usize,
    /// Sum of width * height over all sheets.
    pub total_sheet_area: u64,
    /// Sum of width * height over all placed sprites.
    pub used_sprite_area: u64,
    /// used_sprite_area / total_sheet_area (0.0 to 1.0). Higher is better.
    pub occupancy: f64,
    pub max_sheet_width: u32,
    pub max_sheet_height: u32,
}

impl PackStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Sheets: {}, Sprites: {}, Unplaced: {}, Occupancy: {:.2}%, Total Area: {} px², Used Area: {} px², Rotated: {}",
            self.num_sheets,
            self.num_sprites,
            self.num_unplaced,
            self.occupancy * 100.0,
            self.total_sheet_area,
            self.used_sprite_area,
            self.num_rotated,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.total_sheet_area.saturating_sub(self.used_sprite_area)
    }

    /// Returns wasted space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.total_sheet_area > 0 {
            (self.wasted_area() as f64 / self.total_sheet_area as f64) * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        let c = Rect::new(10, 0, 10, 10);
        let point = Rect::new(5, 5, 0, 0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c), "touching edges do not overlap");
        assert!(!a.intersects(&point));
    }

    #[test]
    fn test_contains() {
        let outer = Rect::new(0, 0, 20, 20);
        let inner = Rect::new(5, 5, 5, 5);
        let partial = Rect::new(15, 15, 10, 10);

        assert!(outer.contains(&inner));
        assert!(outer.contains(&outer));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&partial));
    }

    #[test]
    fn test_intersect_and_union() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 2, 10, 4);
        assert_eq!(a.intersect(&b), Rect::new(5, 2, 5, 4));
        assert_eq!(a.union(&b), Rect::new(0, 0, 15, 10));

        let far = Rect::new(30, 30, 5, 5);
        let none = a.intersect(&far);
        assert!(none.is_empty());
        assert_eq!((none.x, none.y), (30, 30));
    }

    #[test]
    fn test_edge_setters_clamp() {
        let r = Rect::new(10, 10, 5, 5);
        assert_eq!(r.with_right(4).w, 0);
        assert_eq!(r.with_bottom(30).h, 20);
        assert_eq!(r.right(), 15);
        assert_eq!(r.bottom(), 15);
    }

    #[test]
    fn test_rotate_twice_restores() {
        let mut s = Sprite::new("a", 40, 20);
        s.rotate();
        assert!(s.rotated);
        assert_eq!((s.width(), s.height()), (20, 40));
        assert_eq!(s.source_size(), (40, 20));
        s.rotate();
        assert!(!s.rotated);
        assert_eq!((s.width(), s.height()), (40, 20));
    }

    #[test]
    fn test_reset() {
        let mut s = Sprite::new("a", 3, 7);
        s.rotate();
        s.set_position(9, 9);
        s.reset();
        assert_eq!(s.rect, Rect::new(0, 0, 3, 7));
        assert!(!s.rotated);
    }

    #[test]
    fn test_coverage_counts_overlap_twice() {
        // Both sprites sit at the origin.
        let a = Sprite::new("a", 8, 8);
        let b = Sprite::new("b", 8, 8);
        let sheet = PackedSheet {
            index: 0,
            width: 8,
            height: 8,
            sprites: vec![a, b],
        };
        assert_eq!(sheet.used_area(), 128);
        assert!(sheet.coverage() > 1.0);

        let empty = PackedSheet {
            index: 1,
            width: 0,
            height: 0,
            sprites: Vec::new(),
        };
        assert_eq!(empty.coverage(), 0.0);
    }
}
