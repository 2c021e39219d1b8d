//! Shelf and Stack layouts.
//!
//! Both fill "slices" edge to edge along a packing axis: a shelf is a row that
//! grows left to right, a stack is a column that grows top to bottom. New
//! slices open at the packed extent, which only ever grows. Stack is Shelf with
//! width/height and x/y swapped, so both share [`SliceLayout`].

use super::{Layout, Placement, SheetSpace};
use crate::error::Result;
use crate::model::{Rect, Sprite};

/// Which axis a slice grows along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Shelves: slices are rows, filled along x.
    Rows,
    /// Stacks: slices are columns, filled along y.
    Columns,
}

impl Orientation {
    /// Splits a `w x h` size into (along, across) the packing axis.
    #[inline]
    fn split(self, w: u32, h: u32) -> (u32, u32) {
        match self {
            Orientation::Rows => (w, h),
            Orientation::Columns => (h, w),
        }
    }

    /// Sheet coordinates for an (along, across) offset.
    #[inline]
    fn point(self, along: u32, across: u32) -> (u32, u32) {
        match self {
            Orientation::Rows => (along, across),
            Orientation::Columns => (across, along),
        }
    }

    fn rect(self, along_pos: u32, across_pos: u32, along: u32, across: u32) -> Rect {
        let (x, y) = self.point(along_pos, across_pos);
        let (w, h) = self.point(along, across);
        Rect::new(x, y, w, h)
    }
}

/// One shelf (or stack).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    /// Offset across the packing axis (y for shelves).
    pub start: u32,
    /// Filled length along the packing axis.
    pub size: u32,
    /// Largest extent across the packing axis placed so far.
    pub max: u32,
}

/// (tier, fit). Placements on existing slices (tier 0) always rank before
/// opening a new one (tier 1).
type Score = (u8, u64);

#[derive(Debug, Clone)]
pub struct SliceLayout {
    orientation: Orientation,
    slices: Vec<Slice>,
    extent: u32,
}

impl SliceLayout {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            slices: Vec::new(),
            extent: 0,
        }
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Total packed length across the packing axis (shelf heights summed).
    pub fn extent(&self) -> u32 {
        self.extent
    }

    fn slice_score(sheet_along: u32, slice: &Slice, along: u32, across: u32) -> u64 {
        let slack_along = u64::from(sheet_along - slice.size - along);
        let slack_across = u64::from(slice.max - across);
        slack_along * u64::from(slice.max) + u64::from(along) * slack_across
    }

    fn best(&self, space: &SheetSpace, candidates: &[Sprite]) -> Option<Placement> {
        let o = self.orientation;
        let (sheet_along, sheet_across) = o.split(space.width, space.height);
        let mut best: Option<(Score, Placement)> = None;
        let mut consider = |score: Score, placement: Placement| {
            if best.as_ref().is_none_or(|(s, _)| score < *s) {
                best = Some((score, placement));
            }
        };

        for (index, sprite) in candidates.iter().enumerate() {
            let (along, across) = o.split(sprite.width(), sprite.height());
            let mut fits_existing = false;

            for (si, slice) in self.slices.iter().enumerate() {
                let rotatable = space.allow_rotation && along > across && along <= slice.max;
                let options = [(along, across, false), (across, along, true)];
                for (a, c, rotate) in options {
                    if rotate && !rotatable {
                        continue;
                    }
                    let fits = u64::from(slice.size) + u64::from(a) <= u64::from(sheet_along)
                        && c <= slice.max;
                    if !fits {
                        continue;
                    }
                    fits_existing = true;
                    let (x, y) = o.point(slice.size, slice.start);
                    consider(
                        (0, Self::slice_score(sheet_along, slice, a, c)),
                        Placement {
                            index,
                            x,
                            y,
                            rotate,
                            slice: Some(si),
                        },
                    );
                }
            }

            if fits_existing {
                continue;
            }
            let room = u64::from(self.extent) + u64::from(across) <= u64::from(sheet_across);
            // A new slice opens for the first candidate that fits, so the
            // caller's sort order decides slice heights.
            if room && along <= sheet_along {
                let (x, y) = o.point(0, self.extent);
                consider(
                    (1, 0),
                    Placement {
                        index,
                        x,
                        y,
                        rotate: false,
                        slice: None,
                    },
                );
            }
        }
        best.map(|(_, p)| p)
    }

    fn commit(&mut self, space: &SheetSpace, sprite: &mut Sprite, placement: &Placement) -> bool {
        let o = self.orientation;
        let (mut along, mut across) = o.split(sprite.width(), sprite.height());
        if placement.rotate {
            std::mem::swap(&mut along, &mut across);
        }

        let (along_pos, across_pos) = match placement.slice {
            Some(i) => {
                let Some(slice) = self.slices.get(i) else {
                    return false;
                };
                // Raising the ceiling of an inner slice would run into the next one.
                if across > slice.max && i + 1 != self.slices.len() {
                    return false;
                }
                (slice.size, slice.start)
            }
            None => (0, self.extent),
        };
        if o.point(along_pos, across_pos) != (placement.x, placement.y) {
            return false;
        }
        let target = o.rect(along_pos, across_pos, along, across);
        if !space.check(&target) {
            return false;
        }

        if placement.rotate {
            sprite.rotate();
        }
        sprite.set_position(placement.x, placement.y);

        let slice = match placement.slice {
            Some(i) => &mut self.slices[i],
            None => {
                self.slices.push(Slice {
                    start: self.extent,
                    size: 0,
                    max: 0,
                });
                let last = self.slices.len() - 1;
                &mut self.slices[last]
            }
        };
        slice.size += along;
        slice.max = slice.max.max(across);
        let end = slice.start + slice.max;
        self.extent = self.extent.max(end);
        true
    }

    fn remaining(&self, space: &SheetSpace) -> Vec<Rect> {
        let o = self.orientation;
        let (sheet_along, sheet_across) = o.split(space.width, space.height);
        let mut out: Vec<Rect> = self
            .slices
            .iter()
            .filter(|s| s.size < sheet_along && s.max > 0)
            .map(|s| o.rect(s.size, s.start, sheet_along - s.size, s.max))
            .collect();
        if self.extent < sheet_across {
            out.push(o.rect(0, self.extent, sheet_along, sheet_across - self.extent));
        }
        out
    }
}

/// Sprites left to right on rows ("shelves") stacked top to bottom.
#[derive(Debug, Clone)]
pub struct ShelfLayout(SliceLayout);

impl ShelfLayout {
    pub fn new() -> Self {
        Self(SliceLayout::new(Orientation::Rows))
    }

    pub fn shelves(&self) -> &[Slice] {
        self.0.slices()
    }

    /// Bottom of the lowest shelf.
    pub fn packed_height(&self) -> u32 {
        self.0.extent()
    }
}

impl Default for ShelfLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout for ShelfLayout {
    fn clear(&mut self, _space: &SheetSpace) {
        self.0 = SliceLayout::new(Orientation::Rows);
    }

    fn get_best(&self, space: &SheetSpace, candidates: &[Sprite]) -> Option<Placement> {
        self.0.best(space, candidates)
    }

    fn place(
        &mut self,
        space: &SheetSpace,
        sprite: &mut Sprite,
        placement: &Placement,
    ) -> Result<bool> {
        Ok(self.0.commit(space, sprite, placement))
    }

    fn free_space(&self, space: &SheetSpace) -> Vec<Rect> {
        self.0.remaining(space)
    }
}

/// Sprites top to bottom in columns ("stacks") laid out left to right.
#[derive(Debug, Clone)]
pub struct StackLayout(SliceLayout);

impl StackLayout {
    pub fn new() -> Self {
        Self(SliceLayout::new(Orientation::Columns))
    }

    pub fn stacks(&self) -> &[Slice] {
        self.0.slices()
    }

    /// Right edge of the rightmost stack.
    pub fn packed_width(&self) -> u32 {
        self.0.extent()
    }
}

impl Default for StackLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout for StackLayout {
    fn clear(&mut self, _space: &SheetSpace) {
        self.0 = SliceLayout::new(Orientation::Columns);
    }

    fn get_best(&self, space: &SheetSpace, candidates: &[Sprite]) -> Option<Placement> {
        self.0.best(space, candidates)
    }

    fn place(
        &mut self,
        space: &SheetSpace,
        sprite: &mut Sprite,
        placement: &Placement,
    ) -> Result<bool> {
        Ok(self.0.commit(space, sprite, placement))
    }

    fn free_space(&self, space: &SheetSpace) -> Vec<Rect> {
        self.0.remaining(space)
    }
}
