use tracing::{debug, warn};

use crate::config::{LayoutKind, PackerConfig};
use crate::layout::{Layout, SheetSpace};
use crate::model::{PackedSheet, Rect, Sprite};

/// Largest sheet dimension. Unbounded axes grow up to this, and configured
/// sizes above it are rejected.
pub const DIMENSION_LIMIT: u32 = 1 << 31;

/// Rounds up to the next power of two using the bit-smear trick.
///
/// `0` maps to `0`; inputs above 2^31 wrap to `0`.
pub fn next_power_of_two(n: u32) -> u32 {
    let mut v = n.wrapping_sub(1);
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    v.wrapping_add(1)
}

/// A growable container bound to one layout strategy.
///
/// The sheet starts at its minimum size and doubles on demand until every
/// sprite fits or the maximum size is reached.
pub struct Sheet {
    width: u32,
    height: u32,
    min_size: (u32, u32),
    max_size: (u32, u32),
    /// Per-axis growth ceiling: `max_size`, or `DIMENSION_LIMIT` where unbounded.
    limit: (u32, u32),
    allow_rotation: bool,
    npot: bool,
    square: bool,
    kind: LayoutKind,
    layout: Box<dyn Layout>,
    sprites: Vec<Sprite>,
}

impl Sheet {
    /// Builds an empty sheet from `cfg`. The config is expected to be validated.
    pub fn new(cfg: &PackerConfig) -> Self {
        let round = |v: u32| if cfg.npot { v } else { next_power_of_two(v) };
        let mut min_size = (round(cfg.min_size.w), round(cfg.min_size.h));
        let max_size = (round(cfg.max_size.w), round(cfg.max_size.h));

        let bound = |v: u32| if v > 0 { v } else { DIMENSION_LIMIT };
        let mut limit = (bound(max_size.0), bound(max_size.1));
        if cfg.square {
            let side = limit.0.min(limit.1);
            limit = (side, side);
            let m = min_size.0.max(min_size.1).min(side);
            min_size = (m, m);
        }
        let (width, height) = (min_size.0.min(limit.0), min_size.1.min(limit.1));

        let space = SheetSpace::new(width, height, cfg.allow_rotation);
        Self {
            width,
            height,
            min_size,
            max_size,
            limit,
            allow_rotation: cfg.allow_rotation,
            npot: cfg.npot,
            square: cfg.square,
            kind: cfg.layout,
            layout: cfg.layout.create(&space),
            sprites: Vec::new(),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
    pub fn min_size(&self) -> (u32, u32) {
        self.min_size
    }
    pub fn max_size(&self) -> (u32, u32) {
        self.max_size
    }
    pub fn layout_kind(&self) -> LayoutKind {
        self.kind
    }
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// The view of this sheet handed to its layout.
    pub fn space(&self) -> SheetSpace {
        SheetSpace::new(self.width, self.height, self.allow_rotation)
    }

    /// Returns true if `rect` lies within the current sheet size.
    pub fn check(&self, rect: &Rect) -> bool {
        self.space().check(rect)
    }

    /// Doubles both axes, clamped to the maximum size and floored at 1, then
    /// re-applies power-of-two and square constraints. Returns whether either
    /// axis grew.
    pub fn grow(&mut self) -> bool {
        let (old_w, old_h) = (self.width, self.height);
        let mut w = old_w.saturating_mul(2).min(self.limit.0).max(1);
        let mut h = old_h.saturating_mul(2).min(self.limit.1).max(1);
        if !self.npot {
            w = next_power_of_two(w);
            h = next_power_of_two(h);
        }
        if self.square {
            let side = w.max(h);
            w = side;
            h = side;
        }
        self.width = w;
        self.height = h;
        let grew = w > old_w || h > old_h;
        if grew {
            debug!(width = w, height = h, "growing sheet");
        }
        grew
    }

    /// Offers `sprites` to the sheet. Returns the sprites that could not be
    /// placed at any size up to the maximum.
    ///
    /// Already placed sprites are laid out again together with the new ones on
    /// every growth step.
    pub fn add(&mut self, sprites: Vec<Sprite>) -> Vec<Sprite> {
        let mut batch = std::mem::take(&mut self.sprites);
        batch.extend(sprites);
        loop {
            batch.iter_mut().for_each(Sprite::reset);
            let space = self.space();
            self.layout.clear(&space);
            match self.layout.add(&space, &mut batch) {
                Ok(placed) => {
                    if batch.is_empty() {
                        self.sprites = placed;
                        return batch;
                    }
                    debug!(
                        placed = placed.len(),
                        remaining = batch.len(),
                        width = self.width,
                        height = self.height,
                        "sheet is full"
                    );
                    if !self.grow() {
                        debug!(width = self.width, height = self.height, "sheet cannot grow");
                        self.sprites = placed;
                        batch.iter_mut().for_each(Sprite::reset);
                        return batch;
                    }
                    let mut all = placed;
                    all.append(&mut batch);
                    batch = all;
                }
                Err(e) => {
                    warn!(layout = %self.kind, error = %e, "layout failed");
                    batch.iter_mut().for_each(Sprite::reset);
                    return batch;
                }
            }
        }
    }

    /// Used sprite area over sheet area.
    pub fn coverage(&self) -> f64 {
        let area = u64::from(self.width) * u64::from(self.height);
        if area == 0 {
            return 0.0;
        }
        let used: u64 = self.sprites.iter().map(|s| s.rect.area()).sum();
        used as f64 / area as f64
    }

    /// Regions the layout still considers free.
    pub fn free_space(&self) -> Vec<Rect> {
        self.layout.free_space(&self.space())
    }

    /// Freezes the sheet into its final record.
    pub fn finish(self, index: usize) -> PackedSheet {
        PackedSheet {
            index,
            width: self.width,
            height: self.height,
            sprites: self.sprites,
        }
    }
}
