use super::{Layout, Placement, SheetSpace};
use crate::error::Result;
use crate::model::{Rect, Sprite};

/// Free-rectangle layout scored by best short-side fit.
///
/// `free` always holds maximal empty regions of the sheet; no entry is
/// contained in another after a placement.
#[derive(Debug, Clone, Default)]
pub struct MaxRectsLayout {
    free: Vec<Rect>,
    used: Vec<Rect>,
}

impl MaxRectsLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    /// Rectangles committed so far (debug overlays only).
    pub fn used_rects(&self) -> &[Rect] {
        &self.used
    }

    /// (short side leftover, long side leftover); lower is better.
    fn score(fr: &Rect, w: u32, h: u32) -> (u32, u32) {
        let leftover_h = fr.w - w;
        let leftover_v = fr.h - h;
        (leftover_h.min(leftover_v), leftover_h.max(leftover_v))
    }

    /// First zero-area candidate that fits at the sheet origin. Used once no
    /// free rectangle admits anything, e.g. on an exactly full sheet.
    fn zero_area_fallback(space: &SheetSpace, candidates: &[Sprite]) -> Option<Placement> {
        candidates.iter().enumerate().find_map(|(index, sprite)| {
            let node = sprite.rect.with_position(0, 0);
            (node.area() == 0 && space.check(&node)).then_some(Placement {
                index,
                x: 0,
                y: 0,
                rotate: false,
                slice: None,
            })
        })
    }

    /// Replaces every free rectangle overlapping `node` with the parts of it
    /// above, below, left and right of `node`.
    fn split(&mut self, node: &Rect) {
        let mut next: Vec<Rect> = Vec::with_capacity(self.free.len() + 4);
        for fr in &self.free {
            if !fr.intersects(node) {
                next.push(*fr);
                continue;
            }
            // above
            if node.y > fr.y {
                next.push(Rect::new(fr.x, fr.y, fr.w, node.y - fr.y));
            }
            // below
            if node.bottom() < fr.bottom() {
                next.push(Rect::new(
                    fr.x,
                    node.bottom(),
                    fr.w,
                    fr.bottom() - node.bottom(),
                ));
            }
            // left
            if node.x > fr.x {
                next.push(Rect::new(fr.x, fr.y, node.x - fr.x, fr.h));
            }
            // right
            if node.right() < fr.right() {
                next.push(Rect::new(
                    node.right(),
                    fr.y,
                    fr.right() - node.right(),
                    fr.h,
                ));
            }
        }
        self.free = next;
    }

    /// Drops every free rectangle contained in another one. Of two identical
    /// rectangles the first is kept.
    fn prune(&mut self) {
        let free = &self.free;
        let kept: Vec<Rect> = free
            .iter()
            .enumerate()
            .filter(|&(i, a)| {
                !free
                    .iter()
                    .enumerate()
                    .any(|(j, b)| j != i && b.contains(a) && (a != b || j < i))
            })
            .map(|(_, r)| *r)
            .collect();
        self.free = kept;
    }
}

impl Layout for MaxRectsLayout {
    fn clear(&mut self, space: &SheetSpace) {
        self.free = vec![space.bounds()];
        self.used.clear();
    }

    fn get_best(&self, space: &SheetSpace, candidates: &[Sprite]) -> Option<Placement> {
        let mut best: Option<((u32, u32), Placement)> = None;
        for (index, sprite) in candidates.iter().enumerate() {
            let (w, h) = (sprite.width(), sprite.height());
            let orientations = [(w, h, false), (h, w, true)];
            let n = if space.allow_rotation { 2 } else { 1 };
            for fr in &self.free {
                for &(tw, th, rotate) in &orientations[..n] {
                    if fr.w < tw || fr.h < th {
                        continue;
                    }
                    let score = Self::score(fr, tw, th);
                    if best.as_ref().is_none_or(|(s, _)| score < *s) {
                        best = Some((
                            score,
                            Placement {
                                index,
                                x: fr.x,
                                y: fr.y,
                                rotate,
                                slice: None,
                            },
                        ));
                    }
                }
            }
        }
        best.map(|(_, p)| p).or_else(|| Self::zero_area_fallback(space, candidates))
    }

    fn place(
        &mut self,
        space: &SheetSpace,
        sprite: &mut Sprite,
        placement: &Placement,
    ) -> Result<bool> {
        let mut node = sprite.rect.with_position(placement.x, placement.y);
        if placement.rotate {
            node = node.transposed();
        }
        // Zero-area sprites occupy nothing, so they need no free rectangle.
        let admitted = node.area() == 0 || self.free.iter().any(|fr| fr.contains(&node));
        if !space.check(&node) || !admitted {
            return Ok(false);
        }

        if placement.rotate {
            sprite.rotate();
        }
        sprite.set_position(node.x, node.y);

        if node.area() > 0 {
            self.split(&node);
            self.prune();
        }
        self.used.push(node);
        Ok(true)
    }

    fn free_space(&self, _space: &SheetSpace) -> Vec<Rect> {
        self.free.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_nested(free: &[Rect]) -> bool {
        free.iter().enumerate().all(|(i, a)| {
            free.iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.contains(a))
        })
    }

    #[test]
    fn corner_split_leaves_two_maximal_fragments() {
        let sp = SheetSpace::new(100, 100, false);
        let mut layout = MaxRectsLayout::new();
        layout.clear(&sp);
        let mut sprites = vec![Sprite::new("a", 40, 40)];
        let placed = layout.add(&sp, &mut sprites).expect("add");
        assert_eq!(placed[0].rect, Rect::new(0, 0, 40, 40));
        let free = layout.free_rects();
        assert_eq!(free.len(), 2);
        assert!(free.contains(&Rect::new(0, 40, 100, 60)));
        assert!(free.contains(&Rect::new(40, 0, 60, 100)));
        assert!(no_nested(free));
    }

    #[test]
    fn interior_split_leaves_four_fragments() {
        let sp = SheetSpace::new(100, 100, false);
        let mut layout = MaxRectsLayout::new();
        layout.clear(&sp);
        let mut sprite = Sprite::new("a", 40, 40);
        let p = Placement {
            index: 0,
            x: 30,
            y: 30,
            rotate: false,
            slice: None,
        };
        assert!(layout.place(&sp, &mut sprite, &p).expect("place"));
        let free = layout.free_rects();
        assert_eq!(free.len(), 4);
        assert!(free.contains(&Rect::new(0, 0, 100, 30)));
        assert!(free.contains(&Rect::new(0, 70, 100, 30)));
        assert!(free.contains(&Rect::new(0, 0, 30, 100)));
        assert!(free.contains(&Rect::new(70, 0, 30, 100)));
        assert!(no_nested(free));
        assert!(free.iter().all(|r| !r.intersects(&sprite.rect)));
    }

    #[test]
    fn prefers_best_short_side_fit() {
        let sp = SheetSpace::new(64, 64, false);
        let mut layout = MaxRectsLayout::new();
        layout.clear(&sp);
        let mut first = vec![Sprite::new("wide", 64, 40)];
        layout.add(&sp, &mut first).expect("add");
        // Only a 64x24 strip remains; 60x24 fits with ssf 0.
        let candidates = vec![Sprite::new("small", 10, 10), Sprite::new("snug", 60, 24)];
        let best = layout.get_best(&sp, &candidates).expect("fits");
        assert_eq!(best.index, 1);
        assert_eq!((best.x, best.y), (0, 40));
    }

    #[test]
    fn rotates_when_only_rotated_fits() {
        let sp = SheetSpace::new(16, 9, true);
        let mut layout = MaxRectsLayout::new();
        layout.clear(&sp);
        let mut sprites = vec![Sprite::new("r", 8, 14)];
        let placed = layout.add(&sp, &mut sprites).expect("add");
        assert_eq!(placed.len(), 1);
        assert!(placed[0].rotated);
        assert_eq!((placed[0].width(), placed[0].height()), (14, 8));
    }

    #[test]
    fn rejected_placement_leaves_state_unchanged() {
        let sp = SheetSpace::new(32, 32, false);
        let mut layout = MaxRectsLayout::new();
        layout.clear(&sp);
        let before = layout.free_rects().to_vec();
        let mut sprite = Sprite::new("a", 20, 20);
        let p = Placement {
            index: 0,
            x: 20,
            y: 0,
            rotate: false,
            slice: None,
        };
        assert!(!layout.place(&sp, &mut sprite, &p).expect("place"));
        assert_eq!(layout.free_rects(), before.as_slice());
        assert!(layout.used_rects().is_empty());
    }

    #[test]
    fn zero_area_sprite_keeps_free_space() {
        let sp = SheetSpace::new(32, 32, false);
        let mut layout = MaxRectsLayout::new();
        layout.clear(&sp);
        let mut sprites = vec![Sprite::new("dot", 0, 0)];
        let placed = layout.add(&sp, &mut sprites).expect("add");
        assert_eq!(placed.len(), 1);
        assert_eq!(layout.free_rects(), &[Rect::sized(32, 32)]);
    }

    #[test]
    fn zero_area_sprite_placed_on_full_sheet() {
        let sp = SheetSpace::new(32, 32, false);
        let mut layout = MaxRectsLayout::new();
        layout.clear(&sp);
        let mut full = vec![Sprite::new("block", 32, 32)];
        layout.add(&sp, &mut full).expect("add");
        assert!(layout.free_rects().is_empty());

        let mut sprites = vec![Sprite::new("line", 0, 12), Sprite::new("tail", 1, 1)];
        let placed = layout.add(&sp, &mut sprites).expect("add");
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].name, "line");
        assert_eq!((placed[0].x(), placed[0].y()), (0, 0));
        assert_eq!(sprites.len(), 1);
        assert!(layout.free_rects().is_empty());
    }
}
