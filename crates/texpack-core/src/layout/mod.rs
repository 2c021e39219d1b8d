use crate::config::LayoutKind;
use crate::error::Result;
use crate::model::{Rect, Sprite};

pub mod maxrects;
pub mod shelf;
pub mod skyline;

pub use maxrects::MaxRectsLayout;
pub use shelf::{Orientation, ShelfLayout, StackLayout};
pub use skyline::SkylineLayout;

/// The part of a sheet a layout is allowed to see: its current size and whether
/// sprites may be rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSpace {
    pub width: u32,
    pub height: u32,
    pub allow_rotation: bool,
}

impl SheetSpace {
    pub fn new(width: u32, height: u32, allow_rotation: bool) -> Self {
        Self {
            width,
            height,
            allow_rotation,
        }
    }

    /// Returns true if `rect` lies within the sheet.
    pub fn check(&self, rect: &Rect) -> bool {
        rect.right() <= self.width && rect.bottom() <= self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::sized(self.width, self.height)
    }
}

/// A chosen candidate: which sprite, where its top-left goes, and whether to
/// rotate it first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index into the candidate slice passed to `get_best`.
    pub index: usize,
    pub x: u32,
    pub y: u32,
    pub rotate: bool,
    /// Shelf/stack the sprite goes on; `None` opens a new one. Unused by MaxRects.
    pub slice: Option<usize>,
}

/// A layout selects and commits sprites one at a time on a single sheet.
///
/// `get_best` must not mutate anything. `place` must either commit fully or
/// leave the layout and the sprite unchanged.
pub trait Layout {
    /// Resets private state to "nothing placed" for a sheet of the given size.
    fn clear(&mut self, space: &SheetSpace);

    /// Best placement among `candidates`, or `None` if nothing fits right now.
    fn get_best(&self, space: &SheetSpace, candidates: &[Sprite]) -> Option<Placement>;

    /// Commits `placement` for `sprite`. `Ok(false)` means the placement is no
    /// longer valid and nothing changed.
    fn place(&mut self, space: &SheetSpace, sprite: &mut Sprite, placement: &Placement)
    -> Result<bool>;

    /// Regions still free on the sheet, for debug overlays.
    fn free_space(&self, _space: &SheetSpace) -> Vec<Rect> {
        Vec::new()
    }

    /// Places as many of `remaining` as possible, moving them into the returned list.
    ///
    /// On error, everything placed during this call is moved back into `remaining`.
    fn add(&mut self, space: &SheetSpace, remaining: &mut Vec<Sprite>) -> Result<Vec<Sprite>> {
        let mut placed: Vec<Sprite> = Vec::new();
        let mut rejected: Vec<Sprite> = Vec::new();
        while let Some(choice) = self.get_best(space, remaining) {
            let mut sprite = remaining.remove(choice.index);
            match self.place(space, &mut sprite, &choice) {
                Ok(true) => placed.push(sprite),
                Ok(false) => rejected.push(sprite),
                Err(e) => {
                    remaining.push(sprite);
                    remaining.append(&mut rejected);
                    remaining.append(&mut placed);
                    return Err(e);
                }
            }
        }
        remaining.append(&mut rejected);
        Ok(placed)
    }
}

impl LayoutKind {
    /// Creates a fresh, cleared layout of this kind for `space`.
    pub fn create(self, space: &SheetSpace) -> Box<dyn Layout> {
        let mut layout: Box<dyn Layout> = match self {
            LayoutKind::Shelf => Box::new(ShelfLayout::new()),
            LayoutKind::Stack => Box::new(StackLayout::new()),
            LayoutKind::MaxRects => Box::new(MaxRectsLayout::new()),
            LayoutKind::Skyline => Box::new(SkylineLayout),
        };
        layout.clear(space);
        layout
    }
}
