use super::{Layout, Placement, SheetSpace};
use crate::error::{Result, TexPackError};
use crate::model::Sprite;

/// Skyline is selectable by name but has no placement algorithm. Every attempt
/// to add or place fails, so the sheet hands all of its sprites back.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkylineLayout;

impl Layout for SkylineLayout {
    fn clear(&mut self, _space: &SheetSpace) {}

    fn get_best(&self, _space: &SheetSpace, _candidates: &[Sprite]) -> Option<Placement> {
        None
    }

    fn place(
        &mut self,
        _space: &SheetSpace,
        _sprite: &mut Sprite,
        _placement: &Placement,
    ) -> Result<bool> {
        Err(TexPackError::NotImplemented("skyline"))
    }

    fn add(&mut self, _space: &SheetSpace, _remaining: &mut Vec<Sprite>) -> Result<Vec<Sprite>> {
        Err(TexPackError::NotImplemented("skyline"))
    }
}
