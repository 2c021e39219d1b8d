use tracing::{debug, instrument, warn};

use crate::config::{PackerConfig, SortOrder};
use crate::error::Result;
use crate::model::{PackOutcome, PackedSheet, Sprite};
use crate::sheet::Sheet;

/// Packs `sprites` onto as many sheets as needed using configuration `cfg`.
///
/// Notes:
/// - Sorting is stable, so equal keys keep their input order and results are deterministic.
/// - Each sheet receives everything the previous sheets could not take. Packing stops
///   when a fresh sheet accepts nothing; those sprites end up in `unplaced`.
#[instrument(skip_all, fields(layout = %cfg.layout, sprites = sprites.len()))]
pub fn pack(sprites: Vec<Sprite>, cfg: PackerConfig) -> Result<PackOutcome> {
    cfg.validate()?;

    let mut remaining = sprites;
    sort_sprites(&mut remaining, cfg.sort_order);

    let mut sheets: Vec<PackedSheet> = Vec::new();
    while !remaining.is_empty() {
        let mut sheet = Sheet::new(&cfg);
        remaining = sheet.add(remaining);
        if sheet.sprites().is_empty() {
            break;
        }
        let packed = sheet.finish(sheets.len());
        debug!(
            sheet = packed.index,
            width = packed.width,
            height = packed.height,
            sprites = packed.sprites.len(),
            "sheet complete"
        );
        // Above 1.0 only if a layout produced overlapping placements.
        let coverage = packed.coverage();
        if coverage > 1.0 {
            warn!(sheet = packed.index, coverage, "sprite area exceeds sheet area");
        }
        sheets.push(packed);
    }

    for s in &remaining {
        warn!(
            sprite = %s.name,
            width = s.width(),
            height = s.height(),
            "could not place sprite"
        );
    }

    Ok(PackOutcome {
        sheets,
        unplaced: remaining,
    })
}

/// Packs sizes given as `(name, width, height)`.
pub fn pack_layout<K: Into<String>>(
    inputs: Vec<(K, u32, u32)>,
    cfg: PackerConfig,
) -> Result<PackOutcome> {
    let sprites = inputs
        .into_iter()
        .map(|(name, w, h)| Sprite::new(name, w, h))
        .collect();
    pack(sprites, cfg)
}

fn sort_sprites(sprites: &mut [Sprite], order: SortOrder) {
    match order {
        SortOrder::None => {}
        SortOrder::NameAsc => sprites.sort_by(|a, b| a.name.cmp(&b.name)),
        SortOrder::AreaDesc => sprites.sort_by(|a, b| {
            b.rect
                .area()
                .cmp(&a.rect.area())
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortOrder::MaxSideDesc => sprites.sort_by(|a, b| {
            b.width()
                .max(b.height())
                .cmp(&a.width().max(a.height()))
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortOrder::HeightDesc => {
            sprites.sort_by(|a, b| b.height().cmp(&a.height()).then_with(|| a.name.cmp(&b.name)))
        }
        SortOrder::WidthDesc => {
            sprites.sort_by(|a, b| b.width().cmp(&a.width()).then_with(|| a.name.cmp(&b.name)))
        }
    }
}
