use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TexPackError};
use crate::sheet::DIMENSION_LIMIT;

/// Layout strategies, selectable by name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// Rows of sprites stacked top to bottom.
    Shelf,
    /// Columns of sprites laid out left to right (Shelf with axes swapped).
    Stack,
    /// Free-rectangle list with best short-side fit.
    #[serde(alias = "maxrects")]
    MaxRects,
    /// Declared but not implemented; every sprite routed here is reported unplaced.
    Skyline,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 4] = [
        LayoutKind::Shelf,
        LayoutKind::Stack,
        LayoutKind::MaxRects,
        LayoutKind::Skyline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Shelf => "shelf",
            Self::Stack => "stack",
            Self::MaxRects => "max-rects",
            Self::Skyline => "skyline",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutKind {
    type Err = TexPackError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "shelf" => Ok(Self::Shelf),
            "stack" => Ok(Self::Stack),
            "max-rects" | "maxrects" => Ok(Self::MaxRects),
            "skyline" => Ok(Self::Skyline),
            _ => Err(TexPackError::UnknownLayout(s.to_string())),
        }
    }
}

/// Orders applied to the input before packing. Sorting is stable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Keep input order.
    None,
    WidthDesc,
    HeightDesc,
    AreaDesc,
    MaxSideDesc,
    NameAsc,
}

impl FromStr for SortOrder {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "width" | "width_desc" => Ok(Self::WidthDesc),
            "height" | "height_desc" => Ok(Self::HeightDesc),
            "area" | "area_desc" => Ok(Self::AreaDesc),
            "max_side" | "max_side_desc" => Ok(Self::MaxSideDesc),
            "name" | "name_asc" => Ok(Self::NameAsc),
            _ => Err(()),
        }
    }
}

/// Sheet dimension pair. Converts from a single scalar (both axes) or a `(w, h)` pair,
/// and deserializes from either `256` or `[256, 128]`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "ExtentRepr", into = "(u32, u32)")]
pub struct Extent {
    pub w: u32,
    pub h: u32,
}

impl Extent {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

impl From<u32> for Extent {
    fn from(v: u32) -> Self {
        Self { w: v, h: v }
    }
}

impl From<(u32, u32)> for Extent {
    fn from((w, h): (u32, u32)) -> Self {
        Self { w, h }
    }
}

impl From<Extent> for (u32, u32) {
    fn from(e: Extent) -> Self {
        (e.w, e.h)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExtentRepr {
    Scalar(u32),
    Pair(u32, u32),
}

impl From<ExtentRepr> for Extent {
    fn from(r: ExtentRepr) -> Self {
        match r {
            ExtentRepr::Scalar(v) => v.into(),
            ExtentRepr::Pair(w, h) => (w, h).into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackerConfig {
    /// Layout strategy used for every sheet.
    #[serde(default = "default_layout")]
    pub layout: LayoutKind,
    /// Allow 90° rotations where the strategy finds them beneficial.
    #[serde(default)]
    pub allow_rotation: bool,
    /// Skip power-of-two rounding of sheet dimensions.
    #[serde(default)]
    pub npot: bool,
    /// Keep sheet width and height equal.
    #[serde(default)]
    pub square: bool,
    /// Initial sheet size.
    #[serde(default)]
    pub min_size: Extent,
    /// Largest sheet size; 0 leaves an axis unbounded.
    #[serde(default)]
    pub max_size: Extent,
    #[serde(default = "default_sort_order")]
    pub sort_order: SortOrder,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            layout: default_layout(),
            allow_rotation: false,
            npot: false,
            square: false,
            min_size: Extent::default(),
            max_size: Extent::default(),
            sort_order: default_sort_order(),
        }
    }
}

impl PackerConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - a bounded `max_size` axis is smaller than the matching `min_size` axis
    /// - `square` is requested with a max size bounded on both axes but not square
    /// - any size axis exceeds `DIMENSION_LIMIT` (2^31)
    pub fn validate(&self) -> Result<()> {
        let (min, max) = (self.min_size, self.max_size);
        if [min.w, min.h, max.w, max.h].iter().any(|&v| v > DIMENSION_LIMIT) {
            return Err(TexPackError::InvalidConfig(format!(
                "sheet sizes are limited to {DIMENSION_LIMIT}, got min {}x{} max {}x{}",
                min.w, min.h, max.w, max.h
            )));
        }
        if (max.w > 0 && max.w < min.w) || (max.h > 0 && max.h < min.h) {
            return Err(TexPackError::InvalidSizeBounds {
                min_width: min.w,
                min_height: min.h,
                max_width: max.w,
                max_height: max.h,
            });
        }
        if self.square && max.w > 0 && max.h > 0 && max.w != max.h {
            return Err(TexPackError::InvalidConfig(format!(
                "square sheets need a square max_size, got {}x{}",
                max.w, max.h
            )));
        }
        Ok(())
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: PackerConfig = serde_json::from_str(s)?;
        Ok(cfg)
    }

    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}

fn default_layout() -> LayoutKind {
    LayoutKind::Shelf
}
fn default_sort_order() -> SortOrder {
    SortOrder::None
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn layout(mut self, v: LayoutKind) -> Self {
        self.cfg.layout = v;
        self
    }
    pub fn allow_rotation(mut self, v: bool) -> Self {
        self.cfg.allow_rotation = v;
        self
    }
    pub fn npot(mut self, v: bool) -> Self {
        self.cfg.npot = v;
        self
    }
    pub fn square(mut self, v: bool) -> Self {
        self.cfg.square = v;
        self
    }
    pub fn min_size(mut self, v: impl Into<Extent>) -> Self {
        self.cfg.min_size = v.into();
        self
    }
    pub fn max_size(mut self, v: impl Into<Extent>) -> Self {
        self.cfg.max_size = v.into();
        self
    }
    pub fn sort_order(mut self, v: SortOrder) -> Self {
        self.cfg.sort_order = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_names_round_trip() {
        for kind in LayoutKind::ALL {
            assert_eq!(kind.name().parse::<LayoutKind>().ok(), Some(kind));
        }
        assert_eq!("MaxRects".parse::<LayoutKind>().ok(), Some(LayoutKind::MaxRects));
        assert!(matches!(
            "guillotine".parse::<LayoutKind>(),
            Err(TexPackError::UnknownLayout(_))
        ));
    }

    #[test]
    fn extent_from_scalar_or_pair() {
        let cfg = PackerConfig::from_json(r#"{"min_size": 64, "max_size": [512, 256]}"#)
            .expect("parse");
        assert_eq!(cfg.min_size, Extent::new(64, 64));
        assert_eq!(cfg.max_size, Extent::new(512, 256));
        assert_eq!(cfg.layout, LayoutKind::Shelf);
    }

    #[test]
    fn json_layout_names() {
        let cfg = PackerConfig::from_json(r#"{"layout": "max-rects", "allow_rotation": true}"#)
            .expect("parse");
        assert_eq!(cfg.layout, LayoutKind::MaxRects);
        assert!(cfg.allow_rotation);
        assert!(PackerConfig::from_json(r#"{"layout": "tetris"}"#).is_err());
    }

    #[test]
    fn validate_rejects_max_below_min() {
        let cfg = PackerConfig::builder().min_size(256).max_size((512, 128)).build();
        assert!(matches!(
            cfg.validate(),
            Err(TexPackError::InvalidSizeBounds { .. })
        ));
        let unbounded = PackerConfig::builder().min_size(256).max_size(0).build();
        assert!(unbounded.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_square_max_for_square() {
        let cfg = PackerConfig::builder()
            .square(true)
            .max_size((512, 256))
            .build();
        assert!(matches!(cfg.validate(), Err(TexPackError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_sizes_above_limit() {
        let cfg = PackerConfig::builder().max_size((3_000_000_000, 64)).build();
        assert!(matches!(cfg.validate(), Err(TexPackError::InvalidConfig(_))));
        let cfg = PackerConfig::builder().min_size(DIMENSION_LIMIT + 1).build();
        assert!(cfg.validate().is_err());
        let at_limit = PackerConfig::builder().max_size(DIMENSION_LIMIT).build();
        assert!(at_limit.validate().is_ok());
    }
}
