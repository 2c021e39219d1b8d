//! Layout engine for sprite sheets.
//!
//! - Strategies: Shelf (rows), Stack (columns), MaxRects (best short-side fit); Skyline is
//!   selectable but not implemented and reports every sprite as unplaced
//! - Sheets start at a minimum size and double on demand, honoring power-of-two,
//!   square and maximum-size constraints
//! - `pack` spreads sprites over as many sheets as needed and returns coordinates only;
//!   compositing pixels is left to the caller
//!
//! Quick example:
//! ```
//! use texpack_core::prelude::*;
//!
//! let cfg = PackerConfig::builder()
//!     .layout(LayoutKind::MaxRects)
//!     .allow_rotation(true)
//!     .max_size(256)
//!     .build();
//! let out = pack_layout(vec![("hero", 64, 32), ("coin", 16, 16)], cfg).unwrap();
//! assert_eq!(out.sheets.len(), 1);
//! assert!(out.unplaced.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod sheet;

pub use config::*;
pub use error::*;
pub use layout::{Layout, Placement, SheetSpace};
pub use model::*;
pub use pipeline::*;
pub use sheet::{DIMENSION_LIMIT, Sheet, next_power_of_two};

/// Convenience prelude for common types and functions.
/// Importing `texpack_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{Extent, LayoutKind, PackerConfig, PackerConfigBuilder, SortOrder};
    pub use crate::error::{Result, TexPackError};
    pub use crate::layout::{
        Layout, MaxRectsLayout, Placement, SheetSpace, ShelfLayout, SkylineLayout, StackLayout,
    };
    pub use crate::model::{PackOutcome, PackStats, PackedSheet, Rect, Sprite};
    pub use crate::sheet::Sheet;
    pub use crate::{pack, pack_layout};
}
