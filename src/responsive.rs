// Responsive page-size policy: viewport width in, page size out.

use crate::error::EngineError;
use crate::types::*;

/// Step function from viewport width to page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizePolicy {
    breakpoint_px: u32,
    compact: PageSize,
    wide: PageSize,
}

impl PageSizePolicy {
    pub fn new(breakpoint_px: u32, compact: PageSize, wide: PageSize) -> Self {
        PageSizePolicy {
            breakpoint_px,
            compact,
            wide,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(PageSizePolicy {
            breakpoint_px: config.breakpoint_px,
            compact: PageSize::try_from(config.compact_page_size)?,
            wide: PageSize::try_from(config.wide_page_size)?,
        })
    }

    /// Compact below the breakpoint, wide at or above it.
    pub fn page_size_for(&self, viewport_width_px: u32) -> PageSize {
        if viewport_width_px < self.breakpoint_px {
            self.compact
        } else {
            self.wide
        }
    }
}

impl Default for PageSizePolicy {
    fn default() -> Self {
        PageSizePolicy::new(640, PageSize::COMPACT, PageSize::WIDE)
    }
}

/// Page size for a viewport under the default policy (`< 640px` → 15, else 25).
pub fn page_size_for(viewport_width_px: u32) -> PageSize {
    PageSizePolicy::default().page_size_for(viewport_width_px)
}
