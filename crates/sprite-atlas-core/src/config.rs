//! Pipeline configuration, passed explicitly through every stage.

use crate::error::{AtlasError, Result};
use crate::heuristic::Heuristic;
use crate::sort::SortKind;

/// Default maximum bin width/height, chosen after the maximum texture size
/// of current GPUs.
pub const DEFAULT_SIZE: i32 = 4096;

#[derive(Debug, Clone)]
pub struct PackConfig {
    /// Maximum bin width in pixels.
    pub max_width: i32,
    /// Maximum bin height in pixels.
    pub max_height: i32,
    /// Gap reserved between neighbouring sprites.
    pub padding: i32,
    /// Allow 90-degree rotation where it improves placement.
    pub allow_rotate: bool,
    /// Trim fully transparent borders before packing.
    pub trim: bool,
    /// Alpha threshold for trimming; 0 treats any non-zero alpha as opaque.
    pub trim_threshold: u8,
    /// Run the shrink pass after a fully successful pack.
    pub auto_size: bool,
    /// Round final atlas dimensions up to the next power of two.
    pub power_of_two: bool,
    /// Algorithm, fit rule and split rule.
    pub heuristic: Heuristic,
    /// Queue comparator used by the packer.
    pub sort: SortKind,
    /// Flip the comparator order.
    pub sort_reverse: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_SIZE,
            max_height: DEFAULT_SIZE,
            padding: 0,
            allow_rotate: false,
            trim: false,
            trim_threshold: 0,
            auto_size: false,
            power_of_two: false,
            heuristic: Heuristic::MAX_RECTS_BAF,
            sort: SortKind::Area,
            sort_reverse: false,
        }
    }
}

impl PackConfig {
    pub fn builder() -> PackConfigBuilder {
        PackConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_width <= 0 || self.max_height <= 0 {
            return Err(AtlasError::InvalidDimensions {
                width: self.max_width,
                height: self.max_height,
            });
        }
        if self.padding >= self.max_width.min(self.max_height) {
            return Err(AtlasError::InvalidConfig(format!(
                "padding ({}) leaves no usable space in a {}x{} bin",
                self.padding, self.max_width, self.max_height
            )));
        }
        Ok(())
    }
}

/// Fluent builder for [`PackConfig`].
#[derive(Debug, Default, Clone)]
pub struct PackConfigBuilder {
    cfg: PackConfig,
}

impl PackConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackConfig::default(),
        }
    }

    pub fn max_dimensions(mut self, width: i32, height: i32) -> Self {
        self.cfg.max_width = width;
        self.cfg.max_height = height;
        self
    }

    pub fn padding(mut self, padding: i32) -> Self {
        self.cfg.padding = padding;
        self
    }

    pub fn allow_rotate(mut self, enabled: bool) -> Self {
        self.cfg.allow_rotate = enabled;
        self
    }

    pub fn trim(mut self, enabled: bool) -> Self {
        self.cfg.trim = enabled;
        self
    }

    pub fn trim_threshold(mut self, threshold: u8) -> Self {
        self.cfg.trim_threshold = threshold;
        self
    }

    pub fn auto_size(mut self, enabled: bool) -> Self {
        self.cfg.auto_size = enabled;
        self
    }

    pub fn power_of_two(mut self, enabled: bool) -> Self {
        self.cfg.power_of_two = enabled;
        self
    }

    pub fn heuristic(mut self, heuristic: Heuristic) -> Self {
        self.cfg.heuristic = heuristic;
        self
    }

    pub fn sort(mut self, kind: SortKind, reverse: bool) -> Self {
        self.cfg.sort = kind;
        self.cfg.sort_reverse = reverse;
        self
    }

    pub fn build(self) -> PackConfig {
        self.cfg
    }
}
