//! Cube layout - how a cube and its decimated levels divide into bricks

use crate::error::{MetadataError, Result};
use serde::{Deserialize, Serialize};

/// Size of a brick in each dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u64; 3]", into = "[u64; 3]")]
pub struct BrickSize {
    dims: [u64; 3],
}

impl BrickSize {
    /// Create a new brick size
    pub fn new(dims: [u64; 3]) -> Result<Self> {
        if dims.iter().any(|&d| d == 0) {
            return Err(MetadataError::InvalidInput(format!(
                "brick size must be positive in every dimension, got {:?}",
                dims
            )));
        }
        Ok(Self { dims })
    }

    /// Get the size for a specific dimension
    pub fn get(&self, dim: usize) -> u64 {
        self.dims.get(dim).copied().unwrap_or(1)
    }

    /// Get all dimensions
    pub fn dims(&self) -> [u64; 3] {
        self.dims
    }
}

impl TryFrom<[u64; 3]> for BrickSize {
    type Error = MetadataError;

    fn try_from(dims: [u64; 3]) -> Result<Self> {
        Self::new(dims)
    }
}

impl From<BrickSize> for [u64; 3] {
    fn from(size: BrickSize) -> Self {
        size.dims
    }
}

impl Default for BrickSize {
    fn default() -> Self {
        // ZGY bricks are 64x64x64 samples
        Self { dims: [64, 64, 64] }
    }
}

/// Layout of a cube - its size and bricking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeLayout {
    /// Samples per axis (inline, crossline, z)
    pub size: [u64; 3],

    /// Brick size for chunking
    pub brick_size: BrickSize,
}

impl CubeLayout {
    /// Create a new cube layout
    pub fn new(size: [u64; 3], brick_size: BrickSize) -> Result<Self> {
        if size.iter().any(|&s| s == 0) {
            return Err(MetadataError::InvalidInput(format!(
                "cube size must be positive in every dimension, got {:?}",
                size
            )));
        }
        Ok(Self { size, brick_size })
    }

    /// Size of the cube at a level of detail; each level halves every axis,
    /// rounding up.
    pub fn level_size(&self, level: u32) -> [u64; 3] {
        let factor = 1u64.checked_shl(level).unwrap_or(u64::MAX);
        let mut size = [0; 3];
        for (out, &full) in size.iter_mut().zip(self.size.iter()) {
            *out = full.div_ceil(factor).max(1);
        }
        size
    }

    /// Number of bricks in each dimension at a level of detail
    pub fn brick_count(&self, level: u32) -> [u64; 3] {
        let level_size = self.level_size(level);
        let mut count = [0; 3];
        for (i, out) in count.iter_mut().enumerate() {
            *out = level_size[i].div_ceil(self.brick_size.get(i));
        }
        count
    }

    /// Number of levels of detail. Level 0 is full resolution; levels are added
    /// until a single brick covers the whole level.
    pub fn levels_of_detail(&self) -> u32 {
        let mut level = 0;
        while self.brick_count(level).iter().any(|&n| n > 1) {
            level += 1;
        }
        level + 1
    }

    /// Brick counts for every level of detail
    pub fn bricks_per_level(&self) -> Vec<[u64; 3]> {
        (0..self.levels_of_detail())
            .map(|level| self.brick_count(level))
            .collect()
    }

    /// Total number of bricks at full resolution
    pub fn total_bricks(&self) -> u64 {
        self.brick_count(0).iter().product()
    }

    /// Get a summary string of the layout
    pub fn summary(&self) -> String {
        format!(
            "{} x {} x {} samples, {} bricks of {:?}, {} levels of detail",
            self.size[0],
            self.size[1],
            self.size[2],
            self.total_bricks(),
            self.brick_size.dims(),
            self.levels_of_detail()
        )
    }
}
