//! Render classification of the block occupying a world cell.

use serde::{Deserialize, Serialize};

/// The render layer a solid block is drawn in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderLayer {
    /// Fully blocks visibility.
    Opaque,
    /// Alpha-blended (e.g. stained glass, ice).
    Translucent,
    /// Alpha-tested without mipmaps (e.g. glass panes, bars).
    Cutout,
    /// Alpha-tested with mipmaps (e.g. leaves).
    CutoutMipped,
}

impl RenderLayer {
    /// Returns `true` if something behind a block in this layer can be seen
    /// through or past it.
    pub fn is_penetrable(self) -> bool {
        matches!(self, Self::Translucent | Self::Cutout | Self::CutoutMipped)
    }
}

/// What occupies a world cell, as far as the overlay cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockClass {
    /// Nothing there (air).
    Empty,
    /// The cell carries liquid, regardless of any block sharing it.
    Liquid,
    /// A non-liquid block drawn in the given layer.
    Block(RenderLayer),
}

impl BlockClass {
    /// Returns `true` for a non-liquid block whose layer is penetrable.
    pub fn is_penetrable_solid(self) -> bool {
        match self {
            Self::Block(layer) => layer.is_penetrable(),
            Self::Empty | Self::Liquid => false,
        }
    }
}
