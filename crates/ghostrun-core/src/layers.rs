//! Collision layers shared by terrain probes and actor queries.
//!
//! A [`Layers`] value is used two ways: as the surface mask handed to a
//! [`TerrainProbe`](crate::terrain::TerrainProbe), and as the set of layers an
//! actor occupies so hitboxes and explosions can filter what they touch.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Bit set of collision layers.
    ///
    /// # Example
    ///
    /// ```
    /// use ghostrun_core::layers::Layers;
    ///
    /// let blast = Layers::PLAYER | Layers::SLIME;
    /// assert!(blast.intersects(Layers::SLIME | Layers::ENEMY));
    /// assert!(!blast.intersects(Layers::ALLY));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Layers: u32 {
        /// Solid level geometry.
        const GROUND = 1 << 0;
        /// The player character.
        const PLAYER = 1 << 1;
        /// The escorted ally.
        const ALLY = 1 << 2;
        /// Anything the player side may strike (enemies and bosses).
        const ENEMY = 1 << 3;
        /// Slime-family enemies; explosions hit this layer as well.
        const SLIME = 1 << 4;
        /// In-flight projectiles.
        const PROJECTILE = 1 << 5;
    }
}

impl Layers {
    /// The player side: player and ally.
    pub const FRIENDLY: Self = Self::PLAYER.union(Self::ALLY);
}

impl Default for Layers {
    fn default() -> Self {
        Self::empty()
    }
}
