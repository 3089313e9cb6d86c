//! Tile-indexed collision lookup for the dungeon grid.
//!
//! Solid blocks never change after load and live in a plain vector.
//! Interactable tiles (enemies, pickups, gates) are keyed by
//! generation-counted [`TileId`]s, so a snapshot of query results stays valid
//! while entries are removed: a stale id simply resolves to nothing instead of
//! skipping or double-visiting a neighbor.

use slotmap::SlotMap;

use crate::dungeon::GridLayout;
use crate::mapfile::MapFile;
use crate::types::{Rect, TileCategory, TileId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileEntry {
    pub category: TileCategory,
    pub rect: Rect,
}

#[derive(Clone, Default)]
pub struct CollisionIndex {
    blocks: Vec<Rect>,
    entities: SlotMap<TileId, TileEntry>,
}

impl CollisionIndex {
    /// Populates the index from the parsed map matrix, one rectangle per
    /// recognized tile character. Unknown characters contribute nothing.
    pub fn from_map(map: &MapFile, layout: &GridLayout) -> Self {
        let mut index = Self::default();
        for row in 0..map.rows {
            for col in 0..map.cols {
                match map.glyph_at(row, col) {
                    'B' => index.blocks.push(layout.tile_rect(row, col)),
                    'E' => {
                        index.insert(TileCategory::Enemies, layout.tile_rect(row, col));
                    }
                    'G' => {
                        index.insert(TileCategory::Gates, layout.tile_rect(row, col));
                    }
                    'P' => {
                        index.insert(TileCategory::Potions, layout.pickup_rect(row, col));
                    }
                    'A' => {
                        index.insert(TileCategory::Ammo, layout.pickup_rect(row, col));
                    }
                    _ => {}
                }
            }
        }
        index
    }

    pub fn insert(&mut self, category: TileCategory, rect: Rect) -> TileId {
        debug_assert!(category.is_interactable());
        self.entities.insert(TileEntry { category, rect })
    }

    pub fn blocks(&self) -> &[Rect] {
        &self.blocks
    }

    pub fn entries(&self) -> impl Iterator<Item = (TileId, &TileEntry)> {
        self.entities.iter()
    }

    pub fn get(&self, id: TileId) -> Option<&TileEntry> {
        self.entities.get(id)
    }

    pub fn count(&self, category: TileCategory) -> usize {
        match category {
            TileCategory::Blocks => self.blocks.len(),
            _ => self.entities.values().filter(|entry| entry.category == category).count(),
        }
    }

    /// True if `hitbox` intersects any rectangle currently stored under
    /// `category`. Linear scan; the grids are tens to low hundreds of tiles.
    pub fn collides(&self, hitbox: Rect, category: TileCategory) -> bool {
        match category {
            TileCategory::Blocks => self.blocks.iter().any(|rect| rect.intersects(&hitbox)),
            _ => self
                .entities
                .values()
                .any(|entry| entry.category == category && entry.rect.intersects(&hitbox)),
        }
    }

    /// Materialized snapshot of every interactable tile overlapping `hitbox`.
    /// Computed before any mutation so that removing one match cannot perturb
    /// detection of the others in the same tick.
    pub fn find_interactions(&self, hitbox: Rect) -> Vec<(TileId, TileCategory)> {
        self.entities
            .iter()
            .filter(|(_, entry)| entry.rect.intersects(&hitbox))
            .map(|(id, entry)| (id, entry.category))
            .collect()
    }

    /// Deletes exactly one tile; already-removed ids are a no-op.
    pub fn remove(&mut self, id: TileId) -> Option<TileEntry> {
        self.entities.remove(id)
    }
}
