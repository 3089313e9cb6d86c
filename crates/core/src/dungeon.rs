//! Dungeon geometry: grid-to-pixel layout, player movement, and bounds.

use crate::collision::CollisionIndex;
use crate::mapfile::MapFile;
use crate::types::{MoveIntent, Rect, TileCategory};

/// Player hitbox edge, pixels.
pub const PLAYER_SIZE: i32 = 48;
/// Pixels moved per held direction per tick.
pub const PLAYER_VELOCITY: i32 = 5;

/// Pixel dimensions of the tile grid and the inset pickup rectangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub tile_w: i32,
    pub tile_h: i32,
    /// Height of the status bar drawn above the grid; all tile rectangles are
    /// offset below it.
    pub top_bar: i32,
    pub pickup_w: i32,
    pub pickup_h: i32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self { tile_w: 50, tile_h: 50, top_bar: 40, pickup_w: 20, pickup_h: 20 }
    }
}

impl GridLayout {
    pub fn tile_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            col as i32 * self.tile_w,
            row as i32 * self.tile_h + self.top_bar,
            self.tile_w,
            self.tile_h,
        )
    }

    /// Pickups occupy a smaller box centered in their cell.
    pub fn pickup_rect(&self, row: usize, col: usize) -> Rect {
        let cell = self.tile_rect(row, col);
        Rect::new(
            cell.x + (self.tile_w - self.pickup_w) / 2,
            cell.y + (self.tile_h - self.pickup_h) / 2,
            self.pickup_w,
            self.pickup_h,
        )
    }
}

pub struct Dungeon {
    rows: usize,
    cols: usize,
    color: (u8, u8, u8),
    layout: GridLayout,
    index: CollisionIndex,
    player_start: (i32, i32),
}

impl Dungeon {
    pub fn from_map(map: &MapFile) -> Self {
        let layout = GridLayout::default();
        let index = CollisionIndex::from_map(map, &layout);
        let (start_row, start_col) = map.player_start;
        let player_start = (
            start_col as i32 * layout.tile_w,
            start_row as i32 * layout.tile_h + layout.top_bar,
        );
        Self { rows: map.rows, cols: map.cols, color: map.color, layout, index, player_start }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn background_color(&self) -> (u8, u8, u8) {
        self.color
    }

    pub fn index(&self) -> &CollisionIndex {
        &self.index
    }

    pub(crate) fn index_mut(&mut self) -> &mut CollisionIndex {
        &mut self.index
    }

    /// Pixel size of the tile grid alone.
    pub fn grid_size_px(&self) -> (i32, i32) {
        (self.cols as i32 * self.layout.tile_w, self.rows as i32 * self.layout.tile_h)
    }

    /// Pixel size of the window needed to fit the grid plus the status bar.
    pub fn window_size_px(&self) -> (i32, i32) {
        let (w, h) = self.grid_size_px();
        (w, h + self.layout.top_bar)
    }

    pub fn spawn_hitbox(&self) -> Rect {
        Rect::new(self.player_start.0, self.player_start.1, PLAYER_SIZE, PLAYER_SIZE)
    }

    /// The playable area is the grid below the status bar.
    pub fn in_bounds(&self, hitbox: Rect) -> bool {
        let (w, h) = self.grid_size_px();
        hitbox.x >= 0
            && hitbox.y >= self.layout.top_bar
            && hitbox.x + hitbox.w <= w
            && hitbox.y + hitbox.h <= self.layout.top_bar + h
    }

    /// Applies one tick of held movement, one axis step at a time, rolling a
    /// step back when it would leave the playable area or enter a block.
    pub fn try_move(&self, hitbox: &mut Rect, intent: MoveIntent) {
        if intent.right {
            self.step(hitbox, PLAYER_VELOCITY, 0);
        }
        if intent.left {
            self.step(hitbox, -PLAYER_VELOCITY, 0);
        }
        if intent.up {
            self.step(hitbox, 0, -PLAYER_VELOCITY);
        }
        if intent.down {
            self.step(hitbox, 0, PLAYER_VELOCITY);
        }
    }

    fn step(&self, hitbox: &mut Rect, dx: i32, dy: i32) {
        hitbox.x += dx;
        hitbox.y += dy;
        if !self.in_bounds(*hitbox) || self.index.collides(*hitbox, TileCategory::Blocks) {
            hitbox.x -= dx;
            hitbox.y -= dy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dungeon(text: &str) -> Dungeon {
        Dungeon::from_map(&MapFile::parse(text).expect("map should parse"))
    }

    #[test]
    fn spawn_is_at_the_declared_cell_below_the_bar() {
        let d = dungeon("dimensions=3x4\ncolor=0,0,0\nplayer=1,2\n    \n    \n    \n");
        assert_eq!(d.spawn_hitbox(), Rect::new(100, 90, PLAYER_SIZE, PLAYER_SIZE));
    }

    #[test]
    fn window_includes_the_status_bar() {
        let d = dungeon("dimensions=3x4\ncolor=0,0,0\nplayer=0,0\n    \n    \n    \n");
        assert_eq!(d.grid_size_px(), (200, 150));
        assert_eq!(d.window_size_px(), (200, 190));
    }

    #[test]
    fn movement_stops_at_the_border() {
        let d = dungeon("dimensions=2x2\ncolor=0,0,0\nplayer=0,0\n  \n  \n");
        let mut hitbox = d.spawn_hitbox();
        for _ in 0..30 {
            d.try_move(&mut hitbox, MoveIntent { left: true, ..MoveIntent::default() });
        }
        assert_eq!(hitbox.x, 0);
        for _ in 0..30 {
            d.try_move(&mut hitbox, MoveIntent { up: true, ..MoveIntent::default() });
        }
        assert_eq!(hitbox.y, d.layout().top_bar);
    }

    #[test]
    fn movement_rolls_back_on_block_collision() {
        // Wall in the cell right of the spawn.
        let d = dungeon("dimensions=1x3\ncolor=0,0,0\nplayer=0,0\n B \n");
        let mut hitbox = d.spawn_hitbox();
        for _ in 0..10 {
            d.try_move(&mut hitbox, MoveIntent { right: true, ..MoveIntent::default() });
        }
        // Any 5-px step from x=0 would overlap the wall at x=50, so the
        // 48-px hitbox never leaves the first cell.
        assert_eq!(hitbox.x, 0);
    }

    #[test]
    fn diagonal_movement_slides_along_walls() {
        let d = dungeon("dimensions=2x3\ncolor=0,0,0\nplayer=0,0\n B \n   \n");
        let mut hitbox = d.spawn_hitbox();
        for _ in 0..14 {
            d.try_move(&mut hitbox, MoveIntent { right: true, down: true, ..MoveIntent::default() });
        }
        // The vertical axis keeps moving while the horizontal axis is blocked;
        // once the hitbox clears the wall row (y=90) it resumes moving right.
        assert_eq!(hitbox.y, 90);
        assert_eq!(hitbox.x, 20);
    }
}
