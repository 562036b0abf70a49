//! Collision tile map for the sprite layer.
//!
//! Tiles are 32×32 world units and stored in row-major order: index = y * width + x.
//! The level starts at the world origin. Anything left of it or right of the last
//! column is a wall; below the last row the [`PitType`] decides.

use glam::Vec2;

use crate::components::aabb::Aabb;
use crate::core::level::{SuspendType, TileCollisionParams, TileDestructType};

/// Edge length of a tile in world units.
pub const TILE_SIZE: u32 = 32;

/// Behavior of the area below the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PitType {
    #[default]
    FallForever,
    InstantDeathPit,
    /// The bottom edge is a floor.
    StandOnPlatform,
}

/// A tile that breaks after enough hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestructibleTile {
    /// Exactly one of `WEAPON`, `SPECIAL`, `SPEED` or `COLLAPSE`.
    pub kind: TileDestructType,
    pub hits_left: i32,
    /// Weapon bitmask for `WEAPON` tiles, minimum speed for `SPEED` tiles.
    pub param: u16,
}

impl DestructibleTile {
    pub fn weapon(weapon_mask: u16, hits: i32) -> Self {
        Self {
            kind: TileDestructType::WEAPON,
            hits_left: hits,
            param: weapon_mask,
        }
    }

    pub fn special(hits: i32) -> Self {
        Self {
            kind: TileDestructType::SPECIAL,
            hits_left: hits,
            param: 0,
        }
    }

    pub fn speed(min_speed: u16, hits: i32) -> Self {
        Self {
            kind: TileDestructType::SPEED,
            hits_left: hits,
            param: min_speed,
        }
    }

    pub fn collapse() -> Self {
        Self {
            kind: TileDestructType::COLLAPSE,
            hits_left: 1,
            param: 0,
        }
    }
}

/// One cell of the collision layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Tile {
    #[default]
    Empty,
    Solid,
    /// Blocks only actors moving down.
    OneWay,
    Destructible(DestructibleTile),
    /// Climbable, never solid.
    Suspend(SuspendType),
}

impl Tile {
    fn blocks(&self, downwards: bool) -> bool {
        match self {
            Tile::Solid | Tile::Destructible(_) => true,
            Tile::OneWay => downwards,
            Tile::Empty | Tile::Suspend(_) => false,
        }
    }
}

/// Tile range covered by a query box, or a verdict reached from the level edges alone.
enum Coverage {
    Edge(bool),
    Tiles { x: (u32, u32), y: (u32, u32) },
}

#[derive(Debug, Clone)]
pub struct TileMap {
    /// Width of the map in tiles.
    pub width: u32,
    /// Height of the map in tiles.
    pub height: u32,
    pub pit_type: PitType,
    tiles: Vec<Tile>,
    collapsing: Vec<(u32, u32)>,
}

impl TileMap {
    /// Create an empty map.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pit_type: PitType::default(),
            tiles: vec![Tile::Empty; (width * height) as usize],
            collapsing: Vec::new(),
        }
    }

    pub fn with_pit_type(mut self, pit_type: PitType) -> Self {
        self.pit_type = pit_type;
        self
    }

    /// Get the tile at grid position (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<&Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get((y * self.width + x) as usize)
    }

    /// Set the tile at grid position (x, y). Out-of-range writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, tile: Tile) {
        if x < self.width && y < self.height {
            self.tiles[(y * self.width + x) as usize] = tile;
        }
    }

    /// Fill a rectangular region with a tile.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, tile: Tile) {
        for ty in y..(y + h).min(self.height) {
            for tx in x..(x + w).min(self.width) {
                self.set(tx, ty, tile);
            }
        }
    }

    /// World-space size of the map.
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(
            (self.width * TILE_SIZE) as f32,
            (self.height * TILE_SIZE) as f32,
        )
    }

    /// Convert a world position to tile grid coordinates.
    pub fn world_to_tile(&self, world_pos: Vec2) -> Option<(u32, u32)> {
        if world_pos.x < 0.0 || world_pos.y < 0.0 {
            return None;
        }
        let tx = world_pos.x as u32 / TILE_SIZE;
        let ty = world_pos.y as u32 / TILE_SIZE;
        if tx >= self.width || ty >= self.height {
            return None;
        }
        Some((tx, ty))
    }

    /// Convert tile grid coordinates to world position (center of tile).
    pub fn tile_to_world(&self, x: u32, y: u32) -> Vec2 {
        let half = (TILE_SIZE / 2) as f32;
        Vec2::new(
            (x * TILE_SIZE) as f32 + half,
            (y * TILE_SIZE) as f32 + half,
        )
    }

    /// Collapse tiles that have been triggered, in trigger order.
    pub fn collapsing_tiles(&self) -> &[(u32, u32)] {
        &self.collapsing
    }

    /// Whether `aabb` is free of tiles that block under `params`. Destroys nothing.
    pub fn is_tile_empty(&self, aabb: &Aabb, params: &TileCollisionParams) -> bool {
        let (xs, ys) = match self.coverage(aabb) {
            Coverage::Edge(empty) => return empty,
            Coverage::Tiles { x, y } => (x, y),
        };
        if params.destruct_type.contains(TileDestructType::IGNORE_SOLID_TILES) {
            return true;
        }
        for y in ys.0..=ys.1 {
            for x in xs.0..=xs.1 {
                if self.tiles[self.index(x, y)].blocks(params.downwards) {
                    return false;
                }
            }
        }
        true
    }

    /// Like [`is_tile_empty`](Self::is_tile_empty), but first consumes destructible
    /// tiles permitted by `params`, spending weapon strength and counting destroyed tiles.
    pub fn try_clear(&mut self, aabb: &Aabb, params: &mut TileCollisionParams) -> bool {
        let (xs, ys) = match self.coverage(aabb) {
            Coverage::Edge(empty) => return empty,
            Coverage::Tiles { x, y } => (x, y),
        };
        for y in ys.0..=ys.1 {
            for x in xs.0..=xs.1 {
                if !self.consume(x, y, params) {
                    return false;
                }
                if !params.destruct_type.contains(TileDestructType::IGNORE_SOLID_TILES)
                    && self.tiles[self.index(x, y)].blocks(params.downwards)
                {
                    return false;
                }
            }
        }
        true
    }

    /// Climbable surface at a world point.
    pub fn tile_suspend_state(&self, x: f32, y: f32) -> SuspendType {
        if x < 0.0 || y < 0.0 {
            return SuspendType::None;
        }
        let tx = x as u32 / TILE_SIZE;
        let ty = y as u32 / TILE_SIZE;
        match self.get(tx, ty) {
            Some(Tile::Suspend(suspend)) => *suspend,
            _ => SuspendType::None,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    fn coverage(&self, aabb: &Aabb) -> Coverage {
        if self.width == 0 || self.height == 0 {
            return Coverage::Edge(true);
        }
        let limit_right = (self.width * TILE_SIZE) as i32;
        let limit_bottom = (self.height * TILE_SIZE) as i32;

        if aabb.l < 0.0 || aabb.r >= limit_right as f32 {
            return Coverage::Edge(false);
        }
        if aabb.b >= limit_bottom as f32 {
            return Coverage::Edge(self.pit_type != PitType::StandOnPlatform);
        }

        let hx1 = (aabb.l as i32).max(0);
        let hx2 = (aabb.r.ceil() as i32).min(limit_right - 1);
        let mut hy1 = (aabb.t as i32).max(0);
        let mut hy2 = (aabb.b.ceil() as i32).min(limit_bottom - 1);
        if hy2 <= 0 {
            hy1 = 0;
            hy2 = 1;
        }

        let size = TILE_SIZE as i32;
        Coverage::Tiles {
            x: ((hx1 / size) as u32, (hx2 / size) as u32),
            y: ((hy1 / size) as u32, (hy2 / size) as u32),
        }
    }

    /// Consume the destructible tile at (x, y) as far as `params` allow.
    /// Returns false when a weapon ran out of strength on it.
    fn consume(&mut self, x: u32, y: u32, params: &mut TileCollisionParams) -> bool {
        let idx = self.index(x, y);
        loop {
            let Tile::Destructible(tile) = self.tiles[idx] else {
                return true;
            };
            if !params.destruct_type.contains(tile.kind) {
                return true;
            }

            if tile.kind == TileDestructType::WEAPON {
                let weapon_bit = 1u16.checked_shl(u32::from(params.used_weapon)).unwrap_or(0);
                if tile.param & weapon_bit == 0 {
                    return true;
                }
                let mut strength = params.weapon_strength;
                if !self.advance(idx, &mut strength) {
                    return true;
                }
                params.weapon_strength = strength;
                params.tiles_destroyed += 1;
                log::trace!("tile ({}, {}) hit by weapon {}", x, y, params.used_weapon);
                if params.weapon_strength <= 0 {
                    return false;
                }
            } else if tile.kind == TileDestructType::SPECIAL || tile.kind == TileDestructType::SPEED {
                if tile.kind == TileDestructType::SPEED && f32::from(tile.param) > params.speed {
                    return true;
                }
                let mut amount = 1;
                if !self.advance(idx, &mut amount) {
                    return true;
                }
                params.tiles_destroyed += 1;
                log::trace!("tile ({}, {}) broken", x, y);
            } else {
                if !self.collapsing.contains(&(x, y)) {
                    self.collapsing.push((x, y));
                    params.tiles_destroyed += 1;
                    log::trace!("tile ({}, {}) collapsing", x, y);
                }
                return true;
            }
        }
    }

    /// Spend up to `amount` hits on the tile at `idx`. An exhausted tile becomes empty.
    fn advance(&mut self, idx: usize, amount: &mut i32) -> bool {
        let Tile::Destructible(tile) = &mut self.tiles[idx] else {
            return false;
        };
        if *amount <= 0 || tile.hits_left <= 0 {
            return false;
        }
        let current = (*amount).min(tile.hits_left);
        tile.hits_left -= current;
        *amount -= current;
        if tile.hits_left <= 0 {
            self.tiles[idx] = Tile::Empty;
        }
        true
    }
}
