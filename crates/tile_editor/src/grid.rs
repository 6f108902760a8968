//! Occupancy grid.
//!
//! A square map of `2 * extends` cells per axis, stored row-major. World
//! grid coordinates are shifted by `+extends`, so world cell `(-extends,
//! -extends)` lands on index `(0, 0)`.

use engine_scene::ActorId;

use crate::error::{ConfigError, PlacementRejection};

/// In-bounds cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub x: usize,
    pub y: usize,
}

impl GridCoord {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// State of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    Empty,
    /// Filled with a tile of this type.
    Occupied(ActorId),
}

impl Occupancy {
    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Occupancy::Empty)
    }
}

/// Fixed-size occupancy map.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<ActorId>>,
}

impl TileGrid {
    /// Largest supported half-width, in cells.
    pub const MAX_EXTENDS: u32 = 1024;

    /// A square grid spanning `2 * map_extends_in_grids` cells per axis, all empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MapTooLarge`] above [`TileGrid::MAX_EXTENDS`].
    pub fn new(map_extends_in_grids: u32) -> Result<Self, ConfigError> {
        if map_extends_in_grids > Self::MAX_EXTENDS {
            return Err(ConfigError::MapTooLarge {
                extends: map_extends_in_grids,
                max: Self::MAX_EXTENDS,
            });
        }
        let side = map_extends_in_grids as usize * 2;
        Ok(Self {
            width: side,
            height: side,
            cells: vec![None; side * side],
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bounds-check signed indices.
    #[must_use]
    pub fn coord(&self, x: i64, y: i64) -> Option<GridCoord> {
        let x = usize::try_from(x).ok().filter(|x| *x < self.width)?;
        let y = usize::try_from(y).ok().filter(|y| *y < self.height)?;
        Some(GridCoord { x, y })
    }

    /// Occupancy at signed indices, or `None` outside the map.
    #[must_use]
    pub fn cell(&self, x: i64, y: i64) -> Option<Occupancy> {
        self.coord(x, y).map(|c| self.get(c))
    }

    #[must_use]
    pub fn get(&self, coord: GridCoord) -> Occupancy {
        match self.cells[self.index(coord)] {
            Some(id) => Occupancy::Occupied(id),
            None => Occupancy::Empty,
        }
    }

    /// Fill an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementRejection::Occupied`] if the cell is already filled;
    /// the grid is left unchanged.
    pub fn occupy(&mut self, coord: GridCoord, tile_type: ActorId) -> Result<(), PlacementRejection> {
        let index = self.index(coord);
        if let Some(occupant) = self.cells[index] {
            return Err(PlacementRejection::Occupied {
                x: coord.x,
                y: coord.y,
                occupant,
            });
        }
        self.cells[index] = Some(tile_type);
        Ok(())
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Filled cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (GridCoord, ActorId)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            cell.map(|id| (GridCoord::new(i % self.width, i / self.width), id))
        })
    }

    fn index(&self, coord: GridCoord) -> usize {
        debug_assert!(coord.x < self.width && coord.y < self.height);
        coord.y * self.width + coord.x
    }
}
