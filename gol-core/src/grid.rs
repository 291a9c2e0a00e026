use rand::Rng;

use crate::checksum;
use crate::error::LoadError;

/// State of a single cell.
///
/// `Survive` only exists while [`Grid::advance`] runs: it marks a cell that
/// will be alive in the next generation and is shifted away before the call
/// returns.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum CellState {
    Dead = 0,
    Alive = 1,
    Survive = 2,
}

const DEAD: u8 = CellState::Dead as u8;
const ALIVE: u8 = CellState::Alive as u8;
const SURVIVE: u8 = CellState::Survive as u8;

impl CellState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            DEAD => CellState::Dead,
            ALIVE => CellState::Alive,
            // an alive cell that was marked keeps its low bit
            2 | 3 => CellState::Survive,
            _ => unreachable!("cell byte {raw} is not a valid state"),
        }
    }
}

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// How neighbor coordinates are resolved at the grid edges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Cells outside the grid do not exist, so edge cells have fewer neighbors.
    #[default]
    Bounded,
    /// Both axes wrap around; every cell has exactly eight neighbors.
    Torus,
}

impl Topology {
    /// Coordinates of the neighbors of `(x, y)` on a `size`-wide grid.
    ///
    /// `size` must be a power of two for the torus mask to be correct.
    pub fn neighbors(self, size: usize, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
        let mask = size - 1;
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            // stepping left of 0 wraps to usize::MAX, which the bounds test rejects
            let nx = x.wrapping_add_signed(dx);
            let ny = y.wrapping_add_signed(dy);
            match self {
                Topology::Bounded => (nx < size && ny < size).then_some((nx, ny)),
                Topology::Torus => Some((nx & mask, ny & mask)),
            }
        })
    }
}

/// A square board of cells stored row-major, one byte per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    topology: Topology,
    cells: Vec<u8>,
}

impl Grid {
    /// Creates an all-dead grid.
    ///
    /// # Panics
    ///
    /// If `size` is not a power of two or its square overflows. Callers
    /// validate this through
    /// [`SimulationConfig::validate`](crate::config::SimulationConfig::validate).
    pub fn new(size: usize, topology: Topology) -> Self {
        assert!(size.is_power_of_two(), "grid size {size} is not a power of two");
        let Some(len) = size.checked_mul(size) else {
            panic!("grid size {size} squared does not fit in memory");
        };
        Grid {
            size,
            topology,
            cells: vec![DEAD; len],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Where patterns are anchored.
    pub fn center(&self) -> (usize, usize) {
        (self.size / 2, self.size / 2)
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    pub fn get(&self, x: usize, y: usize) -> CellState {
        CellState::from_raw(self.cells[self.index(x, y)])
    }

    /// # Panics
    ///
    /// If `state` is `Survive`, which only [`Grid::advance`] may write.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) {
        assert_ne!(state, CellState::Survive, "Survive is internal to advance");
        let index = self.index(x, y);
        self.cells[index] = state as u8;
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)] & ALIVE != 0
    }

    /// Sets a cell alive, refusing coordinates that fall off the grid.
    pub fn set_alive_checked(&mut self, x: i64, y: i64) -> Result<(), LoadError> {
        let size = self.size as i64;
        if !(0..size).contains(&x) || !(0..size).contains(&y) {
            return Err(LoadError::OutOfBounds { x, y });
        }
        self.set(x as usize, y as usize, CellState::Alive);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(DEAD);
    }

    /// Fills the grid with a random soup, each cell alive with probability 1/2.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::rng());
    }

    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in self.cells.iter_mut() {
            *cell = if rng.random_bool(0.5) { ALIVE } else { DEAD };
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == ALIVE).count()
    }

    /// Coordinates of every live cell, row by row.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell & ALIVE != 0)
            .map(|(index, _)| (index % self.size, index / self.size))
    }

    /// Raw cell bytes in row-major order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// CRC-32 of the raw cell bytes.
    pub fn fingerprint(&self) -> u32 {
        checksum::crc32(&self.cells)
    }

    /// Number of live neighbors of `(x, y)` under the grid's topology.
    pub fn neighbor_count_at(&self, x: usize, y: usize) -> usize {
        self.topology
            .neighbors(self.size, x, y)
            .filter(|&(nx, ny)| self.is_alive(nx, ny))
            .count()
    }

    /// Advance the grid by one generation and return the live population.
    ///
    /// The first sweep ORs `Survive` into every cell that lives on; the
    /// alive bit is untouched, so later neighbor counts in the same sweep
    /// still see the previous generation. The second sweep shifts every
    /// cell right by one, leaving exactly the marked cells alive.
    pub fn advance(&mut self) -> usize {
        let mut alive = 0;

        for y in 0..self.size {
            for x in 0..self.size {
                if self.survives(x, y) {
                    let index = self.index(x, y);
                    self.cells[index] |= SURVIVE;
                    alive += 1;
                }
            }
        }

        for cell in self.cells.iter_mut() {
            *cell >>= 1;
            debug_assert!(*cell <= ALIVE, "cell byte {cell} left over after collapse");
        }

        alive
    }

    fn survives(&self, x: usize, y: usize) -> bool {
        let alive_neighbors = self.neighbor_count_at(x, y);
        match (self.is_alive(x, y), alive_neighbors) {
            (true, 2..=3) => true, // Survives
            (false, 3) => true,    // Becomes alive
            _ => false,            // Dies or remains dead
        }
    }
}
