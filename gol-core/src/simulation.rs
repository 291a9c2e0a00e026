use log::{debug, info};

use crate::config::SimulationConfig;
use crate::cycle::CycleDetector;
use crate::error::{ConfigError, Result};
use crate::grid::Grid;
use crate::pattern::{self, PatternSource};

/// Why a run stopped on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// No cell is left alive.
    Extinct,
    /// The grid returned to a state still held in the fingerprint history.
    Cycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted(Halt),
}

/// Drives the generation loop: fingerprint, render, advance, detect.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    detector: CycleDetector,
    steps: usize,
    alive: usize,
    halted: Option<Halt>,
}

impl Simulation {
    /// Validates `config`, allocates the grid and seeds it from `source`.
    ///
    /// A grid that failed to load is dropped here and never reaches a renderer.
    pub fn new(config: SimulationConfig, source: &PatternSource) -> Result<Self> {
        config.validate()?;
        let mut grid = Grid::new(config.size, config.topology);
        pattern::seed(&mut grid, source)?;
        info!(
            "{}x{} {:?} grid seeded with {} cells",
            config.size,
            config.size,
            config.topology,
            grid.population()
        );

        Ok(Self::from_parts(grid, config.history))
    }

    /// Wraps an already populated grid, e.g. one built cell by cell.
    pub fn with_grid(grid: Grid, history: usize) -> std::result::Result<Self, ConfigError> {
        SimulationConfig {
            size: grid.size(),
            topology: grid.topology(),
            history,
        }
        .validate()?;
        Ok(Self::from_parts(grid, history))
    }

    fn from_parts(grid: Grid, history: usize) -> Self {
        let alive = grid.population();
        Self {
            grid,
            detector: CycleDetector::new(history),
            steps: 0,
            alive,
            halted: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Generations advanced so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Live population after the last advance.
    pub fn alive(&self) -> usize {
        self.alive
    }

    pub fn halted(&self) -> Option<Halt> {
        self.halted
    }

    pub fn current_fingerprint(&self) -> u32 {
        self.grid.fingerprint()
    }

    pub fn neighbor_count_at(&self, x: usize, y: usize) -> usize {
        self.grid.neighbor_count_at(x, y)
    }

    pub fn step(&mut self) -> Status {
        self.step_with(|_| {})
    }

    /// Runs one generation. `render` sees the grid before it is advanced.
    ///
    /// Once halted, further calls neither render nor advance.
    pub fn step_with<F>(&mut self, render: F) -> Status
    where
        F: FnOnce(&Grid),
    {
        if let Some(halt) = self.halted {
            return Status::Halted(halt);
        }

        let repeated = self.detector.record_and_check(self.grid.fingerprint());
        render(&self.grid);
        self.alive = self.grid.advance();
        self.steps += 1;

        let halt = if self.alive == 0 {
            Some(Halt::Extinct)
        } else if repeated {
            Some(Halt::Cycle)
        } else {
            None
        };

        match halt {
            Some(halt) => {
                self.halted = Some(halt);
                info!("halted ({:?}): {}", halt, self.summary());
                Status::Halted(halt)
            }
            None => Status::Running,
        }
    }

    /// Steps until the run halts or `max_steps` generations have passed.
    pub fn run(&mut self, max_steps: Option<usize>) -> Option<Halt> {
        while max_steps.map_or(true, |max| self.steps < max) {
            if let Status::Halted(halt) = self.step() {
                return Some(halt);
            }
        }
        None
    }

    /// Replaces the grid with a random soup and starts counting again.
    pub fn reseed_random(&mut self) {
        self.grid.randomize();
        self.detector.reset();
        self.steps = 0;
        self.alive = self.grid.population();
        self.halted = None;
        debug!("reseeded with {} random cells", self.alive);
    }

    pub fn summary(&self) -> String {
        format!(
            "Game of Life: {} cells alive after {} steps.",
            self.alive, self.steps
        )
    }
}
