/*!
* A live cell dies if it has fewer than two live neighbors.
* A live cell with two or three live neighbors lives on to the next generation.
* A live cell with more than three live neighbors dies.
* A dead cell will be brought back to live if it has exactly three live neighbors.
*
* The board is a fixed power-of-two square, either bounded or wrapped into a
* torus. A run ends when every cell is dead or the board repeats a state seen
* within the last few generations.
*/
pub mod checksum;
pub mod config;
pub mod cycle;
pub mod error;
pub mod grid;
pub mod pattern;
pub mod simulation;

pub use config::SimulationConfig;
pub use error::{ConfigError, Error, LoadError};
pub use grid::{CellState, Grid, Topology};
pub use pattern::{Builtin, Dialect, PatternSource};
pub use simulation::{Halt, Simulation, Status};
