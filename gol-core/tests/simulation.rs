use std::fs;
use std::path::PathBuf;

use gol_core::{
    Builtin, ConfigError, Error, Grid, LoadError, PatternSource, Simulation,
    SimulationConfig, Status, Topology,
};

/// Writes `contents` to a fresh file under the system temp directory.
fn pattern_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gol-core-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn load(name: &str, contents: &str, size: usize, topology: Topology) -> Result<Simulation, Error> {
    let path = pattern_file(name, contents);
    Simulation::new(SimulationConfig::new(size, topology), &PatternSource::File(path))
}

fn alive(grid: &Grid) -> Vec<(usize, usize)> {
    let mut cells: Vec<_> = grid.alive_cells().collect();
    cells.sort();
    cells
}

fn translated(cells: &[(usize, usize)], dx: usize, dy: usize) -> Vec<(usize, usize)> {
    let mut moved: Vec<_> = cells.iter().map(|&(x, y)| (x + dx, y + dy)).collect();
    moved.sort();
    moved
}

#[test]
fn life106_file_sets_exactly_the_listed_cells() {
    let sim = load("three.lif", "#Life 1.06\n1 0\n0 1\n-1 -1\n", 256, Topology::Bounded).unwrap();
    assert_eq!(alive(sim.grid()), vec![(127, 127), (128, 129), (129, 128)]);
}

#[test]
fn rle_glider_translates_diagonally_every_four_generations() {
    let mut sim = load("glider.rle", "x = 3, y = 3\nbo$2bo$3o!\n", 256, Topology::Torus).unwrap();
    let start = alive(sim.grid());
    assert_eq!(start.len(), 5);

    for _ in 0..4 {
        assert_eq!(sim.step(), Status::Running);
    }
    assert_eq!(alive(sim.grid()), translated(&start, 1, 1));
}

#[test]
fn glider_crosses_the_torus_seam() {
    let mut sim = load("seam.rle", "x = 3, y = 3\nbo$2bo$3o!\n", 16, Topology::Torus).unwrap();
    let start = alive(sim.grid());
    // a full lap on a 16-wide torus takes 64 generations, far longer than the history
    for _ in 0..64 {
        assert_eq!(sim.step(), Status::Running);
    }
    assert_eq!(alive(sim.grid()), start);
}

#[test]
fn plaintext_file_loads_rows_from_the_center() {
    let sim = load("block.cells", "!Name: Block\nOO\nOO\n", 64, Topology::Bounded).unwrap();
    assert_eq!(alive(sim.grid()), vec![(32, 32), (32, 33), (33, 32), (33, 33)]);
}

#[test]
fn out_of_bounds_coordinates_refuse_to_start() {
    let result = load("far.lif", "10000 10000\n", 256, Topology::Bounded);
    assert!(matches!(
        result,
        Err(Error::Load(LoadError::OutOfBounds { .. }))
    ));
}

#[test]
fn unsupported_rule_refuses_to_start() {
    let result = load("highlife.rle", "x = 1, y = 1, rule = B36/S23\no!\n", 64, Topology::Torus);
    assert!(matches!(result, Err(Error::Load(LoadError::UnsupportedRule(_)))));
}

#[test]
fn load_errors_read_as_pattern_failures() {
    let result = Simulation::new(
        SimulationConfig::default(),
        &PatternSource::File(PathBuf::from("/definitely/not/here.cells")),
    );
    let message = result.unwrap_err().to_string();
    assert!(message.starts_with("pattern could not be loaded"), "{message}");
}

#[test]
fn bad_sizes_fail_before_seeding() {
    let result = Simulation::new(
        SimulationConfig::new(100, Topology::Bounded),
        &PatternSource::File(PathBuf::from("/definitely/not/here.rle")),
    );
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::SizeNotPowerOfTwo(100)))
    ));
}

#[test]
fn fingerprint_changes_with_each_glider_phase() {
    let mut sim = Simulation::new(
        SimulationConfig::new(64, Topology::Torus),
        &PatternSource::Builtin(Builtin::Glider),
    )
    .unwrap();
    let mut seen = Vec::new();
    for _ in 0..8 {
        seen.push(sim.current_fingerprint());
        sim.step();
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 8);
}

#[test]
fn neighbor_counts_follow_the_topology() {
    let corner = "x = 2, y = 2\n2o$2o!\n";
    let bounded = load("bounded.rle", corner, 8, Topology::Bounded).unwrap();
    let torus = load("torus.rle", corner, 8, Topology::Torus).unwrap();
    // block occupies (3, 3)..=(4, 4)
    assert_eq!(bounded.neighbor_count_at(3, 3), 3);
    assert_eq!(torus.neighbor_count_at(3, 3), 3);
    assert_eq!(bounded.neighbor_count_at(0, 0), 0);
    assert_eq!(torus.neighbor_count_at(2, 2), 1);
}
