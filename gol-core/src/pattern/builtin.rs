use std::fmt;
use std::str::FromStr;

use crate::error::LoadError;
use crate::grid::Grid;

use super::offset;

/// Seeds that need no pattern file. Offsets are `(dx, dy)` from the grid center.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// Seven cells that take over five thousand generations to settle.
    #[default]
    Acorn,
    Glider,
    RPentomino,
    DoubleU,
    FortyTwo,
}

const ACORN: &[(i64, i64)] = &[(-3, 1), (-2, -1), (-2, 1), (0, 0), (1, 1), (2, 1), (3, 1)];

const GLIDER: &[(i64, i64)] = &[(0, 0), (1, 1), (-1, 2), (0, 2), (1, 2)];

const R_PENTOMINO: &[(i64, i64)] = &[(-1, 0), (0, -1), (0, 0), (0, 1), (1, -1)];

const DOUBLE_U: &[(i64, i64)] = &[
    (-1, -3),
    (0, -3),
    (1, -3),
    (-1, -2),
    (1, -2),
    (-1, -1),
    (1, -1),
    (-1, 3),
    (0, 3),
    (1, 3),
    (-1, 2),
    (1, 2),
    (-1, 1),
    (1, 1),
];

// the digits "4" and "2" side by side
const FORTY_TWO: &[(i64, i64)] = &[
    (-4, -2),
    (-4, -1),
    (-4, 0),
    (-3, 0),
    (-2, -2),
    (-2, -1),
    (-2, 0),
    (-2, 1),
    (-2, 2),
    (0, 2),
    (1, 2),
    (2, 2),
    (2, -1),
    (0, 0),
    (1, 0),
    (2, 0),
    (0, 1),
    (0, -2),
    (1, -2),
    (2, -2),
];

impl Builtin {
    pub const ALL: [Builtin; 5] = [
        Builtin::Acorn,
        Builtin::Glider,
        Builtin::RPentomino,
        Builtin::DoubleU,
        Builtin::FortyTwo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Acorn => "acorn",
            Builtin::Glider => "glider",
            Builtin::RPentomino => "r-pentomino",
            Builtin::DoubleU => "double-u",
            Builtin::FortyTwo => "42",
        }
    }

    pub fn cells(self) -> &'static [(i64, i64)] {
        match self {
            Builtin::Acorn => ACORN,
            Builtin::Glider => GLIDER,
            Builtin::RPentomino => R_PENTOMINO,
            Builtin::DoubleU => DOUBLE_U,
            Builtin::FortyTwo => FORTY_TWO,
        }
    }

    pub fn seed(self, grid: &mut Grid) -> Result<(), LoadError> {
        let (cx, cy) = grid.center();
        for &(dx, dy) in self.cells() {
            grid.set_alive_checked(offset(cx, dx), offset(cy, dy))?;
        }
        Ok(())
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Builtin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f-pentomino" => return Ok(Builtin::RPentomino),
            "forty-two" => return Ok(Builtin::FortyTwo),
            _ => {}
        }
        Builtin::ALL
            .into_iter()
            .find(|builtin| builtin.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = Builtin::ALL.iter().map(|builtin| builtin.name()).collect();
                format!("unknown pattern {s:?}, expected one of {}", names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Topology;

    #[test]
    fn acorn_shape() {
        let mut grid = Grid::new(16, Topology::Bounded);
        Builtin::Acorn.seed(&mut grid).unwrap();
        let mut alive: Vec<_> = grid.alive_cells().collect();
        alive.sort();
        assert_eq!(
            alive,
            vec![(5, 9), (6, 7), (6, 9), (8, 8), (9, 9), (10, 9), (11, 9)]
        );
    }

    #[test]
    fn every_builtin_fits_the_smallest_grid_without_duplicates() {
        for builtin in Builtin::ALL {
            let mut grid = Grid::new(crate::config::MIN_SIZE, Topology::Bounded);
            builtin.seed(&mut grid).unwrap();
            assert_eq!(grid.population(), builtin.cells().len(), "{builtin}");
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for builtin in Builtin::ALL {
            assert_eq!(builtin.name().parse::<Builtin>(), Ok(builtin));
        }
        assert_eq!("F-Pentomino".parse::<Builtin>(), Ok(Builtin::RPentomino));
        assert!("gosper".parse::<Builtin>().is_err());
    }
}
