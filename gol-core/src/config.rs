use crate::error::ConfigError;
use crate::grid::Topology;

/// Side length used when nothing else is requested: `1 << 8`.
pub const DEFAULT_SIZE: usize = 1 << 8;
pub const MIN_SIZE: usize = 8;
/// Largest side length; the renderer keeps one instance per cell.
pub const MAX_SIZE: usize = 1 << 11;
/// Fingerprints retained by the cycle detector.
pub const DEFAULT_HISTORY: usize = 8;
pub const MIN_HISTORY: usize = 2;
pub const MAX_HISTORY: usize = 1 << 10;

/// Settings fixed for the lifetime of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub size: usize,
    pub topology: Topology,
    pub history: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            topology: Topology::Bounded,
            history: DEFAULT_HISTORY,
        }
    }
}

impl SimulationConfig {
    pub fn new(size: usize, topology: Topology) -> Self {
        Self {
            size,
            topology,
            ..Self::default()
        }
    }

    pub fn with_history(mut self, history: usize) -> Self {
        self.history = history;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.size.is_power_of_two() {
            return Err(ConfigError::SizeNotPowerOfTwo(self.size));
        }
        if self.size < MIN_SIZE {
            return Err(ConfigError::SizeTooSmall(self.size));
        }
        if self.size > MAX_SIZE {
            return Err(ConfigError::SizeTooLarge(self.size));
        }
        if self.history < MIN_HISTORY {
            return Err(ConfigError::HistoryTooShort(self.history));
        }
        if self.history > MAX_HISTORY {
            return Err(ConfigError::HistoryTooLong(self.history));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_sizes_that_are_not_powers_of_two() {
        let config = SimulationConfig::new(200, Topology::Torus);
        assert_eq!(config.validate(), Err(ConfigError::SizeNotPowerOfTwo(200)));

        let config = SimulationConfig::new(0, Topology::Bounded);
        assert_eq!(config.validate(), Err(ConfigError::SizeNotPowerOfTwo(0)));
    }

    #[test]
    fn rejects_tiny_grids_and_histories() {
        assert_eq!(
            SimulationConfig::new(4, Topology::Bounded).validate(),
            Err(ConfigError::SizeTooSmall(4))
        );
        assert_eq!(
            SimulationConfig::default().with_history(1).validate(),
            Err(ConfigError::HistoryTooShort(1))
        );
    }

    #[test]
    fn rejects_grids_and_histories_that_are_too_large() {
        assert_eq!(SimulationConfig::new(MAX_SIZE, Topology::Torus).validate(), Ok(()));
        assert_eq!(
            SimulationConfig::new(MAX_SIZE * 2, Topology::Torus).validate(),
            Err(ConfigError::SizeTooLarge(MAX_SIZE * 2))
        );
        assert_eq!(
            SimulationConfig::new(usize::MAX / 2 + 1, Topology::Bounded).validate(),
            Err(ConfigError::SizeTooLarge(usize::MAX / 2 + 1))
        );
        assert_eq!(
            SimulationConfig::default().with_history(usize::MAX).validate(),
            Err(ConfigError::HistoryTooLong(usize::MAX))
        );
        assert_eq!(SimulationConfig::default().with_history(MAX_HISTORY).validate(), Ok(()));
    }
}
