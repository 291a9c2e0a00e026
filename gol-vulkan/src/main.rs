mod app;
mod renderer;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use gol_core::config::{DEFAULT_HISTORY, DEFAULT_SIZE, MAX_HISTORY, MAX_SIZE, MIN_HISTORY, MIN_SIZE};
use gol_core::{Builtin, PatternSource, Simulation, SimulationConfig, Topology};
use winit::event_loop::EventLoop;

use crate::app::{Pacing, VulkanApp};

/// Conway's Game of Life on a fixed square board. Stops once every cell is
/// dead or the board starts repeating itself.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Pattern file: `.rle`, `.cells` (plaintext), anything else is read as Life 1.06.
    #[arg(value_name = "PATTERN", conflicts_with = "builtin")]
    pattern: Option<PathBuf>,
    /// Built-in seed to use instead of a file: acorn, glider, r-pentomino, double-u or 42.
    #[arg(short, long, value_name = "NAME")]
    builtin: Option<Builtin>,
    /// Wrap the board edges into a torus.
    #[arg(short, long)]
    torus: bool,
    /// Board side length in cells, a power of two.
    #[arg(
        short,
        long,
        value_name = "CELLS",
        default_value_t = DEFAULT_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(MIN_SIZE as u64..=MAX_SIZE as u64)
    )]
    size: usize,
    /// Generations remembered when looking for repeats.
    #[arg(
        long,
        value_name = "GENERATIONS",
        default_value_t = DEFAULT_HISTORY,
        value_parser = RangedU64ValueParser::<usize>::new().range(MIN_HISTORY as u64..=MAX_HISTORY as u64)
    )]
    history: usize,
    /// Milliseconds each generation after the first stays on screen.
    #[arg(long = "delay-ms", value_name = "MILLISECONDS", default_value_t = 50)]
    delay_ms: u64,
    /// Milliseconds the initial pattern stays on screen.
    #[arg(long = "initial-delay-ms", value_name = "MILLISECONDS", default_value_t = 2000)]
    initial_delay_ms: u64,
    #[arg(long)]
    fullscreen: bool,
    /// Run without a window and print the result.
    #[arg(long)]
    headless: bool,
    /// Give up after this many generations (headless only).
    #[arg(long, value_name = "GENERATIONS", requires = "headless")]
    max_generations: Option<usize>,
}

impl CliArgs {
    fn config(&self) -> SimulationConfig {
        let topology = if self.torus { Topology::Torus } else { Topology::Bounded };
        SimulationConfig::new(self.size, topology).with_history(self.history)
    }

    fn source(&self) -> PatternSource {
        match self.builtin {
            Some(builtin) => PatternSource::Builtin(builtin),
            None => PatternSource::from(self.pattern.clone()),
        }
    }

    fn pacing(&self) -> Pacing {
        Pacing {
            initial: Duration::from_millis(self.initial_delay_ms),
            step: Duration::from_millis(self.delay_ms),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let mut simulation = Simulation::new(args.config(), &args.source()).context("cannot start the simulation")?;

    if args.headless {
        match simulation.run(args.max_generations) {
            Some(halt) => log::info!("stopped: {halt:?}"),
            None => log::info!("generation limit reached"),
        }
        println!("{}", simulation.summary());
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    let mut app = VulkanApp::new(simulation, args.pacing(), args.fullscreen);
    event_loop.run_app(&mut app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_bounded_acorn_run() {
        let args = CliArgs::parse_from(["gol-vulkan"]);
        assert_eq!(args.config(), SimulationConfig::default());
        assert_eq!(args.source(), PatternSource::Builtin(Builtin::Acorn));
        assert_eq!(args.pacing().initial, Duration::from_secs(2));
        assert_eq!(args.pacing().step, Duration::from_millis(50));
    }

    #[test]
    fn flags_map_onto_the_config() {
        let args = CliArgs::parse_from(["gol-vulkan", "--torus", "--size", "128", "--history", "4", "gun.rle"]);
        assert_eq!(
            args.config(),
            SimulationConfig::new(128, Topology::Torus).with_history(4)
        );
        assert_eq!(args.source(), PatternSource::File(PathBuf::from("gun.rle")));
    }

    #[test]
    fn builtin_names_are_accepted() {
        let args = CliArgs::parse_from(["gol-vulkan", "--builtin", "r-pentomino"]);
        assert_eq!(args.source(), PatternSource::Builtin(Builtin::RPentomino));
        assert!(CliArgs::try_parse_from(["gol-vulkan", "--builtin", "gosper"]).is_err());
        assert!(CliArgs::try_parse_from(["gol-vulkan", "--builtin", "glider", "x.rle"]).is_err());
    }

    #[test]
    fn out_of_range_sizes_and_histories_are_rejected_by_the_parser() {
        for args in [
            ["gol-vulkan", "--size", "4294967296"],
            ["gol-vulkan", "--size", "4096"],
            ["gol-vulkan", "--size", "4"],
            ["gol-vulkan", "--history", "18446744073709551615"],
            ["gol-vulkan", "--history", "1"],
        ] {
            assert!(CliArgs::try_parse_from(args).is_err(), "{args:?}");
        }
        let args = CliArgs::parse_from(["gol-vulkan", "--size", "2048", "--history", "1024"]);
        assert_eq!(args.config().validate(), Ok(()));
    }

    #[test]
    fn generation_limit_needs_headless() {
        assert!(CliArgs::try_parse_from(["gol-vulkan", "--max-generations", "5"]).is_err());
        let args = CliArgs::parse_from(["gol-vulkan", "--headless", "--max-generations", "5"]);
        assert_eq!(args.max_generations, Some(5));
    }
}
