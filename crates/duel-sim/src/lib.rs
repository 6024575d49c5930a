//! Headless driver for `duel-engine`: ability offers, move choosers, the
//! per-duel turn loop and batch simulation.

pub mod chooser;
pub mod cli;
pub mod config;
pub mod draft;
pub mod duel;
pub mod error;
pub mod simulate;

pub use chooser::{MoveChoice, MoveChooser, Policy};
pub use config::SimConfig;
pub use duel::{Duel, DuelStatus};
pub use error::SimError;
pub use simulate::{simulate, simulate_with, GameReport, SimulationSummary};
