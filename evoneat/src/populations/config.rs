use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Configuration data for population generation
/// and evolution.
///
/// # Note
/// All quantities expressing probabilities
/// should be in the range [0.0, 1.0]. Using
/// values that are not in this bound may result
/// in odd behaviours and/or incorrect programs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Size of the population. Fixed for the
    /// whole run.
    pub size: NonZeroUsize,
    /// Genetic distance threshold, at or beyond which
    /// genomes are considered as belonging to
    /// different species.
    pub distance_threshold: f32,
    /// Chance that an offspring will be a mutated
    /// copy of a single parent (as opposed to the
    /// result of crossover).
    pub asexual_reproduction_chance: f32,
    /// Number of species members sampled for each
    /// parent selection tournament.
    pub tournament_size: usize,
}

impl PopulationConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, or in the case of
    /// `NonZeroUsize`s, 1.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to abbreviate configuration
    /// instantiation, or to fill in unused values.
    ///
    /// # Examples
    /// ```
    /// use evoneat::PopulationConfig;
    ///
    /// let cfg1 = PopulationConfig::zero();
    ///
    /// let cfg2 = PopulationConfig {
    ///     // Specify some values here...
    ///     distance_threshold: 3.0,
    ///     // Default the rest...
    ///     ..PopulationConfig::zero()
    /// };
    /// ```
    pub const fn zero() -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::MIN,
            distance_threshold: 0.0,
            asexual_reproduction_chance: 0.0,
            tournament_size: 0,
        }
    }
}

impl Default for PopulationConfig {
    /// Returns the typical configuration: 150 genomes,
    /// a distance threshold of 3.0, a 25% chance of
    /// asexual reproduction and 3-way tournaments.
    ///
    /// # Examples
    /// ```
    /// use evoneat::PopulationConfig;
    ///
    /// let config = PopulationConfig::default();
    /// assert_eq!(config.size.get(), 150);
    /// assert_eq!(config.tournament_size, 3);
    /// ```
    fn default() -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::new(150).unwrap_or(NonZeroUsize::MIN),
            distance_threshold: 3.0,
            asexual_reproduction_chance: 0.25,
            tournament_size: 3,
        }
    }
}
