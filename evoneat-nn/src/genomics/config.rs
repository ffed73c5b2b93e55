use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for genome generation
/// and inter-genome operations.
///
/// # Note
/// All quantities expressing probabilities
/// should be in the range [0.0, 1.0]. Using
/// values that are not in this bound may result
/// in odd behaviours and/or incorrect programs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Number of inputs in a genome.
    pub input_count: NonZeroUsize,
    /// Number of outputs in a genome.
    pub output_count: NonZeroUsize,
    /// Maximum magnitude of a freshly drawn gene weight.
    /// Initial and reset weights are drawn uniformly
    /// from `[-weight_bound, weight_bound]`. The sign is
    /// ignored, and a non-finite bound gives weights of 0.
    pub weight_bound: f32,
    /// Chance of a weight mutation taking place during mutation.
    pub weight_mutation_chance: f32,
    /// Chance of a gene addition mutation taking place during mutation.
    pub gene_addition_mutation_chance: f32,
    /// Chance of a node addition mutation taking place during mutation.
    pub node_addition_mutation_chance: f32,
    /// Chance of a gene weight being reset during weight mutation,
    /// instead of being perturbed.
    pub weight_reset_chance: f32,
    /// Standard deviation of the Gaussian noise added to
    /// gene weights during weight mutation.
    pub weight_mutation_power: f32,
    /// Maximum number of gene mutation attempts before
    /// mutation returns with failure.
    pub max_gene_addition_mutation_attempts: usize,
    /// Weight of excess genes in genetic distance.
    pub excess_gene_factor: f32,
    /// Weight of disjoint genes in genetic distance.
    pub disjoint_gene_factor: f32,
    /// Weight of the common gene weight average in genetic distance.
    pub common_weight_factor: f32,
    /// Gene count below which genomes are considered small,
    /// and excess and disjoint counts are not normalized.
    pub small_genome_threshold: usize,
}

impl GeneticConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, or in the case of
    /// `NonZeroUsize`s, 1.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to fill in unused values during
    /// configuration instantiation.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::GeneticConfig;
    ///
    /// let cfg1 = GeneticConfig::zero();
    ///
    /// let cfg2 = GeneticConfig {
    ///     // Specify some values here...
    ///     weight_bound: 1.0,
    ///     gene_addition_mutation_chance: 1.0,
    ///     // Default the rest...
    ///     ..GeneticConfig::zero()
    /// };
    /// ```
    pub const fn zero() -> GeneticConfig {
        GeneticConfig {
            input_count: NonZeroUsize::MIN,
            output_count: NonZeroUsize::MIN,
            weight_bound: 0.0,
            weight_mutation_chance: 0.0,
            gene_addition_mutation_chance: 0.0,
            node_addition_mutation_chance: 0.0,
            weight_reset_chance: 0.0,
            weight_mutation_power: 0.0,
            max_gene_addition_mutation_attempts: 0,
            excess_gene_factor: 0.0,
            disjoint_gene_factor: 0.0,
            common_weight_factor: 0.0,
            small_genome_threshold: 0,
        }
    }
}

impl Default for GeneticConfig {
    /// A single-input, single-output configuration
    /// carrying the customary NEAT mutation rates and
    /// distance coefficients.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::GeneticConfig;
    ///
    /// let config = GeneticConfig::default();
    ///
    /// assert_eq!(config.weight_mutation_chance, 0.8);
    /// assert_eq!(config.common_weight_factor, 0.4);
    /// ```
    fn default() -> GeneticConfig {
        GeneticConfig {
            weight_bound: 1.0,
            weight_mutation_chance: 0.8,
            gene_addition_mutation_chance: 0.05,
            node_addition_mutation_chance: 0.03,
            weight_reset_chance: 0.1,
            weight_mutation_power: 0.5,
            max_gene_addition_mutation_attempts: 1,
            excess_gene_factor: 1.0,
            disjoint_gene_factor: 1.0,
            common_weight_factor: 0.4,
            small_genome_threshold: 20,
            ..GeneticConfig::zero()
        }
    }
}
