use crate::genomics::GeneticConfig;
use crate::{Innovation, NodeId};

use std::fmt;

use rand::{thread_rng, Rng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Genes are the principal components of genomes.
/// They are created between two nodes, and become
/// network connections in the genome's phenotype.
///
/// A gene's innovation number is assigned once by the
/// [`History`] and never changes afterwards.
///
/// [`History`]: crate::genomics::History
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Gene {
    id: Innovation,
    input: NodeId,
    output: NodeId,
    weight: f32,
    enabled: bool,
}

impl Gene {
    /// Returns a new _enabled_ gene with the specified parameters.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::Gene;
    ///
    /// let gene = Gene::new(42, 3, 9, 2.0);
    /// ```
    pub fn new(id: Innovation, input: NodeId, output: NodeId, weight: f32) -> Gene {
        Gene {
            id,
            input,
            output,
            weight,
            enabled: true,
        }
    }

    /// Returns a random weight. Uses a uniform distribution
    /// over the range ±config.weight_bound. The bound's sign is
    /// ignored, and a non-finite bound always yields 0.
    pub(super) fn random_weight(config: &GeneticConfig) -> f32 {
        let bound = config.weight_bound.abs();
        if bound.is_finite() {
            thread_rng().gen_range(-bound..=bound)
        } else {
            0.0
        }
    }

    /// Replaces the gene's weight with a fresh one, drawn uniformly
    /// from the range ±[`weight_bound`].
    ///
    /// [`weight_bound`]: crate::genomics::GeneticConfig::weight_bound
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{Gene, GeneticConfig};
    ///
    /// let mut gene = Gene::new(42, 3, 9, 2.0);
    ///
    /// gene.randomize_weight(&GeneticConfig {
    ///     weight_bound: 1.0,
    ///     ..GeneticConfig::zero()
    /// });
    ///
    /// assert!(gene.weight().abs() <= 1.0);
    /// ```
    pub fn randomize_weight(&mut self, config: &GeneticConfig) {
        self.weight = Self::random_weight(config);
    }

    /// Perturbs the gene's weight by adding Gaussian noise with
    /// mean 0 and standard deviation [`weight_mutation_power`].
    /// The weight is not clamped afterwards.
    ///
    /// A negative or non-finite mutation power leaves the weight untouched.
    ///
    /// [`weight_mutation_power`]: crate::genomics::GeneticConfig::weight_mutation_power
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{Gene, GeneticConfig};
    ///
    /// let mut gene = Gene::new(42, 3, 9, 0.5);
    ///
    /// // A zero-width distribution leaves the weight where it was.
    /// gene.perturb_weight(&GeneticConfig::zero());
    /// assert_eq!(gene.weight(), 0.5);
    /// ```
    pub fn perturb_weight(&mut self, config: &GeneticConfig) {
        let power = config.weight_mutation_power;
        if !(power >= 0.0 && power.is_finite()) {
            return;
        }
        if let Ok(noise) = Normal::new(0.0, power) {
            self.weight += noise.sample(&mut thread_rng());
        }
    }

    /// Returns the gene's innovation number.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::Gene;
    ///
    /// let gene = Gene::new(42, 3, 9, 2.0);
    ///
    /// assert_eq!(gene.innovation(), 42);
    /// ```
    pub fn innovation(&self) -> Innovation {
        self.id
    }

    /// Returns the id of the gene's source node.
    pub fn input(&self) -> NodeId {
        self.input
    }

    /// Returns the id of the gene's target node.
    pub fn output(&self) -> NodeId {
        self.output
    }

    /// Returns the gene's weight.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Sets the gene's weight
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::Gene;
    ///
    /// let mut gene = Gene::new(42, 3, 9, 2.0);
    /// gene.set_weight(-5.0);
    ///
    /// assert_eq!(gene.weight(), -5.0);
    /// ```
    pub fn set_weight(&mut self, w: f32) {
        self.weight = w;
    }

    /// Returns whether the gene is expressed in the genome's network.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the gene's expression status. Disabled genes are
    /// kept in the genome for inheritance and alignment.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::Gene;
    ///
    /// let mut gene = Gene::new(42, 3, 9, 2.0);
    ///
    /// assert!(gene.enabled());
    ///
    /// gene.set_enabled(false);
    ///
    /// assert!(!gene.enabled());
    /// ```
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns the gene's source and target node ids.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.input, self.output)
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:?}[{:?}->{:?}, {:.3}]{}",
            if self.enabled { "" } else { "(" },
            self.id,
            self.input,
            self.output,
            self.weight,
            if self.enabled { "" } else { ")" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_weight_within_bound() {
        let config = GeneticConfig {
            weight_bound: 1.0,
            ..GeneticConfig::zero()
        };
        for _ in 0..1000 {
            assert!(Gene::random_weight(&config).abs() <= 1.0);
        }
    }

    #[test]
    fn perturb_weight_keeps_enabled_status() {
        let config = GeneticConfig {
            weight_mutation_power: 0.5,
            ..GeneticConfig::zero()
        };
        let mut gene = Gene::new(1, 0, 1, 0.0);
        gene.set_enabled(false);
        gene.perturb_weight(&config);
        assert!(!gene.enabled());
    }

    #[test]
    fn perturb_weight_invalid_power_is_ignored() {
        let config = GeneticConfig {
            weight_mutation_power: -1.0,
            ..GeneticConfig::zero()
        };
        let mut gene = Gene::new(1, 0, 1, 0.25);
        for _ in 0..100 {
            gene.perturb_weight(&config);
        }
        assert_eq!(gene.weight(), 0.25);

        for power in [f32::NAN, f32::INFINITY] {
            gene.perturb_weight(&GeneticConfig {
                weight_mutation_power: power,
                ..GeneticConfig::zero()
            });
            assert_eq!(gene.weight(), 0.25);
        }
    }

    #[test]
    fn random_weight_ignores_bound_sign() {
        let config = GeneticConfig {
            weight_bound: -0.5,
            ..GeneticConfig::zero()
        };
        for _ in 0..1000 {
            assert!(Gene::random_weight(&config).abs() <= 0.5);
        }
    }

    #[test]
    fn random_weight_with_non_finite_bound() {
        for bound in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let config = GeneticConfig {
                weight_bound: bound,
                ..GeneticConfig::zero()
            };
            assert_eq!(Gene::random_weight(&config), 0.0);
        }
    }

    #[test]
    fn display_marks_disabled_genes() {
        let mut gene = Gene::new(7, 0, 2, 1.0);
        assert_eq!(gene.to_string(), "7[0->2, 1.000]");
        gene.set_enabled(false);
        assert_eq!(gene.to_string(), "(7[0->2, 1.000])");
    }
}
