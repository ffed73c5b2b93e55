//! An implementation of NeuroEvolution of Augmenting Topologies,
//! following the 2002 paper: <http://nn.cs.utexas.edu/keyword?stanley:ec02>
//!
//! The crate provides the generational driver of the algorithm: a
//! [`Population`] that scores its genomes with a user-supplied fitness
//! function, groups them into species by genetic distance, shares fitness
//! within each species, and breeds the next generation through elitism,
//! crossover and mutation. Genomic structure is left to implementors of the
//! [`Genome`] trait. Generational population logging is also supported.
//! A neural network-based genome representation, as in the original
//! algorithm, is supplied by the `evoneat-nn` crate.
//!
//! # Example usage: Evolution of XOR function approximator, using `evoneat-nn`
//! ```
//! use evoneat::{Population, PopulationConfig};
//! use evoneat_nn::{
//!     genomics::{GeneticConfig, NNGenome},
//!     networks::{FeedForwardNetwork, NetworkError},
//! };
//! use serde_json;
//! use std::num::NonZeroUsize;
//!
//! // Allowed error margin for neural net answers.
//! const ERROR_MARGIN: f32 = 0.3;
//!
//! fn evaluate_xor(genome: &NNGenome) -> Result<f32, NetworkError> {
//!     let mut network = FeedForwardNetwork::new(genome)?;
//!
//!     let values = [
//!         ([1.0, 0.0, 0.0], 0.0),
//!         ([1.0, 0.0, 1.0], 1.0),
//!         ([1.0, 1.0, 0.0], 1.0),
//!         ([1.0, 1.0, 1.0], 0.0),
//!     ];
//!
//!     let mut errors = [0.0, 0.0, 0.0, 0.0];
//!     for (i, (input, output)) in values.iter().enumerate() {
//!         errors[i] = (network.evaluate(input)?[0] - output).abs();
//!         if errors[i] < ERROR_MARGIN {
//!             errors[i] = 0.0;
//!         }
//!     }
//!
//!     Ok((4.0 - errors.iter().copied().sum::<f32>()).max(0.0).powi(2))
//! }
//!
//! fn main() {
//!     let genetic_config = GeneticConfig {
//!         input_count: NonZeroUsize::new(3).unwrap(),
//!         output_count: NonZeroUsize::new(1).unwrap(),
//!         weight_bound: 1.0,
//!         weight_mutation_chance: 0.8,
//!         gene_addition_mutation_chance: 0.05,
//!         node_addition_mutation_chance: 0.03,
//!         weight_reset_chance: 0.1,
//!         weight_mutation_power: 0.5,
//!         max_gene_addition_mutation_attempts: 20,
//!         excess_gene_factor: 1.0,
//!         disjoint_gene_factor: 1.0,
//!         common_weight_factor: 0.4,
//!         small_genome_threshold: 20,
//!     };
//!
//!     let population_config = PopulationConfig {
//!         size: NonZeroUsize::new(150).unwrap(),
//!         distance_threshold: 3.0,
//!         asexual_reproduction_chance: 0.25,
//!         tournament_size: 3,
//!     };
//!
//!     let mut population = Population::<_, _, NNGenome>::new(population_config, genetic_config);
//!     for _ in 0..20 {
//!         population.evaluate_fitness(evaluate_xor).unwrap();
//!         if (population.champion().fitness() - 16.0).abs() < f32::EPSILON {
//!             let record = population.champion().to_record();
//!             println!("Solution found!: {}", serde_json::to_string(&record).unwrap());
//!             break;
//!         }
//!         population.evolve().unwrap();
//!     }
//! }
//! ```

mod genome;
mod populations;

pub use genome::*;
pub use populations::*;
