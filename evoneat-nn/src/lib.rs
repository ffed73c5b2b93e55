//! # evoneat-nn
//! A feed-forward neural network implementation of the [`evoneat` crate](../evoneat/index.html)'s `Genome` trait.
//!
//! Provides an [`NNGenome`] type usable in `evoneat` `Population`s, the
//! innovation [`History`] that keeps genes alignable across genomes, a
//! persisted [`GenomeRecord`] shape, and a [`FeedForwardNetwork`] which
//! performs one deterministic forward pass over a genome.
//!
//! [`NNGenome`]: crate::genomics::NNGenome
//! [`History`]: crate::genomics::History
//! [`GenomeRecord`]: crate::genomics::GenomeRecord
//! [`FeedForwardNetwork`]: crate::networks::FeedForwardNetwork
//!
//! # Example usage: Evolution of XOR function approximator
//! ```
//! use evoneat::{Population, PopulationConfig};
//! use evoneat_nn::{
//!     genomics::{GeneticConfig, NNGenome},
//!     networks::{FeedForwardNetwork, NetworkError},
//! };
//! use std::num::NonZeroUsize;
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
//!     let mut error = 0.0;
//!     for (input, output) in values.iter() {
//!         error += (network.evaluate(input)?[0] - output).abs();
//!     }
//!
//!     Ok((4.0 - error).max(0.0).powi(2))
//! }
//!
//! let genetic_config = GeneticConfig {
//!     input_count: NonZeroUsize::new(3).unwrap(),
//!     output_count: NonZeroUsize::new(1).unwrap(),
//!     ..GeneticConfig::default()
//! };
//! let population_config = PopulationConfig {
//!     size: NonZeroUsize::new(50).unwrap(),
//!     ..PopulationConfig::default()
//! };
//!
//! let mut population = Population::<_, _, NNGenome>::new(population_config, genetic_config);
//! let champion = population.run(5, evaluate_xor).unwrap();
//! println!("Best fitness: {}", champion.fitness());
//! ```

pub mod genomics;
pub mod networks;

/// Identifier type used to designate historically
/// identical mutations for the purposes of
/// genome comparison and genetic tracking.
pub type Innovation = usize;

/// Identifier of a node within a genome.
pub type NodeId = usize;
