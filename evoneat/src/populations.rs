//! A Population is a collection of genomes.
//! Each generation these are scored with a fitness
//! function, grouped into species, and bred into
//! the next generation, with fitness as the source
//! of selective pressure.
mod config;
mod errors;
pub mod logging;
mod offspring_factory;
mod species;

use crate::{Genome, GenomeId, InnovationHistory};
pub use config::PopulationConfig;
pub use errors::{Phase, PopulationError};
use offspring_factory::OffspringFactory;
pub use species::{Species, SpeciesId};

use rayon::prelude::*;
use std::error::Error;
use tracing::{debug, info, trace};

/// A population of genomes, and the driver of
/// their evolution.
///
/// A run moves through the phases
/// `Initialized → (Evaluated → Speciated → Reproduced)* → Done`;
/// each step checks that it is called in order.
#[derive(Clone, Debug)]
pub struct Population<C, H, G> {
    genomes: Vec<G>,
    species: Vec<Species<G>>,
    history: H,
    generation: usize,
    next_genome_id: GenomeId,
    phase: Phase,
    population_config: PopulationConfig,
    genetic_config: C,
}

impl<C, H, G> Population<C, H, G>
where
    G: Genome<InnovationHistory = H, Config = C>,
    H: InnovationHistory<Config = C>,
{
    /// Creates a new population using the passed configurations.
    /// Genomes are numbered from 0, and share a single new
    /// innovation history.
    ///
    /// The type of `genetic_config` depends on the implementation
    /// of [`Genome`], and is effectively opaque to the population.
    ///
    /// [`Genome`]: crate::Genome
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome as G};
    /// use evoneat::{Phase, Population, PopulationConfig};
    ///
    /// let pop_config = PopulationConfig {
    ///     size: std::num::NonZeroUsize::new(10).unwrap(),
    ///     ..PopulationConfig::zero()
    /// };
    /// # let genetic_config = GeneticConfig::zero();
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let population = Population::<_, _, G>::new(pop_config, genetic_config);
    ///
    /// assert_eq!(population.genomes().len(), 10);
    /// assert_eq!(population.phase(), Phase::Initialized);
    /// ```
    pub fn new(population_config: PopulationConfig, genetic_config: C) -> Population<C, H, G> {
        let mut history = H::new(&genetic_config);
        let size = population_config.size.get();
        let genomes = (0..size)
            .map(|id| G::new(id, &mut history, &genetic_config))
            .collect();
        Population {
            genomes,
            species: vec![],
            history,
            generation: 0,
            next_genome_id: size,
            phase: Phase::Initialized,
            population_config,
            genetic_config,
        }
    }

    /// Creates a new population using the passed configurations,
    /// seeded with the specified genomes and the innovation history
    /// they were built with (or loaded into). If the number of seed
    /// genomes is not as large as the configured population size,
    /// the remaining space is filled with new genomes.
    ///
    /// Every genome, seeded or not, receives a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if there are more seed genomes than
    /// the configured population size.
    ///
    /// # Examples
    /// ```
    /// use evoneat::{Population, PopulationConfig};
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
    ///
    /// let pop_config = PopulationConfig {
    ///     size: std::num::NonZeroUsize::new(100).unwrap(),
    ///     ..PopulationConfig::zero()
    /// };
    /// let genetic_config = GeneticConfig::zero();
    /// let mut history = History::new();
    /// let seed: Vec<NNGenome> = (40..43)
    ///     .map(|id| NNGenome::new(id, &mut history, &genetic_config))
    ///     .collect();
    ///
    /// let population = Population::new_seeded(seed, history, pop_config, genetic_config).unwrap();
    ///
    /// assert_eq!(population.genomes().len(), 100);
    /// assert_eq!(population.genomes()[0].id(), Some(0));
    /// ```
    pub fn new_seeded(
        seed: Vec<G>,
        mut history: H,
        population_config: PopulationConfig,
        genetic_config: C,
    ) -> Result<Population<C, H, G>, PopulationError> {
        let size = population_config.size.get();
        if seed.len() > size {
            return Err(PopulationError::OversizedSeed {
                seed: seed.len(),
                size,
            });
        }

        let seeded = seed.len();
        let mut genomes = seed;
        for (id, genome) in genomes.iter_mut().enumerate() {
            genome.set_id(id);
            genome.set_species(None);
        }
        genomes.extend((seeded..size).map(|id| G::new(id, &mut history, &genetic_config)));

        Ok(Population {
            genomes,
            species: vec![],
            history,
            generation: 0,
            next_genome_id: size,
            phase: Phase::Initialized,
            population_config,
            genetic_config,
        })
    }

    /// Evaluates the fitness of each genome in the population,
    /// using the passed evaluator.
    ///
    /// Evaluation is all-or-nothing: every genome is scored
    /// before any fitness is written, so an error leaves
    /// the population exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the evaluator fails or returns a
    /// non-finite value for any genome, or if the population
    /// has been speciated but not yet reproduced, or is done.
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome};
    /// use evoneat::{Population, PopulationConfig};
    /// use evoneat_nn::networks::FeedForwardNetwork;
    ///
    /// # let genetic_config = GeneticConfig::zero();
    /// let mut population = Population::<_, _, NNGenome>::new(
    ///     PopulationConfig::zero(),
    ///     genetic_config,
    /// );
    ///
    /// population.evaluate_fitness(|g| {
    ///     let mut network = FeedForwardNetwork::new(g)?;
    ///     // Networks with outputs closer to 0 are given higher scores.
    ///     let output = network.evaluate(&[1.0])?[0];
    ///     Ok::<_, Box<dyn std::error::Error + Send + Sync>>((1.0 - output).powi(2))
    /// }).unwrap();
    /// ```
    pub fn evaluate_fitness<F, E>(&mut self, mut evaluator: F) -> Result<(), PopulationError>
    where
        F: FnMut(&G) -> Result<f32, E>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        self.expect_phase(
            "evaluate",
            &[Phase::Initialized, Phase::Evaluated, Phase::Reproduced],
        )?;
        let scores = self
            .genomes
            .iter()
            .map(|g| checked_fitness(g, evaluator(g)))
            .collect::<Result<Vec<f32>, _>>()?;
        self.assign_fitness(scores);
        Ok(())
    }

    /// Evaluates the fitness of each genome in the population
    /// on rayon's thread pool. Returns once every evaluation
    /// has finished.
    ///
    /// Behaves otherwise exactly as [`evaluate_fitness`].
    ///
    /// [`evaluate_fitness`]: Population::evaluate_fitness
    ///
    /// # Errors
    ///
    /// As for [`evaluate_fitness`].
    pub fn par_evaluate_fitness<F, E>(&mut self, evaluator: F) -> Result<(), PopulationError>
    where
        F: Fn(&G) -> Result<f32, E> + Sync,
        E: Into<Box<dyn Error + Send + Sync>>,
        G: Sync,
    {
        self.expect_phase(
            "evaluate",
            &[Phase::Initialized, Phase::Evaluated, Phase::Reproduced],
        )?;
        let scores = self
            .genomes
            .par_iter()
            .map(|g| checked_fitness(g, evaluator(g)))
            .collect::<Result<Vec<f32>, _>>()?;
        self.assign_fitness(scores);
        Ok(())
    }

    fn assign_fitness(&mut self, scores: Vec<f32>) {
        for (genome, fitness) in self.genomes.iter_mut().zip(scores) {
            genome.set_fitness(fitness);
        }
        self.phase = Phase::Evaluated;
        debug!(
            generation = self.generation,
            genomes = self.genomes.len(),
            "fitness evaluated"
        );
    }

    /// Groups the population into species. Species are
    /// rebuilt from scratch: each genome, in population
    /// order, joins the first species whose representative
    /// lies within the distance threshold, or founds a new
    /// species as its representative.
    ///
    /// # Errors
    ///
    /// Returns an error unless the population has just been
    /// evaluated.
    pub fn speciate(&mut self) -> Result<(), PopulationError> {
        self.expect_phase("speciate", &[Phase::Evaluated])?;
        self.species.clear();

        for index in 0..self.genomes.len() {
            let compatible = {
                let genome = &self.genomes[index];
                self.species.iter().position(|s| {
                    s.genetic_distance(genome, &self.genetic_config)
                        < self.population_config.distance_threshold
                })
            };
            let species_id =
                compatible.map_or(SpeciesId(self.species.len()), |i| self.species[i].id());
            self.genomes[index].set_species(Some(species_id));
            match compatible {
                Some(i) => self.species[i].add_member(index),
                None => self.species.push(Species::new(
                    species_id,
                    index,
                    self.genomes[index].clone(),
                )),
            }
            trace!(
                genome = ?self.genomes[index].id(),
                species = %species_id,
                founded = compatible.is_none(),
                "genome speciated"
            );
        }

        self.phase = Phase::Speciated;
        Ok(())
    }

    /// Breeds the next generation from the current species.
    ///
    /// Fitness is first shared within each species. Each
    /// species then receives a share of the next generation
    /// proportional to its total adjusted fitness, rounded
    /// down; species with no share die out. Each surviving
    /// species keeps its champion and fills the rest of its
    /// share with mutated offspring of tournament-selected
    /// parents. Any slots left by rounding are filled with
    /// mutated copies of random genomes.
    ///
    /// Every offspring receives a new id, and the new
    /// generation replaces the old one wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error unless the population has just been
    /// speciated.
    pub fn reproduce(&mut self) -> Result<(), PopulationError> {
        self.expect_phase("reproduce", &[Phase::Speciated])?;

        for species in &mut self.species {
            species.adjust_fitness(&mut self.genomes);
        }
        info!(
            generation = self.generation,
            species = self.species.len(),
            best = self.champion().fitness(),
            mean = self.mean_fitness(),
            "generation complete"
        );

        let allotted_offspring = self.allot_offspring();
        for (species, _) in self
            .species
            .iter()
            .zip(&allotted_offspring)
            .filter(|(_, quota)| **quota == 0)
        {
            debug!(
                species = %species.id(),
                members = species.len(),
                average_fitness = species.average_fitness(),
                "species received no offspring"
            );
        }

        let offspring = OffspringFactory::new(
            &self.genomes,
            &self.species,
            &mut self.history,
            &self.genetic_config,
            &self.population_config,
            &mut self.next_genome_id,
        )
        .generate_offspring(&allotted_offspring);

        self.genomes = offspring;
        self.species.clear();
        self.generation += 1;
        self.phase = Phase::Reproduced;
        Ok(())
    }

    /// Speciates the population and breeds the next
    /// generation.
    ///
    /// # Errors
    ///
    /// Returns an error unless the population has just been
    /// evaluated.
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome as G};
    /// use evoneat::{Population, PopulationConfig};
    ///
    /// # let genetic_config = GeneticConfig::zero();
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut population = Population::<_, _, G>::new(
    ///     PopulationConfig::default(),
    ///     genetic_config,
    /// );
    ///
    /// population
    ///     .evaluate_fitness(|g| Ok::<_, std::convert::Infallible>(g.genes().count() as f32))
    ///     .unwrap();
    /// population.evolve().unwrap();
    ///
    /// assert_eq!(population.generation(), 1);
    /// assert_eq!(population.genomes().len(), 150);
    /// ```
    pub fn evolve(&mut self) -> Result<(), PopulationError> {
        self.speciate()?;
        self.reproduce()
    }

    /// Runs the full evolutionary loop for the given number
    /// of generations, then scores the final population once
    /// more and returns its champion. The population is left
    /// in the [`Done`] phase.
    ///
    /// [`Done`]: Phase::Done
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any step; the run
    /// stops there.
    pub fn run<F, E>(&mut self, generations: usize, mut evaluator: F) -> Result<&G, PopulationError>
    where
        F: FnMut(&G) -> Result<f32, E>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        for _ in 0..generations {
            self.evaluate_fitness(&mut evaluator)?;
            self.evolve()?;
        }
        self.evaluate_fitness(&mut evaluator)?;
        self.finish();
        Ok(self.champion())
    }

    /// Like [`run`], with fitness evaluated on rayon's
    /// thread pool.
    ///
    /// [`run`]: Population::run
    ///
    /// # Errors
    ///
    /// As for [`run`].
    pub fn par_run<F, E>(&mut self, generations: usize, evaluator: F) -> Result<&G, PopulationError>
    where
        F: Fn(&G) -> Result<f32, E> + Sync,
        E: Into<Box<dyn Error + Send + Sync>>,
        G: Sync,
    {
        for _ in 0..generations {
            self.par_evaluate_fitness(&evaluator)?;
            self.evolve()?;
        }
        self.par_evaluate_fitness(&evaluator)?;
        self.finish();
        Ok(self.champion())
    }

    fn finish(&mut self) {
        self.phase = Phase::Done;
        info!(
            generation = self.generation,
            best = self.champion().fitness(),
            mean = self.mean_fitness(),
            "run finished"
        );
    }

    /// Allots each species its share of the next generation:
    /// its total adjusted fitness (ignoring negative totals)
    /// as a fraction of all species', times the population
    /// size, rounded down.
    fn allot_offspring(&self) -> Vec<usize> {
        let weights: Vec<f32> = self
            .species
            .iter()
            .map(|s| s.total_adjusted_fitness(&self.genomes).max(0.0))
            .collect();
        let total: f32 = weights.iter().sum();
        if !(total > 0.0 && total.is_finite()) {
            return vec![0; weights.len()];
        }
        let size = self.population_config.size.get() as f32;
        weights
            .iter()
            .map(|w| (w / total * size).floor() as usize)
            .collect()
    }

    fn expect_phase(
        &self,
        operation: &'static str,
        allowed: &[Phase],
    ) -> Result<(), PopulationError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(PopulationError::OutOfOrder {
                operation,
                phase: self.phase,
            })
        }
    }

    /// Returns the best-performing genome by raw fitness.
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome as G};
    /// use evoneat::{Population, PopulationConfig};
    ///
    /// # let genetic_config = GeneticConfig::zero();
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut population = Population::<_, _, G>::new(
    ///     PopulationConfig {
    ///         size: std::num::NonZeroUsize::new(20).unwrap(),
    ///         ..PopulationConfig::zero()
    ///     },
    ///     genetic_config,
    /// );
    ///
    /// let mut fitness = 0.0;
    /// population.evaluate_fitness(move |_| {
    ///     fitness += 10.0;
    ///     Ok::<_, std::convert::Infallible>(fitness)
    /// }).unwrap();
    ///
    /// assert_eq!(population.champion().fitness(), 20.0 * 10.0);
    /// ```
    pub fn champion(&self) -> &G {
        self.genomes
            .iter()
            .max_by(|g1, g2| g1.fitness().total_cmp(&g2.fitness()))
            .expect("empty population has no champion")
    }

    /// Returns the mean raw fitness of the population.
    pub fn mean_fitness(&self) -> f32 {
        self.genomes.iter().map(|g| g.fitness()).sum::<f32>() / self.genomes.len() as f32
    }

    /// Returns all current genomes, in population order.
    pub fn genomes(&self) -> &[G] {
        &self.genomes
    }

    /// Returns the current species. Empty unless the
    /// population is in the [`Speciated`] phase.
    ///
    /// [`Speciated`]: Phase::Speciated
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome as G};
    /// use evoneat::{Population, PopulationConfig};
    ///
    /// # let genetic_config = GeneticConfig::zero();
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut population = Population::<_, _, G>::new(PopulationConfig::default(), genetic_config);
    /// population.evaluate_fitness(|_| Ok::<_, std::convert::Infallible>(1.0)).unwrap();
    /// population.speciate().unwrap();
    ///
    /// for species in population.species() {
    ///     println!(
    ///         "Species {} contains genomes {:?}",
    ///         species.id(),
    ///         species.genomes(population.genomes()).map(|g| g.id()).collect::<Vec<_>>()
    ///     );
    /// }
    /// ```
    pub fn species(&self) -> &[Species<G>] {
        &self.species
    }

    /// Returns the current generation number.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the population's innovation history.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Returns the phase the run is in.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the population configuration.
    pub fn population_config(&self) -> &PopulationConfig {
        &self.population_config
    }

    /// Returns the genetic configuration.
    pub fn genetic_config(&self) -> &C {
        &self.genetic_config
    }
}

/// Validates a single evaluation result.
fn checked_fitness<G: Genome, E>(genome: &G, result: Result<f32, E>) -> Result<f32, PopulationError>
where
    E: Into<Box<dyn Error + Send + Sync>>,
{
    match result {
        Ok(fitness) if fitness.is_finite() => Ok(fitness),
        Ok(fitness) => Err(PopulationError::NonFiniteFitness {
            genome: genome.id(),
            fitness,
        }),
        Err(e) => Err(PopulationError::Evaluation {
            genome: genome.id(),
            source: e.into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::mock::{MockGenome, MockHistory};
    use std::convert::Infallible;
    use std::num::NonZeroUsize;

    type MockPopulation = Population<f32, MockHistory, MockGenome>;

    fn population(size: usize, distance_threshold: f32) -> MockPopulation {
        Population::new(
            PopulationConfig {
                size: NonZeroUsize::new(size).unwrap(),
                distance_threshold,
                asexual_reproduction_chance: 0.25,
                tournament_size: 3,
            },
            1.0,
        )
    }

    fn by_fitness(values: &'static [f32]) -> impl FnMut(&MockGenome) -> Result<f32, Infallible> {
        move |g: &MockGenome| Ok(values[g.id.unwrap() % values.len()])
    }

    fn member_ids(population: &MockPopulation) -> Vec<Vec<usize>> {
        population
            .species()
            .iter()
            .map(|s| {
                s.genomes(population.genomes())
                    .map(|g| g.id.unwrap())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn new_population() {
        let population = population(6, 1.0);

        let ids: Vec<_> = population.genomes().iter().map(|g| g.id).collect();
        assert_eq!(ids, (0..6).map(Some).collect::<Vec<_>>());
        assert_eq!(population.history().created, 6);
        assert_eq!(population.phase(), Phase::Initialized);
        assert_eq!(population.generation(), 0);
        assert!(population.species().is_empty());
    }

    #[test]
    fn speciation_joins_first_compatible_species() {
        let mut population = population(6, 2.5);
        population.evaluate_fitness(by_fitness(&[1.0])).unwrap();
        population.speciate().unwrap();

        assert_eq!(member_ids(&population), [vec![0, 1, 2], vec![3, 4, 5]]);
        for species in population.species() {
            assert_eq!(species.representative(), &population.genomes()[species.members()[0]]);
            for genome in species.genomes(population.genomes()) {
                assert_eq!(genome.species(), Some(species.id()));
            }
        }
    }

    #[test]
    fn speciation_threshold_is_exclusive() {
        let mut population = population(6, 2.0);
        population.evaluate_fitness(by_fitness(&[1.0])).unwrap();
        population.speciate().unwrap();

        assert_eq!(member_ids(&population), [vec![0, 1], vec![2, 3], vec![4, 5]]);
        let ids: Vec<_> = population.species().iter().map(|s| s.id()).collect();
        assert_eq!(ids, [SpeciesId(0), SpeciesId(1), SpeciesId(2)]);
    }

    #[test]
    fn offspring_allotment() {
        let mut population = population(6, 2.5);
        population
            .evaluate_fitness(by_fitness(&[3.0, 3.0, 3.0, 1.0, 1.0, 1.0]))
            .unwrap();
        population.speciate().unwrap();
        for species in &mut population.species {
            species.adjust_fitness(&mut population.genomes);
        }

        // Shares of 4.5 and 1.5, rounded down.
        assert_eq!(population.allot_offspring(), [4, 1]);
    }

    #[test]
    fn offspring_allotment_without_positive_fitness() {
        let mut population = population(6, 2.5);
        population
            .evaluate_fitness(by_fitness(&[-3.0, 0.0, -1.0]))
            .unwrap();
        population.speciate().unwrap();
        for species in &mut population.species {
            species.adjust_fitness(&mut population.genomes);
        }

        assert_eq!(population.allot_offspring(), [0, 0]);

        population.reproduce().unwrap();
        assert_eq!(population.genomes().len(), 6);
    }

    #[test]
    fn reproduction() {
        let mut population = population(6, 2.5);
        population
            .evaluate_fitness(by_fitness(&[3.0, 5.0, 3.0, 1.0, 1.0, 1.0]))
            .unwrap();
        population.evolve().unwrap();

        assert_eq!(population.phase(), Phase::Reproduced);
        assert_eq!(population.generation(), 1);
        assert_eq!(population.genomes().len(), 6);
        assert!(population.species().is_empty());

        let ids: Vec<_> = population.genomes().iter().map(|g| g.id.unwrap()).collect();
        assert_eq!(ids, (6..12).collect::<Vec<_>>());
        assert!(population.genomes().iter().all(|g| g.species.is_none()));

        // Both species get a share, so both champions survive unchanged.
        // Among equally fit members the last one is champion.
        let elites: Vec<_> = population
            .genomes()
            .iter()
            .filter(|g| g.fitness != 0.0)
            .map(|g| (g.position, g.fitness))
            .collect();
        assert_eq!(elites, [(1.0, 5.0), (5.0, 1.0)]);
    }

    #[test]
    fn offspring_are_mutated() {
        let mut population = population(10, 100.0);
        population.evaluate_fitness(by_fitness(&[1.0, 2.0])).unwrap();
        population.evolve().unwrap();

        // One elite, nine mutated children.
        assert_eq!(population.history().mutations, 9);
    }

    #[test]
    fn failed_evaluation_changes_nothing() {
        let mut population = population(6, 2.5);
        population.evaluate_fitness(by_fitness(&[2.0])).unwrap();

        let error = population
            .evaluate_fitness(|g| match g.id {
                Some(3) => Err("simulation diverged"),
                _ => Ok(7.0),
            })
            .unwrap_err();

        match error {
            PopulationError::Evaluation { genome, source } => {
                assert_eq!(genome, Some(3));
                assert_eq!(source.to_string(), "simulation diverged");
            }
            e => panic!("unexpected error: {}", e),
        }
        assert!(population.genomes().iter().all(|g| g.fitness == 2.0));
        assert_eq!(population.phase(), Phase::Evaluated);
    }

    #[test]
    fn non_finite_fitness_is_rejected() {
        let mut population = population(3, 2.5);

        let error = population
            .evaluate_fitness(by_fitness(&[1.0, f32::NAN]))
            .unwrap_err();

        assert!(matches!(
            error,
            PopulationError::NonFiniteFitness { genome: Some(1), .. }
        ));
        assert_eq!(population.phase(), Phase::Initialized);
    }

    #[test]
    fn steps_out_of_order() {
        let mut population = population(4, 2.5);

        assert!(matches!(
            population.speciate(),
            Err(PopulationError::OutOfOrder {
                operation: "speciate",
                phase: Phase::Initialized
            })
        ));
        assert!(matches!(
            population.reproduce(),
            Err(PopulationError::OutOfOrder {
                operation: "reproduce",
                ..
            })
        ));

        population.evaluate_fitness(by_fitness(&[1.0])).unwrap();
        population.speciate().unwrap();
        assert!(matches!(
            population.evaluate_fitness(by_fitness(&[1.0])),
            Err(PopulationError::OutOfOrder {
                phase: Phase::Speciated,
                ..
            })
        ));
        assert!(population.speciate().is_err());
    }

    #[test]
    fn run_ends_scored_and_done() {
        let mut population = population(8, 2.5);

        let champion = population.run(3, by_fitness(&[1.0, 4.0])).unwrap().clone();

        assert_eq!(population.phase(), Phase::Done);
        assert_eq!(population.generation(), 3);
        assert_eq!(population.genomes().len(), 8);
        assert_eq!(&champion, population.champion());
        assert!(population.evaluate_fitness(by_fitness(&[1.0])).is_err());
    }

    #[test]
    fn parallel_evaluation_matches_sequential() {
        let mut sequential = population(20, 2.5);
        let mut parallel = population(20, 2.5);
        let evaluator = |g: &MockGenome| Ok::<_, Infallible>(g.position * 2.0);

        sequential.evaluate_fitness(evaluator).unwrap();
        parallel.par_evaluate_fitness(evaluator).unwrap();

        assert_eq!(sequential.genomes(), parallel.genomes());
    }

    #[test]
    fn seeded_population() {
        let config = PopulationConfig {
            size: NonZeroUsize::new(4).unwrap(),
            ..PopulationConfig::default()
        };
        let seed = vec![MockGenome::at(17, 40.0), MockGenome::at(3, 41.0)];

        let population: MockPopulation =
            Population::new_seeded(seed.clone(), MockHistory::default(), config.clone(), 1.0)
                .unwrap();

        let genomes: Vec<_> = population.genomes().iter().map(|g| (g.id, g.position)).collect();
        assert_eq!(
            genomes,
            [(Some(0), 40.0), (Some(1), 41.0), (Some(2), 2.0), (Some(3), 3.0)]
        );
        assert_eq!(population.history().created, 2);

        let oversized = [seed.clone(), seed, vec![MockGenome::at(0, 0.0)]].concat();
        assert!(matches!(
            MockPopulation::new_seeded(oversized, MockHistory::default(), config, 1.0),
            Err(PopulationError::OversizedSeed { seed: 5, size: 4 })
        ));
    }
}
