//! Generational snapshots of a population, for
//! inspecting a run after the fact.
use super::{Population, SpeciesId};

use crate::genome::{Genome, InnovationHistory};

use std::fmt;

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportingLevel {
    /// Clones the entire population, grouped by species.
    AllGenomes,
    /// Clones species and their champions.
    SpeciesChampions,
    /// Clones only the population champion.
    PopulationChampion,
    /// Clones no genomes.
    NoGenomes,
}

/// A snapshot of a population.
#[derive(Clone, Debug)]
pub struct Log<G> {
    pub generation_number: usize,
    pub generation_sample: GenerationMemberRecord<G>,
    pub species_count: usize,
    pub genome_stats: Vec<(String, Stats)>,
}

impl<G> fmt::Display for Log<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Log {{")?;
        writeln!(f, "\tgeneration_number: {}", self.generation_number)?;
        writeln!(f, "\tspecies_count: {}", self.species_count)?;
        for (name, stats) in &self.genome_stats {
            writeln!(f, "\t{}: {}", name, stats)?;
        }
        write!(f, "}}")
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub maximum: f32,
    pub minimum: f32,
    pub mean: f32,
    pub median: f32,
}

impl Stats {
    /// Returns statistics about numbers in a sequence,
    /// or `None` if the sequence is empty.
    ///
    /// # Examples
    /// ```
    /// use evoneat::logging::Stats;
    ///
    /// let stats = Stats::of([-2.0, -1.0, 0.5, 1.0, 1.5]).unwrap();
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    ///
    /// // Even-length sequences take the mean of the middle pair.
    /// let stats = Stats::of([4.0, 1.0, 3.0, 2.0]).unwrap();
    /// assert_eq!(stats.median, 2.5);
    ///
    /// assert!(Stats::of([]).is_none());
    /// ```
    pub fn of(data: impl IntoIterator<Item = f32>) -> Option<Stats> {
        let mut data: Vec<f32> = data.into_iter().collect();
        if data.is_empty() {
            return None;
        }
        let (mut max, mut min, mut sum) = (f32::MIN, f32::MAX, 0.0);
        for d in &data {
            max = d.max(max);
            min = d.min(min);
            sum += d;
        }
        let mean = sum / data.len() as f32;

        let mid = data.len() / 2;
        let mut median = *data.select_nth_unstable_by(mid, f32::total_cmp).1;
        if data.len() % 2 == 0 {
            // The lower middle value is the largest left of `mid`.
            let lower = data[..mid]
                .iter()
                .copied()
                .max_by(f32::total_cmp)
                .unwrap_or(median);
            median = (median + lower) / 2.0;
        }
        Some(Stats {
            maximum: max,
            minimum: min,
            mean,
            median,
        })
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max {:.3}, min {:.3}, mean {:.3}, median {:.3}",
            self.maximum, self.minimum, self.mean, self.median
        )
    }
}

/// A reporting-level dependant store
/// of genomes from a population.
#[derive(Clone, Debug)]
pub enum GenerationMemberRecord<G> {
    /// Species IDs and member genomes.
    Species(Vec<(SpeciesId, Vec<G>)>),
    /// Only species IDs and species champions.
    SpeciesChampions(Vec<(SpeciesId, G)>),
    /// Only population champion.
    PopulationChampion(G),
    /// Empty.
    None,
}

/// A log of the evolution of a population over time.
#[derive(Clone, Debug)]
pub struct EvolutionLogger<G> {
    reporting_level: ReportingLevel,
    logs: Vec<Log<G>>,
}

impl<G: Genome> EvolutionLogger<G> {
    /// Returns a logger with the appropiate reporting level.
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::NNGenome as G;
    /// use evoneat::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let logger = EvolutionLogger::<G>::new(ReportingLevel::NoGenomes);
    /// ```
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger<G> {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Store a snapshot of a population.
    ///
    /// The `genome_stat_extractor` provides a way of
    /// obtaining arbitrary statistics on the population,
    /// where each statistic is named by `stat_names`.
    ///
    /// Species-level samples are only available once the
    /// population has been speciated; before that, the
    /// species lists are empty.
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome as G};
    /// use evoneat::{Population, PopulationConfig};
    /// use evoneat::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut logger = EvolutionLogger::<G>::new(ReportingLevel::SpeciesChampions);
    /// # let genetic_config = GeneticConfig::zero();
    /// let mut population = Population::<_, _, G>::new(PopulationConfig::default(), genetic_config);
    ///
    /// // Evaluate and speciate the population...
    /// population.evaluate_fitness(|g| Ok::<_, std::convert::Infallible>(g.genes().count() as f32)).unwrap();
    /// population.speciate().unwrap();
    /// // Then log a snapshot.
    /// logger.log(&population, &|g| [g.fitness(), g.genes().count() as f32], ["fitness", "size"]);
    ///
    /// let log = logger.iter().last().unwrap();
    /// assert_eq!(log.genome_stats[0].0, "fitness");
    /// assert_eq!(log.genome_stats[1].1.maximum, 1.0);
    /// ```
    pub fn log<C, H, GSE, const N: usize>(
        &mut self,
        population: &Population<C, H, G>,
        genome_stat_extractor: &GSE,
        stat_names: [&str; N],
    ) where
        H: InnovationHistory<Config = C>,
        G: Genome<InnovationHistory = H, Config = C>,
        GSE: Fn(&G) -> [f32; N],
    {
        let genomes = population.genomes();
        let stats = stat_names
            .iter()
            .map(|name| name.to_string())
            .zip(unzip_n_vecs(genomes.iter().map(genome_stat_extractor)))
            .filter_map(|(name, data)| Stats::of(data).map(|stats| (name, stats)))
            .collect();
        self.logs.push(Log {
            generation_number: population.generation(),
            generation_sample: match self.reporting_level {
                ReportingLevel::AllGenomes => GenerationMemberRecord::Species(
                    population
                        .species()
                        .iter()
                        .map(|s| (s.id(), s.genomes(genomes).cloned().collect()))
                        .collect(),
                ),
                ReportingLevel::SpeciesChampions => GenerationMemberRecord::SpeciesChampions(
                    population
                        .species()
                        .iter()
                        .filter_map(|s| s.champion(genomes).map(|g| (s.id(), g.clone())))
                        .collect(),
                ),
                ReportingLevel::PopulationChampion => {
                    GenerationMemberRecord::PopulationChampion(population.champion().clone())
                }
                ReportingLevel::NoGenomes => GenerationMemberRecord::None,
            },
            species_count: population.species().len(),
            genome_stats: stats,
        })
    }

    /// Iterate over all logged snapshots.
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::NNGenome as G;
    /// use evoneat::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let logger = EvolutionLogger::<G>::new(ReportingLevel::AllGenomes);
    /// // Log some stuff... then
    /// for log in logger.iter() {
    ///     println!("{}", log);
    /// }
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = &Log<G>> {
        self.logs.iter()
    }
}

fn unzip_n_vecs<T: Clone, const N: usize>(iter: impl Iterator<Item = [T; N]>) -> Vec<Vec<T>> {
    let mut vecs = vec![Vec::default(); N];
    for items in iter {
        for (vec, item) in vecs.iter_mut().zip(items) {
            vec.push(item);
        }
    }
    vecs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::mock::{MockGenome, MockHistory};
    use crate::PopulationConfig;
    use std::convert::Infallible;
    use std::num::NonZeroUsize;

    fn speciated() -> Population<f32, MockHistory, MockGenome> {
        let mut population = Population::new(
            PopulationConfig {
                size: NonZeroUsize::new(6).unwrap(),
                distance_threshold: 2.5,
                ..PopulationConfig::zero()
            },
            1.0,
        );
        population
            .evaluate_fitness(|g: &MockGenome| Ok::<_, Infallible>(10.0 - g.position))
            .unwrap();
        population.speciate().unwrap();
        population
    }

    #[test]
    fn unzip() {
        let vecs = unzip_n_vecs([[1, 2], [3, 4], [5, 6]].into_iter());
        assert_eq!(vecs, [vec![1, 3, 5], vec![2, 4, 6]]);
    }

    #[test]
    fn median_of_even_length() {
        let stats = Stats::of([10.0, 2.0, 8.0, 4.0, 6.0, 0.0]).unwrap();
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.mean, 5.0);
    }

    #[test]
    fn species_champions_sample() {
        let population = speciated();
        let mut logger = EvolutionLogger::new(ReportingLevel::SpeciesChampions);

        logger.log(&population, &|g: &MockGenome| [g.fitness()], ["fitness"]);

        let log = logger.iter().next().unwrap();
        assert_eq!(log.species_count, 2);
        assert_eq!(log.genome_stats[0].1.maximum, 10.0);
        assert_eq!(log.genome_stats[0].1.minimum, 5.0);
        match &log.generation_sample {
            GenerationMemberRecord::SpeciesChampions(champions) => {
                let sample: Vec<_> = champions.iter().map(|(s, g)| (*s, g.id)).collect();
                assert_eq!(sample, [(SpeciesId(0), Some(0)), (SpeciesId(1), Some(3))]);
            }
            other => panic!("unexpected sample: {:?}", other),
        }
    }

    #[test]
    fn all_genomes_sample() {
        let population = speciated();
        let mut logger = EvolutionLogger::new(ReportingLevel::AllGenomes);

        logger.log(&population, &|g: &MockGenome| [g.fitness()], ["fitness"]);

        let log = logger.iter().next().unwrap();
        match &log.generation_sample {
            GenerationMemberRecord::Species(species) => {
                let sizes: Vec<_> = species.iter().map(|(_, members)| members.len()).collect();
                assert_eq!(sizes, [3, 3]);
            }
            other => panic!("unexpected sample: {:?}", other),
        }
    }
}
