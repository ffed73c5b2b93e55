use crate::SpeciesId;

/// Per-run identifier of a genome. Ids are handed out
/// in strictly increasing order and never reused.
pub type GenomeId = usize;

/// An interface for genomes that can be used by NEAT.
///
/// Besides its genetic material, a genome carries the
/// bookkeeping the population needs: an id, a raw fitness,
/// a fitness adjusted by its species' size, and the species
/// it was last assigned to.
pub trait Genome: Clone {
    type Config;
    type InnovationHistory: InnovationHistory<Config = Self::Config>;

    /// Returns a randomized initial genome with the given id,
    /// recording any innovations it introduces in `history`.
    fn new(id: GenomeId, history: &mut Self::InnovationHistory, config: &Self::Config) -> Self;

    /// Returns the genetic distance between two genomes.
    fn genetic_distance(first: &Self, second: &Self, config: &Self::Config) -> f32;

    /// Combines two genomes and returns a "child" genome.
    /// `primary` is the fitter (or designated) parent.
    ///
    /// The child has no id until the population assigns one.
    fn mate(primary: &Self, secondary: &Self) -> Self;

    /// Mutates the genome in place. Mutations that find
    /// nothing to act on should be skipped silently.
    fn mutate(&mut self, history: &mut Self::InnovationHistory, config: &Self::Config);

    /// Returns the genome's id, if one has been assigned.
    fn id(&self) -> Option<GenomeId>;

    /// Assigns the genome an id.
    fn set_id(&mut self, id: GenomeId);

    /// Sets the genome's fitness value.
    fn set_fitness(&mut self, fitness: f32);

    /// Returns the genome's fitness value.
    fn fitness(&self) -> f32;

    /// Sets the genome's fitness after sharing within its species.
    fn set_adjusted_fitness(&mut self, adjusted_fitness: f32);

    /// Returns the genome's fitness after sharing within its species.
    fn adjusted_fitness(&self) -> f32;

    /// Sets the species the genome belongs to.
    fn set_species(&mut self, species: Option<SpeciesId>);

    /// Returns the species the genome belongs to.
    fn species(&self) -> Option<SpeciesId>;
}

/// An Innovation History is used to keep track
/// of genetic innovations throught successive
/// generations of genomes.
///
/// A population owns exactly one history for its whole
/// run; the exact function and utility of the
/// InnovationHistory is left to the implementor.
pub trait InnovationHistory {
    type Config;

    fn new(config: &Self::Config) -> Self;
}

/// A minimal genome used to exercise the population
/// machinery independently of any genome representation.
#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    /// Genomes are points on a line; distance is the
    /// gap between them and mating averages them.
    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct MockGenome {
        pub(crate) id: Option<GenomeId>,
        pub(crate) position: f32,
        pub(crate) fitness: f32,
        pub(crate) adjusted_fitness: f32,
        pub(crate) species: Option<SpeciesId>,
    }

    impl MockGenome {
        pub(crate) fn at(id: GenomeId, position: f32) -> MockGenome {
            MockGenome {
                id: Some(id),
                position,
                fitness: 0.0,
                adjusted_fitness: 0.0,
                species: None,
            }
        }
    }

    /// Counts the calls made into it.
    #[derive(Debug, Default)]
    pub(crate) struct MockHistory {
        pub(crate) created: usize,
        pub(crate) mutations: usize,
    }

    /// Spacing between freshly created genomes.
    pub(crate) type MockConfig = f32;

    impl InnovationHistory for MockHistory {
        type Config = MockConfig;

        fn new(_config: &MockConfig) -> MockHistory {
            MockHistory::default()
        }
    }

    impl Genome for MockGenome {
        type Config = MockConfig;
        type InnovationHistory = MockHistory;

        fn new(id: GenomeId, history: &mut MockHistory, spacing: &MockConfig) -> MockGenome {
            history.created += 1;
            MockGenome::at(id, id as f32 * spacing)
        }

        fn genetic_distance(first: &Self, second: &Self, _config: &MockConfig) -> f32 {
            (first.position - second.position).abs()
        }

        fn mate(primary: &Self, secondary: &Self) -> Self {
            MockGenome {
                id: None,
                position: (primary.position + secondary.position) / 2.0,
                fitness: 0.0,
                adjusted_fitness: 0.0,
                species: None,
            }
        }

        fn mutate(&mut self, history: &mut MockHistory, _config: &MockConfig) {
            history.mutations += 1;
        }

        fn id(&self) -> Option<GenomeId> {
            self.id
        }

        fn set_id(&mut self, id: GenomeId) {
            self.id = Some(id);
        }

        fn set_fitness(&mut self, fitness: f32) {
            self.fitness = fitness;
        }

        fn fitness(&self) -> f32 {
            self.fitness
        }

        fn set_adjusted_fitness(&mut self, adjusted_fitness: f32) {
            self.adjusted_fitness = adjusted_fitness;
        }

        fn adjusted_fitness(&self) -> f32 {
            self.adjusted_fitness
        }

        fn set_species(&mut self, species: Option<SpeciesId>) {
            self.species = species;
        }

        fn species(&self) -> Option<SpeciesId> {
            self.species
        }
    }
}
