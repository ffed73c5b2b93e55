use crate::Genome;

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Species identifier. Species are numbered
/// in order of creation within a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpeciesId(pub usize);

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Species are collections of reproductively
/// compatible (within a certain [genetic distance])
/// genomes. Membership is determined by calculating
/// the genetic distance to a _representative_,
/// which in this implementation is the first genome
/// assigned to the species during speciation.
///
/// Members are stored as indices into the population's
/// genome list; species are rebuilt from scratch every
/// generation.
///
/// [genetic distance]: crate::PopulationConfig::distance_threshold
#[derive(Debug, Clone)]
pub struct Species<G> {
    id: SpeciesId,
    members: Vec<usize>,
    representative: G,
    average_fitness: f32,
}

impl<G: Genome> Species<G> {
    /// Creates a new species with the specified ID,
    /// founded by the genome at `founder` in the
    /// population. The founder becomes the species'
    /// representative and first member.
    ///
    /// # Examples
    /// ```
    /// use evoneat::{Species, SpeciesId};
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
    ///
    /// let config = GeneticConfig::zero();
    /// let genome = NNGenome::new(0, &mut History::new(), &config);
    /// let species = Species::new(SpeciesId(0), 0, genome);
    ///
    /// assert_eq!(species.members(), &[0]);
    /// ```
    pub fn new(id: SpeciesId, founder: usize, representative: G) -> Species<G> {
        Species {
            id,
            members: vec![founder],
            representative,
            average_fitness: 0.0,
        }
    }

    /// Returns the species' ID.
    pub fn id(&self) -> SpeciesId {
        self.id
    }

    /// Returns the species' representative.
    pub fn representative(&self) -> &G {
        &self.representative
    }

    /// Returns the population indices of the species' members.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Returns the number of members in the species.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the species has no members.
    /// Species built by a population never are.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the genetic distance between the species'
    /// representative and `other`.
    ///
    /// # Examples
    /// ```
    /// use evoneat::{Species, SpeciesId};
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
    ///
    /// let config = GeneticConfig {
    ///     disjoint_gene_factor: 1.0,
    ///     excess_gene_factor: 1.0,
    ///     common_weight_factor: 0.4,
    ///     ..GeneticConfig::zero()
    /// };
    /// let representative = NNGenome::new(0, &mut History::new(), &config);
    /// let species = Species::new(SpeciesId(0), 0, representative.clone());
    ///
    /// assert_eq!(species.genetic_distance(&representative, &config), 0.0);
    /// ```
    pub fn genetic_distance(&self, other: &G, config: &G::Config) -> f32 {
        G::genetic_distance(&self.representative, other, config)
    }

    /// Adds the genome at `index` in the population to the species.
    pub fn add_member(&mut self, index: usize) {
        self.members.push(index);
    }

    /// Returns an iterator over the species' members,
    /// looked up in `population`.
    pub fn genomes<'a>(&'a self, population: &'a [G]) -> impl Iterator<Item = &'a G> + 'a {
        self.members.iter().map(move |&i| &population[i])
    }

    /// Shares fitness among the species' members: each
    /// member's adjusted fitness becomes its raw fitness
    /// divided by the species' size. Also records the
    /// species' average raw fitness.
    pub fn adjust_fitness(&mut self, population: &mut [G]) {
        let size = self.members.len() as f32;
        let mut total = 0.0;
        for &i in &self.members {
            let fitness = population[i].fitness();
            population[i].set_adjusted_fitness(fitness / size);
            total += fitness;
        }
        self.average_fitness = if self.members.is_empty() {
            0.0
        } else {
            total / size
        };
    }

    /// Returns the mean raw fitness of the species' members,
    /// as of the last call to [`adjust_fitness`].
    ///
    /// [`adjust_fitness`]: Species::adjust_fitness
    pub fn average_fitness(&self) -> f32 {
        self.average_fitness
    }

    /// Returns the sum of the members' adjusted fitnesses.
    pub fn total_adjusted_fitness(&self, population: &[G]) -> f32 {
        self.genomes(population).map(|g| g.adjusted_fitness()).sum()
    }

    /// Returns the best-performing member by raw fitness.
    pub fn champion<'a>(&'a self, population: &'a [G]) -> Option<&'a G> {
        self.genomes(population)
            .max_by(|g1, g2| g1.fitness().total_cmp(&g2.fitness()))
    }

    /// Selects a parent by tournament: samples up to
    /// `tournament_size` distinct members at random
    /// (at least one), and returns the one with the
    /// highest raw fitness.
    ///
    /// Returns `None` if the species is empty.
    pub fn select_parent<'a, R: Rng + ?Sized>(
        &'a self,
        population: &'a [G],
        tournament_size: usize,
        rng: &mut R,
    ) -> Option<&'a G> {
        let contestants = tournament_size.clamp(1, self.members.len().max(1));
        self.members
            .choose_multiple(rng, contestants)
            .map(|&i| &population[i])
            .max_by(|g1, g2| g1.fitness().total_cmp(&g2.fitness()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::mock::MockGenome;

    fn scored(fitnesses: &[f32]) -> Vec<MockGenome> {
        fitnesses
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                let mut g = MockGenome::at(i, i as f32);
                g.set_fitness(f);
                g
            })
            .collect()
    }

    fn species_of(population: &[MockGenome]) -> Species<MockGenome> {
        let mut species = Species::new(SpeciesId(0), 0, population[0].clone());
        for i in 1..population.len() {
            species.add_member(i);
        }
        species
    }

    #[test]
    fn fitness_sharing() {
        let mut population = scored(&[2.0, 4.0, 6.0, 8.0]);
        let mut species = species_of(&population);

        species.adjust_fitness(&mut population);

        let adjusted: Vec<f32> = population.iter().map(|g| g.adjusted_fitness()).collect();
        assert_eq!(adjusted, [0.5, 1.0, 1.5, 2.0]);
        assert_eq!(species.average_fitness(), 5.0);
        assert_eq!(species.total_adjusted_fitness(&population), 5.0);
    }

    #[test]
    fn champion_is_fittest_member() {
        let population = scored(&[5.0, 20.0, 10.0, 30.0]);
        let mut species = Species::new(SpeciesId(1), 0, population[0].clone());
        species.add_member(1);
        species.add_member(2);

        // Genome 3 is not a member.
        assert_eq!(species.champion(&population).unwrap().id, Some(1));
    }

    #[test]
    fn full_tournament_picks_champion() {
        let population = scored(&[3.0, -1.0, 9.0, 4.0]);
        let species = species_of(&population);
        let mut rng = rand::thread_rng();

        for _ in 0..20 {
            let parent = species.select_parent(&population, 10, &mut rng).unwrap();
            assert_eq!(parent.id, Some(2));
        }
    }

    #[test]
    fn tournament_favours_fitter_members() {
        let population = scored(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let species = species_of(&population);
        let mut rng = rand::thread_rng();

        let mut wins = [0usize; 5];
        for _ in 0..2000 {
            let parent = species.select_parent(&population, 2, &mut rng).unwrap();
            wins[parent.id.unwrap()] += 1;
        }

        // The least fit member can never win a 2-way tournament
        // among distinct members.
        assert_eq!(wins[0], 0);
        assert!(wins[4] > wins[1]);
    }

    #[test]
    fn zero_sized_tournament_still_selects() {
        let population = scored(&[1.0]);
        let species = species_of(&population);

        let parent = species.select_parent(&population, 0, &mut rand::thread_rng());
        assert_eq!(parent.unwrap().id, Some(0));
    }
}
