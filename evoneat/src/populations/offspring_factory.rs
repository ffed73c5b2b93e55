use super::*;

use rand::{seq::SliceRandom, Rng};

/// Auxiliary type for offspring generation.
/// Handles all the tasks of generating a population's
/// offspring according to the specified configs
/// and allotted offspring.
pub(super) struct OffspringFactory<'a, C, H, G> {
    genomes: &'a [G],
    species: &'a [Species<G>],
    history: &'a mut H,
    genetic_config: &'a C,
    population_config: &'a PopulationConfig,
    next_genome_id: &'a mut GenomeId,
}

impl<'a, C, H, G> OffspringFactory<'a, C, H, G>
where
    G: Genome<InnovationHistory = H, Config = C>,
    H: InnovationHistory<Config = C>,
{
    pub(super) fn new(
        genomes: &'a [G],
        species: &'a [Species<G>],
        history: &'a mut H,
        genetic_config: &'a C,
        population_config: &'a PopulationConfig,
        next_genome_id: &'a mut GenomeId,
    ) -> OffspringFactory<'a, C, H, G> {
        OffspringFactory {
            genomes,
            species,
            history,
            genetic_config,
            population_config,
            next_genome_id,
        }
    }

    /// Generate the allotted offspring, then top the
    /// generation up to the population size.
    pub(super) fn generate_offspring(&mut self, allotted_offspring: &[usize]) -> Vec<G> {
        let size = self.population_config.size.get();
        let mut offspring = Vec::with_capacity(size);

        let all_species = self.species;
        for (species, &allotted) in all_species.iter().zip(allotted_offspring) {
            if allotted == 0 {
                continue;
            }
            self.add_species_elite(species, &mut offspring);
            self.add_bred_offspring(species, allotted - 1, &mut offspring);
        }

        offspring.truncate(size);
        self.fill(&mut offspring, size);
        offspring
    }

    /// Add the species' champion, unchanged but
    /// for its id and its shared fitness, to the offspring.
    fn add_species_elite(&mut self, species: &Species<G>, offspring: &mut Vec<G>) {
        if let Some(champion) = species.champion(self.genomes) {
            let mut elite = champion.clone();
            elite.set_adjusted_fitness(0.0);
            elite.set_species(None);
            elite.set_id(self.next_id());
            offspring.push(elite);
        }
    }

    /// Breed `count` children from tournament-selected
    /// parents of the species, either by mutating a copy
    /// of one parent or by mating two.
    fn add_bred_offspring(&mut self, species: &Species<G>, count: usize, offspring: &mut Vec<G>) {
        let genomes = self.genomes;
        let tournament_size = self.population_config.tournament_size;
        let mut rng = rand::thread_rng();

        for _ in 0..count {
            let child = if rng.gen::<f32>() < self.population_config.asexual_reproduction_chance {
                species
                    .select_parent(genomes, tournament_size, &mut rng)
                    .cloned()
            } else {
                let parent1 = species.select_parent(genomes, tournament_size, &mut rng);
                let parent2 = species.select_parent(genomes, tournament_size, &mut rng);
                parent1.zip(parent2).map(|(p1, p2)| {
                    if p2.fitness() > p1.fitness() {
                        G::mate(p2, p1)
                    } else {
                        G::mate(p1, p2)
                    }
                })
            };
            if let Some(child) = child {
                let child = self.mutated(child);
                offspring.push(child);
            }
        }
    }

    /// Fill any slots the species' shares left
    /// empty with mutated copies of random genomes.
    fn fill(&mut self, offspring: &mut Vec<G>, size: usize) {
        let missing = size.saturating_sub(offspring.len());
        if missing == 0 {
            return;
        }
        debug!(missing, "filling population with mutated copies");

        let genomes = self.genomes;
        let mut rng = rand::thread_rng();
        for _ in 0..missing {
            if let Some(parent) = genomes.choose(&mut rng) {
                let child = self.mutated(parent.clone());
                offspring.push(child);
            }
        }
    }

    /// Mutates a new child and clears everything
    /// it may have inherited from its parents'
    /// evaluation.
    fn mutated(&mut self, mut child: G) -> G {
        child.mutate(self.history, self.genetic_config);
        child.set_fitness(0.0);
        child.set_adjusted_fitness(0.0);
        child.set_species(None);
        child.set_id(self.next_id());
        child
    }

    fn next_id(&mut self) -> GenomeId {
        let id = *self.next_genome_id;
        *self.next_genome_id += 1;
        id
    }
}
