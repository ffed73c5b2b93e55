use evoneat::{Phase, Population, PopulationConfig, PopulationError};
use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
use evoneat_nn::networks::{self, NetworkError};

use std::collections::HashSet;
use std::convert::Infallible;
use std::num::NonZeroUsize;

type NNPopulation = Population<GeneticConfig, History, NNGenome>;

fn genetic_config(inputs: usize, outputs: usize) -> GeneticConfig {
    GeneticConfig {
        input_count: NonZeroUsize::new(inputs).unwrap(),
        output_count: NonZeroUsize::new(outputs).unwrap(),
        ..GeneticConfig::default()
    }
}

fn population_config(size: usize) -> PopulationConfig {
    PopulationConfig {
        size: NonZeroUsize::new(size).unwrap(),
        ..PopulationConfig::default()
    }
}

fn weight_sum(genome: &NNGenome) -> Result<f32, Infallible> {
    Ok(genome.genes().map(|g| g.weight()).sum())
}

#[test]
fn minimal_evolution_run() {
    let mut population = NNPopulation::new(population_config(10), genetic_config(2, 1));

    let champion_fitness = population.run(1, weight_sum).unwrap().fitness();

    let ids: HashSet<_> = population.genomes().iter().map(|g| g.id()).collect();
    assert_eq!(population.genomes().len(), 10);
    assert_eq!(ids.len(), 10);
    assert!(ids.iter().all(|id| id.is_some()));
    assert!(champion_fitness >= population.mean_fitness());
    assert_eq!(population.phase(), Phase::Done);
}

#[test]
fn population_size_is_invariant() {
    let sizes = [1, 7, 30];
    for &size in &sizes {
        let mut population = NNPopulation::new(population_config(size), genetic_config(3, 2));
        for generation in 0..5 {
            // Alternate between positive, mixed and negative fitness.
            population
                .evaluate_fitness(|g| {
                    weight_sum(g).map(|w| w + 2.0 - generation as f32)
                })
                .unwrap();
            population.evolve().unwrap();
            assert_eq!(population.genomes().len(), size);
        }
    }
}

#[test]
fn genome_ids_strictly_increase() {
    let mut population = NNPopulation::new(population_config(20), genetic_config(2, 2));
    let mut last_max = None;

    for _ in 0..3 {
        let ids: Vec<_> = population
            .genomes()
            .iter()
            .map(|g| g.id().unwrap())
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        if let Some(last_max) = last_max {
            assert!(ids[0] > last_max);
        }
        last_max = ids.last().copied();

        population.evaluate_fitness(weight_sum).unwrap();
        population.evolve().unwrap();
    }
}

#[test]
fn species_partition_the_population() {
    let mut population = NNPopulation::new(
        PopulationConfig {
            distance_threshold: 0.5,
            ..population_config(40)
        },
        genetic_config(3, 2),
    );
    population.evaluate_fitness(weight_sum).unwrap();
    population.evolve().unwrap();
    population.evaluate_fitness(weight_sum).unwrap();
    population.speciate().unwrap();

    let mut seen = vec![0; population.genomes().len()];
    for species in population.species() {
        assert!(!species.is_empty());
        for &member in species.members() {
            seen[member] += 1;
            assert_eq!(population.genomes()[member].species(), Some(species.id()));
        }
        let representative = &population.genomes()[species.members()[0]];
        assert_eq!(species.representative(), representative);
    }
    assert!(seen.iter().all(|&count| count == 1));
}

#[test]
fn evaluator_errors_abort_the_generation() {
    let mut population = NNPopulation::new(population_config(10), genetic_config(4, 1));
    population.evaluate_fitness(weight_sum).unwrap();
    let before: Vec<_> = population.genomes().iter().map(|g| g.fitness()).collect();

    // Feeding three inputs to four-input networks fails on the first genome.
    let error = population
        .evaluate_fitness(|g| Ok::<_, NetworkError>(networks::evaluate(g, &[1.0, 1.0, 1.0])?[0]))
        .unwrap_err();

    match &error {
        PopulationError::Evaluation { genome, source } => {
            assert_eq!(*genome, Some(0));
            assert_eq!(
                source.downcast_ref::<NetworkError>(),
                Some(&NetworkError::InputSizeMismatch {
                    expected: 4,
                    actual: 3
                })
            );
        }
        e => panic!("unexpected error: {}", e),
    }
    let after: Vec<_> = population.genomes().iter().map(|g| g.fitness()).collect();
    assert_eq!(before, after);

    // The population can still be evolved from its last scores.
    population.evolve().unwrap();
}

#[test]
fn parallel_run() {
    let mut population = NNPopulation::new(population_config(50), genetic_config(2, 1));

    let champion = population.par_run(3, weight_sum).unwrap().clone();

    assert_eq!(population.generation(), 3);
    assert_eq!(population.genomes().len(), 50);
    assert_eq!(champion.fitness(), weight_sum(&champion).unwrap());
}

#[test]
fn resume_from_records() {
    let mut population = NNPopulation::new(population_config(15), genetic_config(2, 1));
    population.run(2, weight_sum).unwrap();
    let records: Vec<_> = population.genomes().iter().map(|g| g.to_record()).collect();

    let mut history = History::new();
    let seed = records
        .into_iter()
        .map(|r| NNGenome::from_record(r, &mut history))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    // Innovations of genomes that died out are not part of any record.
    assert!(history.last_innovation() <= population.history().last_innovation());

    let mut resumed =
        Population::new_seeded(seed, history, population_config(20), genetic_config(2, 1))
            .unwrap();
    resumed.run(1, weight_sum).unwrap();
    assert_eq!(resumed.genomes().len(), 20);
}
