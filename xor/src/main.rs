use evoneat::logging::{EvolutionLogger, ReportingLevel, Stats};
use evoneat::{Phase, Population, PopulationConfig};
use evoneat_nn::genomics::{GeneticConfig, GenomeRecord, History, NNGenome};
use evoneat_nn::networks::{FeedForwardNetwork, NetworkError};

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::num::NonZeroUsize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Allowed error margin for neural net answers.
const ERROR_MARGIN: f32 = 0.3;
const MAX_FITNESS: f32 = 16.0;

/// Settings of a demo run, read from the RON file
/// named by the first argument, if any.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct DemoConfig {
    generations: usize,
    champion_path: String,
    genetic: GeneticConfig,
    population: PopulationConfig,
}

impl Default for DemoConfig {
    fn default() -> DemoConfig {
        DemoConfig {
            generations: 100,
            champion_path: "champion.ron".into(),
            genetic: GeneticConfig {
                input_count: NonZeroUsize::new(3).unwrap_or(NonZeroUsize::MIN),
                output_count: NonZeroUsize::MIN,
                max_gene_addition_mutation_attempts: 20,
                ..GeneticConfig::default()
            },
            population: PopulationConfig::default(),
        }
    }
}

/// Scores a genome on the XOR truth table. The first
/// input is a constant bias.
fn evaluate_xor(genome: &NNGenome) -> Result<f32, NetworkError> {
    let mut network = FeedForwardNetwork::new(genome)?;

    let values = [
        ([1.0, 0.0, 0.0], 0.0),
        ([1.0, 0.0, 1.0], 1.0),
        ([1.0, 1.0, 0.0], 1.0),
        ([1.0, 1.0, 1.0], 0.0),
    ];

    let mut errors = [0.0, 0.0, 0.0, 0.0];
    for (i, (input, output)) in values.iter().enumerate() {
        errors[i] = (network.evaluate(input)?[0] - output).abs();
        if errors[i] < ERROR_MARGIN {
            errors[i] = 0.0;
        }
    }

    Ok((4.0 - errors.iter().copied().sum::<f32>()).max(0.0).powi(2))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config: DemoConfig = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading configuration");
            ron::from_str(&fs::read_to_string(&path)?)?
        }
        None => DemoConfig::default(),
    };

    let mut population = Population::<_, _, NNGenome>::new(config.population, config.genetic);
    let mut logger = EvolutionLogger::<NNGenome>::new(ReportingLevel::SpeciesChampions);

    for _ in 0..config.generations {
        population.par_evaluate_fitness(evaluate_xor)?;
        if population.champion().fitness() >= MAX_FITNESS {
            info!(generation = population.generation(), "solution found");
            break;
        }
        population.speciate()?;
        logger.log(
            &population,
            &|g| {
                [
                    g.fitness(),
                    g.genes().filter(|gene| gene.enabled()).count() as f32,
                    g.nodes().count() as f32,
                ]
            },
            ["fitness", "enabled genes", "nodes"],
        );
        if let Some(log) = logger.iter().last() {
            debug!("{}", log);
        }
        population.reproduce()?;
    }
    if population.phase() != Phase::Evaluated {
        population.par_evaluate_fitness(evaluate_xor)?;
    }

    if let Some(species) = Stats::of(logger.iter().map(|log| log.species_count as f32)) {
        info!(
            max = species.maximum,
            min = species.minimum,
            mean = species.mean,
            "species counts over the run"
        );
    }

    let champion = population.champion();
    let serialized =
        ron::ser::to_string_pretty(&champion.to_record(), ron::ser::PrettyConfig::default())?;
    fs::write(&config.champion_path, serialized)?;
    info!(
        path = %config.champion_path,
        fitness = champion.fitness(),
        generation = population.generation(),
        "champion saved"
    );

    // Reload the champion into a fresh history and
    // check that it scores the same.
    let record: GenomeRecord = ron::from_str(&fs::read_to_string(&config.champion_path)?)?;
    let mut history = History::new();
    let reloaded = NNGenome::from_record(record, &mut history)?;
    let fitness = evaluate_xor(&reloaded)?;
    if fitness == champion.fitness() {
        info!(fitness, innovations = history.len(), "reloaded champion verified");
    } else {
        warn!(
            fitness,
            expected = champion.fitness(),
            "reloaded champion scores differently"
        );
    }
    println!("{}", reloaded);

    Ok(())
}
