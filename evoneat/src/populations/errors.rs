use crate::GenomeId;

use std::error::Error;
use std::fmt;

/// The steps of an evolutionary run, in the order
/// a [`Population`] moves through them.
///
/// [`Population`]: crate::Population
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Freshly created or seeded; not yet scored.
    Initialized,
    /// Every genome carries a fitness value.
    Evaluated,
    /// Every genome belongs to exactly one species.
    Speciated,
    /// A new, unscored generation has replaced the old one.
    Reproduced,
    /// The run has finished and the final population is scored.
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Initialized => "initialized",
            Phase::Evaluated => "evaluated",
            Phase::Speciated => "speciated",
            Phase::Reproduced => "reproduced",
            Phase::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Failures of the evolution driver.
#[derive(Debug)]
pub enum PopulationError {
    /// The fitness function failed for a genome. The
    /// generation's evaluation was aborted and no
    /// fitness value was written.
    Evaluation {
        genome: Option<GenomeId>,
        source: Box<dyn Error + Send + Sync>,
    },
    /// The fitness function returned NaN or an infinity.
    NonFiniteFitness {
        genome: Option<GenomeId>,
        fitness: f32,
    },
    /// A step was requested in a phase that does not allow it.
    OutOfOrder {
        operation: &'static str,
        phase: Phase,
    },
    /// More seed genomes were supplied than fit in the population.
    OversizedSeed { seed: usize, size: usize },
}

impl fmt::Display for PopulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Evaluation { genome, source } => match genome {
                Some(id) => write!(f, "evaluation of genome {} failed: {}", id, source),
                None => write!(f, "evaluation of an unnamed genome failed: {}", source),
            },
            Self::NonFiniteFitness { genome, fitness } => match genome {
                Some(id) => write!(f, "genome {} was assigned non-finite fitness {}", id, fitness),
                None => write!(f, "unnamed genome was assigned non-finite fitness {}", fitness),
            },
            Self::OutOfOrder { operation, phase } => write!(
                f,
                "cannot {} a population in the {} phase",
                operation, phase
            ),
            Self::OversizedSeed { seed, size } => write!(
                f,
                "{} seed genomes do not fit in a population of size {}",
                seed, size
            ),
        }
    }
}

impl Error for PopulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Evaluation { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
