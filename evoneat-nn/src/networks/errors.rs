use std::error::Error;
use std::fmt;

/// An error type indicating a failure to
/// build or evaluate a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// The number of inputs passed differs from
    /// the number of input nodes in the network.
    InputSizeMismatch { expected: usize, actual: usize },
    /// The genome's enabled genes contain a cycle;
    /// `unresolved` nodes could not be ordered.
    CycleDetected { unresolved: usize },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputSizeMismatch { expected, actual } => write!(
                f,
                "network expects {} inputs, but {} were given",
                expected, actual
            ),
            Self::CycleDetected { unresolved } => write!(
                f,
                "cycle among enabled genes leaves {} node(s) unordered",
                unresolved
            ),
        }
    }
}

impl Error for NetworkError {}
