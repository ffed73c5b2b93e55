use crate::{Innovation, NodeId};

use std::error::Error;
use std::fmt;

/// An error type indicating the gene being created
/// or added is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneValidityError {
    /// The gene's innovation number is a duplicate.
    DuplicateGeneID(Innovation, (NodeId, NodeId)),
    /// The gene's endpoints do not exist.
    NonexistantEndpoints(NodeId, NodeId),
    /// The gene has the same endpoints as another with a different ID.
    DuplicateGeneWithEndpoints(Innovation, (NodeId, NodeId)),
    /// The target of the gene is an input node, which is not allowed.
    InputEndpoint(NodeId),
}

/// An error type indicating the node being created
/// or added is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValidityError {
    /// The node's ID is a duplicate.
    DuplicateNodeID(NodeId),
}

/// An error type indicating a failure
/// to carry out a gene addition mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneAdditionMutationError {
    /// No unconnected pair of nodes was found within
    /// the configured number of attempts.
    NoViablePairFound,
}

/// An error type indicating a failure
/// to carry out a node addition mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeAdditionMutationError {
    /// The genome has no enabled genes to split.
    EmptyGenePool,
}

/// The way in which a gene disagrees with
/// an innovation [`History`].
///
/// [`History`]: crate::genomics::History
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryConflict {
    /// The gene's endpoints were already assigned
    /// a different innovation number.
    EndpointsAssigned(Innovation),
    /// The gene's innovation number was already
    /// assigned to a different pair of endpoints.
    InnovationAssigned(NodeId, NodeId),
}

/// An error type indicating that a [`GenomeRecord`]
/// could not be turned back into a genome.
///
/// [`GenomeRecord`]: crate::genomics::GenomeRecord
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    /// A node record is invalid.
    InvalidNode(NodeValidityError),
    /// A connection record is invalid.
    InvalidGene(GeneValidityError),
    /// The record has no input nodes or no output nodes.
    MissingIoNodes,
    /// A connection contradicts the innovation history
    /// it is being loaded into.
    RegistryInconsistency {
        innovation: Innovation,
        endpoints: (NodeId, NodeId),
        conflict: RegistryConflict,
    },
}

impl fmt::Display for GeneValidityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateGeneID(gene_id, (input_id, output_id)) => write!(
                f,
                "duplicate gene insertion with id {} between endpoints {} -> {}",
                gene_id, input_id, output_id
            ),
            Self::NonexistantEndpoints(input, output) => write!(
                f,
                "gene insertion between nonexistant endpoint(s) {} -> {}",
                input, output
            ),
            Self::DuplicateGeneWithEndpoints(duplicate_id, (input, output)) => write!(
                f,
                "gene insertion with endpoints {} -> {} and id {} shadows gene with same endpoints",
                input, output, duplicate_id,
            ),
            Self::InputEndpoint(id) => write!(
                f,
                "gene insertion with input node {} as its target",
                id
            ),
        }
    }
}

impl fmt::Display for NodeValidityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNodeID(id) => write!(f, "duplicate node insertion with id {}", id),
        }
    }
}

impl fmt::Display for GeneAdditionMutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoViablePairFound => {
                write!(f, "no viable node pair found for gene mutation")
            }
        }
    }
}

impl fmt::Display for NodeAdditionMutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGenePool => write!(f, "node mutation on genome without enabled genes"),
        }
    }
}

impl fmt::Display for RegistryConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndpointsAssigned(innovation) => {
                write!(f, "endpoints already registered as innovation {}", innovation)
            }
            Self::InnovationAssigned(input, output) => write!(
                f,
                "innovation already registered for endpoints {} -> {}",
                input, output
            ),
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNode(e) => write!(f, "invalid node record: {}", e),
            Self::InvalidGene(e) => write!(f, "invalid connection record: {}", e),
            Self::MissingIoNodes => write!(f, "record lacks input or output nodes"),
            Self::RegistryInconsistency {
                innovation,
                endpoints: (input, output),
                conflict,
            } => write!(
                f,
                "connection {} -> {} with innovation {} conflicts with history: {}",
                input, output, innovation, conflict
            ),
        }
    }
}

impl Error for GeneValidityError {}
impl Error for NodeValidityError {}
impl Error for GeneAdditionMutationError {}
impl Error for NodeAdditionMutationError {}
impl Error for RegistryConflict {}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidNode(e) => Some(e),
            Self::InvalidGene(e) => Some(e),
            Self::MissingIoNodes => None,
            Self::RegistryInconsistency { conflict, .. } => Some(conflict),
        }
    }
}

impl From<NodeValidityError> for RecordError {
    fn from(e: NodeValidityError) -> RecordError {
        RecordError::InvalidNode(e)
    }
}

impl From<GeneValidityError> for RecordError {
    fn from(e: GeneValidityError) -> RecordError {
        RecordError::InvalidGene(e)
    }
}
