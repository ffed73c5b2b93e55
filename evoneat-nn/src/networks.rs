//! A Network is the phenotype of a Genome: genome nodes
//! become network nodes and enabled genes become
//! connections, with disabled genes being ignored.
//!
//! The `FeedForwardNetwork` type orders its nodes
//! topologically once, on creation, and then maps each
//! input vector to an output vector in a single pass.
mod connection;
mod errors;

pub use errors::NetworkError;

use crate::genomics::{NNGenome, NodeType};
use crate::NodeId;
use connection::Connection;

use ahash::RandomState;

use std::collections::{HashMap, VecDeque};
use std::fmt;

/// A feed-forward neural network.
///
/// Every non-input node outputs the [ReLU] of the weighted
/// sum of its incoming connections' source outputs.
///
/// [ReLU]: https://en.wikipedia.org/wiki/Rectifier_(neural_networks)
#[derive(Clone, Debug)]
pub struct FeedForwardNetwork {
    /// Node ids, in evaluation order.
    node_ids: Box<[NodeId]>,
    node_types: Box<[NodeType]>,
    /// Evaluation-order indices of input nodes, by ascending id.
    input_indices: Box<[usize]>,
    /// Evaluation-order indices of output nodes, by ascending id.
    output_indices: Box<[usize]>,
    activation_levels: Box<[f32]>,
    /// Incoming connections of each node, in evaluation order.
    connections: Box<[Box<[Connection]>]>,
}

impl FeedForwardNetwork {
    /// Generates a new network from the passed genome.
    ///
    /// Nodes are put in topological order over the genome's
    /// enabled genes, starting from every node without
    /// incoming connections, in increasing id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the enabled genes contain a cycle.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::{
    ///     genomics::{GeneticConfig, History, NNGenome},
    ///     networks::FeedForwardNetwork,
    /// };
    /// use std::num::NonZeroUsize;
    ///
    /// let genome = NNGenome::new(0, &mut History::new(), &GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     weight_bound: 5.0,
    ///     ..GeneticConfig::zero()
    /// });
    ///
    /// let network = FeedForwardNetwork::new(&genome).unwrap();
    /// ```
    pub fn new(genome: &NNGenome) -> Result<FeedForwardNetwork, NetworkError> {
        let enabled: Vec<_> = genome.genes().filter(|g| g.enabled()).collect();

        let mut in_degrees: HashMap<NodeId, usize, RandomState> =
            genome.nodes().map(|n| (n.id(), 0)).collect();
        let mut successors: HashMap<NodeId, Vec<NodeId>, RandomState> = HashMap::default();
        for gene in &enabled {
            *in_degrees.entry(gene.output()).or_insert(0) += 1;
            successors.entry(gene.input()).or_default().push(gene.output());
        }

        // Nodes iterate in increasing id order, so the
        // resulting order is deterministic.
        let mut ready: VecDeque<NodeId> = genome
            .nodes()
            .map(|n| n.id())
            .filter(|id| in_degrees[id] == 0)
            .collect();
        let mut order = Vec::with_capacity(in_degrees.len());
        while let Some(id) = ready.pop_front() {
            order.push(id);
            for successor in successors.get(&id).into_iter().flatten() {
                if let Some(degree) = in_degrees.get_mut(successor) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push_back(*successor);
                    }
                }
            }
        }
        if order.len() < in_degrees.len() {
            return Err(NetworkError::CycleDetected {
                unresolved: in_degrees.len() - order.len(),
            });
        }

        let node_index_from_id: HashMap<NodeId, usize, RandomState> =
            order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let mut connections = vec![vec![]; order.len()];
        for gene in &enabled {
            let input_index = node_index_from_id[&gene.input()];
            let output_index = node_index_from_id[&gene.output()];
            connections[output_index].push(Connection::new(input_index, gene.weight()));
        }

        let indices_of = |node_type: NodeType| -> Box<[usize]> {
            genome
                .nodes()
                .filter(|n| n.node_type() == node_type)
                .map(|n| node_index_from_id[&n.id()])
                .collect()
        };
        let node_types = order
            .iter()
            .filter_map(|id| genome.node(*id))
            .map(|n| n.node_type())
            .collect();

        Ok(FeedForwardNetwork {
            input_indices: indices_of(NodeType::Input),
            output_indices: indices_of(NodeType::Output),
            node_types,
            activation_levels: vec![0.0; order.len()].into(),
            node_ids: order.into(),
            connections: connections.into_iter().map(|v| v.into()).collect(),
        })
    }

    /// Performs one forward pass, feeding `inputs` to the input
    /// nodes in increasing id order, and returns the output node
    /// activations in increasing id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of inputs differs from
    /// the number of input nodes. Inputs are never padded or
    /// truncated.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::{
    ///     genomics::{GeneticConfig, NNGenome},
    ///     networks::{FeedForwardNetwork, NetworkError},
    /// };
    /// use std::num::NonZeroUsize;
    ///
    /// let mut genome = NNGenome::unconnected(&GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     ..GeneticConfig::zero()
    /// });
    /// genome.add_gene(1, 0, 2, 2.5).unwrap();
    /// genome.add_gene(2, 1, 2, -2.5).unwrap();
    ///
    /// let mut network = FeedForwardNetwork::new(&genome).unwrap();
    ///
    /// assert_eq!(network.evaluate(&[0.5, 0.25]).unwrap(), vec![0.625]);
    /// assert_eq!(network.evaluate(&[0.25, 0.5]).unwrap(), vec![0.0]);
    /// assert_eq!(
    ///     network.evaluate(&[1.0]),
    ///     Err(NetworkError::InputSizeMismatch { expected: 2, actual: 1 }),
    /// );
    /// ```
    pub fn evaluate(&mut self, inputs: &[f32]) -> Result<Vec<f32>, NetworkError> {
        if inputs.len() != self.input_indices.len() {
            return Err(NetworkError::InputSizeMismatch {
                expected: self.input_indices.len(),
                actual: inputs.len(),
            });
        }

        for (value, index) in inputs.iter().zip(self.input_indices.iter()) {
            self.activation_levels[*index] = *value;
        }
        for index in 0..self.node_ids.len() {
            match self.node_types[index] {
                NodeType::Input => {}
                NodeType::Hidden | NodeType::Output => {
                    let input_sum: f32 = self.connections[index]
                        .iter()
                        .map(|c| self.activation_levels[c.source] * c.weight)
                        .sum();
                    self.activation_levels[index] = relu(input_sum);
                }
            }
        }

        Ok(self
            .output_indices
            .iter()
            .map(|i| self.activation_levels[*i])
            .collect())
    }

    /// Returns the number of inputs the network expects.
    pub fn input_count(&self) -> usize {
        self.input_indices.len()
    }

    /// Returns the number of outputs the network produces.
    pub fn output_count(&self) -> usize {
        self.output_indices.len()
    }
}

impl TryFrom<&NNGenome> for FeedForwardNetwork {
    type Error = NetworkError;

    fn try_from(genome: &NNGenome) -> Result<FeedForwardNetwork, NetworkError> {
        FeedForwardNetwork::new(genome)
    }
}

/// Builds a network from `genome` and evaluates it once.
///
/// # Examples
/// ```
/// use evoneat_nn::{
///     genomics::{GeneticConfig, NNGenome},
///     networks,
/// };
///
/// let mut genome = NNGenome::unconnected(&GeneticConfig::zero());
/// genome.add_gene(1, 0, 1, 3.0).unwrap();
///
/// assert_eq!(networks::evaluate(&genome, &[2.0]).unwrap(), vec![6.0]);
/// ```
pub fn evaluate(genome: &NNGenome, inputs: &[f32]) -> Result<Vec<f32>, NetworkError> {
    FeedForwardNetwork::new(genome)?.evaluate(inputs)
}

fn relu(x: f32) -> f32 {
    x.max(0.0)
}

impl fmt::Display for FeedForwardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, incoming) in self.node_ids.iter().zip(self.connections.iter()) {
            writeln!(f, "{} <- {:?}", id, incoming)?;
        }
        Ok(())
    }
}
