use crate::genomics::{History, NNGenome, Node, NodeType, RecordError};
use crate::{Innovation, NodeId};

use evoneat::GenomeId;
use serde::{Deserialize, Serialize};

/// Persisted form of an [`NNGenome`].
///
/// Nodes are listed in increasing id order and
/// connections in increasing innovation order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenomeRecord {
    pub id: Option<GenomeId>,
    pub fitness: f32,
    pub nodes: Vec<NodeRecord>,
    pub connections: Vec<ConnectionRecord>,
}

/// Persisted form of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
}

/// Persisted form of a [`Gene`].
///
/// [`Gene`]: crate::genomics::Gene
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f32,
    pub enabled: bool,
    pub innovation_number: Innovation,
}

impl NNGenome {
    /// Returns the genome's persisted form.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
    ///
    /// let genome = NNGenome::new(3, &mut History::new(), &GeneticConfig::zero());
    /// let record = genome.to_record();
    ///
    /// assert_eq!(record.id, Some(3));
    /// assert_eq!(record.nodes.len(), 2);
    /// assert_eq!(record.connections.len(), 1);
    /// assert_eq!(record.connections[0].innovation_number, 1);
    /// ```
    pub fn to_record(&self) -> GenomeRecord {
        GenomeRecord {
            id: self.id(),
            fitness: self.fitness(),
            nodes: self
                .nodes()
                .map(|n| NodeRecord {
                    id: n.id(),
                    node_type: n.node_type(),
                })
                .collect(),
            connections: self
                .genes()
                .map(|g| ConnectionRecord {
                    source: g.input(),
                    target: g.output(),
                    weight: g.weight(),
                    enabled: g.enabled(),
                    innovation_number: g.innovation(),
                })
                .collect(),
        }
    }

    /// Rebuilds a genome from its persisted form, and
    /// brings `history` up to date with its genes.
    ///
    /// Every connection is checked against `history` before
    /// anything is registered: loading either succeeds and
    /// registers every connection's endpoints under its
    /// innovation number, advancing the history past the
    /// greatest one, or fails and leaves `history` untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is structurally invalid,
    /// or if a connection's innovation number disagrees with
    /// the history.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
    ///
    /// let config = GeneticConfig::zero();
    /// let mut history = History::new();
    /// let mut genome = NNGenome::new(0, &mut history, &config);
    /// genome.mutate_add_node(&mut history).unwrap();
    ///
    /// let record = genome.to_record();
    ///
    /// // Loading into a fresh history restores its state.
    /// let mut fresh = History::new();
    /// let loaded = NNGenome::from_record(record, &mut fresh).unwrap();
    ///
    /// assert_eq!(loaded, genome);
    /// assert_eq!(fresh.last_innovation(), history.last_innovation());
    /// assert_eq!(fresh.registered_innovation(0, 2), history.registered_innovation(0, 2));
    /// ```
    pub fn from_record(record: GenomeRecord, history: &mut History) -> Result<NNGenome, RecordError> {
        let mut genome = NNGenome::empty(record.id);
        genome.set_fitness(record.fitness);

        for node in &record.nodes {
            genome.insert_node(Node::new(node.id, node.node_type))?;
        }
        if genome.input_count() == 0 || genome.output_count() == 0 {
            return Err(RecordError::MissingIoNodes);
        }

        for connection in &record.connections {
            genome
                .add_gene(
                    connection.innovation_number,
                    connection.source,
                    connection.target,
                    connection.weight,
                )?
                .set_enabled(connection.enabled);
        }

        for gene in genome.genes() {
            history
                .check(gene.innovation(), gene.endpoints())
                .map_err(|conflict| RecordError::RegistryInconsistency {
                    innovation: gene.innovation(),
                    endpoints: gene.endpoints(),
                    conflict,
                })?;
        }
        for gene in genome.genes() {
            history.register(gene.innovation(), gene.endpoints());
        }

        Ok(genome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::{GeneValidityError, GeneticConfig, NodeValidityError, RegistryConflict};
    use std::num::NonZeroUsize;

    fn evolved_genome(history: &mut History) -> NNGenome {
        let config = GeneticConfig {
            input_count: NonZeroUsize::new(2).unwrap(),
            output_count: NonZeroUsize::new(2).unwrap(),
            max_gene_addition_mutation_attempts: 10,
            ..GeneticConfig::default()
        };
        let mut genome = NNGenome::new(4, history, &config);
        for _ in 0..5 {
            let _ = genome.mutate_add_node(history);
            let _ = genome.mutate_add_gene(history, &config);
        }
        genome.set_fitness(2.5);
        genome
    }

    #[test]
    fn json_round_trip() {
        let mut history = History::new();
        let genome = evolved_genome(&mut history);

        let json = serde_json::to_string(&genome.to_record()).unwrap();
        let record: GenomeRecord = serde_json::from_str(&json).unwrap();
        let mut fresh = History::new();
        let loaded = NNGenome::from_record(record, &mut fresh).unwrap();

        assert_eq!(loaded, genome);
        assert_eq!(loaded.fitness(), 2.5);
        assert_eq!(fresh.last_innovation(), genome.max_innovation().unwrap());
        for gene in genome.genes() {
            assert_eq!(
                fresh.registered_innovation(gene.input(), gene.output()),
                Some(gene.innovation())
            );
        }
    }

    #[test]
    fn node_type_is_persisted_as_type() {
        let json = serde_json::to_value(NodeRecord {
            id: 3,
            node_type: NodeType::Hidden,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "id": 3, "type": "hidden" }));
    }

    #[test]
    fn loading_continues_innovation_numbering() {
        let mut history = History::new();
        let genome = evolved_genome(&mut history);

        let mut fresh = History::new();
        NNGenome::from_record(genome.to_record(), &mut fresh).unwrap();

        let next = fresh.innovation_number(1000, 1001);
        assert_eq!(next, genome.max_innovation().unwrap() + 1);
    }

    #[test]
    fn loading_into_shared_history() {
        let mut history = History::new();
        let genome = evolved_genome(&mut history);
        let before = history.clone();

        let loaded = NNGenome::from_record(genome.to_record(), &mut history).unwrap();

        assert_eq!(loaded, genome);
        assert_eq!(history, before);
    }

    #[test]
    fn registry_inconsistency_endpoints() {
        let mut history = History::new();
        history.innovation_number(0, 1);

        let record = GenomeRecord {
            id: Some(0),
            fitness: 0.0,
            nodes: vec![
                NodeRecord { id: 0, node_type: NodeType::Input },
                NodeRecord { id: 1, node_type: NodeType::Output },
            ],
            connections: vec![ConnectionRecord {
                source: 0,
                target: 1,
                weight: 1.0,
                enabled: true,
                innovation_number: 5,
            }],
        };
        let before = history.clone();

        assert_eq!(
            NNGenome::from_record(record, &mut history).unwrap_err(),
            RecordError::RegistryInconsistency {
                innovation: 5,
                endpoints: (0, 1),
                conflict: RegistryConflict::EndpointsAssigned(1),
            }
        );
        assert_eq!(history, before);
    }

    #[test]
    fn registry_inconsistency_innovation() {
        let mut history = History::new();
        history.innovation_number(0, 2);

        let record = GenomeRecord {
            id: None,
            fitness: 0.0,
            nodes: vec![
                NodeRecord { id: 0, node_type: NodeType::Input },
                NodeRecord { id: 1, node_type: NodeType::Input },
                NodeRecord { id: 2, node_type: NodeType::Output },
            ],
            connections: vec![
                ConnectionRecord {
                    source: 0,
                    target: 2,
                    weight: 1.0,
                    enabled: true,
                    innovation_number: 1,
                },
                ConnectionRecord {
                    source: 1,
                    target: 2,
                    weight: 1.0,
                    enabled: true,
                    innovation_number: 1,
                },
            ],
        };

        // A record may not reuse an innovation number internally either.
        assert_eq!(
            NNGenome::from_record(record.clone(), &mut history).unwrap_err(),
            RecordError::InvalidGene(GeneValidityError::DuplicateGeneID(1, (1, 2)))
        );

        let mut record = record;
        record.connections.truncate(1);
        record.connections[0].source = 1;
        assert_eq!(
            NNGenome::from_record(record, &mut history).unwrap_err(),
            RecordError::RegistryInconsistency {
                innovation: 1,
                endpoints: (1, 2),
                conflict: RegistryConflict::InnovationAssigned(0, 2),
            }
        );
    }

    #[test]
    fn structural_errors() {
        let mut history = History::new();
        let node = |id, node_type| NodeRecord { id, node_type };

        let duplicate_node = GenomeRecord {
            id: None,
            fitness: 0.0,
            nodes: vec![node(0, NodeType::Input), node(0, NodeType::Output)],
            connections: vec![],
        };
        assert_eq!(
            NNGenome::from_record(duplicate_node, &mut history).unwrap_err(),
            RecordError::InvalidNode(NodeValidityError::DuplicateNodeID(0))
        );

        let no_outputs = GenomeRecord {
            id: None,
            fitness: 0.0,
            nodes: vec![node(0, NodeType::Input), node(1, NodeType::Hidden)],
            connections: vec![],
        };
        assert_eq!(
            NNGenome::from_record(no_outputs, &mut history).unwrap_err(),
            RecordError::MissingIoNodes
        );
        assert!(history.is_empty());
    }
}
