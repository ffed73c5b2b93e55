//! Genomes are the focus of evolution in NEAT.
//! They are a collection of genes and nodes that can be instantiated
//! as a phenotype (a neural network). Genomes can be progressively mutated,
//! thus adding complexity and functionality.

mod config;
mod errors;
mod genes;
mod history;
mod nodes;
mod records;

pub use config::GeneticConfig;
pub use errors::*;
pub use genes::Gene;
pub use history::History;
pub use nodes::{Node, NodeType};
pub use records::{ConnectionRecord, GenomeRecord, NodeRecord};

use crate::{Innovation, NodeId};

use ahash::RandomState;
use evoneat::{GenomeId, SpeciesId};
use rand::prelude::{IteratorRandom, Rng, SliceRandom};
use tracing::debug;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// A mutable collection of genes and nodes,
/// plus the evolutionary bookkeeping attached
/// to one individual of a population.
///
/// Nodes are kept ordered by id and genes by
/// innovation number, so iteration over either
/// is deterministic.
#[derive(Clone, PartialEq, Debug)]
pub struct NNGenome {
    id: Option<GenomeId>,
    input_count: usize,
    output_count: usize,
    nodes: BTreeMap<NodeId, Node>,
    genes: BTreeMap<Innovation, Gene>,
    node_pairings: HashSet<(NodeId, NodeId), RandomState>,
    fitness: f32,
    adjusted_fitness: f32,
    species: Option<SpeciesId>,
}

impl NNGenome {
    /// Create a new, fully connected genome with the specified
    /// configuration.
    ///
    /// Input nodes receive ids `0..input_count` and output
    /// nodes ids `input_count..input_count + output_count`.
    /// Every input is connected to every output by an enabled
    /// gene with a random weight in `[-weight_bound, weight_bound]`,
    /// whose innovation number is obtained from `history`.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome, NodeType};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     weight_bound: 5.0,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut history = History::new();
    ///
    /// let genome = NNGenome::new(0, &mut history, &config);
    ///
    /// // As configured, the genome should have 3 inputs + 2 outputs.
    /// assert_eq!(genome.nodes().count(), 3 + 2);
    /// assert_eq!(genome.nodes().filter(|n| n.node_type() == NodeType::Input).count(), 3);
    /// assert_eq!(genome.nodes().filter(|n| n.node_type() == NodeType::Output).count(), 2);
    ///
    /// // There is an enabled gene for every input-output pair.
    /// assert_eq!(genome.genes().count(), 3 * 2);
    /// assert!(genome.genes().all(|g| g.enabled()));
    ///
    /// // All genes should have weights within the established bound.
    /// assert!(genome.genes().all(|g| g.weight().abs() <= config.weight_bound));
    ///
    /// // The history was consulted for every gene.
    /// assert_eq!(history.last_innovation(), 6);
    /// ```
    pub fn new(id: GenomeId, history: &mut History, config: &GeneticConfig) -> NNGenome {
        let mut genome = Self::unconnected(config);
        genome.id = Some(id);

        let input_count = config.input_count.get();
        for i in 0..input_count {
            for o in input_count..input_count + config.output_count.get() {
                let innovation = history.innovation_number(i, o);
                genome.add_gene_unchecked(innovation, i, o, Gene::random_weight(config));
            }
        }

        genome
    }

    /// Create a new genome with the configured input and
    /// output nodes, but no genes and no id.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, NNGenome};
    /// use std::num::NonZeroUsize;
    ///
    /// let genome = NNGenome::unconnected(&GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     ..GeneticConfig::zero()
    /// });
    ///
    /// assert_eq!(genome.nodes().count(), 3);
    /// assert_eq!(genome.genes().count(), 0);
    /// assert_eq!(genome.id(), None);
    /// ```
    pub fn unconnected(config: &GeneticConfig) -> NNGenome {
        let mut genome = Self::empty(None);
        let input_count = config.input_count.get();
        let output_count = config.output_count.get();

        for i in 0..input_count {
            genome.insert_node_unchecked(Node::new(i, NodeType::Input));
        }
        for o in input_count..input_count + output_count {
            genome.insert_node_unchecked(Node::new(o, NodeType::Output));
        }

        genome
    }

    /// A genome without nodes, used as the starting
    /// point of record loading.
    fn empty(id: Option<GenomeId>) -> NNGenome {
        NNGenome {
            id,
            input_count: 0,
            output_count: 0,
            nodes: BTreeMap::new(),
            genes: BTreeMap::new(),
            node_pairings: HashSet::default(),
            fitness: 0.0,
            adjusted_fitness: 0.0,
            species: None,
        }
    }

    /// Add a new gene to the genome.
    /// Returns a reference to the new gene.
    ///
    /// # Errors
    ///
    /// Returns an error if the innovation number is already
    /// present, if either endpoint does not exist, if the
    /// endpoints are already connected in this direction,
    /// or if the target is an input node.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneValidityError, GeneticConfig, NNGenome};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     ..GeneticConfig::zero()
    /// };
    ///
    /// let mut genome = NNGenome::unconnected(&config);
    ///
    /// let inserted_gene = *genome.add_gene(42, 0, 4, 2.5).unwrap();
    ///
    /// assert_eq!(genome.genes().count(), 1);
    /// assert_eq!(inserted_gene.innovation(), 42);
    /// assert_eq!(inserted_gene.endpoints(), (0, 4));
    /// assert_eq!(inserted_gene.weight(), 2.5);
    ///
    /// // Genes may not target input nodes.
    /// assert_eq!(
    ///     genome.add_gene(43, 4, 1, 1.0).unwrap_err(),
    ///     GeneValidityError::InputEndpoint(1),
    /// );
    /// ```
    pub fn add_gene(
        &mut self,
        innovation: Innovation,
        input: NodeId,
        output: NodeId,
        weight: f32,
    ) -> Result<&mut Gene, GeneValidityError> {
        self.check_gene_viability(innovation, input, output)?;
        Ok(self.add_gene_unchecked(innovation, input, output, weight))
    }

    /// Add a new gene to the genome.
    /// Returns a reference to the new gene.
    /// Assumes that the gene is not a duplicate
    /// or invalid gene for the genome.
    fn add_gene_unchecked(
        &mut self,
        innovation: Innovation,
        input: NodeId,
        output: NodeId,
        weight: f32,
    ) -> &mut Gene {
        self.node_pairings.insert((input, output));
        self.genes
            .entry(innovation)
            .or_insert_with(|| Gene::new(innovation, input, output, weight))
    }

    /// Checks whether a gene is a duplicate or
    /// is invalid for the genome.
    fn check_gene_viability(
        &self,
        innovation: Innovation,
        input: NodeId,
        output: NodeId,
    ) -> Result<(), GeneValidityError> {
        use GeneValidityError::*;
        match (self.nodes.get(&input), self.nodes.get(&output)) {
            _ if self.genes.contains_key(&innovation) => {
                Err(DuplicateGeneID(innovation, (input, output)))
            }
            (Some(_), Some(target)) => {
                if self.node_pairings.contains(&(input, output)) {
                    Err(DuplicateGeneWithEndpoints(innovation, (input, output)))
                } else if target.node_type() == NodeType::Input {
                    Err(InputEndpoint(output))
                } else {
                    Ok(())
                }
            }
            _ => Err(NonexistantEndpoints(input, output)),
        }
    }

    /// Add a new hidden node to the genome.
    /// Returns a reference to the newly created node.
    ///
    /// # Errors
    ///
    /// Returns an error if a node of the
    /// same ID already exists in the genome.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, NNGenome, NodeType};
    ///
    /// let mut genome = NNGenome::unconnected(&GeneticConfig::zero());
    ///
    /// let inserted_node = *genome.add_node(42).unwrap();
    ///
    /// assert_eq!(genome.nodes().count(), 1 + 1 + 1);
    /// assert_eq!(inserted_node.id(), 42);
    /// assert_eq!(inserted_node.node_type(), NodeType::Hidden);
    ///
    /// assert!(genome.add_node(42).is_err());
    /// ```
    pub fn add_node(&mut self, id: NodeId) -> Result<&mut Node, NodeValidityError> {
        self.insert_node(Node::new(id, NodeType::Hidden))
    }

    /// Inserts a node of any type, keeping the
    /// input and output counts current.
    fn insert_node(&mut self, node: Node) -> Result<&mut Node, NodeValidityError> {
        if self.nodes.contains_key(&node.id()) {
            Err(NodeValidityError::DuplicateNodeID(node.id()))
        } else {
            Ok(self.insert_node_unchecked(node))
        }
    }

    fn insert_node_unchecked(&mut self, node: Node) -> &mut Node {
        match node.node_type() {
            NodeType::Input => self.input_count += 1,
            NodeType::Output => self.output_count += 1,
            NodeType::Hidden => {}
        }
        self.nodes.entry(node.id()).or_insert(node)
    }

    /// Induces a _weight mutation_ in the genome.
    ///
    /// Every enabled gene either has its weight reset to a
    /// random value in `[-weight_bound, weight_bound]`, with
    /// probability [`weight_reset_chance`], or perturbed by
    /// Gaussian noise otherwise. Disabled genes are left alone,
    /// and no gene changes its enabled status.
    ///
    /// [`weight_reset_chance`]: GeneticConfig::weight_reset_chance
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
    ///
    /// let config = GeneticConfig {
    ///     weight_bound: 1.0,
    ///     weight_reset_chance: 1.0,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut genome = NNGenome::new(0, &mut History::new(), &config);
    ///
    /// genome.mutate_weights(&config);
    ///
    /// assert!(genome.genes().all(|g| g.weight().abs() <= 1.0 && g.enabled()));
    /// ```
    pub fn mutate_weights(&mut self, config: &GeneticConfig) {
        let mut rng = rand::thread_rng();
        for gene in self.genes.values_mut().filter(|g| g.enabled()) {
            if rng.gen::<f32>() < config.weight_reset_chance {
                gene.randomize_weight(config);
            } else {
                gene.perturb_weight(config);
            }
        }
    }

    /// Induces a _gene addition mutation_ in the genome.
    ///
    /// Two distinct nodes are picked at random, in random
    /// order, and connected by a new enabled gene with a random
    /// weight. Pairs are rejected if their target is an input
    /// node, if they are already connected in either direction,
    /// or if the new gene would close a cycle. Up to
    /// [`max_gene_addition_mutation_attempts`] pairs are tried.
    ///
    /// The gene's innovation number is obtained from `history`,
    /// so the same pair receives the same number in every genome.
    ///
    /// # Errors
    ///
    /// Returns an error if no viable pair was found.
    ///
    /// [`max_gene_addition_mutation_attempts`]: GeneticConfig::max_gene_addition_mutation_attempts
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     max_gene_addition_mutation_attempts: 100,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut history = History::new();
    /// let mut genome = NNGenome::unconnected(&config);
    ///
    /// let gene = *genome.mutate_add_gene(&mut history, &config).unwrap();
    ///
    /// // Only input -> output genes are possible here.
    /// assert_eq!(gene.output(), 2);
    /// assert_eq!(history.registered_innovation(gene.input(), 2), Some(gene.innovation()));
    /// ```
    pub fn mutate_add_gene(
        &mut self,
        history: &mut History,
        config: &GeneticConfig,
    ) -> Result<&Gene, GeneAdditionMutationError> {
        let mut rng = rand::thread_rng();
        let node_ids: Vec<NodeId> = self.nodes.keys().copied().collect();

        for _ in 0..config.max_gene_addition_mutation_attempts {
            let pair: Vec<NodeId> = node_ids.choose_multiple(&mut rng, 2).copied().collect();
            let (input, output) = match pair[..] {
                [input, output] => (input, output),
                _ => break,
            };
            if !self.is_viable_pair(input, output) {
                continue;
            }
            let innovation = history.innovation_number(input, output);
            if self.genes.contains_key(&innovation) {
                continue;
            }
            let gene: &Gene =
                self.add_gene_unchecked(innovation, input, output, Gene::random_weight(config));
            return Ok(gene);
        }

        Err(GeneAdditionMutationError::NoViablePairFound)
    }

    /// Whether a gene from `input` to `output` could be added
    /// while keeping the genome free of duplicate pairs and cycles.
    fn is_viable_pair(&self, input: NodeId, output: NodeId) -> bool {
        input != output
            && self
                .nodes
                .get(&output)
                .map_or(false, |n| n.node_type() != NodeType::Input)
            && !self.node_pairings.contains(&(input, output))
            && !self.node_pairings.contains(&(output, input))
            && !path_exists(self.node_pairings.iter().copied(), output, input)
    }

    /// Induces a _node addition mutation_ in the genome.
    ///
    /// A random enabled gene is disabled and split by a new
    /// hidden node, whose id is one greater than the greatest
    /// node id in the genome. The gene into the new node has
    /// weight 1.0, and the gene out of it inherits the split
    /// gene's weight, so the signal path is preserved.
    ///
    /// Returns the new input gene, node, and output gene.
    ///
    /// # Errors
    ///
    /// Returns an error if the genome has no enabled genes.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome, NodeType};
    ///
    /// let config = GeneticConfig::zero();
    /// let mut history = History::new();
    /// let mut genome = NNGenome::new(0, &mut history, &config);
    ///
    /// let (in_gene, node, out_gene) = genome.mutate_add_node(&mut history).unwrap();
    ///
    /// assert_eq!(node.id(), 2);
    /// assert_eq!(node.node_type(), NodeType::Hidden);
    /// assert_eq!(in_gene.endpoints(), (0, 2));
    /// assert_eq!(in_gene.weight(), 1.0);
    /// assert_eq!(out_gene.endpoints(), (2, 1));
    ///
    /// // The split gene is kept, but disabled.
    /// assert!(!genome.gene(1).unwrap().enabled());
    /// ```
    pub fn mutate_add_node(
        &mut self,
        history: &mut History,
    ) -> Result<(&Gene, &Node, &Gene), NodeAdditionMutationError> {
        let split = self
            .genes
            .values()
            .filter(|g| g.enabled())
            .map(|g| g.innovation())
            .choose(&mut rand::thread_rng())
            .ok_or(NodeAdditionMutationError::EmptyGenePool)?;

        let (input, output, weight) = match self.genes.get_mut(&split) {
            Some(gene) => {
                gene.set_enabled(false);
                (gene.input(), gene.output(), gene.weight())
            }
            None => return Err(NodeAdditionMutationError::EmptyGenePool),
        };

        let node_id = self.max_node_id().map_or(0, |id| id + 1);
        self.insert_node_unchecked(Node::new(node_id, NodeType::Hidden));

        let input_gene = history.innovation_number(input, node_id);
        let output_gene = history.innovation_number(node_id, output);
        self.add_gene_unchecked(input_gene, input, node_id, 1.0);
        self.add_gene_unchecked(output_gene, node_id, output, weight);

        Ok((
            &self.genes[&input_gene],
            &self.nodes[&node_id],
            &self.genes[&output_gene],
        ))
    }

    /// Applies each mutation operator with its configured
    /// probability. Operators without a valid target are
    /// skipped.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
    ///
    /// let config = GeneticConfig {
    ///     node_addition_mutation_chance: 1.0,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut history = History::new();
    /// let mut genome = NNGenome::new(0, &mut history, &config);
    ///
    /// genome.mutate(&mut history, &config);
    ///
    /// assert_eq!(genome.nodes().count(), 3);
    /// assert_eq!(genome.genes().count(), 3);
    /// ```
    pub fn mutate(&mut self, history: &mut History, config: &GeneticConfig) {
        let mut rng = rand::thread_rng();
        if rng.gen::<f32>() < config.weight_mutation_chance {
            self.mutate_weights(config);
        }
        if rng.gen::<f32>() < config.gene_addition_mutation_chance {
            if let Err(e) = self.mutate_add_gene(history, config) {
                debug!(genome = ?self.id, "skipped gene addition: {}", e);
            }
        }
        if rng.gen::<f32>() < config.node_addition_mutation_chance {
            if let Err(e) = self.mutate_add_node(history) {
                debug!(genome = ?self.id, "skipped node addition: {}", e);
            }
        }
    }

    /// Combines the genome with `other`, taking `self`
    /// as the primary parent, and returns the child.
    ///
    /// The child contains every node of either parent. Genes
    /// present in both parents are copied from either one at
    /// random; genes present in only one parent are copied from
    /// whichever parent has them. An inherited gene that would
    /// close a cycle among the child's enabled genes is disabled.
    ///
    /// The child has no id, no fitness and no species.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
    ///
    /// let config = GeneticConfig::zero();
    /// let mut history = History::new();
    ///
    /// let mut parent1 = NNGenome::new(0, &mut history, &config);
    /// let parent2 = NNGenome::new(1, &mut history, &config);
    /// parent1.mutate_add_node(&mut history).unwrap();
    ///
    /// let child = parent1.crossover(&parent2);
    ///
    /// assert_eq!(child.nodes().count(), 3);
    /// assert_eq!(child.genes().count(), 3);
    /// assert_eq!(child.id(), None);
    /// ```
    pub fn crossover(&self, other: &NNGenome) -> NNGenome {
        let mut rng = rand::thread_rng();
        let mut child = Self::empty(None);

        for node in self.nodes.values().chain(other.nodes.values()) {
            if !child.nodes.contains_key(&node.id()) {
                child.insert_node_unchecked(*node);
            }
        }

        let innovations: BTreeSet<Innovation> =
            self.genes.keys().chain(other.genes.keys()).copied().collect();
        for innovation in innovations {
            let gene = match (self.genes.get(&innovation), other.genes.get(&innovation)) {
                (Some(primary), Some(secondary)) => {
                    if rng.gen::<bool>() {
                        primary
                    } else {
                        secondary
                    }
                }
                (Some(gene), None) | (None, Some(gene)) => gene,
                (None, None) => continue,
            };
            if child.node_pairings.contains(&gene.endpoints()) {
                continue;
            }
            *child.add_gene_unchecked(innovation, gene.input(), gene.output(), gene.weight()) =
                *gene;
        }

        child.disable_cycle_closing_genes();
        child
    }

    /// Disables, in innovation order, every enabled gene
    /// that would close a cycle among the enabled genes
    /// that precede it.
    fn disable_cycle_closing_genes(&mut self) {
        let mut accepted: Vec<(NodeId, NodeId)> = Vec::with_capacity(self.genes.len());
        for gene in self.genes.values_mut().filter(|g| g.enabled()) {
            let (input, output) = gene.endpoints();
            if input == output || path_exists(accepted.iter().copied(), output, input) {
                debug!(gene = %gene, "disabled cycle-closing gene in offspring");
                gene.set_enabled(false);
            } else {
                accepted.push((input, output));
            }
        }
    }

    /// Returns the compatibility distance between two genomes.
    ///
    /// Genes are aligned by innovation number. Unmatched genes are
    /// _excess_ if their innovation number exceeds the greater of
    /// both genomes' maximum innovation numbers, and _disjoint_
    /// otherwise. Since that threshold is taken over both genomes,
    /// every unmatched gene ends up disjoint. With `N` the larger gene count, or 1
    /// if that is below [`small_genome_threshold`], the distance is
    /// `c1 * excess / N + c2 * disjoint / N + c3 * W`, where `W` is
    /// the average weight difference of matching genes.
    ///
    /// [`small_genome_threshold`]: GeneticConfig::small_genome_threshold
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, NNGenome};
    /// use std::num::NonZeroUsize;
    ///
    /// const EXCESS_FACTOR: f32 = 1.0;
    /// const DISJOINT_FACTOR: f32 = 2.0;
    /// const WEIGHT_FACTOR: f32 = 0.5;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     excess_gene_factor: EXCESS_FACTOR,
    ///     disjoint_gene_factor: DISJOINT_FACTOR,
    ///     common_weight_factor: WEIGHT_FACTOR,
    ///     small_genome_threshold: 20,
    ///     ..GeneticConfig::zero()
    /// };
    ///
    /// let mut genome1 = NNGenome::unconnected(&config);
    /// let mut genome2 = NNGenome::unconnected(&config);
    ///
    /// // Common gene, weight difference of 2.0.
    /// genome1.add_gene(1, 0, 2, 1.0).unwrap();
    /// genome2.add_gene(1, 0, 2, -1.0).unwrap();
    ///
    /// // Common gene, weight difference of 0.0.
    /// genome1.add_gene(4, 0, 3, 1.0).unwrap();
    /// genome2.add_gene(4, 0, 3, 1.0).unwrap();
    ///
    /// // Unmatched genes, none past the greatest innovation number (7).
    /// genome1.add_gene(2, 1, 2, 3.0).unwrap();
    /// genome1.add_gene(6, 2, 3, 3.0).unwrap();
    /// genome2.add_gene(7, 1, 3, 1.0).unwrap();
    ///
    /// assert_eq!(
    ///     genome1.compatibility_distance(&genome2, &config),
    ///     EXCESS_FACTOR * 0.0 +
    ///         DISJOINT_FACTOR * (1 + 1 + 1) as f32 +
    ///         WEIGHT_FACTOR * (2.0 + 0.0) / 2.0
    /// );
    /// assert_eq!(
    ///     genome1.compatibility_distance(&genome2, &config),
    ///     genome2.compatibility_distance(&genome1, &config)
    /// );
    /// ```
    pub fn compatibility_distance(&self, other: &NNGenome, config: &GeneticConfig) -> f32 {
        let threshold = self
            .max_innovation()
            .max(other.max_innovation())
            .unwrap_or(0);

        let mut excess = 0;
        let mut disjoint = 0;
        let mut matching = 0;
        let mut weight_difference = 0.0;

        for gene in self.genes.values() {
            match other.genes.get(&gene.innovation()) {
                Some(counterpart) => {
                    matching += 1;
                    weight_difference += (gene.weight() - counterpart.weight()).abs();
                }
                None if gene.innovation() > threshold => excess += 1,
                None => disjoint += 1,
            }
        }
        for gene in other.genes.values() {
            if !self.genes.contains_key(&gene.innovation()) {
                if gene.innovation() > threshold {
                    excess += 1;
                } else {
                    disjoint += 1;
                }
            }
        }

        let gene_count = self.genes.len().max(other.genes.len());
        let n = if gene_count < config.small_genome_threshold {
            1.0
        } else {
            gene_count.max(1) as f32
        };
        let average_weight_difference = if matching == 0 {
            0.0
        } else {
            weight_difference / matching as f32
        };

        config.excess_gene_factor * excess as f32 / n
            + config.disjoint_gene_factor * disjoint as f32 / n
            + config.common_weight_factor * average_weight_difference
    }

    /// Returns the genome's id, if one has been assigned.
    pub fn id(&self) -> Option<GenomeId> {
        self.id
    }

    /// Assigns the genome an id.
    pub fn set_id(&mut self, id: GenomeId) {
        self.id = Some(id);
    }

    /// Returns an iterator over the genome's genes,
    /// in increasing innovation number order.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     ..GeneticConfig::zero()
    /// };
    ///
    /// let genome = NNGenome::new(0, &mut History::new(), &config);
    ///
    /// for gene in genome.genes() {
    ///     println!("gene: {}", gene);
    /// }
    /// ```
    pub fn genes(&self) -> impl Iterator<Item = &Gene> {
        self.genes.values()
    }

    /// Returns an iterator over the genome's nodes,
    /// in increasing id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Returns the gene with the given innovation number, if present.
    pub fn gene(&self, innovation: Innovation) -> Option<&Gene> {
        self.genes.get(&innovation)
    }

    /// Returns the node with the given id, if present.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns the number of input nodes in the genome.
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    /// Returns the number of output nodes in the genome.
    pub fn output_count(&self) -> usize {
        self.output_count
    }

    /// Returns the greatest node id in the genome.
    pub fn max_node_id(&self) -> Option<NodeId> {
        self.nodes.keys().next_back().copied()
    }

    /// Returns the greatest gene innovation number in the genome.
    pub fn max_innovation(&self) -> Option<Innovation> {
        self.genes.keys().next_back().copied()
    }

    /// Sets the genome's fitness to the value passed.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, NNGenome};
    ///
    /// let mut genome = NNGenome::unconnected(&GeneticConfig::zero());
    ///
    /// assert_eq!(genome.fitness(), 0.0);
    ///
    /// genome.set_fitness(32.0);
    ///
    /// assert_eq!(genome.fitness(), 32.0);
    /// ```
    pub fn set_fitness(&mut self, fitness: f32) {
        self.fitness = fitness;
    }

    /// Returns the genome's current raw fitness.
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    /// Sets the genome's fitness after sharing within its species.
    pub fn set_adjusted_fitness(&mut self, adjusted_fitness: f32) {
        self.adjusted_fitness = adjusted_fitness;
    }

    /// Returns the genome's fitness after sharing within its species.
    pub fn adjusted_fitness(&self) -> f32 {
        self.adjusted_fitness
    }

    /// Sets the species the genome was last assigned to.
    pub fn set_species(&mut self, species: Option<SpeciesId>) {
        self.species = species;
    }

    /// Returns the species the genome was last assigned to.
    pub fn species(&self) -> Option<SpeciesId> {
        self.species
    }
}

/// Whether `to` is reachable from `from` following `edges`.
fn path_exists(
    edges: impl Iterator<Item = (NodeId, NodeId)> + Clone,
    from: NodeId,
    to: NodeId,
) -> bool {
    let mut stack = vec![from];
    let mut visited: HashSet<NodeId, RandomState> = HashSet::default();
    while let Some(node) = stack.pop() {
        if node == to {
            return true;
        }
        if visited.insert(node) {
            stack.extend(
                edges
                    .clone()
                    .filter(|(input, _)| *input == node)
                    .map(|(_, output)| output),
            );
        }
    }
    false
}

impl evoneat::Genome for NNGenome {
    type Config = GeneticConfig;
    type InnovationHistory = History;

    fn new(id: GenomeId, history: &mut History, config: &GeneticConfig) -> NNGenome {
        NNGenome::new(id, history, config)
    }

    fn genetic_distance(first: &NNGenome, second: &NNGenome, config: &GeneticConfig) -> f32 {
        first.compatibility_distance(second, config)
    }

    fn mate(primary: &NNGenome, secondary: &NNGenome) -> NNGenome {
        primary.crossover(secondary)
    }

    fn mutate(&mut self, history: &mut History, config: &GeneticConfig) {
        NNGenome::mutate(self, history, config)
    }

    fn id(&self) -> Option<GenomeId> {
        self.id
    }

    fn set_id(&mut self, id: GenomeId) {
        NNGenome::set_id(self, id)
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

impl fmt::Display for NNGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Genome {}", id)?,
            None => write!(f, "Genome (unassigned)")?,
        }
        writeln!(f, " [fitness {:.3}]", self.fitness)?;
        let nodes: Vec<String> = self.nodes.values().map(Node::to_string).collect();
        writeln!(f, "  nodes: {}", nodes.join(" "))?;
        let genes: Vec<String> = self.genes.values().map(Gene::to_string).collect();
        write!(f, "  genes: {}", genes.join(" "))
    }
}
