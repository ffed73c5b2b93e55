use crate::genomics::{GeneticConfig, RegistryConflict};
use crate::{Innovation, NodeId};

use ahash::RandomState;
use evoneat::InnovationHistory;
use serde::{Deserialize, Serialize};

use std::collections::hash_map::{Entry, HashMap};

/// A `History` keeps track of gene innovations in a
/// population, in order to make sure identical mutations
/// are assigned the same innovation numbers.
///
/// The input and output nodes of a gene are used to
/// identify identical mutations, and the corresponding
/// innovation number is recorded for the lifetime of the
/// history. A single history should be shared by every
/// genome of an evolutionary run; independent runs
/// should use independent histories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "HistoryRecord", from = "HistoryRecord")]
pub struct History {
    last_innovation: Innovation,
    gene_innovations: HashMap<(NodeId, NodeId), Innovation, RandomState>,
    gene_endpoints: HashMap<Innovation, (NodeId, NodeId), RandomState>,
}

/// Flat, ordered form of a [`History`], used for
/// serialization. Map keys of tuple type are not
/// representable in every format.
#[derive(Serialize, Deserialize)]
struct HistoryRecord {
    last_innovation: Innovation,
    genes: Vec<(NodeId, NodeId, Innovation)>,
}

impl InnovationHistory for History {
    type Config = GeneticConfig;

    fn new(_config: &GeneticConfig) -> History {
        Self::new()
    }
}

impl History {
    /// Creates a new, empty History. The first
    /// innovation number it assigns is 1.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::History;
    ///
    /// let history = History::new();
    ///
    /// assert_eq!(history.last_innovation(), 0);
    /// assert!(history.is_empty());
    /// ```
    pub fn new() -> History {
        History::default()
    }

    /// Returns the innovation number assigned to a gene
    /// between `input` and `output`, assigning the next
    /// available number if the pair has never been seen.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::History;
    ///
    /// let mut history = History::new();
    ///
    /// let first = history.innovation_number(0, 3);
    /// assert_eq!(first, 1);
    /// assert_eq!(history.innovation_number(0, 3), first);
    /// assert_ne!(history.innovation_number(3, 0), first);
    /// ```
    pub fn innovation_number(&mut self, input: NodeId, output: NodeId) -> Innovation {
        match self.gene_innovations.entry((input, output)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                self.last_innovation += 1;
                entry.insert(self.last_innovation);
                self.gene_endpoints
                    .insert(self.last_innovation, (input, output));
                self.last_innovation
            }
        }
    }

    /// Returns the innovation number previously assigned to
    /// the pair, if any, without registering anything.
    pub fn registered_innovation(&self, input: NodeId, output: NodeId) -> Option<Innovation> {
        self.gene_innovations.get(&(input, output)).copied()
    }

    /// Returns the endpoints an innovation number was assigned to, if any.
    pub fn endpoints_of(&self, innovation: Innovation) -> Option<(NodeId, NodeId)> {
        self.gene_endpoints.get(&innovation).copied()
    }

    /// Returns the highest gene innovation number assigned
    /// or registered so far, or 0 if none has been.
    pub fn last_innovation(&self) -> Innovation {
        self.last_innovation
    }

    /// Returns the number of registered gene innovations.
    pub fn len(&self) -> usize {
        self.gene_innovations.len()
    }

    /// Returns whether no gene innovation has been registered.
    pub fn is_empty(&self) -> bool {
        self.gene_innovations.is_empty()
    }

    /// Returns an iterator over the complete record of
    /// gene innovations, in the format
    /// `((input node, output node), gene innovation)`.
    /// No ordering is guaranteed.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     ..GeneticConfig::default()
    /// };
    /// let mut history = History::new();
    ///
    /// // Record innovations through genome creation.
    /// NNGenome::new(0, &mut history, &config);
    ///
    /// for ((input_node, output_node), gene) in history.gene_innovation_history() {
    ///     println!("gene innovation with id {} from node {} to node {}",
    ///         gene, input_node, output_node);
    /// }
    /// # assert_eq!(history.gene_innovation_history().count(), 2);
    /// ```
    pub fn gene_innovation_history(
        &self,
    ) -> impl Iterator<Item = (&(NodeId, NodeId), &Innovation)> {
        self.gene_innovations.iter()
    }

    /// Checks whether a gene with the given innovation number
    /// and endpoints agrees with the history. A gene agrees if
    /// neither its endpoints nor its innovation number have been
    /// assigned to anything else.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{History, RegistryConflict};
    ///
    /// let mut history = History::new();
    /// let innovation = history.innovation_number(0, 2);
    ///
    /// assert!(history.check(innovation, (0, 2)).is_ok());
    /// assert!(history.check(innovation + 1, (1, 2)).is_ok());
    /// assert_eq!(
    ///     history.check(innovation + 1, (0, 2)),
    ///     Err(RegistryConflict::EndpointsAssigned(innovation)),
    /// );
    /// assert_eq!(
    ///     history.check(innovation, (1, 2)),
    ///     Err(RegistryConflict::InnovationAssigned(0, 2)),
    /// );
    /// ```
    pub fn check(
        &self,
        innovation: Innovation,
        (input, output): (NodeId, NodeId),
    ) -> Result<(), RegistryConflict> {
        if let Some(registered) = self.registered_innovation(input, output) {
            if registered != innovation {
                return Err(RegistryConflict::EndpointsAssigned(registered));
            }
        }
        if let Some((i, o)) = self.endpoints_of(innovation) {
            if (i, o) != (input, output) {
                return Err(RegistryConflict::InnovationAssigned(i, o));
            }
        }
        Ok(())
    }

    /// Records an externally assigned innovation number,
    /// advancing the counter past it if necessary.
    ///
    /// Callers must have [checked] the gene beforehand.
    ///
    /// [checked]: History::check
    pub(crate) fn register(&mut self, innovation: Innovation, endpoints: (NodeId, NodeId)) {
        self.gene_innovations.insert(endpoints, innovation);
        self.gene_endpoints.insert(innovation, endpoints);
        self.last_innovation = self.last_innovation.max(innovation);
    }
}

impl From<History> for HistoryRecord {
    fn from(history: History) -> HistoryRecord {
        let mut genes: Vec<_> = history
            .gene_innovations
            .into_iter()
            .map(|((i, o), innovation)| (i, o, innovation))
            .collect();
        genes.sort_unstable_by_key(|(.., innovation)| *innovation);
        HistoryRecord {
            last_innovation: history.last_innovation,
            genes,
        }
    }
}

impl From<HistoryRecord> for History {
    fn from(record: HistoryRecord) -> History {
        let mut history = History {
            last_innovation: record.last_innovation,
            ..History::default()
        };
        for (i, o, innovation) in record.genes {
            history.register(innovation, (i, o));
        }
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn innovation_numbers_are_sequential() {
        let mut history = History::new();
        assert_eq!(history.innovation_number(0, 1), 1);
        assert_eq!(history.innovation_number(1, 2), 2);
        assert_eq!(history.innovation_number(0, 1), 1);
        assert_eq!(history.innovation_number(2, 1), 3);
        assert_eq!(history.last_innovation(), 3);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn innovation_stability() {
        let mut history = History::new();
        for a in 0..6 {
            for b in 0..6 {
                if a == b {
                    continue;
                }
                let first = history.innovation_number(a, b);
                assert_eq!(history.innovation_number(a, b), first);
                assert_ne!(history.innovation_number(b, a), first);
            }
        }
    }

    #[test]
    fn register_advances_counter() {
        let mut history = History::new();
        history.register(10, (4, 7));
        assert_eq!(history.last_innovation(), 10);
        assert_eq!(history.innovation_number(4, 7), 10);
        assert_eq!(history.innovation_number(7, 4), 11);

        // Registering below the counter leaves it alone.
        history.register(5, (1, 2));
        assert_eq!(history.last_innovation(), 11);
        assert_eq!(history.endpoints_of(5), Some((1, 2)));
    }

    #[test]
    fn serde_round_trip() {
        let mut history = History::new();
        history.innovation_number(0, 2);
        history.innovation_number(1, 2);
        history.innovation_number(0, 3);

        let json = serde_json::to_string(&history).unwrap();
        let restored: History = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, history);
        assert_eq!(restored.registered_innovation(1, 2), Some(2));
    }
}
