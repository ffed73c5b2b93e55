use crate::NodeId;

use serde::{Deserialize, Serialize};

use std::fmt;

/// A NodeType indicates the function of
/// the node's network equivalent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Input nodes, fed by the environment.
    Input,
    /// Hidden nodes, created only by structural mutation.
    Hidden,
    /// Output nodes, read by the environment.
    Output,
}

/// Nodes are the structural elements of genomes
/// between which genes are created.
///
/// Nodes carry no weight or state of their own,
/// and are copied by value.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    node_type: NodeType,
}

impl Node {
    /// Generate a new node with the passed parameters.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{Node, NodeType};
    ///
    /// let node = Node::new(5, NodeType::Hidden);
    /// ```
    pub fn new(id: NodeId, node_type: NodeType) -> Node {
        Node { id, node_type }
    }

    /// Returns the node's id.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{Node, NodeType};
    ///
    /// let node = Node::new(5, NodeType::Hidden);
    ///
    /// assert_eq!(node.id(), 5);
    /// ```
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node's node type.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{Node, NodeType};
    ///
    /// let node = Node::new(5, NodeType::Hidden);
    ///
    /// assert_eq!(node.node_type(), NodeType::Hidden);
    /// ```
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Hidden => write!(f, "hidden"),
            Self::Output => write!(f, "output"),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}[{}]", self.id, self.node_type)
    }
}
