use crate::Symbol;

/// A node in a code tree.
///
/// Every internal node has exactly two children, each exclusively owned by
/// its parent. A node's weight is the sum of the counts of all symbols below
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S: Symbol> {
    Leaf {
        symbol: S,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node<S>>,
        right: Box<Node<S>>,
    },
}

impl<S: Symbol> Node<S> {
    pub fn leaf(symbol: S, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Join two subtrees under a new parent. `left` is reached by a `0` bit,
    /// `right` by a `1` bit.
    pub fn merge(left: Self, right: Self) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// `None` for internal nodes.
    pub fn symbol(&self) -> Option<&S> {
        match self {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    /// `(left, right)`, or `None` for a leaf.
    pub fn children(&self) -> Option<(&Node<S>, &Node<S>)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((left, right)),
        }
    }

    /// The child selected by one bit of a code: `false` is left, `true` is
    /// right.
    pub fn child(&self, bit: bool) -> Option<&Node<S>> {
        self.children()
            .map(|(left, right)| if bit { right } else { left })
    }

    pub fn leaf_count(&self) -> usize {
        match self.children() {
            None => 1,
            Some((left, right)) => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path below this node. A lone leaf
    /// has depth 0.
    pub fn depth(&self) -> usize {
        match self.children() {
            None => 0,
            Some((left, right)) => 1 + left.depth().max(right.depth()),
        }
    }
}
