//! Constituency trees.
//!
//! Trees are stored as an arena of nodes addressed by [`NodeId`], so a
//! mention can keep a cheap back-reference to the constituent it was read
//! from without borrowing the tree. Leaves are numbered 1-based from left
//! to right when the tree is built, which lines them up with
//! [`Token::index`](crate::Token::index).
//!
//! ```text
//! (ROOT (S (NP (DT The) (NN dog)) (VP (VBD barked))))
//!
//!   ROOT
//!    └─ S
//!       ├─ NP ──────────── leaf_span = [0, 2)
//!       │  ├─ DT ─ The      leaf 1
//!       │  └─ NN ─ dog      leaf 2
//!       └─ VP
//!          └─ VBD ─ barked  leaf 3
//! ```

use crate::{Error, Result, Span};
use std::fmt;
use std::str::FromStr;

/// Handle to a node inside one [`ParseTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena (creation order = pre-order).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// 1-based leaf number; `None` for internal nodes.
    leaf_index: Option<usize>,
    /// First and last leaf numbers covered by this node.
    first_leaf: usize,
    last_leaf: usize,
}

/// A constituency parse of one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    nodes: Vec<Node>,
    leaves: Vec<NodeId>,
}

impl ParseTree {
    /// Parse a Penn Treebank bracketed tree, e.g. `(ROOT (S (NP (PRP It)) (VP (VBZ rains))))`.
    ///
    /// The outermost bracket may be unlabeled (`( (S ...))`). Nodes are
    /// created in reading order, so arena order is pre-order and leaves
    /// are numbered left to right.
    pub fn parse(input: &str) -> Result<Self> {
        let mut tokens = lex(input).peekable();
        let mut nodes: Vec<Node> = Vec::new();
        let mut leaves = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut closed_root = false;

        while let Some(tok) = tokens.next() {
            if closed_root {
                return Err(Error::parse(format!("trailing input after tree: {tok:?}")));
            }
            match tok {
                "(" => {
                    let label = match tokens.peek() {
                        Some(&next) if next != "(" && next != ")" => {
                            tokens.next();
                            next.to_string()
                        }
                        _ => String::new(),
                    };
                    let id = NodeId(nodes.len());
                    let parent = stack.last().copied();
                    if parent.is_none() && !nodes.is_empty() {
                        return Err(Error::parse("multiple root constituents"));
                    }
                    nodes.push(Node {
                        label,
                        parent,
                        children: Vec::new(),
                        leaf_index: None,
                        first_leaf: 0,
                        last_leaf: 0,
                    });
                    if let Some(p) = parent {
                        nodes[p.0].children.push(id);
                    }
                    stack.push(id);
                }
                ")" => {
                    let id = stack
                        .pop()
                        .ok_or_else(|| Error::parse("unbalanced ')' in tree"))?;
                    if nodes[id.0].children.is_empty() {
                        return Err(Error::parse(format!(
                            "constituent '{}' has no children",
                            nodes[id.0].label
                        )));
                    }
                    if stack.is_empty() {
                        closed_root = true;
                    }
                }
                word => {
                    let parent = *stack
                        .last()
                        .ok_or_else(|| Error::parse(format!("word '{word}' outside brackets")))?;
                    let id = NodeId(nodes.len());
                    leaves.push(id);
                    let n = leaves.len();
                    nodes.push(Node {
                        label: word.to_string(),
                        parent: Some(parent),
                        children: Vec::new(),
                        leaf_index: Some(n),
                        first_leaf: n,
                        last_leaf: n,
                    });
                    nodes[parent.0].children.push(id);
                }
            }
        }

        if !stack.is_empty() {
            return Err(Error::parse("unbalanced '(' in tree"));
        }
        if nodes.is_empty() {
            return Err(Error::parse("empty tree"));
        }

        // Children always follow their parent in the arena, so a reverse
        // sweep sees every child before its parent.
        for i in (0..nodes.len()).rev() {
            if nodes[i].leaf_index.is_some() {
                continue;
            }
            let first = nodes[i].children.first().map(|c| nodes[c.0].first_leaf);
            let last = nodes[i].children.last().map(|c| nodes[c.0].last_leaf);
            if let (Some(first), Some(last)) = (first, last) {
                nodes[i].first_leaf = first;
                nodes[i].last_leaf = last;
            }
        }

        Ok(Self { nodes, leaves })
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, leaves included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Trees always have a root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node label: the category for internal nodes, the word for leaves.
    #[must_use]
    pub fn label(&self, id: NodeId) -> &str {
        &self.nodes[id.0].label
    }

    /// Category with functional tags stripped (`NP-SBJ` → `NP`, `NP=2` → `NP`).
    ///
    /// Bracket-style labels such as `-NONE-` or `-LRB-` are returned whole.
    #[must_use]
    pub fn base_label(&self, id: NodeId) -> &str {
        let label = self.label(id);
        if label.starts_with('-') {
            return label;
        }
        label
            .split(|c| c == '-' || c == '=')
            .next()
            .unwrap_or(label)
    }

    /// Children in left-to-right order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Parent, `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// True for word nodes.
    #[must_use]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].leaf_index.is_some()
    }

    /// True for POS nodes (a single leaf child).
    #[must_use]
    pub fn is_preterminal(&self, id: NodeId) -> bool {
        matches!(self.children(id), [only] if self.is_leaf(*only))
    }

    /// 1-based leaf number of a word node.
    #[must_use]
    pub fn leaf_index(&self, id: NodeId) -> Option<usize> {
        self.nodes[id.0].leaf_index
    }

    /// Leaf by 1-based number.
    #[must_use]
    pub fn leaf(&self, number: usize) -> Option<NodeId> {
        number
            .checked_sub(1)
            .and_then(|i| self.leaves.get(i))
            .copied()
    }

    /// All leaves, left to right.
    #[must_use]
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Number of leaves (words).
    #[must_use]
    pub fn num_leaves(&self) -> usize {
        self.leaves.len()
    }

    /// Words of the sentence in order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.leaves.iter().map(|&id| self.label(id))
    }

    /// Token span covered by a node: `[first_leaf - 1, last_leaf)`.
    #[must_use]
    pub fn leaf_span(&self, id: NodeId) -> Option<Span> {
        let node = &self.nodes[id.0];
        Span::new(node.first_leaf.checked_sub(1)?, node.last_leaf)
    }

    /// All nodes in pre-order (document order of opening brackets).
    pub fn preorder(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Siblings to the right of `id`, nearest first.
    #[must_use]
    pub fn right_siblings(&self, id: NodeId) -> &[NodeId] {
        match self.parent(id) {
            Some(p) => {
                let siblings = self.children(p);
                match siblings.iter().position(|&s| s == id) {
                    Some(pos) => &siblings[pos + 1..],
                    None => &[],
                }
            }
            None => &[],
        }
    }

    /// The preterminal above a leaf.
    #[must_use]
    pub fn preterminal_of_leaf(&self, number: usize) -> Option<NodeId> {
        self.leaf(number).and_then(|leaf| self.parent(leaf))
    }

    /// Word under a preterminal, `None` for other nodes.
    #[must_use]
    pub fn word_of(&self, preterminal: NodeId) -> Option<&str> {
        match self.children(preterminal) {
            [only] if self.is_leaf(*only) => Some(self.label(*only)),
            _ => None,
        }
    }

    /// Deepest node dominating both `a` and `b`.
    #[must_use]
    pub fn lowest_common_ancestor(&self, a: NodeId, b: NodeId) -> NodeId {
        let mut ancestors = Vec::new();
        let mut cur = Some(a);
        while let Some(id) = cur {
            ancestors.push(id);
            cur = self.parent(id);
        }
        let mut cur = Some(b);
        while let Some(id) = cur {
            if ancestors.contains(&id) {
                return id;
            }
            cur = self.parent(id);
        }
        self.root()
    }

    /// CoNLL-2012 parse bits, one per leaf: `(ROOT(S(NP*`, `*)`, ...
    ///
    /// Every labeled constituent above the preterminal level opens at its
    /// first leaf and closes at its last.
    #[must_use]
    pub fn parse_bits(&self) -> Vec<String> {
        let mut opens: Vec<String> = vec![String::new(); self.leaves.len()];
        let mut closes: Vec<usize> = vec![0; self.leaves.len()];

        for id in self.preorder() {
            let node = &self.nodes[id.0];
            if node.leaf_index.is_some() || self.is_preterminal(id) || node.label.is_empty() {
                continue;
            }
            if node.first_leaf == 0 {
                continue;
            }
            opens[node.first_leaf - 1].push('(');
            opens[node.first_leaf - 1].push_str(&node.label);
            closes[node.last_leaf - 1] += 1;
        }

        opens
            .into_iter()
            .zip(closes)
            .map(|(open, close)| format!("{open}*{}", ")".repeat(close)))
            .collect()
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        if self.is_leaf(id) {
            out.push_str(self.label(id));
            return;
        }
        out.push('(');
        out.push_str(self.label(id));
        for &child in self.children(id) {
            out.push(' ');
            self.write_node(child, out);
        }
        out.push(')');
    }
}

impl FromStr for ParseTree {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_node(self.root(), &mut out);
        f.write_str(&out)
    }
}

/// Split bracketed text into `(`, `)` and atoms.
fn lex(input: &str) -> impl Iterator<Item = &str> {
    let mut rest = input;
    std::iter::from_fn(move || {
        rest = rest.trim_start();
        let first = rest.chars().next()?;
        if first == '(' || first == ')' {
            let (tok, tail) = rest.split_at(1);
            rest = tail;
            return Some(tok);
        }
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
            .unwrap_or(rest.len());
        let (tok, tail) = rest.split_at(end);
        rest = tail;
        Some(tok)
    })
}
