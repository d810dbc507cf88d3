//! Dependency graphs.

use serde::{Deserialize, Serialize};

/// One typed edge `governor --relation--> dependent`.
///
/// Both ends are 1-based token indices; governor `0` is the artificial ROOT.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    /// Governing token (0 = ROOT).
    pub governor: usize,
    /// Dependent token.
    pub dependent: usize,
    /// Relation label (`nsubj`, `nmod:poss`, ...).
    pub relation: String,
}

impl Dependency {
    /// Create an edge.
    #[must_use]
    pub fn new(governor: usize, dependent: usize, relation: impl Into<String>) -> Self {
        Self {
            governor,
            dependent,
            relation: relation.into(),
        }
    }
}

/// A sentence's dependency parse (basic or enhanced).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    edges: Vec<Dependency>,
}

impl DependencyGraph {
    /// Build a graph from its edges.
    #[must_use]
    pub fn new(edges: Vec<Dependency>) -> Self {
        Self { edges }
    }

    /// All edges in input order.
    #[must_use]
    pub fn edges(&self) -> &[Dependency] {
        &self.edges
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True when the graph has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Governors of a token. Basic graphs have exactly one; enhanced graphs may have several.
    pub fn governors_of(&self, dependent: usize) -> impl Iterator<Item = &Dependency> {
        self.edges.iter().filter(move |d| d.dependent == dependent)
    }

    /// First governor of a token, if the token is attached at all.
    #[must_use]
    pub fn governor_of(&self, dependent: usize) -> Option<usize> {
        self.governors_of(dependent).next().map(|d| d.governor)
    }

    /// Dependents of a token.
    pub fn dependents_of(&self, governor: usize) -> impl Iterator<Item = &Dependency> {
        self.edges.iter().filter(move |d| d.governor == governor)
    }

    /// Tokens attached directly to ROOT.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.dependents_of(0).map(|d| d.dependent)
    }
}

impl FromIterator<Dependency> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = Dependency>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
