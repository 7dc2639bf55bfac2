//! Parent-link tree keyed by identifier.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Display;
use std::hash::Hash;

use super::error::HierarchyError;

/// Nodes and their optional parent, as read from the store.
///
/// The tree tolerates links that already form loops (the data may have been
/// written by something that never checked); every walk stops at the first
/// repeated node.
#[derive(Debug, Clone)]
pub struct ParentTree<K> {
    parents: HashMap<K, Option<K>>,
}

impl<K> Default for ParentTree<K> {
    fn default() -> Self {
        Self {
            parents: HashMap::new(),
        }
    }
}

impl<K> ParentTree<K>
where
    K: Copy + Eq + Hash + Display,
{
    /// Builds the tree from `(node, parent)` pairs.
    pub fn from_links(links: impl IntoIterator<Item = (K, Option<K>)>) -> Self {
        Self {
            parents: links.into_iter().collect(),
        }
    }

    /// Number of known nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns the parent of `node`, if it has one.
    #[must_use]
    pub fn parent_of(&self, node: K) -> Option<K> {
        self.parents.get(&node).copied().flatten()
    }

    /// Sets or clears the parent of `node` after checking for cycles.
    pub fn link(&mut self, node: K, parent: Option<K>) -> Result<(), HierarchyError> {
        self.ensure_acyclic(node, parent)?;
        self.parents.insert(node, parent);
        Ok(())
    }

    /// Ancestors of `node`, nearest first.
    #[must_use]
    pub fn ancestors(&self, node: K) -> Vec<K> {
        let mut seen = HashSet::from([node]);
        let mut found = Vec::new();
        let mut current = self.parent_of(node);
        while let Some(parent) = current {
            if !seen.insert(parent) {
                break;
            }
            found.push(parent);
            current = self.parent_of(parent);
        }
        found
    }

    /// Every node below `node`, breadth first.
    #[must_use]
    pub fn descendants(&self, node: K) -> Vec<K> {
        let mut children: HashMap<K, Vec<K>> = HashMap::new();
        for (&child, parent) in &self.parents {
            if let Some(parent) = parent {
                children.entry(*parent).or_default().push(child);
            }
        }

        let mut seen = HashSet::from([node]);
        let mut found = Vec::new();
        let mut frontier = VecDeque::from([node]);
        while let Some(current) = frontier.pop_front() {
            for &child in children.get(&current).into_iter().flatten() {
                if seen.insert(child) {
                    found.push(child);
                    frontier.push_back(child);
                }
            }
        }
        found
    }

    /// Checks that giving `node` the parent `parent` keeps the tree acyclic.
    ///
    /// # Errors
    ///
    /// Returns `HierarchyError::SelfParent` when `parent == node` and
    /// `HierarchyError::Cycle` when `parent` already sits below `node`.
    pub fn ensure_acyclic(&self, node: K, parent: Option<K>) -> Result<(), HierarchyError> {
        let Some(parent) = parent else {
            return Ok(());
        };
        if parent == node {
            return Err(HierarchyError::SelfParent {
                node: node.to_string(),
            });
        }
        if self.ancestors(parent).contains(&node) {
            return Err(HierarchyError::Cycle {
                node: node.to_string(),
                parent: parent.to_string(),
            });
        }
        Ok(())
    }
}
