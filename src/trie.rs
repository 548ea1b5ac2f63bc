// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Prefix tree over a vocabulary, stored as an arena.
//!
//! Nodes live in one `Vec` and refer to their children by index. There are no
//! parent pointers, so the structure is a forest of downward edges with no
//! cycles, and serializing it needs no pointer chasing beyond a walk from the
//! root.
//!
//! Two tries are built per collection whenever its corpus is rebuilt: one
//! over word tokens (query expansion, word completion) and one over whole tag
//! names (tag autocomplete).
//!
//! # Invariants
//!
//! - Node 0 is the root and always exists.
//! - `subtree_size` of a node equals the number of terminal nodes in its
//!   subtree, itself included. The root's value is the vocabulary size.
//! - Every child index is `< nodes.len()` and greater than its parent's index
//!   (children are allocated after their parent).
//!
//! # Serialized form
//!
//! ```json
//! { "root": { "next": { "c": { "next": { "a": { "next": { "t": { "end": true } } } } } } },
//!   "nodeCount": 4 }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Handle of a node in the arena.
pub type NodeId = u32;

/// One node of the arena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieNode {
    /// Next symbol → child handle. Ordered so walks are lexicographic.
    pub children: BTreeMap<char, NodeId>,
    /// A vocabulary entry ends here.
    pub terminal: bool,
    /// Terminal nodes in this subtree, including this one.
    pub subtree_size: u32,
}

/// Arena-backed prefix tree.
///
/// Equality is logical: two tries are equal when they hold the same entries
/// and the same number of nodes, whatever order the arena allocated them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TrieRepr", into = "TrieRepr")]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl PartialEq for Trie {
    fn eq(&self, other: &Self) -> bool {
        self.node_count() == other.node_count() && self.search("", None) == other.search("", None)
    }
}

impl Eq for Trie {}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Handle of the root node.
    pub const ROOT: NodeId = 0;

    /// An empty trie (root only).
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Build a trie over `vocabulary`. Duplicates and empty entries are ignored.
    pub fn build<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for word in vocabulary {
            trie.insert(word.as_ref());
        }
        trie
    }

    /// Insert `word`. Returns `false` when it was empty or already present.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() || self.contains(word) {
            return false;
        }

        let mut current = Self::ROOT;
        self.nodes[current as usize].subtree_size += 1;

        for symbol in word.chars() {
            let next = match self.nodes[current as usize].children.get(&symbol) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len() as NodeId;
                    self.nodes.push(TrieNode::default());
                    self.nodes[current as usize].children.insert(symbol, child);
                    child
                }
            };
            self.nodes[next as usize].subtree_size += 1;
            current = next;
        }

        self.nodes[current as usize].terminal = true;
        true
    }

    /// Is `word` a complete vocabulary entry?
    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty()
            && self
                .find(word)
                .is_some_and(|node| self.nodes[node as usize].terminal)
    }

    /// Number of vocabulary entries.
    pub fn len(&self) -> usize {
        self.nodes[Self::ROOT as usize].subtree_size as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of arena nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Borrow a node by handle.
    pub fn node(&self, handle: NodeId) -> Option<&TrieNode> {
        self.nodes.get(handle as usize)
    }

    /// Handle of the node reached by walking `prefix` from the root.
    pub fn find(&self, prefix: &str) -> Option<NodeId> {
        prefix.chars().try_fold(Self::ROOT, |node, symbol| {
            self.nodes[node as usize].children.get(&symbol).copied()
        })
    }

    /// Vocabulary entries starting with `prefix`, in lexicographic order.
    ///
    /// The entry equal to `prefix` is included when present. `limit` caps the
    /// number of results; `None` returns all of them.
    pub fn search(&self, prefix: &str, limit: Option<usize>) -> Vec<String> {
        let Some(start) = self.find(prefix) else {
            return Vec::new();
        };

        let available = self.nodes[start as usize].subtree_size as usize;
        let wanted = limit.map_or(available, |l| l.min(available));
        let mut out = Vec::with_capacity(wanted);
        if wanted == 0 {
            return out;
        }

        let mut stack: Vec<(NodeId, String)> = vec![(start, prefix.to_string())];
        while let Some((handle, word)) = stack.pop() {
            let node = &self.nodes[handle as usize];
            if node.terminal {
                out.push(word.clone());
                if out.len() == wanted {
                    break;
                }
            }
            // Reverse so the smallest symbol is popped first
            for (&symbol, &child) in node.children.iter().rev() {
                let mut next = word.clone();
                next.push(symbol);
                stack.push((child, next));
            }
        }

        out
    }

    /// Vocabulary entries that `term` is a proper prefix of.
    pub fn expansions(&self, term: &str, limit: Option<usize>) -> Vec<String> {
        if term.is_empty() {
            return Vec::new();
        }
        // One extra slot for the term itself, which is filtered out
        let fetch = limit.map(|l| l.saturating_add(1));
        let mut found: Vec<String> = self
            .search(term, fetch)
            .into_iter()
            .filter(|word| word != term)
            .collect();
        if let Some(l) = limit {
            found.truncate(l);
        }
        found
    }
}

// =============================================================================
// SERIALIZATION
// =============================================================================

/// Nested-map form of a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct NestedNode {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    end: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    next: BTreeMap<String, NestedNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrieRepr {
    root: NestedNode,
    node_count: usize,
}

impl From<Trie> for TrieRepr {
    fn from(trie: Trie) -> Self {
        fn nest(trie: &Trie, handle: NodeId) -> NestedNode {
            let node = &trie.nodes[handle as usize];
            NestedNode {
                end: node.terminal,
                next: node
                    .children
                    .iter()
                    .map(|(symbol, &child)| (symbol.to_string(), nest(trie, child)))
                    .collect(),
            }
        }

        TrieRepr {
            root: nest(&trie, Trie::ROOT),
            node_count: trie.nodes.len(),
        }
    }
}

impl TryFrom<TrieRepr> for Trie {
    type Error = String;

    fn try_from(repr: TrieRepr) -> Result<Self, Self::Error> {
        fn flatten(
            nested: NestedNode,
            handle: NodeId,
            nodes: &mut Vec<TrieNode>,
        ) -> Result<u32, String> {
            let mut size = u32::from(nested.end);
            for (key, child) in nested.next {
                let mut symbols = key.chars();
                let (Some(symbol), None) = (symbols.next(), symbols.next()) else {
                    return Err(format!("trie edge label {:?} is not one symbol", key));
                };
                let child_handle = nodes.len() as NodeId;
                nodes.push(TrieNode::default());
                nodes[handle as usize].children.insert(symbol, child_handle);
                size += flatten(child, child_handle, nodes)?;
            }
            let node = &mut nodes[handle as usize];
            node.terminal = nested.end;
            node.subtree_size = size;
            Ok(size)
        }

        let mut nodes = vec![TrieNode::default()];
        flatten(repr.root, Trie::ROOT, &mut nodes)?;

        if nodes.len() != repr.node_count {
            return Err(format!(
                "trie node count mismatch: header says {}, found {}",
                repr.node_count,
                nodes.len()
            ));
        }
        if nodes[Trie::ROOT as usize].terminal {
            return Err("trie root cannot be terminal".to_string());
        }

        Ok(Trie { nodes })
    }
}
