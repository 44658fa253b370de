//! Catalog index: an unbalanced binary search tree of movies keyed by title.
//!
//! Nodes live in an arena and refer to their children by index. Titles are
//! compared with plain (case-sensitive) string ordering. There is no deletion
//! and no rebalancing, so inserting titles in sorted order degrades lookups to
//! a linear walk.

use crate::types::Movie;
use std::cmp::Ordering;

/// Index of a node in the arena
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Clone, Debug)]
struct Node {
    movie: Movie,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Ordered title → movie index.
///
/// Invariant: no two nodes share a title. Inserting a title that is already
/// present leaves the tree untouched.
#[derive(Clone, Debug, Default)]
pub struct CatalogIndex {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl CatalogIndex {
    /// Creates an empty index
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Insert a movie.
    ///
    /// Returns `false` (and drops `movie`) when the title is already indexed.
    pub fn insert(&mut self, movie: Movie) -> bool {
        let Some(mut current) = self.root else {
            self.root = Some(self.alloc(movie));
            return true;
        };

        loop {
            let node = &self.nodes[current.0];
            let ordering = movie.title.as_str().cmp(node.movie.title.as_str());
            let child = match ordering {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return false,
            };

            if let Some(next) = child {
                current = next;
                continue;
            }

            let id = self.alloc(movie);
            let parent = &mut self.nodes[current.0];
            if ordering == Ordering::Less {
                parent.left = Some(id);
            } else {
                parent.right = Some(id);
            }
            return true;
        }
    }

    /// Exact-title lookup
    #[must_use]
    pub fn search(&self, title: &str) -> Option<&Movie> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.nodes[id.0];
            cursor = match title.cmp(node.movie.title.as_str()) {
                Ordering::Equal => return Some(&node.movie),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Returns true if `title` is indexed
    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.search(title).is_some()
    }

    /// Number of indexed movies
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing is indexed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Height of the tree (0 when empty, 1 for a lone root)
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, level)) = stack.pop() {
            deepest = deepest.max(level);
            let node = &self.nodes[id.0];
            stack.extend(node.left.map(|child| (child, level + 1)));
            stack.extend(node.right.map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Movies in title order (in-order traversal)
    #[must_use]
    pub fn in_order(&self) -> Vec<&Movie> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut cursor = self.root;

        while cursor.is_some() || !stack.is_empty() {
            while let Some(id) = cursor {
                stack.push(id);
                cursor = self.nodes[id.0].left;
            }
            if let Some(id) = stack.pop() {
                let node = &self.nodes[id.0];
                out.push(&node.movie);
                cursor = node.right;
            }
        }
        out
    }

    /// Titles in sorted order
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.in_order()
            .into_iter()
            .map(|movie| movie.title.as_str())
            .collect()
    }

    fn alloc(&mut self, movie: Movie) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            movie,
            left: None,
            right: None,
        });
        id
    }
}
