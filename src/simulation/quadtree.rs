//! # Quadtree broad phase
//!
//! Cuts the pairwise phase down from testing every pair to testing bodies
//! whose bounding squares can touch. The tree is rebuilt from scratch every
//! tick over the world boundary, so it never has to track moving bodies.
//!
//! ## Layout
//!
//! - Nodes live in one `Vec` and refer to their children by index, the root
//!   is node 0.
//! - A node covers an axis-aligned rectangle; subdividing splits it into
//!   four equal quadrants.
//! - A body is stored in the deepest node whose rectangle fully contains
//!   its bounding square. Bodies straddling a quadrant edge stay in the
//!   parent, and bodies poking outside the boundary stay in the root.
//! - A leaf holding more than [`NODE_CAPACITY`] bodies subdivides, down to
//!   [`MAX_DEPTH`] levels.
//!
//! Two bodies whose squares overlap are always in the same node or in an
//! ancestor/descendant pair of nodes, which is what [`QuadTree::candidate_pairs`]
//! walks. Only circles are inserted, since pairs involving a box are never
//! resolved.

use super::boundary::WorldBoundary;
use super::states::Body;
use super::vector::Vector2;

/// Bodies a leaf holds before it subdivides
pub const NODE_CAPACITY: usize = 4;

/// Deepest level a node can be created at, the root is level 0
pub const MAX_DEPTH: usize = 8;

const ROOT: usize = 0;

/// Closed axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
struct Aabb {
    min: Vector2,
    max: Vector2,
}

impl Aabb {
    fn around(center: Vector2, half: f64) -> Self {
        let h = Vector2::new(half, half);
        Self {
            min: center - h,
            max: center + h,
        }
    }

    fn contains(&self, other: &Aabb) -> bool {
        other.min.x >= self.min.x && other.max.x <= self.max.x && other.min.y >= self.min.y && other.max.y <= self.max.y
    }

    fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && other.min.x <= self.max.x && self.min.y <= other.max.y && other.min.y <= self.max.y
    }

    /// Top-left, top-right, bottom-left, bottom-right
    fn quadrants(&self) -> [Aabb; 4] {
        let mid = (self.min + self.max) * 0.5;
        [
            Aabb { min: Vector2::new(self.min.x, mid.y), max: Vector2::new(mid.x, self.max.y) },
            Aabb { min: mid, max: self.max },
            Aabb { min: self.min, max: mid },
            Aabb { min: Vector2::new(mid.x, self.min.y), max: Vector2::new(self.max.x, mid.y) },
        ]
    }
}

#[derive(Debug)]
struct QuadNode {
    bounds: Aabb,
    depth: usize,
    entries: Vec<usize>,          // indices into QuadTree::entries
    children: Option<[usize; 4]>, // indices into QuadTree::nodes
}

impl QuadNode {
    fn new(bounds: Aabb, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            entries: Vec::new(),
            children: None,
        }
    }
}

/// Quadtree over the circles of one tick
#[derive(Debug)]
pub struct QuadTree {
    nodes: Vec<QuadNode>,
    entries: Vec<(usize, Aabb)>, // (body index, bounding square)
}

impl QuadTree {
    /// Insert every circle of `bodies`, keyed by its index in the slice
    pub fn build(boundary: &WorldBoundary, bodies: &[Body]) -> Self {
        let root = Aabb {
            min: Vector2::new(boundary.left(), boundary.bottom()),
            max: Vector2::new(boundary.right(), boundary.top()),
        };

        let mut tree = QuadTree {
            nodes: vec![QuadNode::new(root, 0)],
            entries: Vec::with_capacity(bodies.len()),
        };

        for (i, body) in bodies.iter().enumerate() {
            if let Some(radius) = body.radius() {
                tree.entries.push((i, Aabb::around(body.position, radius)));
                let entry = tree.entries.len() - 1;
                tree.insert(ROOT, entry);
            }
        }

        tree
    }

    fn insert(&mut self, node: usize, entry: usize) {
        if let Some(children) = self.nodes[node].children {
            match self.child_containing(children, entry) {
                Some(child) => self.insert(child, entry),
                None => self.nodes[node].entries.push(entry),
            }
            return;
        }

        self.nodes[node].entries.push(entry);
        if self.nodes[node].entries.len() > NODE_CAPACITY && self.nodes[node].depth < MAX_DEPTH {
            self.subdivide(node);
        }
    }

    fn child_containing(&self, children: [usize; 4], entry: usize) -> Option<usize> {
        let extent = &self.entries[entry].1;
        children.into_iter().find(|&c| self.nodes[c].bounds.contains(extent))
    }

    /// Split a leaf into four and push its entries down where they fit
    fn subdivide(&mut self, node: usize) {
        let depth = self.nodes[node].depth + 1;
        let quads = self.nodes[node].bounds.quadrants();
        let first = self.nodes.len();
        for q in quads {
            self.nodes.push(QuadNode::new(q, depth));
        }
        self.nodes[node].children = Some([first, first + 1, first + 2, first + 3]);

        let entries = std::mem::take(&mut self.nodes[node].entries);
        for e in entries {
            self.insert(node, e);
        }
    }

    /// Body index pairs `(i, j)`, `i < j`, whose bounding squares overlap,
    /// sorted ascending. Every overlapping circle pair is included
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        let mut ancestors = Vec::new();
        self.collect_pairs(ROOT, &mut ancestors, &mut pairs);

        for p in pairs.iter_mut() {
            if p.0 > p.1 {
                *p = (p.1, p.0);
            }
        }
        pairs.sort_unstable();
        pairs
    }

    // `ancestors` holds the entries of every node on the path from the root
    fn collect_pairs(&self, node: usize, ancestors: &mut Vec<usize>, out: &mut Vec<(usize, usize)>) {
        let here = &self.nodes[node].entries;

        for (k, &e) in here.iter().enumerate() {
            let (body, extent) = self.entries[e];
            for &other in ancestors.iter().chain(&here[k + 1..]) {
                let (other_body, other_extent) = self.entries[other];
                if extent.overlaps(&other_extent) {
                    out.push((body, other_body));
                }
            }
        }

        if let Some(children) = self.nodes[node].children {
            let mark = ancestors.len();
            ancestors.extend_from_slice(here);
            for c in children {
                self.collect_pairs(c, ancestors, out);
            }
            ancestors.truncate(mark);
        }
    }

    /// Number of bodies inserted
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest level in use, 0 when the root never split
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }
}
