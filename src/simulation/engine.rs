//! High-level runtime engine settings
//!
//! Selects structural options of a tick that are not physical constants:
//! - how body pairs are enumerated for collision resolution
//! - which handler responds to an overlapping pair
//! - whether candidate pairs come from a full walk or a quadtree

use serde::Deserialize;

/// How the pairwise collision phase walks the body list
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairEvaluation {
    /// Every unordered pair once (`i < j`), the textbook elastic exchange
    #[default]
    #[serde(rename = "unordered")]
    Unordered,

    /// Every ordered pair `(i, j)` with `i != j`, so each unordered pair is
    /// resolved twice per tick. Kept for compatibility with older runs
    #[serde(rename = "ordered")]
    Ordered,
}

/// Response applied to a pair of overlapping circles
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionHandler {
    /// Exchange momentum along the normal; positions are left overlapping
    #[default]
    #[serde(rename = "elastic")]
    Elastic,

    /// Push both circles apart by half the overlap each; velocities untouched
    #[serde(rename = "minimize_overlap")]
    MinimizeOverlap,
}

/// Source of candidate pairs for the pairwise phase
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BroadPhase {
    /// Test every pair, O(n²)
    #[default]
    #[serde(rename = "all_pairs")]
    AllPairs,

    /// Rebuild a quadtree over the boundary each tick and only test bodies
    /// whose bounding squares can touch
    #[serde(rename = "quad_tree")]
    QuadTree,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    pub pair_evaluation: PairEvaluation,
    pub collision_handler: CollisionHandler,
    pub broad_phase: BroadPhase,
}
