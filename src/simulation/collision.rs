//! Collision response for the rigid-body sandbox
//!
//! Two resolvers run every tick after integration:
//! - boundary: per-axis position clamp and velocity mirror against the
//!   static world rectangle (restitution 1)
//! - pairwise: discrete circle-circle overlap test followed by the engine's
//!   [`CollisionHandler`], by default an elastic impulse exchange along the
//!   collision normal
//!
//! Neither resolver does continuous detection, so fast bodies can tunnel.
//! With the elastic handler overlapping circles are not pushed apart; only
//! velocities change

use super::boundary::WorldBoundary;
use super::engine::{BroadPhase, CollisionHandler, Engine, PairEvaluation};
use super::quadtree::QuadTree;
use super::states::{Body, Shape};
use super::vector::{Vector2, VectorExt};

/// Clamp `body` back inside `boundary` and mirror the velocity component of
/// every axis it crossed. The x and y checks are independent, so a corner
/// contact fixes both axes in the same call
pub fn resolve_boundary(body: &mut Body, boundary: &WorldBoundary) {
    let half = body.shape.half_extents();
    let pos = &mut body.position;
    let vel = &mut body.velocity;

    // top / bottom
    if pos.y + half.y > boundary.top() {
        vel.y = -vel.y;
        pos.y = boundary.top() - half.y;
    } else if pos.y - half.y < boundary.bottom() {
        vel.y = -vel.y;
        pos.y = boundary.bottom() + half.y;
    }

    // left / right
    if pos.x - half.x < boundary.left() {
        vel.x = -vel.x;
        pos.x = boundary.left() + half.x;
    } else if pos.x + half.x > boundary.right() {
        vel.x = -vel.x;
        pos.x = boundary.right() - half.x;
    }
}

/// Elastic exchange between two overlapping circles
/// Returns `true` when an impulse was applied. Pairs involving a box, pairs
/// that only touch (`dist == r_a + r_b`) and a body paired with itself are
/// left untouched
pub fn resolve_pair(a: &mut Body, b: &mut Body) -> bool {
    if a.id == b.id {
        return false;
    }

    let (ra, rb) = match (a.shape, b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => (ra, rb),
        _ => return false,
    };

    let sqr_dist = a.position.distance_squared(&b.position);
    let radii = ra + rb;
    if sqr_dist >= radii * radii {
        return false;
    }

    // b's velocity seen from a
    let rel = b.velocity - a.velocity;

    // unit vector from a towards b, zero when the centers coincide
    let n: Vector2 = (b.position - a.position).normalized_or_zero();

    let vn = rel.dot(&n);

    // j = 2 vn / (1/m_a + 1/m_b); equals vn for unit masses
    let inv_a = 1.0 / a.mass;
    let inv_b = 1.0 / b.mass;
    let j = 2.0 * vn / (inv_a + inv_b);

    a.velocity += n * (j * inv_a);
    b.velocity -= n * (j * inv_b);

    true
}

/// Move two overlapping circles apart along the normal, half the overlap
/// each, leaving velocities alone. Returns `true` when the pair overlapped.
/// Same skips as [`resolve_pair`]; coincident centers have no normal and
/// are not moved
pub fn separate_pair(a: &mut Body, b: &mut Body) -> bool {
    if a.id == b.id {
        return false;
    }

    let (ra, rb) = match (a.shape, b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => (ra, rb),
        _ => return false,
    };

    let offset = b.position - a.position;
    let sqr_dist = offset.sqr_magnitude();
    let radii = ra + rb;
    if sqr_dist >= radii * radii {
        return false;
    }

    let n = offset.normalized_or_zero();
    let half = n * (0.5 * (radii - sqr_dist.sqrt()));
    a.position -= half;
    b.position += half;

    true
}

/// Apply `handler` to one pair
pub fn handle_pair(handler: CollisionHandler, a: &mut Body, b: &mut Body) -> bool {
    match handler {
        CollisionHandler::Elastic => resolve_pair(a, b),
        CollisionHandler::MinimizeOverlap => separate_pair(a, b),
    }
}

// Panics if `i == j`; callers skip self-pairs first
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    assert_ne!(i, j, "pair_mut needs two distinct indices");
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

/// Run the pairwise phase over all bodies and return how many pairs the
/// handler acted on. Self-pairs are skipped by identity.
///
/// Both broad phases visit contacts in the same order (ascending `i`, then
/// `j`), so with the elastic handler they give identical results. The
/// quadtree is built once per call; pairs pushed into contact by
/// `MinimizeOverlap` during the walk are picked up next tick
pub fn resolve_pairs(bodies: &mut [Body], engine: &Engine, boundary: &WorldBoundary) -> usize {
    match engine.broad_phase {
        BroadPhase::AllPairs => walk_all_pairs(bodies, engine.pair_evaluation, engine.collision_handler),
        BroadPhase::QuadTree => {
            let candidates = QuadTree::build(boundary, bodies).candidate_pairs();
            walk_candidates(bodies, &candidates, engine.pair_evaluation, engine.collision_handler)
        }
    }
}

fn walk_all_pairs(bodies: &mut [Body], mode: PairEvaluation, handler: CollisionHandler) -> usize {
    let n = bodies.len();
    let mut contacts = 0;

    for i in 0..n {
        let start = match mode {
            PairEvaluation::Unordered => i + 1,
            PairEvaluation::Ordered => 0,
        };
        for j in start..n {
            if bodies[i].id == bodies[j].id {
                continue;
            }
            let (a, b) = pair_mut(bodies, i, j);
            if handle_pair(handler, a, b) {
                contacts += 1;
            }
        }
    }

    contacts
}

// `candidates` are sorted `(i, j)` with `i < j`
fn walk_candidates(
    bodies: &mut [Body],
    candidates: &[(usize, usize)],
    mode: PairEvaluation,
    handler: CollisionHandler,
) -> usize {
    let ordered: Vec<(usize, usize)> = match mode {
        PairEvaluation::Unordered => candidates.to_vec(),
        PairEvaluation::Ordered => {
            let mut both: Vec<_> = candidates.iter().flat_map(|&(i, j)| [(i, j), (j, i)]).collect();
            both.sort_unstable();
            both
        }
    };

    let mut contacts = 0;
    for (i, j) in ordered {
        if bodies[i].id == bodies[j].id {
            continue;
        }
        let (a, b) = pair_mut(bodies, i, j);
        if handle_pair(handler, a, b) {
            contacts += 1;
        }
    }

    contacts
}
