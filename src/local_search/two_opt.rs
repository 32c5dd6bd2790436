//! Candidate-restricted 2-opt with don't-look bits.
//!
//! # Algorithm
//!
//! Nodes wait in a FIFO queue (a queued node has its don't-look bit
//! cleared). For a dequeued node `a` and each candidate `c`:
//!
//! - successor move: `b = next(a)`, `d = next(c)`, replace `(a,b),(c,d)`
//!   with `(a,c),(b,d)` by reversing the path `b..c`
//! - predecessor move: `b = prev(a)`, `d = prev(c)`, replace `(b,a),(d,c)`
//!   with `(a,c),(b,d)` by reversing the path `a..d`
//!
//! ```text
//! delta = (w(a,c) - w(a,b)) + (w(b,d) - w(c,d))
//! ```
//!
//! `w` is the augmented basis. A move is applied only when `delta` is below
//! `-1e-10` times the largest of the four weights (at least 1), so the
//! threshold stays meaningful at any weight scale. The four endpoints of an applied move are
//! re-queued. A round ends when the queue drains; the search stops after
//! a full round over every node applies no move.
//!
//! # Reference
//!
//! Bentley, J.L. (1992). "Fast algorithms for geometric traveling salesman
//! problems", *ORSA Journal on Computing* 4(4), 387-411.

use super::tour::TourState;
use crate::candidates::CandidateLists;
use crate::model::{tour_cost, DistanceMatrix};
use std::collections::VecDeque;

/// Relative improvement a move must achieve to be applied.
const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Move selection policy for a node scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovePolicy {
    /// Apply the first improving move found for the node.
    FirstImprovement,
    /// Scan every candidate of the node and apply the best move.
    #[default]
    BestImprovement,
}

/// Counters from one local search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalSearchStats {
    /// Full rounds over all nodes (including the final, move-free round).
    pub rounds: usize,
    /// Node scans performed.
    pub scans: usize,
    /// 2-opt moves applied.
    pub moves: usize,
}

/// Output of [`optimize`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSearchOutcome {
    /// The locally optimal tour.
    pub tour: Vec<usize>,
    /// Its cost on true distances.
    pub cost: f64,
    /// Search counters.
    pub stats: LocalSearchStats,
}

#[derive(Debug, Clone, Copy)]
struct Move {
    a: usize,
    b: usize,
    c: usize,
    d: usize,
    successor: bool,
    delta: f64,
}

impl Move {
    #[inline]
    fn pair(&self) -> (usize, usize) {
        (self.a.min(self.c), self.a.max(self.c))
    }

    /// Lower delta wins; exact ties go to the smaller node pair.
    #[inline]
    fn beats(&self, other: &Move) -> bool {
        self.delta < other.delta || (self.delta == other.delta && self.pair() < other.pair())
    }
}

/// Drives `tour` to a 2-opt local optimum under the `augmented` basis.
///
/// `distances` is only used to report the true cost of the result, which
/// is recomputed from scratch rather than accumulated from move deltas.
///
/// `augmented` must be symmetric with entries of magnitude at most
/// [`MAX_BASIS_WEIGHT`](crate::guidance::MAX_BASIS_WEIGHT). On such a
/// basis every applied move strictly lowers the augmented tour cost and
/// the search terminates.
///
/// # Panics
///
/// In debug builds, if `augmented` is not exactly symmetric.
///
/// # Examples
///
/// ```
/// use u_gls::candidates::CandidateLists;
/// use u_gls::local_search::{optimize, MovePolicy};
/// use u_gls::model::Instance;
///
/// let inst = Instance::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
/// let cand = CandidateLists::build(inst.distances(), 3);
/// let out = optimize(&[0, 2, 1, 3], inst.distances(), inst.distances(), &cand, MovePolicy::BestImprovement);
/// assert!((out.cost - 4.0).abs() < 1e-12);
/// ```
pub fn optimize(
    tour: &[usize],
    distances: &DistanceMatrix,
    augmented: &DistanceMatrix,
    candidates: &CandidateLists,
    policy: MovePolicy,
) -> LocalSearchOutcome {
    debug_assert!(augmented.is_symmetric(), "augmented basis must be symmetric");
    let n = tour.len();
    let mut stats = LocalSearchStats::default();
    if n < 4 {
        // Every tour on three or fewer nodes is the same cycle.
        return LocalSearchOutcome {
            tour: tour.to_vec(),
            cost: tour_cost(distances, tour),
            stats,
        };
    }

    let mut state = TourState::new(tour.to_vec());
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);
    let mut queued = vec![false; n];

    loop {
        stats.rounds += 1;
        let moves_before = stats.moves;
        for &v in state.order() {
            queue.push_back(v);
            queued[v] = true;
        }

        while let Some(a) = queue.pop_front() {
            queued[a] = false;
            stats.scans += 1;

            if let Some(mv) = scan_node(&state, augmented, candidates, a, policy) {
                apply(&mut state, &mv);
                stats.moves += 1;
                // Rescan `a` first, then the other endpoints.
                if !queued[a] {
                    queue.push_front(a);
                    queued[a] = true;
                }
                for v in [mv.b, mv.c, mv.d] {
                    if !queued[v] {
                        queue.push_back(v);
                        queued[v] = true;
                    }
                }
            }
        }

        if stats.moves == moves_before {
            break;
        }
    }

    let tour = state.into_order();
    let cost = tour_cost(distances, &tour);
    tracing::trace!(
        rounds = stats.rounds,
        scans = stats.scans,
        moves = stats.moves,
        cost,
        "2-opt converged"
    );
    LocalSearchOutcome { tour, cost, stats }
}

/// Finds an improving move anchored at `a`, per `policy`.
fn scan_node(
    state: &TourState,
    w: &DistanceMatrix,
    candidates: &CandidateLists,
    a: usize,
    policy: MovePolicy,
) -> Option<Move> {
    let mut best: Option<Move> = None;

    for successor in [true, false] {
        let b = if successor { state.next(a) } else { state.prev(a) };
        let w_ab = w.get(a, b);

        for &c in candidates.neighbors(a) {
            let d = if successor { state.next(c) } else { state.prev(c) };
            if c == b || d == a {
                continue;
            }
            let (w_ac, w_bd, w_cd) = (w.get(a, c), w.get(b, d), w.get(c, d));
            let delta = (w_ac - w_ab) + (w_bd - w_cd);
            let scale = w_ab
                .abs()
                .max(w_ac.abs())
                .max(w_bd.abs())
                .max(w_cd.abs())
                .max(1.0);
            if delta >= -IMPROVEMENT_EPSILON * scale {
                continue;
            }
            let mv = Move {
                a,
                b,
                c,
                d,
                successor,
                delta,
            };
            if policy == MovePolicy::FirstImprovement {
                return Some(mv);
            }
            if best.as_ref().is_none_or(|cur| mv.beats(cur)) {
                best = Some(mv);
            }
        }
    }

    best
}

fn apply(state: &mut TourState, mv: &Move) {
    if mv.successor {
        // a b ... c d  ->  a c ... b d
        state.reverse_path(mv.b, mv.c);
    } else {
        // d c ... b a  ->  reverse a..d in forward order: b a ... d c -> b d ... a c
        state.reverse_path(mv.a, mv.d);
    }
}
