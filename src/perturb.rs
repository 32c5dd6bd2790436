//! Double-bridge perturbation.
//!
//! Three cut points split the tour into `A B C D`; reconnecting them as
//! `A C B D` is a 4-opt move that no single 2-opt move can undo, so the
//! next local search starts outside the current basin.
//!
//! # Reference
//!
//! Martin, O., Otto, S.W. & Felten, E.W. (1991). "Large-step Markov chains
//! for the traveling salesman problem", *Complex Systems* 5(3), 299-326.

use rand::Rng;

/// Applies one double-bridge move in place.
///
/// Cut points `0 < p1 < p2 < p3 < n` are drawn uniformly among valid
/// triples so every segment is non-empty; on five or more nodes, triples
/// where `B` and `C` are both single nodes are redrawn. Tours with fewer
/// than four nodes are left unchanged.
///
/// # Complexity
/// O(n)
pub fn double_bridge<R: Rng>(tour: &mut [usize], rng: &mut R) {
    let n = tour.len();
    if n < 4 {
        return;
    }
    let (p1, p2, p3) = loop {
        let mut cuts = rand::seq::index::sample(rng, n - 1, 3).into_vec();
        cuts.sort_unstable();
        let (p1, p2, p3) = (cuts[0] + 1, cuts[1] + 1, cuts[2] + 1);
        // Swapping two single-node segments is a plain 2-opt move.
        if n == 4 || p3 - p1 > 2 {
            break (p1, p2, p3);
        }
    };
    // B C -> C B
    tour[p1..p3].rotate_left(p2 - p1);
}

/// Applies `num_moves` independent double-bridge moves in place.
///
/// # Examples
///
/// ```
/// use u_gls::perturb::perturb;
/// use u_gls::random::create_rng;
///
/// let mut tour: Vec<usize> = (0..10).collect();
/// perturb(&mut tour, 0, &mut create_rng(1));
/// assert_eq!(tour, (0..10).collect::<Vec<_>>());
/// ```
pub fn perturb<R: Rng>(tour: &mut [usize], num_moves: usize, rng: &mut R) {
    for _ in 0..num_moves {
        double_bridge(tour, rng);
    }
}
