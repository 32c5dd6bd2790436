//! Tour cost evaluation on true distances.

use super::matrix::DistanceMatrix;

/// Total length of the closed tour: consecutive edges plus last → first.
///
/// Tours with fewer than two nodes have cost `0.0`.
///
/// # Examples
///
/// ```
/// use u_gls::model::{tour_cost, Instance};
///
/// let inst = Instance::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
/// assert!((tour_cost(inst.distances(), &[0, 1, 2, 3]) - 4.0).abs() < 1e-12);
/// ```
pub fn tour_cost(distances: &DistanceMatrix, tour: &[usize]) -> f64 {
    if tour.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0f64;
    for w in tour.windows(2) {
        total += distances.get(w[0], w[1]);
    }
    total + distances.get(tour[tour.len() - 1], tour[0])
}

/// Mean edge length of the closed tour (`0.0` for tours shorter than 2).
pub fn average_edge_length(distances: &DistanceMatrix, tour: &[usize]) -> f64 {
    if tour.len() < 2 {
        return 0.0;
    }
    tour_cost(distances, tour) / tour.len() as f64
}

/// Returns `true` if `tour` visits each of `0..n` exactly once.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &v in tour {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}
