//! Initial tour construction.
//!
//! # Algorithm (double-ended nearest neighbor)
//!
//! 1. Start a path at `start`; both open ends are `start`
//! 2. For every unvisited node, compute its distance to the front end and
//!    to the back end
//! 3. Attach the node/end pair with the smallest distance
//! 4. Repeat until every node is on the path; the path closes into a tour
//!
//! Ties go to the lower node index, then to the back end.
//!
//! # Complexity
//! O(n²) time, O(n) space.

use crate::error::{GlsError, Result};
use crate::model::DistanceMatrix;
use std::collections::VecDeque;

/// Builds an initial tour by growing a path from both ends.
///
/// Instances with zero or one node return the trivial tour.
///
/// # Errors
/// [`GlsError::InvalidStartNode`] if `start` is out of range on a non-empty
/// instance.
///
/// # Examples
///
/// ```
/// use u_gls::construct::nearest_neighbor_two_end;
/// use u_gls::model::{is_permutation, Instance};
///
/// let inst = Instance::from_coords(vec![(0.0, 0.0), (2.0, 0.0), (1.0, 0.0), (3.0, 0.0)]).unwrap();
/// let tour = nearest_neighbor_two_end(inst.distances(), 0).unwrap();
/// assert!(is_permutation(&tour, 4));
/// ```
pub fn nearest_neighbor_two_end(distances: &DistanceMatrix, start: usize) -> Result<Vec<usize>> {
    let n = distances.dim();
    if n == 0 {
        return Ok(Vec::new());
    }
    if start >= n {
        return Err(GlsError::InvalidStartNode { start, n });
    }
    if n == 1 {
        return Ok(vec![start]);
    }

    let mut path: VecDeque<usize> = VecDeque::with_capacity(n);
    path.push_back(start);
    let mut visited = vec![false; n];
    visited[start] = true;

    while path.len() < n {
        let front = path[0];
        let back = path[path.len() - 1];

        let mut best: Option<(usize, bool)> = None;
        let mut best_cost = f64::INFINITY;
        for u in (0..n).filter(|&u| !visited[u]) {
            let to_back = distances.get(back, u);
            if to_back < best_cost {
                best_cost = to_back;
                best = Some((u, false));
            }
            let to_front = distances.get(front, u);
            if to_front < best_cost {
                best_cost = to_front;
                best = Some((u, true));
            }
        }

        // Every remaining distance is NaN/inf only if the matrix is broken;
        // fall back to the lowest unvisited node so the tour stays complete.
        let (node, at_front) = match best {
            Some(b) => b,
            None => match (0..n).find(|&u| !visited[u]) {
                Some(u) => (u, false),
                None => break,
            },
        };

        visited[node] = true;
        if at_front {
            path.push_front(node);
        } else {
            path.push_back(node);
        }
    }

    Ok(path.into_iter().collect())
}
