//! Per-node k-nearest-neighbor candidate lists.
//!
//! Local search only considers 2-opt moves that connect a node to one of
//! its candidates, which bounds each node scan to `k` evaluations.
//!
//! # Complexity
//! O(n² log n) to build, once per instance.

use crate::model::DistanceMatrix;
use std::cmp::Ordering;

/// Default number of candidates per node.
pub const DEFAULT_CANDIDATES: usize = 100;

/// Candidate neighbors of every node, nearest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLists {
    k: usize,
    lists: Vec<Vec<usize>>,
}

impl CandidateLists {
    /// Builds the lists from true distances.
    ///
    /// Each list holds the `min(k, n - 1)` nearest other nodes sorted by
    /// ascending distance; equal distances are ordered by node index.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_gls::candidates::CandidateLists;
    /// use u_gls::model::Instance;
    ///
    /// let inst = Instance::from_coords(vec![(0.0, 0.0), (5.0, 0.0), (1.0, 0.0)]).unwrap();
    /// let cand = CandidateLists::build(inst.distances(), 10);
    /// assert_eq!(cand.neighbors(0), &[2, 1]);
    /// ```
    pub fn build(distances: &DistanceMatrix, k: usize) -> Self {
        let n = distances.dim();
        let k = k.min(n.saturating_sub(1));
        let lists = (0..n)
            .map(|i| {
                let row = distances.row(i);
                let mut others: Vec<usize> = (0..n).filter(|&j| j != i).collect();
                others.sort_by(|&a, &b| {
                    row[a]
                        .partial_cmp(&row[b])
                        .unwrap_or(Ordering::Equal)
                        .then(a.cmp(&b))
                });
                others.truncate(k);
                others
            })
            .collect();
        Self { k, lists }
    }

    /// Effective list length.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of nodes covered.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns `true` if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Candidates of `node`, nearest first.
    #[inline]
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.lists[node]
    }
}
