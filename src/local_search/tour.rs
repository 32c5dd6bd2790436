//! Array-based tour with an incrementally maintained position index.

/// A closed tour stored as a node sequence plus its inverse.
///
/// `order[pos[v]] == v` holds for every node after every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourState {
    order: Vec<usize>,
    pos: Vec<usize>,
}

impl TourState {
    /// Wraps a permutation of `0..n`.
    ///
    /// The caller guarantees `order` is a permutation.
    pub fn new(order: Vec<usize>) -> Self {
        let mut pos = vec![0; order.len()];
        for (i, &v) in order.iter().enumerate() {
            pos[v] = i;
        }
        Self { order, pos }
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tour has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Node sequence.
    #[inline]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Consumes the state, returning the node sequence.
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// Position of `node` in the sequence.
    #[inline]
    pub fn position(&self, node: usize) -> usize {
        self.pos[node]
    }

    /// Tour successor of `node`.
    #[inline]
    pub fn next(&self, node: usize) -> usize {
        let i = self.pos[node] + 1;
        self.order[if i == self.order.len() { 0 } else { i }]
    }

    /// Tour predecessor of `node`.
    #[inline]
    pub fn prev(&self, node: usize) -> usize {
        let i = self.pos[node];
        self.order[if i == 0 { self.order.len() - 1 } else { i - 1 }]
    }

    /// Reverses the path that runs forward from `from` to `to` (inclusive).
    ///
    /// As a cycle, reversing a path and reversing its complement give the
    /// same tour, so the shorter of the two is reversed. Positions are
    /// updated in the same pass.
    pub fn reverse_path(&mut self, from: usize, to: usize) {
        let n = self.order.len();
        if n < 2 {
            return;
        }
        let (mut i, mut j) = (self.pos[from], self.pos[to]);
        let len = (j + n - i) % n + 1;
        let len = if 2 * len > n {
            // Reverse the complement: successor of `to` .. predecessor of `from`.
            i = if j + 1 == n { 0 } else { j + 1 };
            j = if self.pos[from] == 0 {
                n - 1
            } else {
                self.pos[from] - 1
            };
            n - len
        } else {
            len
        };

        for _ in 0..len / 2 {
            self.order.swap(i, j);
            self.pos[self.order[i]] = i;
            self.pos[self.order[j]] = j;
            i = if i + 1 == n { 0 } else { i + 1 };
            j = if j == 0 { n - 1 } else { j - 1 };
        }
    }
}
