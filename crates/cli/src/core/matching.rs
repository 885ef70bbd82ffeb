//! Unordered element matching for arrays with no usable correlation key.
//!
//! Builds a compatibility matrix with a caller-supplied predicate, then finds
//! a maximum bipartite matching with augmenting paths. Arrays in this path
//! are small fixtures, so the quadratic matrix is acceptable.

use tracing::trace;

/// Result of [`maximum_matching`], indexed by left-side position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    left_to_right: Vec<Option<usize>>,
}

impl Matching {
    /// Left indexes with no partner, ascending.
    pub fn unmatched_left(&self) -> Vec<usize> {
        self.left_to_right
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.is_none().then_some(i))
            .collect()
    }

    pub fn size(&self) -> usize {
        self.left_to_right.iter().filter(|m| m.is_some()).count()
    }
}

/// Matches each of `left` positions to a distinct right position where
/// `compatible(left, right)` holds, maximizing the number of pairs.
pub fn maximum_matching<F>(left: usize, right: usize, mut compatible: F) -> Matching
where
    F: FnMut(usize, usize) -> bool,
{
    let adjacency: Vec<Vec<usize>> = (0..left)
        .map(|i| (0..right).filter(|&j| compatible(i, j)).collect())
        .collect();

    let mut right_owner: Vec<Option<usize>> = vec![None; right];
    for i in 0..left {
        let mut visited = vec![false; right];
        if !augment(i, &adjacency, &mut visited, &mut right_owner) {
            trace!(left = i, "no augmenting path");
        }
    }

    let mut left_to_right = vec![None; left];
    for (j, owner) in right_owner.iter().enumerate() {
        if let Some(i) = owner {
            left_to_right[*i] = Some(j);
        }
    }
    Matching { left_to_right }
}

fn augment(
    i: usize,
    adjacency: &[Vec<usize>],
    visited: &mut [bool],
    right_owner: &mut [Option<usize>],
) -> bool {
    for &j in &adjacency[i] {
        if visited[j] {
            continue;
        }
        visited[j] = true;
        let free = match right_owner[j] {
            None => true,
            Some(owner) => augment(owner, adjacency, visited, right_owner),
        };
        if free {
            right_owner[j] = Some(i);
            return true;
        }
    }
    false
}
