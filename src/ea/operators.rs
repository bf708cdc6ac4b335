//! Permutation-preserving genetic operators.
//!
//! These are the raw operators on gene slices, independent of
//! [`Candidate`](super::Candidate) and of any rate. The strategy types in
//! [`crossover`](super::crossover) and [`mutation`](super::mutation) wrap
//! them with pairing, rates and error reporting.
//!
//! Genes may be any `Clone + Eq + Hash` type, so city indices, labels
//! and job ids all work without remapping to `0..n`.
//!
//! # Crossover Operators
//!
//! - [`order_crossover`] (OX1): Davis (1985), preserves relative order
//! - [`cycle_crossover`] (CX): Oliver, Smith & Holland (1987), preserves
//!   absolute positions
//!
//! # Mutation Operators
//!
//! - [`swap_mutation`]: exchange two distinct positions, O(1)
//! - [`invert_mutation`]: reverse a random span, O(n)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Oliver, Smith & Holland (1987), "A Study of Permutation Crossover
//!   Operators on the Traveling Salesman Problem"
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*, ch. 4

use crate::error::{Error, Result};
use rand::seq::index;
use rand::RngCore;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

// ============================================================================
// Crossover operators
// ============================================================================

/// Ordered Crossover (OX1) with random cut points.
///
/// Draws two distinct cut points and delegates to
/// [`order_crossover_with_cuts`]. Parents shorter than 2 genes are
/// returned as copies.
///
/// # Errors
/// [`Error::LengthMismatch`] for unequal parents,
/// [`Error::NotAPermutation`] if a child cannot be completed.
pub fn order_crossover<T, R>(parent1: &[T], parent2: &[T], rng: &mut R) -> Result<(Vec<T>, Vec<T>)>
where
    T: Clone + Eq + Hash,
    R: RngCore + ?Sized,
{
    check_lengths(parent1, parent2)?;
    if parent1.len() < 2 {
        return Ok((parent1.to_vec(), parent2.to_vec()));
    }
    let (start, end) = distinct_cut_points(parent1.len(), rng);
    order_crossover_with_cuts(parent1, parent2, start, end)
}

/// Ordered Crossover (OX1) with explicit, inclusive cut points.
///
/// # Algorithm
///
/// 1. Copy the swath `[start, end]` of `parent1` into the child
/// 2. Walk `parent2` circularly from `end + 1`, skipping swath genes
/// 3. Write the remaining genes circularly from position `end + 1`
///
/// The second child swaps the roles of the parents.
///
/// ```
/// use u_evolve::ea::operators::order_crossover_with_cuts;
///
/// let p1 = [1, 2, 3, 4, 5, 6, 7, 8];
/// let p2 = [3, 7, 5, 1, 6, 8, 2, 4];
/// let (c1, _) = order_crossover_with_cuts(&p1, &p2, 3, 5).unwrap();
/// assert_eq!(c1, vec![7, 1, 8, 4, 5, 6, 2, 3]);
/// ```
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if `start > end` or `end` is out of bounds.
pub fn order_crossover_with_cuts<T>(
    parent1: &[T],
    parent2: &[T],
    start: usize,
    end: usize,
) -> Result<(Vec<T>, Vec<T>)>
where
    T: Clone + Eq + Hash,
{
    check_lengths(parent1, parent2)?;
    assert!(
        start <= end && end < parent1.len(),
        "cut points out of range"
    );

    let child1 = ox_build_child(parent1, parent2, start, end)?;
    let child2 = ox_build_child(parent2, parent1, start, end)?;
    Ok((child1, child2))
}

/// Build one OX child: swath from `template`, the rest from `donor`.
fn ox_build_child<T>(template: &[T], donor: &[T], start: usize, end: usize) -> Result<Vec<T>>
where
    T: Clone + Eq + Hash,
{
    let n = template.len();
    let mut child: Vec<Option<T>> = vec![None; n];
    let swath: HashSet<&T> = template[start..=end].iter().collect();

    for i in start..=end {
        child[i] = Some(template[i].clone());
    }

    let to_fill = n - (end - start + 1);
    let mut filled = 0;
    let mut pos = (end + 1) % n;
    for offset in 0..n {
        if filled == to_fill {
            break;
        }
        let gene = &donor[(end + 1 + offset) % n];
        if !swath.contains(gene) {
            child[pos] = Some(gene.clone());
            pos = (pos + 1) % n;
            filled += 1;
        }
    }

    child
        .into_iter()
        .enumerate()
        .map(|(i, gene)| {
            gene.ok_or_else(|| {
                Error::NotAPermutation(format!("ordered crossover left position {i} empty"))
            })
        })
        .collect()
}

/// Cycle Crossover (CX).
///
/// Positions are partitioned into cycles: starting from an unvisited
/// index, jump to the index where `parent2` holds `parent1`'s gene, until
/// the start is reached again. Cycles are numbered from 1; odd cycles copy
/// `parent1` into child A and `parent2` into child B, even cycles the
/// other way round. Deterministic: no random source is needed.
///
/// ```
/// use u_evolve::ea::operators::cycle_crossover;
///
/// let p1 = [1, 2, 3, 4, 5, 6, 7, 8];
/// let p2 = [8, 5, 2, 1, 3, 6, 4, 7];
/// let (a, b) = cycle_crossover(&p1, &p2).unwrap();
/// assert_eq!(a, vec![1, 5, 2, 4, 3, 6, 7, 8]);
/// assert_eq!(b, vec![8, 2, 3, 1, 5, 6, 4, 7]);
/// ```
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Errors
/// [`Error::LengthMismatch`] for unequal parents,
/// [`Error::NotAPermutation`] when a gene of `parent1` is missing from
/// `parent2`.
pub fn cycle_crossover<T>(parent1: &[T], parent2: &[T]) -> Result<(Vec<T>, Vec<T>)>
where
    T: Clone + Eq + Hash,
{
    check_lengths(parent1, parent2)?;
    let cycles = cycle_labels(parent1, parent2)?;

    let mut child_a = Vec::with_capacity(parent1.len());
    let mut child_b = Vec::with_capacity(parent1.len());
    for (i, cycle) in cycles.into_iter().enumerate() {
        if cycle % 2 == 1 {
            child_a.push(parent1[i].clone());
            child_b.push(parent2[i].clone());
        } else {
            child_a.push(parent2[i].clone());
            child_b.push(parent1[i].clone());
        }
    }
    Ok((child_a, child_b))
}

/// Cycle number (from 1, in discovery order) of every position.
pub fn cycle_labels<T>(parent1: &[T], parent2: &[T]) -> Result<Vec<usize>>
where
    T: Eq + Hash,
{
    check_lengths(parent1, parent2)?;
    let n = parent1.len();
    let position_in_p2: HashMap<&T, usize> =
        parent2.iter().enumerate().map(|(i, v)| (v, i)).collect();

    let mut labels = vec![0usize; n];
    let mut cycle = 0;
    for first in 0..n {
        if labels[first] != 0 {
            continue;
        }
        cycle += 1;
        let mut current = first;
        while labels[current] == 0 {
            labels[current] = cycle;
            current = *position_in_p2.get(&parent1[current]).ok_or_else(|| {
                Error::NotAPermutation(format!(
                    "gene at position {current} of the first parent is missing from the second"
                ))
            })?;
        }
    }
    Ok(labels)
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swap mutation: exchange the genes at two distinct random positions.
///
/// Slices shorter than 2 are left unchanged.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<T, R: RngCore + ?Sized>(perm: &mut [T], rng: &mut R) {
    if perm.len() < 2 {
        return;
    }
    let (i, j) = distinct_pair(perm.len(), rng);
    perm.swap(i, j);
}

/// Inversion mutation: reverse the span between two distinct positions,
/// both ends included.
///
/// Slices shorter than 2 are left unchanged.
///
/// # Complexity
/// O(n) worst case
pub fn invert_mutation<T, R: RngCore + ?Sized>(perm: &mut [T], rng: &mut R) {
    if perm.len() < 2 {
        return;
    }
    let (start, end) = distinct_cut_points(perm.len(), rng);
    perm[start..=end].reverse();
}

// ============================================================================
// Helpers
// ============================================================================

/// Two distinct indices in `0..n`, in draw order. Requires `n >= 2`.
fn distinct_pair<R: RngCore + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let picked = index::sample(rng, n, 2);
    (picked.index(0), picked.index(1))
}

/// Two distinct cut points `start < end` in `0..n`. Requires `n >= 2`.
pub(crate) fn distinct_cut_points<R: RngCore + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let (a, b) = distinct_pair(n, rng);
    (a.min(b), a.max(b))
}

fn check_lengths<T>(parent1: &[T], parent2: &[T]) -> Result<()> {
    if parent1.len() != parent2.len() {
        return Err(Error::LengthMismatch {
            left: parent1.len(),
            right: parent2.len(),
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted<T: Clone + Ord>(v: &[T]) -> Vec<T> {
        let mut s = v.to_vec();
        s.sort();
        s
    }

    fn permutation_pair() -> impl Strategy<Value = (Vec<usize>, Vec<usize>, u64)> {
        (2usize..40).prop_flat_map(|n| {
            let base: Vec<usize> = (0..n).collect();
            (
                Just(base.clone()).prop_shuffle(),
                Just(base).prop_shuffle(),
                any::<u64>(),
            )
        })
    }

    // ---- OX1 ----

    #[test]
    fn test_ox_concrete_scenario() {
        let p1 = [1, 2, 3, 4, 5, 6, 7, 8];
        let p2 = [3, 7, 5, 1, 6, 8, 2, 4];
        let (c1, c2) = order_crossover_with_cuts(&p1, &p2, 3, 5).unwrap();
        assert_eq!(&c1[3..=5], &[4, 5, 6]);
        assert_eq!(c1, vec![7, 1, 8, 4, 5, 6, 2, 3]);
        assert_eq!(&c2[3..=5], &[1, 6, 8]);
        assert_eq!(c2, vec![3, 4, 5, 1, 6, 8, 7, 2]);
    }

    #[test]
    fn test_ox_full_swath_copies_template() {
        let p1 = ['a', 'b', 'c', 'd'];
        let p2 = ['d', 'c', 'b', 'a'];
        let (c1, c2) = order_crossover_with_cuts(&p1, &p2, 0, 3).unwrap();
        assert_eq!(c1, p1.to_vec());
        assert_eq!(c2, p2.to_vec());
    }

    #[test]
    fn test_ox_short_genotype_is_cloned() {
        let mut rng = StdRng::seed_from_u64(42);
        let (c1, c2) = order_crossover(&[7], &[7], &mut rng).unwrap();
        assert_eq!(c1, vec![7]);
        assert_eq!(c2, vec![7]);
    }

    #[test]
    fn test_ox_length_mismatch() {
        let mut rng = StdRng::seed_from_u64(42);
        let err = order_crossover(&[1, 2, 3], &[1, 2], &mut rng).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { left: 3, right: 2 }));
    }

    #[test]
    fn test_ox_rejects_foreign_genes() {
        let err = order_crossover_with_cuts(&[1, 2, 3, 4], &[1, 1, 1, 1], 0, 1).unwrap_err();
        assert!(matches!(err, Error::NotAPermutation(_)));
    }

    // ---- CX ----

    #[test]
    fn test_cx_identical_parents() {
        let p = vec!["x", "y", "z"];
        let (a, b) = cycle_crossover(&p, &p).unwrap();
        assert_eq!(a, p);
        assert_eq!(b, p);
    }

    #[test]
    fn test_cx_labels() {
        let p1 = [1, 2, 3, 4, 5, 6, 7, 8];
        let p2 = [8, 5, 2, 1, 3, 6, 4, 7];
        let labels = cycle_labels(&p1, &p2).unwrap();
        assert_eq!(labels, vec![1, 2, 2, 1, 2, 3, 1, 1]);
    }

    #[test]
    fn test_cx_missing_gene() {
        let err = cycle_crossover(&[1, 2, 3], &[1, 2, 4]).unwrap_err();
        assert!(matches!(err, Error::NotAPermutation(_)));
    }

    #[test]
    fn test_cx_length_mismatch() {
        let err = cycle_crossover(&[1, 2], &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { .. }));
    }

    // ---- Mutation ----

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let original: Vec<usize> = (0..10).collect();
            let mut perm = original.clone();
            swap_mutation(&mut perm, &mut rng);
            let changed = perm.iter().zip(&original).filter(|(a, b)| a != b).count();
            assert_eq!(changed, 2);
        }
    }

    #[test]
    fn test_invert_reverses_a_span() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let original: Vec<usize> = (0..10).collect();
            let mut perm = original.clone();
            invert_mutation(&mut perm, &mut rng);
            assert_ne!(perm, original);
            let first = perm.iter().zip(&original).position(|(a, b)| a != b).unwrap();
            let last = perm.iter().zip(&original).rposition(|(a, b)| a != b).unwrap();
            let mut span = perm[first..=last].to_vec();
            span.reverse();
            assert_eq!(span, original[first..=last].to_vec());
        }
    }

    #[test]
    fn test_mutation_single_element() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut perm = vec![0];
        swap_mutation(&mut perm, &mut rng);
        invert_mutation(&mut perm, &mut rng);
        assert_eq!(perm, vec![0]);
    }

    #[test]
    fn test_cut_points_distinct_and_ordered() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let (start, end) = distinct_cut_points(10, &mut rng);
            assert!(start < end);
            assert!(end < 10);
        }
    }

    proptest! {
        #[test]
        fn prop_ox_children_are_permutations((p1, p2, seed) in permutation_pair()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng).unwrap();
            prop_assert_eq!(sorted(&c1), sorted(&p1));
            prop_assert_eq!(sorted(&c2), sorted(&p2));
        }

        #[test]
        fn prop_cx_children_are_complementary((p1, p2, _seed) in permutation_pair()) {
            let (a, b) = cycle_crossover(&p1, &p2).unwrap();
            prop_assert_eq!(sorted(&a), sorted(&p1));
            prop_assert_eq!(sorted(&b), sorted(&p1));
            for i in 0..p1.len() {
                let from_children = sorted(&[a[i], b[i]]);
                let from_parents = sorted(&[p1[i], p2[i]]);
                prop_assert_eq!(from_children, from_parents);
            }
        }

        #[test]
        fn prop_cx_every_position_in_one_cycle((p1, p2, _seed) in permutation_pair()) {
            let labels = cycle_labels(&p1, &p2).unwrap();
            prop_assert!(labels.iter().all(|&c| c >= 1));
            let max = *labels.iter().max().unwrap();
            for cycle in 1..=max {
                prop_assert!(labels.contains(&cycle));
            }
        }

        #[test]
        fn prop_mutations_preserve_multiset((p1, _p2, seed) in permutation_pair()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut swapped = p1.clone();
            swap_mutation(&mut swapped, &mut rng);
            prop_assert_eq!(sorted(&swapped), sorted(&p1));
            let mut inverted = p1.clone();
            invert_mutation(&mut inverted, &mut rng);
            prop_assert_eq!(sorted(&inverted), sorted(&p1));
        }
    }
}
