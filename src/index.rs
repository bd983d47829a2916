//! Row-major indexing between flat state vector positions and per-site values.

/// Flatten per-site values into a state vector index (row-major, site 0 most
/// significant).
///
/// # Example
/// ```
/// use qoracle_rs::index::ravel;
/// assert_eq!(ravel(&[1, 0, 1], &[2, 2, 2]), 5);
/// ```
pub fn ravel(indices: &[usize], dims: &[usize]) -> usize {
    debug_assert_eq!(indices.len(), dims.len());
    let mut flat = 0usize;
    for (&idx, &dim) in indices.iter().zip(dims.iter()) {
        debug_assert!(idx < dim);
        flat = flat * dim + idx;
    }
    flat
}

/// Split a flat state vector index into per-site values (row-major).
///
/// # Example
/// ```
/// use qoracle_rs::index::unravel;
/// assert_eq!(unravel(5, &[2, 2, 2]), vec![1, 0, 1]);
/// ```
pub fn unravel(mut index: usize, dims: &[usize]) -> Vec<usize> {
    let mut multi = vec![0usize; dims.len()];
    for i in (0..dims.len()).rev() {
        multi[i] = index % dims[i];
        index /= dims[i];
    }
    multi
}

/// Iterate over every computational basis state as `(flat, multi)` pairs.
pub fn iter_basis(dims: &[usize]) -> impl Iterator<Item = (usize, Vec<usize>)> + '_ {
    let total: usize = dims.iter().product();
    (0..total).map(move |i| (i, unravel(i, dims)))
}

/// Rebuild a full multi-index by inserting `value` at position `loc` of a
/// reduced multi-index that omits that site.
pub fn insert_at(reduced: &[usize], loc: usize, value: usize) -> Vec<usize> {
    let mut full = Vec::with_capacity(reduced.len() + 1);
    full.extend_from_slice(&reduced[..loc]);
    full.push(value);
    full.extend_from_slice(&reduced[loc..]);
    full
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ravel_unravel_roundtrip() {
        let dims = [2, 3, 2];
        let total: usize = dims.iter().product();
        for i in 0..total {
            assert_eq!(ravel(&unravel(i, &dims), &dims), i);
        }
    }

    #[test]
    fn test_ravel_row_major() {
        // site 0 is the most significant digit
        assert_eq!(ravel(&[1, 2, 0], &[2, 3, 2]), 10);
        assert_eq!(unravel(10, &[2, 3, 2]), vec![1, 2, 0]);
    }

    #[test]
    fn test_iter_basis_order() {
        let states: Vec<_> = iter_basis(&[2, 2]).collect();
        assert_eq!(states.len(), 4);
        assert_eq!(states[0], (0, vec![0, 0]));
        assert_eq!(states[1], (1, vec![0, 1]));
        assert_eq!(states[3], (3, vec![1, 1]));
    }

    #[test]
    fn test_insert_at() {
        assert_eq!(insert_at(&[4, 5], 0, 9), vec![9, 4, 5]);
        assert_eq!(insert_at(&[4, 5], 1, 9), vec![4, 9, 5]);
        assert_eq!(insert_at(&[4, 5], 2, 9), vec![4, 5, 9]);
    }
}
