//! Small combinatorics helpers shared by target enumeration and mulligans.

/// All `k`-element subsets of `items`, each in input order.
///
/// Subsets come out in lexicographic order of positions.
///
/// ```
/// use spy_solitaire::core::combinatorics::combinations;
///
/// let pairs = combinations(&[1, 2, 3], 2);
/// assert_eq!(pairs, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);
/// ```
#[must_use]
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    if k > items.len() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut picks: Vec<usize> = (0..k).collect();
    loop {
        out.push(picks.iter().map(|&i| items[i].clone()).collect());

        // Find the rightmost pick that can still advance.
        let Some(i) = (0..k).rev().find(|&i| picks[i] < items.len() - k + i) else {
            return out;
        };
        picks[i] += 1;
        for j in i + 1..k {
            picks[j] = picks[j - 1] + 1;
        }
    }
}

/// Binomial coefficient.
#[must_use]
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_match_binomial() {
        let items: Vec<usize> = (0..7).collect();
        for k in 0..=7 {
            assert_eq!(combinations(&items, k).len(), binomial(7, k), "k = {k}");
        }
    }

    #[test]
    fn test_empty_choice() {
        assert_eq!(combinations(&[1, 2], 0), vec![Vec::<i32>::new()]);
        assert!(combinations(&[1, 2], 3).is_empty());
    }

    #[test]
    fn test_triples() {
        let triples = combinations(&['a', 'b', 'c', 'd'], 3);
        assert_eq!(triples.len(), 4);
        assert_eq!(triples[0], vec!['a', 'b', 'c']);
        assert_eq!(triples[3], vec!['b', 'c', 'd']);
    }
}
