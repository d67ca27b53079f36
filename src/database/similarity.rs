/*!
 * Matching-blocks string similarity.
 *
 * Ratcliff/Obershelp: find the longest common substring, recurse on the
 * pieces to its left and right, and score `2 * matched / (len_a + len_b)`.
 * Inputs are put in a canonical order first so `ratio(a, b) == ratio(b, a)`.
 */

/// Similarity ratio in [0, 1]; 1.0 only for identical strings
pub fn ratio(a: &str, b: &str) -> f64 {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let left: Vec<char> = first.chars().collect();
    let right: Vec<char> = second.chars().collect();

    let total = left.len() + right.len();
    if total == 0 {
        return 1.0;
    }

    let matched = matching_chars(&left, &right);
    (2.0 * matched as f64) / total as f64
}

/// Total length of all matching blocks between two sequences
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }
        matched += size;

        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    matched
}

/// Longest common block within the given ranges.
///
/// Ties resolve to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let width = b_hi - b_lo;
    let mut best = (a_lo, b_lo, 0);
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];

    for i in a_lo..a_hi {
        for j in b_lo..b_hi {
            let k = j - b_lo + 1;
            if a[i] == b[j] {
                curr[k] = prev[k - 1] + 1;
                let size = curr[k];
                if size > best.2 {
                    best = (i + 1 - size, j + 1 - size, size);
                }
            } else {
                curr[k] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}
