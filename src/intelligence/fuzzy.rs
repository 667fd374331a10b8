// ABOUTME: Fuzzy string similarity used to match dish names against database descriptions
// ABOUTME: Indel-normalized ratio on a 0-100 scale computed from the longest common subsequence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Similarity of two strings on a 0-100 scale
///
/// `ratio = 2 * LCS / (len(a) + len(b)) * 100`, rounded to the nearest
/// integer, where LCS is the longest common subsequence of characters.
/// Two empty strings are identical (100). Comparison is case-sensitive;
/// callers lowercase both sides first.
#[must_use]
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }

    let lcs = longest_common_subsequence(&a, &b);
    let score = (2 * lcs) as f64 / total as f64 * 100.0;
    score.round().clamp(0.0, 100.0) as u8
}

/// Length of the longest common subsequence, single-row dynamic programme
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let mut row = vec![0usize; short.len() + 1];

    for &lc in long {
        let mut diagonal = 0;
        for (j, &sc) in short.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if lc == sc {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }

    row[short.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_and_disjoint() {
        assert_eq!(ratio("oatmeal", "oatmeal"), 100);
        assert_eq!(ratio("abc", "xyz"), 0);
        assert_eq!(ratio("", ""), 100);
        assert_eq!(ratio("apple", ""), 0);
    }

    #[test]
    fn test_known_ratios() {
        // LCS("kitten", "sitting") = 4 ("ittn"), 2*4/13
        assert_eq!(ratio("kitten", "sitting"), 62);
        assert_eq!(ratio("grilled chicken breast", "chicken breast"), 78);
        assert_eq!(ratio("this is a test", "this is a test!"), 97);
    }

    #[test]
    fn test_symmetry() {
        assert_eq!(
            ratio("salmon with rice", "rice, brown, cooked"),
            ratio("rice, brown, cooked", "salmon with rice")
        );
    }

    #[test]
    fn test_lcs() {
        let a: Vec<char> = "ABCBDAB".chars().collect();
        let b: Vec<char> = "BDCABA".chars().collect();
        assert_eq!(longest_common_subsequence(&a, &b), 4);
    }
}
