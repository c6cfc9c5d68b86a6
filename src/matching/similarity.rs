//! Token-sorted string similarity on a 0-100 scale.

use rapidfuzz::distance::indel;

/// Lowercase, turn every non-alphanumeric character into a separator, then
/// sort the resulting tokens and join them with single spaces.
fn sorted_tokens(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();

    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// `numerator / denominator` rounded to the nearest integer, ties to even.
fn div_round_half_even(numerator: usize, denominator: usize) -> usize {
    let quotient = numerator / denominator;
    let twice_remainder = 2 * (numerator % denominator);
    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// Similarity of two strings regardless of word order.
///
/// Both strings are normalized by [`sorted_tokens`] and compared with the
/// Indel ratio `100 * (len_a + len_b - indel_distance) / (len_a + len_b)`,
/// rounded to the nearest integer with ties going to the even value.
/// Returns 0 when either side has no alphanumeric content.
#[must_use]
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let a = sorted_tokens(a);
    let b = sorted_tokens(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let total = a.chars().count() + b.chars().count();
    let distance = indel::distance(a.chars(), b.chars());
    let ratio = div_round_half_even(100 * total.saturating_sub(distance), total);

    u8::try_from(ratio).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_and_reordered() {
        assert_eq!(token_sort_ratio("blue zenith", "blue zenith"), 100);
        assert_eq!(token_sort_ratio("zenith blue", "Blue Zenith"), 100);
        assert_eq!(token_sort_ratio("blue-zenith!", "zenith blue"), 100);
    }

    #[test]
    fn test_partial_similarity() {
        // "abcd" vs "abce": distance 2, total 8 -> 75
        assert_eq!(token_sort_ratio("abcd", "abce"), 75);
        // "kitten" vs "sitting": distance 5, total 13 -> 61.5 -> 62
        assert_eq!(token_sort_ratio("kitten", "sitting"), 62);
    }

    #[test]
    fn test_exact_halves_round_to_even() {
        // distance 6, total 16 -> 62.5
        assert_eq!(token_sort_ratio("abcdefgh", "abcdexyz"), 62);
        // distance 2, total 16 -> 87.5
        assert_eq!(token_sort_ratio("abcdefgh", "abcdefgx"), 88);
    }

    #[test]
    fn test_div_round_half_even() {
        assert_eq!(div_round_half_even(125, 2), 62);
        assert_eq!(div_round_half_even(121, 2), 60);
        assert_eq!(div_round_half_even(123, 2), 62);
        assert_eq!(div_round_half_even(800, 13), 62);
        assert_eq!(div_round_half_even(700, 8), 88);
    }

    #[test]
    fn test_empty_or_symbol_only() {
        assert_eq!(token_sort_ratio("", "abc"), 0);
        assert_eq!(token_sort_ratio("!!!", "abc"), 0);
        assert_eq!(token_sort_ratio("", ""), 0);
    }

    #[test]
    fn test_non_ascii_kept() {
        assert_eq!(token_sort_ratio("千本桜", "千本桜"), 100);
        assert!(token_sort_ratio("千本桜", "千本") > 60);
    }
}
