//! String search utilities.

use std::collections::HashMap;

/// Byte offsets in `text` where a window of `pattern`'s length (in chars) is
/// a permutation of `pattern`'s characters.
///
/// An empty pattern matches at every character boundary, including the end
/// of the text. Runs a sliding window of character counts, O(n).
pub fn find_anagram_indices(text: &str, pattern: &str) -> Vec<usize> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let width = pattern.chars().count();
    if width > chars.len() {
        return Vec::new();
    }

    let offset_at = |i: usize| chars.get(i).map_or(text.len(), |&(offset, _)| offset);

    // Net count per char: pattern adds, window subtracts. Zero everywhere = match.
    let mut balance: HashMap<char, i64> = HashMap::new();
    for c in pattern.chars() {
        *balance.entry(c).or_default() += 1;
    }
    for &(_, c) in &chars[..width] {
        *balance.entry(c).or_default() -= 1;
    }
    let mut mismatched = balance.values().filter(|&&n| n != 0).count();

    let mut result = Vec::new();
    for start in 0..=(chars.len() - width) {
        if mismatched == 0 {
            result.push(offset_at(start));
        }
        if start + width == chars.len() {
            break;
        }
        let leaving = chars[start].1;
        let entering = chars[start + width].1;
        adjust(&mut balance, &mut mismatched, leaving, 1);
        adjust(&mut balance, &mut mismatched, entering, -1);
    }

    result
}

fn adjust(balance: &mut HashMap<char, i64>, mismatched: &mut usize, c: char, delta: i64) {
    let count = balance.entry(c).or_default();
    let was_zero = *count == 0;
    *count += delta;
    match (was_zero, *count == 0) {
        (true, false) => *mismatched += 1,
        (false, true) => *mismatched -= 1,
        _ => {}
    }
}

/// Length in characters of the longest substring with no repeated character.
pub fn longest_unique_substring_len(text: &str) -> usize {
    let mut last_seen: HashMap<char, usize> = HashMap::new();
    let mut window_start = 0;
    let mut longest = 0;

    for (i, c) in text.chars().enumerate() {
        if let Some(&prev) = last_seen.get(&c) {
            window_start = window_start.max(prev + 1);
        }
        last_seen.insert(c, i);
        longest = longest.max(i + 1 - window_start);
    }

    longest
}
