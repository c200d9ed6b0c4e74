//! Permutation enumeration and Fibonacci.

use std::collections::{HashMap, HashSet};

/// Largest `n` whose Fibonacci number fits in a `u128`.
pub const MAX_FIBONACCI_INDEX: u32 = 186;

/// Outcome of [`enumerate_permutations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permutations {
    /// Arrangements produced, always `n!`.
    pub generated: u64,
    /// Arrangements that were new to the running set.
    pub distinct: u64,
}

/// Enumerate every arrangement of `input`'s characters by swapping and count
/// the distinct ones.
///
/// Each arrangement is checked against a running set, so repeated letters
/// yield `distinct < generated`. O(n · n!): meant for short inputs.
pub fn enumerate_permutations(input: &str) -> Permutations {
    let mut chars: Vec<char> = input.chars().collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut generated = 0;
    permute(&mut chars, 1, &mut seen, &mut generated);
    Permutations {
        generated,
        distinct: seen.len() as u64,
    }
}

/// Insert `chars[i]` at every position among `chars[..i]`, then recurse.
fn permute(chars: &mut [char], i: usize, seen: &mut HashSet<String>, generated: &mut u64) {
    if i >= chars.len() {
        *generated += 1;
        let arrangement: String = chars.iter().collect();
        if !seen.insert(arrangement) {
            tracing::trace!(generated = *generated, "duplicate arrangement");
        }
        return;
    }
    for j in 0..=i {
        chars.swap(j, i);
        permute(chars, i + 1, seen, generated);
        chars.swap(j, i);
    }
}

/// `n!`, or `None` if it does not fit in a `u128`.
pub fn factorial(n: u32) -> Option<u128> {
    (2..=u128::from(n)).try_fold(1u128, |acc, k| acc.checked_mul(k))
}

/// A Fibonacci value and the number of recursive calls spent computing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fibonacci {
    pub value: u128,
    pub calls: u64,
}

/// `F(n)` with `F(0) = 0`, `F(1) = 1`.
///
/// With a memo table, each index is computed once and cached for later
/// calls; without one, the plain exponential recursion runs. `calls`
/// counts every invocation either way. Returns `None` past
/// [`MAX_FIBONACCI_INDEX`].
pub fn fibonacci(n: u32, memo: Option<&mut HashMap<u32, u128>>) -> Option<Fibonacci> {
    if n > MAX_FIBONACCI_INDEX {
        return None;
    }
    let mut calls = 0;
    let value = match memo {
        Some(memo) => fib_memo(n, memo, &mut calls),
        None => fib_naive(n, &mut calls),
    };
    Some(Fibonacci { value, calls })
}

fn fib_naive(n: u32, calls: &mut u64) -> u128 {
    *calls += 1;
    if n < 2 {
        return u128::from(n);
    }
    fib_naive(n - 1, calls) + fib_naive(n - 2, calls)
}

fn fib_memo(n: u32, memo: &mut HashMap<u32, u128>, calls: &mut u64) -> u128 {
    *calls += 1;
    if n < 2 {
        return u128::from(n);
    }
    if let Some(&value) = memo.get(&n) {
        return value;
    }
    let value = fib_memo(n - 1, memo, calls) + fib_memo(n - 2, memo, calls);
    memo.insert(n, value);
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 1, 1)]
    #[case("A", 1, 1)]
    #[case("AB", 2, 2)]
    #[case("ABC", 6, 6)]
    #[case("ABCDEF", 720, 720)]
    #[case("AAB", 6, 3)]
    #[case("AABB", 24, 6)]
    #[case("AAAA", 24, 1)]
    fn test_enumerate_permutations(
        #[case] input: &str,
        #[case] generated: u64,
        #[case] distinct: u64,
    ) {
        assert_eq!(
            enumerate_permutations(input),
            Permutations {
                generated,
                distinct
            }
        );
    }

    #[test]
    fn test_generated_matches_factorial() {
        let input = "ABCDEFG";
        let result = enumerate_permutations(input);
        assert_eq!(u128::from(result.generated), factorial(7).unwrap());
        assert_eq!(result.generated, result.distinct);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(5, 120)]
    #[case(22, 1_124_000_727_777_607_680_000)]
    fn test_factorial(#[case] n: u32, #[case] expected: u128) {
        assert_eq!(factorial(n), Some(expected));
    }

    #[test]
    fn test_factorial_overflow() {
        assert!(factorial(34).is_some());
        assert_eq!(factorial(35), None);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 1)]
    #[case(10, 55)]
    #[case(20, 6765)]
    fn test_fibonacci_values(#[case] n: u32, #[case] expected: u128) {
        let mut memo = HashMap::new();
        assert_eq!(fibonacci(n, Some(&mut memo)).unwrap().value, expected);
        assert_eq!(fibonacci(n, None).unwrap().value, expected);
    }

    #[test]
    fn test_fibonacci_call_counts() {
        let naive = fibonacci(10, None).unwrap();
        assert_eq!(naive.calls, 177);

        let mut memo = HashMap::new();
        let memoized = fibonacci(10, Some(&mut memo)).unwrap();
        assert_eq!(memoized.calls, 19);

        // A warm memo answers in one call
        let warm = fibonacci(10, Some(&mut memo)).unwrap();
        assert_eq!(warm.value, 55);
        assert_eq!(warm.calls, 1);
    }

    #[test]
    fn test_fibonacci_limit() {
        let mut memo = HashMap::new();
        let last = fibonacci(MAX_FIBONACCI_INDEX, Some(&mut memo)).unwrap();
        assert_eq!(last.value, 332_825_110_087_067_562_321_196_029_789_634_457_848);
        assert_eq!(fibonacci(MAX_FIBONACCI_INDEX + 1, Some(&mut memo)), None);
    }
}
