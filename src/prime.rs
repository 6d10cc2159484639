//! Prime capacity selection shared by both map variants

/// Largest capacity a table may be given: the largest prime below 2^32.
///
/// Keeping capacities below 2^32 means quadratic probe offsets never overflow.
pub const MAX_CAPACITY: usize = 4_294_967_291;

/// Returns true if `n` is prime.
///
/// Uses trial division by odd factors up to the square root of `n`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor = 3;
    // `factor <= n / factor` instead of `factor * factor <= n` so 32-bit targets don't overflow
    while factor <= n / factor {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }
    true
}

/// Returns the first prime at or above `n`, after bumping an even `n` to the next odd number.
///
/// This means `next_prime(2)` is 3. Requests above [`MAX_CAPACITY`] are clamped to it.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = n.min(MAX_CAPACITY);
    if candidate % 2 == 0 {
        candidate += 1;
    }
    // MAX_CAPACITY is itself prime, so the scan stops before passing it
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

/// Normalizes a requested table capacity for a resize.
///
/// Prime requests are kept as they are, which is what lets the literal capacity 2 survive a
/// resize. Everything else goes through [`next_prime`].
#[must_use]
pub fn normalize_capacity(requested: usize) -> usize {
    if is_prime(requested) { requested } else { next_prime(requested) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_small_primes() {
        let primes: Vec<usize> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_squares_of_primes_are_composite() {
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(10_201)); // 101 * 101
    }

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(0), 3);
        assert_eq!(next_prime(1), 3);
        assert_eq!(next_prime(2), 3);
        assert_eq!(next_prime(11), 11);
        assert_eq!(next_prime(20), 23);
        assert_eq!(next_prime(30), 31);
        assert_eq!(next_prime(75), 79);
        assert_eq!(next_prime(228), 229);
    }

    #[test]
    fn test_next_prime_is_clamped() {
        assert!(is_prime(MAX_CAPACITY));
        assert_eq!(next_prime(usize::MAX), MAX_CAPACITY);
        assert_eq!(next_prime(MAX_CAPACITY - 1), MAX_CAPACITY);
    }

    #[test]
    fn test_normalize_keeps_two() {
        assert_eq!(normalize_capacity(2), 2);
        assert_eq!(normalize_capacity(3), 3);
        assert_eq!(normalize_capacity(12), 13);
        assert_eq!(normalize_capacity(111), 113);
        assert_eq!(normalize_capacity(1), 3);
    }
}
