//! Number-theory operations behind the `fibonacci`, `prime`, `lcm` and `hcf` keys.
//!
//! Inputs arrive already narrowed to integers; the filtering of zeros and the
//! empty-after-filter errors live here.

use thiserror::Error;

/// fib(93) is the largest Fibonacci number that fits in a `u64`.
pub const MAX_FIBONACCI_TERMS: u64 = 94;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MathError {
    #[error("Fibonacci input must not exceed {max}")]
    FibonacciTooLarge { max: u64 },

    #[error("{0} requires at least one non-zero integer")]
    NoNonZeroInput(&'static str),

    #[error("{0} result exceeds the supported integer range")]
    Overflow(&'static str),
}

/// First `n` Fibonacci numbers, starting `0, 1`.
pub fn fibonacci(n: u64) -> Result<Vec<u64>, MathError> {
    if n > MAX_FIBONACCI_TERMS {
        return Err(MathError::FibonacciTooLarge {
            max: MAX_FIBONACCI_TERMS,
        });
    }

    let n = n as usize;
    let mut sequence = Vec::with_capacity(n);
    for i in 0..n {
        let next = match i {
            0 => 0,
            1 => 1,
            _ => sequence[i - 1] + sequence[i - 2],
        };
        sequence.push(next);
    }
    Ok(sequence)
}

pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut divisor = 3;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Keeps the positive primes, in input order.
pub fn primes(values: &[i64]) -> Vec<i64> {
    values
        .iter()
        .copied()
        .filter(|&n| n > 0 && is_prime(n))
        .collect()
}

pub fn gcd(a: i64, b: i64) -> u64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple of the non-zero values.
///
/// A lone non-zero value is returned unchanged, sign included.
pub fn lcm(values: &[i64]) -> Result<i64, MathError> {
    let mut nonzero = values.iter().copied().filter(|&n| n != 0);
    let first = nonzero.next().ok_or(MathError::NoNonZeroInput("LCM"))?;

    nonzero.try_fold(first, |acc, n| {
        let product = (i128::from(acc) * i128::from(n)).unsigned_abs();
        let divisor = u128::from(gcd(acc, n));
        i64::try_from(product / divisor).map_err(|_| MathError::Overflow("LCM"))
    })
}

/// Highest common factor of the non-zero values.
///
/// A lone non-zero value is returned unchanged, sign included.
pub fn hcf(values: &[i64]) -> Result<i64, MathError> {
    let mut nonzero = values.iter().copied().filter(|&n| n != 0);
    let first = nonzero.next().ok_or(MathError::NoNonZeroInput("HCF"))?;

    nonzero.try_fold(first, |acc, n| {
        i64::try_from(gcd(acc, n)).map_err(|_| MathError::Overflow("HCF"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fibonacci_known_prefixes() {
        assert_eq!(fibonacci(0).unwrap(), Vec::<u64>::new());
        assert_eq!(fibonacci(1).unwrap(), vec![0]);
        assert_eq!(fibonacci(2).unwrap(), vec![0, 1]);
        assert_eq!(fibonacci(5).unwrap(), vec![0, 1, 1, 2, 3]);
    }

    #[test]
    fn fibonacci_satisfies_recurrence_up_to_the_limit() {
        for n in 0..=MAX_FIBONACCI_TERMS {
            let seq = fibonacci(n).unwrap();
            assert_eq!(seq.len() as u64, n);
            for i in 2..seq.len() {
                assert_eq!(seq[i], seq[i - 1] + seq[i - 2]);
            }
        }
        assert_eq!(
            fibonacci(MAX_FIBONACCI_TERMS).unwrap().last().copied(),
            Some(12_200_160_415_121_876_738)
        );
    }

    #[test]
    fn fibonacci_rejects_counts_past_u64() {
        assert_eq!(
            fibonacci(MAX_FIBONACCI_TERMS + 1),
            Err(MathError::FibonacciTooLarge { max: 94 })
        );
    }

    #[test]
    fn primality() {
        let small: Vec<i64> = (-5..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(small, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(is_prime(7919));
        assert!(!is_prime(7917));
        assert!(is_prime(2_147_483_647));
        assert!(!is_prime(i64::MAX));
    }

    #[test]
    fn primes_keep_order_and_drop_the_rest() {
        assert_eq!(primes(&[1, 2, 3, 4, 5, 17]), vec![2, 3, 5, 17]);
        assert_eq!(primes(&[17, -3, 0, 9, 2, 13]), vec![17, 2, 13]);
        assert!(primes(&[]).is_empty());
    }

    #[test]
    fn lcm_examples() {
        assert_eq!(lcm(&[4, 6]), Ok(12));
        assert_eq!(lcm(&[0, 4, 0, 6]), Ok(12));
        assert_eq!(lcm(&[-4, 6]), Ok(12));
        assert_eq!(lcm(&[2, 3, 5, 7]), Ok(210));
        assert_eq!(lcm(&[-9]), Ok(-9));
    }

    #[test]
    fn lcm_requires_a_nonzero_value() {
        assert_eq!(lcm(&[0, 0]), Err(MathError::NoNonZeroInput("LCM")));
        assert_eq!(
            MathError::NoNonZeroInput("LCM").to_string(),
            "LCM requires at least one non-zero integer"
        );
    }

    #[test]
    fn lcm_overflow_is_reported() {
        assert_eq!(
            lcm(&[i64::MAX, i64::MAX - 1]),
            Err(MathError::Overflow("LCM"))
        );
    }

    #[test]
    fn lcm_is_a_minimal_common_multiple() {
        let inputs: &[&[i64]] = &[&[4, 6], &[3, 10, 15], &[7, 11, 13], &[12, 18, 30], &[1, 1]];
        for values in inputs {
            let l = lcm(values).unwrap();
            assert!(values.iter().all(|&v| l % v == 0));
            assert!((1..l).all(|m| values.iter().any(|&v| m % v != 0)));
        }
    }

    #[test]
    fn hcf_examples() {
        assert_eq!(hcf(&[12, 18]), Ok(6));
        assert_eq!(hcf(&[12, 0, 18]), Ok(6));
        assert_eq!(hcf(&[-12, 18]), Ok(6));
        assert_eq!(hcf(&[7, 13]), Ok(1));
        assert_eq!(hcf(&[-12]), Ok(-12));
        assert_eq!(hcf(&[0]), Err(MathError::NoNonZeroInput("HCF")));
    }

    #[test]
    fn hcf_is_the_greatest_common_divisor() {
        let inputs: &[&[i64]] = &[&[12, 18], &[100, 75, 50], &[17, 34], &[9, 28]];
        for values in inputs {
            let h = hcf(values).unwrap();
            assert!(values.iter().all(|&v| v % h == 0));
            let smallest = values.iter().map(|v| v.abs()).min().unwrap();
            assert!((h + 1..=smallest).all(|d| values.iter().any(|&v| v % d != 0)));
        }
    }
}
