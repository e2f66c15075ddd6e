//! Integer square root.

/// Floor square root of a `u128`, by Newton's method.
///
/// Starting from `n` the iterates decrease monotonically until they reach
/// `floor(sqrt(n))`.
///
/// # Examples
///
/// ```
/// use simple_amm::math::isqrt;
///
/// assert_eq!(isqrt(5_000_000), 2_236);
/// assert_eq!(isqrt(16), 4);
/// assert_eq!(isqrt(0), 0);
/// ```
#[must_use]
pub const fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = x.div_ceil(2);
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
