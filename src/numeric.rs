/// Greatest common divisor by the iterative Euclidean algorithm.
///
/// The remainder truncates toward zero, so the sign of the result follows the
/// operands: `gcd(4, 6) == 2`, `gcd(-4, -6) == -2`, `gcd(1, -2) == 1`.
/// `gcd(0, n) == n` and `gcd(0, 0) == 0`.
pub fn gcd(a: i64, b: i64) -> i64 {
  let mut a = a;
  let mut b = b;
  while b != 0 {
    let temp = b;
    // i64::MIN % -1 overflows, its true remainder is 0
    b = a.wrapping_rem(b);
    a = temp;
  }
  a
}

/// Least common multiple, `a * b / gcd(a, b)`. `None` on overflow or when both
/// operands are zero.
pub fn lcm(a: i64, b: i64) -> Option<i64> {
  let divisor = gcd(a, b);
  if divisor == 0 {
    return None;
  }
  a.checked_div(divisor)?.checked_mul(b)
}
