//! Numeric kernels.
//!
//! Multiplication wraps on overflow, matching `i64.mul` in core wasm.
//! The `*_into` kernels write into a caller-provided buffer so the guest
//! can fill memory obtained from its installed allocator directly. Length
//! checks live in [`crate::validation`] and run before a buffer exists.

pub fn square(v: i64) -> i64 {
    v.wrapping_mul(v)
}

pub fn mult(a: i64, b: i64) -> i64 {
    a.wrapping_mul(b)
}

/// Write `input[i] * input[i]` into `out[i]`.
///
/// `out` must be exactly as long as `input`.
pub fn square_into(input: &[i64], out: &mut [i64]) {
    debug_assert_eq!(input.len(), out.len());
    for (dst, &v) in out.iter_mut().zip(input) {
        *dst = square(v);
    }
}

/// Write `a[i] * b[i]` into `out[i]`.
///
/// All three slices must have the same length.
pub fn mult_into(a: &[i64], b: &[i64], out: &mut [i64]) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), out.len());
    for ((dst, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *dst = mult(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_scalars() {
        assert_eq!(square(5), 25);
        assert_eq!(square(-7), 49);
        assert_eq!(square(0), 0);
        assert_eq!(mult(3, 4), 12);
        assert_eq!(mult(-3, 4), -12);
    }

    #[test]
    fn test_scalar_identities() {
        for v in -1000i64..=1000 {
            assert_eq!(square(v), v * v);
            assert_eq!(mult(v, 1), v);
            assert_eq!(mult(v, v), square(v));
            assert_eq!(mult(v, -3), v * -3);
        }
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(square(i64::MAX), 1);
        assert_eq!(mult(i64::MIN, -1), i64::MIN);
        assert_eq!(square(1 << 32), 0);
    }

    #[test]
    fn test_square_into() {
        let mut out = [0i64; 4];
        square_into(&[1, 2, 3, -4], &mut out);
        assert_eq!(out, [1, 4, 9, 16]);
    }

    #[test]
    fn test_mult_into() {
        let mut out = [0i64; 3];
        mult_into(&[1, 2, 3], &[4, 5, 6], &mut out);
        assert_eq!(out, [4, 10, 18]);
    }

    #[test]
    fn test_into_kernels_match_scalars() {
        let a: Vec<i64> = (-50..50).collect();
        let b: Vec<i64> = (0..100).map(|i| i * 7 - 300).collect();

        let mut out = vec![0; a.len()];
        square_into(&a, &mut out);
        for i in 0..a.len() {
            assert_eq!(out[i], square(a[i]));
        }

        mult_into(&a, &b, &mut out);
        for i in 0..a.len() {
            assert_eq!(out[i], a[i] * b[i]);
        }
    }
}
