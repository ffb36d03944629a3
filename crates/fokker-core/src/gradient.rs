//! Centered-difference derivative along one axis of a flat column-major field.
//!
//! Interior nodes use `(f[i+1] - f[i-1]) / 2h`; the first and last node of
//! every line use the one-sided `(f[1] - f[0]) / h` and
//! `(f[n-1] - f[n-2]) / h`. Every axis must have at least two nodes.

use crate::F;

/// Flat stride of `axis` for column-major `dims`.
pub fn axis_stride(dims: &[usize], axis: usize) -> usize {
    dims[..axis].iter().product()
}

/// Flat index of the first node of every line running along `axis`.
pub fn line_starts(dims: &[usize], axis: usize) -> impl Iterator<Item = usize> {
    let n = dims[axis];
    let stride = axis_stride(dims, axis);
    let total: usize = dims.iter().product();
    (0..total).filter(move |idx| (idx / stride) % n == 0)
}

/// Writes `∂src/∂axis` into `dst`.
pub fn gradient_into(src: &[F], dst: &mut [F], dims: &[usize], axis: usize, h: F) {
    debug_assert_eq!(src.len(), dst.len());
    let n = dims[axis];
    debug_assert!(n >= 2);
    let stride = axis_stride(dims, axis);

    for start in line_starts(dims, axis) {
        let at = |i: usize| start + i * stride;

        dst[at(0)] = (src[at(1)] - src[at(0)]) / h;
        for i in 1..n - 1 {
            dst[at(i)] = (src[at(i + 1)] - src[at(i - 1)]) / (2.0 * h);
        }
        dst[at(n - 1)] = (src[at(n - 1)] - src[at(n - 2)]) / h;
    }
}

/// Centered difference at every node, with values beyond either end of a
/// line taken as zero. Applied to a flux that vanishes on the edge nodes, the
/// node-weighted sum of the result is exactly zero.
pub fn zero_padded_gradient_into(src: &[F], dst: &mut [F], dims: &[usize], axis: usize, h: F) {
    debug_assert_eq!(src.len(), dst.len());
    let n = dims[axis];
    let stride = axis_stride(dims, axis);

    for start in line_starts(dims, axis) {
        let at = |i: usize| start + i * stride;
        let value = |i: usize| if i < n { src[at(i)] } else { 0.0 };

        for i in 0..n {
            let below = if i == 0 { 0.0 } else { src[at(i - 1)] };
            dst[at(i)] = (value(i + 1) - below) / (2.0 * h);
        }
    }
}

pub fn gradient(src: &[F], dims: &[usize], axis: usize, h: F) -> Vec<F> {
    let mut dst = vec![0.0; src.len()];
    gradient_into(src, &mut dst, dims, axis, h);
    dst
}

/// Zeroes the first and last node of every line along `axis`.
pub fn zero_edges(field: &mut [F], dims: &[usize], axis: usize) {
    let n = dims[axis];
    let stride = axis_stride(dims, axis);
    for start in line_starts(dims, axis) {
        field[start] = 0.0;
        field[start + (n - 1) * stride] = 0.0;
    }
}
