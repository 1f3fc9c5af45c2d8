//! Row-wise real-input FFT wrapper around rustfft.
//!
//! Convention matches numpy `rfft` along the last axis:
//! unnormalized, non-negative frequencies only.

use ndarray::Array2;
use num_complex::Complex64;
use rustfft::FftPlanner;

/// Forward real FFT of every row.
///
/// Output shape is `[nrows, ncols / 2 + 1]`; an input with no columns
/// yields no columns.
pub fn rfft_rows(input: &Array2<f64>) -> Array2<Complex64> {
    let (nrows, ncols) = input.dim();
    if ncols == 0 {
        return Array2::zeros((nrows, 0));
    }
    let n_out = ncols / 2 + 1;

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(ncols);

    let mut output = Array2::zeros((nrows, n_out));
    let mut buffer = vec![Complex64::new(0.0, 0.0); ncols];

    for (row, mut out_row) in input.rows().into_iter().zip(output.rows_mut()) {
        for (slot, &v) in buffer.iter_mut().zip(row.iter()) {
            *slot = Complex64::new(v, 0.0);
        }
        fft.process(&mut buffer);
        for (dst, src) in out_row.iter_mut().zip(buffer.iter()) {
            *dst = *src;
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    /// Direct O(N²) DFT of one real row, first `n/2 + 1` coefficients.
    fn naive_rdft(row: &[f64]) -> Vec<Complex64> {
        let n = row.len();
        (0..n / 2 + 1)
            .map(|m| {
                row.iter()
                    .enumerate()
                    .map(|(k, &v)| {
                        let phase = -2.0 * PI * (m * k) as f64 / n as f64;
                        Complex64::new(v * phase.cos(), v * phase.sin())
                    })
                    .sum()
            })
            .collect()
    }

    #[test]
    fn test_rfft_output_shape() {
        let odd = Array2::<f64>::zeros((3, 9));
        assert_eq!(rfft_rows(&odd).dim(), (3, 5));
        let even = Array2::<f64>::zeros((2, 8));
        assert_eq!(rfft_rows(&even).dim(), (2, 5));
        let empty = Array2::<f64>::zeros((4, 0));
        assert_eq!(rfft_rows(&empty).dim(), (4, 0));
    }

    #[test]
    fn test_rfft_matches_naive_dft() {
        let input = Array2::from_shape_fn((4, 11), |(i, j)| {
            ((i + 1) as f64 * 0.3 * j as f64).sin() + 0.1 * (i * j) as f64
        });
        let spectrum = rfft_rows(&input);
        for (i, row) in input.rows().into_iter().enumerate() {
            let expected = naive_rdft(&row.to_vec());
            for (m, e) in expected.iter().enumerate() {
                assert!(
                    (spectrum[[i, m]] - e).norm() < 1e-10,
                    "row {i} mode {m}: {} vs {e}",
                    spectrum[[i, m]]
                );
            }
        }
    }

    #[test]
    fn test_rfft_dc_component() {
        // For a constant row, mode 0 is N*value and all others vanish
        let n = 12;
        let val = 2.5;
        let input = Array2::from_elem((1, n), val);
        let spectrum = rfft_rows(&input);
        assert!((spectrum[[0, 0]].re - n as f64 * val).abs() < 1e-12);
        assert!(spectrum[[0, 0]].im.abs() < 1e-12);
        for m in 1..spectrum.ncols() {
            assert!(spectrum[[0, m]].norm() < 1e-12, "mode {m} should vanish");
        }
    }

    #[test]
    fn test_rfft_single_cosine() {
        // cos(3θ) sampled on 16 points puts N/2 into mode 3
        let n = 16;
        let input = Array2::from_shape_fn((1, n), |(_, j)| (3.0 * 2.0 * PI * j as f64 / n as f64).cos());
        let spectrum = rfft_rows(&input);
        assert!((spectrum[[0, 3]].re - n as f64 / 2.0).abs() < 1e-10);
        for m in (0..spectrum.ncols()).filter(|&m| m != 3) {
            assert!(spectrum[[0, m]].norm() < 1e-10, "mode {m} leaked");
        }
    }
}
