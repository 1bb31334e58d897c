//! Feature standardization.

use crate::error::{Error, Result};
use ndarray::{Array2, Axis};

/// Row-major feature rows as an `n × d` array.
pub(crate) fn to_array(data: &[Vec<f64>]) -> Result<Array2<f64>> {
    let first = data.first().ok_or(Error::EmptyInput)?;
    let (n, d) = (data.len(), first.len());

    let mut flat: Vec<f64> = Vec::with_capacity(n * d);
    for row in data {
        if row.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: row.len(),
            });
        }
        flat.extend(row);
    }
    Array2::from_shape_vec((n, d), flat).map_err(|_| Error::DimensionMismatch {
        expected: n * d,
        found: data.iter().map(Vec::len).sum(),
    })
}

/// Scale every column to zero mean and unit (population) variance.
///
/// Constant columns are only centred.
pub fn standardize(data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let mut arr = to_array(data)?;
    let mean = arr.mean_axis(Axis(0)).ok_or(Error::EmptyInput)?;
    let std = arr.std_axis(Axis(0), 0.0);

    for mut row in arr.rows_mut() {
        for ((x, &mu), &sd) in row.iter_mut().zip(mean.iter()).zip(std.iter()) {
            let scale = if sd > 0.0 { sd } else { 1.0 };
            *x = (*x - mu) / scale;
        }
    }
    Ok(arr.rows().into_iter().map(|r| r.to_vec()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_have_zero_mean_unit_variance() {
        let data = vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]];
        let z = standardize(&data).unwrap();
        for col in 0..2 {
            let mean: f64 = z.iter().map(|r| r[col]).sum::<f64>() / 3.0;
            let var: f64 = z.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / 3.0;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_column_is_centred() {
        let data = vec![vec![5.0, 1.0], vec![5.0, 2.0]];
        let z = standardize(&data).unwrap();
        assert_eq!(z[0][0], 0.0);
        assert_eq!(z[1][0], 0.0);
    }

    #[test]
    fn ragged_rows_rejected() {
        let data = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            standardize(&data),
            Err(Error::DimensionMismatch { expected: 2, found: 1 })
        ));
        assert!(matches!(standardize(&[]), Err(Error::EmptyInput)));
    }
}
