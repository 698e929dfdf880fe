/*
 * Copyright 2024 Fluence Labs Limited
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use crate::error::{Result, StimuliError};

/// Square matrix of 32-bit ints stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    size: usize,
    data: Vec<i32>,
}

impl Matrix {
    pub fn from_vec(size: usize, data: Vec<i32>) -> Result<Self> {
        let expected = size
            .checked_mul(size)
            .ok_or(StimuliError::DimensionOverflow { size })?;
        if data.len() != expected {
            return Err(StimuliError::InvalidLength {
                size,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { size, data })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.data[row * self.size + col]
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i32]> + '_ {
        // chunks(0) panics, an empty matrix simply has no rows
        self.data.chunks(self.size.max(1))
    }

    /// Schoolbook `self x rhs`. Accumulates wide and fails if an element
    /// does not fit back into an `i32`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.size != rhs.size {
            return Err(StimuliError::DimensionMismatch {
                left: self.size,
                right: rhs.size,
            });
        }

        let n = self.size;
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let mut acc: i128 = 0;
                for k in 0..n {
                    acc += i128::from(self.data[i * n + k]) * i128::from(rhs.data[k * n + j]);
                }

                let value = i32::try_from(acc).map_err(|_| StimuliError::Overflow {
                    row: i,
                    col: j,
                    value: acc,
                })?;
                data.push(value);
            }
        }

        Ok(Matrix { size: n, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_2x2() {
        let a = Matrix::from_vec(2, vec![1, 2, 3, 4]).unwrap();
        let b = Matrix::from_vec(2, vec![5, 6, 7, 8]).unwrap();

        let c = a.multiply(&b).unwrap();
        assert_eq!(c.as_slice(), &[19, 22, 43, 50]);
        assert_eq!(c.get(1, 0), 43);
    }

    #[test]
    fn multiply_by_identity() {
        let a = Matrix::from_vec(3, vec![-1, 2, -3, 4, -5, 6, -7, 8, -9]).unwrap();
        let id = Matrix::from_vec(3, vec![1, 0, 0, 0, 1, 0, 0, 0, 1]).unwrap();

        assert_eq!(a.multiply(&id).unwrap(), a);
        assert_eq!(id.multiply(&a).unwrap(), a);
    }

    #[test]
    fn rows_are_row_major() {
        let a = Matrix::from_vec(2, vec![1, 2, 3, 4]).unwrap();
        let rows: Vec<&[i32]> = a.rows().collect();
        assert_eq!(rows, vec![&[1, 2][..], &[3, 4][..]]);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = Matrix::from_vec(3, vec![0; 8]).unwrap_err();
        assert!(matches!(
            err,
            StimuliError::InvalidLength {
                size: 3,
                expected: 9,
                actual: 8
            }
        ));
    }

    #[test]
    fn rejects_unrepresentable_size() {
        let size = usize::MAX / 2;
        assert!(matches!(
            Matrix::from_vec(size, vec![]),
            Err(StimuliError::DimensionOverflow { size: s }) if s == size
        ));
    }

    #[test]
    fn rejects_mismatched_sizes() {
        let a = Matrix::from_vec(1, vec![1]).unwrap();
        let b = Matrix::from_vec(2, vec![1, 2, 3, 4]).unwrap();
        assert!(matches!(
            a.multiply(&b),
            Err(StimuliError::DimensionMismatch { left: 1, right: 2 })
        ));
    }

    #[test]
    fn overflow_is_reported() {
        let a = Matrix::from_vec(2, vec![i32::MAX, i32::MAX, 0, 0]).unwrap();
        let b = Matrix::from_vec(2, vec![1, 0, 1, 0]).unwrap();

        match a.multiply(&b).unwrap_err() {
            StimuliError::Overflow { row, col, value } => {
                assert_eq!((row, col), (0, 0));
                assert_eq!(value, 2 * i32::MAX as i128);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
