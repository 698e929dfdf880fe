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

/// Matrix dimension used by the MatrixMul32 test.
pub const DEFAULT_SIZE: usize = 24;

/// Largest matrix dimension accepted, for generation and when reading a
/// header back.
pub const MAX_SIZE: usize = 1024;

/// Elements are drawn from `[-RANGE_BUDGET / size, RANGE_BUDGET / size - 1]`.
pub const RANGE_BUDGET: u32 = 1 << 15;

/// Shape and value bound of a stimuli set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StimuliParams {
    size: usize,
    range: u32,
}

impl Default for StimuliParams {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl StimuliParams {
    /// Derives the range from `size`. Sizes above `RANGE_BUDGET` yield a
    /// zero range; both those and sizes above `MAX_SIZE` are rejected by
    /// `validate`.
    pub fn new(size: usize) -> Self {
        let range = match u32::try_from(size) {
            Ok(size) if size > 0 => RANGE_BUDGET / size,
            _ => 0,
        };

        Self { size, range }
    }

    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn range(&self) -> u32 {
        self.range
    }

    pub fn len(&self) -> usize {
        self.size * self.size
    }

    /// Largest magnitude a single product element can reach:
    /// `size` terms of `(-range) * (-range)`.
    pub fn worst_case_dot(&self) -> u128 {
        let range = u128::from(self.range);
        self.size as u128 * range * range
    }

    /// Checks the size ceiling, and that every generated element and every
    /// product element fits the 32-bit `int` of the target.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(StimuliError::InvalidSize);
        }
        if self.size > MAX_SIZE {
            return Err(StimuliError::SizeTooLarge {
                size: self.size,
                max: MAX_SIZE,
            });
        }
        if self.range == 0 {
            return Err(StimuliError::InvalidRange { size: self.size });
        }

        let worst_case = self.worst_case_dot();
        if worst_case > i32::MAX as u128 {
            return Err(StimuliError::RangeOverflow {
                size: self.size,
                range: self.range,
                worst_case,
            });
        }

        Ok(())
    }

    /// Inclusive lower and exclusive upper bound of generated elements.
    pub(crate) fn bounds(&self) -> (i32, i32) {
        // validate() guarantees range^2 <= i32::MAX, so range fits
        let range = self.range as i32;
        (-range, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_matrix_mul32() {
        let params = StimuliParams::default();
        assert_eq!(params.size(), 24);
        assert_eq!(params.range(), 1365);
        assert_eq!(params.len(), 576);
        assert!(params.validate().is_ok());
        assert_eq!(params.bounds(), (-1365, 1365));
    }

    #[test]
    fn derived_range_never_overflows() {
        for size in [1, 2, 3, 7, 24, 64, 100, 1000, MAX_SIZE] {
            let params = StimuliParams::new(size);
            assert!(params.validate().is_ok(), "size {size}");
            assert!(params.worst_case_dot() <= 1 << 30);
        }
    }

    #[test]
    fn rejects_degenerate_params() {
        assert!(matches!(
            StimuliParams::new(0).validate(),
            Err(StimuliError::InvalidSize)
        ));
        assert!(matches!(
            StimuliParams::new(4).with_range(0).validate(),
            Err(StimuliError::InvalidRange { size: 4 })
        ));
    }

    #[test]
    fn rejects_sizes_above_ceiling() {
        assert!(StimuliParams::new(MAX_SIZE).validate().is_ok());

        for size in [MAX_SIZE + 1, 32768, 40_000] {
            let result = StimuliParams::new(size).with_range(1).validate();
            assert!(
                matches!(
                    result,
                    Err(StimuliError::SizeTooLarge { size: s, max: MAX_SIZE }) if s == size
                ),
                "size {size}: {result:?}"
            );
        }
    }

    #[test]
    fn flags_range_that_overflows_int() {
        // 24 * 10_000^2 = 2.4e9 > i32::MAX
        let err = StimuliParams::new(24)
            .with_range(10_000)
            .validate()
            .unwrap_err();
        match err {
            StimuliError::RangeOverflow {
                size,
                range,
                worst_case,
            } => {
                assert_eq!((size, range), (24, 10_000));
                assert_eq!(worst_case, 2_400_000_000);
            }
            other => panic!("unexpected error {other:?}"),
        }

        // 24 * 9_000^2 = 1.944e9 still fits
        assert!(StimuliParams::new(24).with_range(9_000).validate().is_ok());
    }
}
