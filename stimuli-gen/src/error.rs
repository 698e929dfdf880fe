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

use std::path::PathBuf;

use thiserror::Error;

use fs_utils::FsError;

pub(crate) type Result<T> = std::result::Result<T, StimuliError>;

#[derive(Debug, Error)]
pub enum StimuliError {
    #[error("matrix size must be positive")]
    InvalidSize,
    #[error("matrix size {size} exceeds the maximum of {max}")]
    SizeTooLarge { size: usize, max: usize },
    #[error("a {size}x{size} matrix does not fit in memory")]
    DimensionOverflow { size: usize },
    #[error("element range must be positive (size {size})")]
    InvalidRange { size: usize },
    #[error(
        "size {size} with range {range} can overflow a 32-bit int: worst-case dot product is {worst_case}"
    )]
    RangeOverflow {
        size: usize,
        range: u32,
        worst_case: u128,
    },
    #[error("product overflows a 32-bit int at [{row}][{col}]: {value}")]
    Overflow { row: usize, col: usize, value: i128 },
    #[error("matrix sizes differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
    #[error("a {size}x{size} matrix needs {expected} elements, got {actual}")]
    InvalidLength {
        size: usize,
        expected: usize,
        actual: usize,
    },
    #[error("malformed stimuli header: {0}")]
    Parse(String),
    #[error("expected product differs at [{row}][{col}]: header has {expected}, m_a x m_b gives {actual}")]
    Mismatch {
        row: usize,
        col: usize,
        expected: i32,
        actual: i32,
    },
    #[error("header {path:?} does not reproduce the generated matrices")]
    RoundTrip { path: PathBuf },
    #[error(transparent)]
    Io(#[from] FsError),
}
