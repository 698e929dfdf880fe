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

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::params::StimuliParams;

/// Operands and expected product for one MatrixMul32 run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stimuli {
    pub params: StimuliParams,
    pub a: Matrix,
    pub b: Matrix,
    pub expected: Matrix,
}

impl Stimuli {
    /// Draws A and B uniformly from the params' bounds, one element of each
    /// per cell in row-major order, then computes `expected = A x B`.
    pub fn generate<R: Rng + ?Sized>(params: StimuliParams, rng: &mut R) -> Result<Self> {
        params.validate()?;

        let (low, high) = params.bounds();
        let between = Uniform::new(low, high);

        let mut a = Vec::with_capacity(params.len());
        let mut b = Vec::with_capacity(params.len());
        for _ in 0..params.len() {
            a.push(between.sample(rng));
            b.push(between.sample(rng));
        }

        let a = Matrix::from_vec(params.size(), a)?;
        let b = Matrix::from_vec(params.size(), b)?;
        let expected = a.multiply(&b)?;

        tracing::debug!(
            size = params.size(),
            range = params.range(),
            "generated stimuli"
        );

        Ok(Self {
            params,
            a,
            b,
            expected,
        })
    }
}
