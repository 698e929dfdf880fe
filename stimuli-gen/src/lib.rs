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

#![warn(rust_2018_idioms)]
#![deny(
    dead_code,
    nonstandard_style,
    unused_imports,
    unused_mut,
    unused_variables,
    unused_unsafe,
    unreachable_patterns
)]

mod config;
mod error;
pub mod header;
mod matrix;
mod params;
mod stimuli;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use config::{StimuliArgs, StimuliConfig, DEFAULT_OUTPUT, TOOL};
pub use error::StimuliError;
pub use header::{parse_header, parse_header_file, write_header, write_header_file, ParsedHeader};
pub use matrix::Matrix;
pub use params::{StimuliParams, DEFAULT_SIZE, MAX_SIZE, RANGE_BUDGET};
pub use stimuli::Stimuli;

/// Generates stimuli per `config` and writes the header.
pub fn run(config: &StimuliConfig) -> Result<Stimuli, StimuliError> {
    let params = config.params()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(
        size = params.size(),
        range = params.range(),
        seed = ?config.seed,
        "generating stimuli"
    );

    let stimuli = Stimuli::generate(params, &mut rng)?;
    write_header_file(&config.output, &stimuli, &config.section)?;

    if config.verify {
        let parsed = parse_header_file(&config.output)?;
        if !parsed.matches(&stimuli) {
            return Err(StimuliError::RoundTrip {
                path: config.output.clone(),
            });
        }
        parsed.verify()?;
        tracing::info!("verified {:?}", config.output);
    }

    Ok(stimuli)
}
