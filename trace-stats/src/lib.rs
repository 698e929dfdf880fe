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
mod counter;
mod error;
mod report;
mod store_width;

pub use config::{TraceStatsArgs, TraceStatsConfig, DEFAULT_TRACE_PATH, TOOL};
pub use counter::{count_file, count_lines, StoreCounts};
pub use error::TraceStatsError;
pub use report::{render, ReportFormat};
pub use store_width::StoreWidth;

/// Counts the configured trace and renders the report.
pub fn run(config: &TraceStatsConfig) -> Result<String, TraceStatsError> {
    let counts = count_file(&config.input)?;
    render(&counts, config.format)
}
