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

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::counter::StoreCounts;
use crate::error::TraceStatsError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// `sw: N` / `sh: N` / `sb: N`
    #[default]
    Text,
    /// `{"sw":N,"sh":N,"sb":N}`
    Json,
}

pub fn render(counts: &StoreCounts, format: ReportFormat) -> Result<String, TraceStatsError> {
    match format {
        ReportFormat::Text => Ok(counts.to_string()),
        ReportFormat::Json => {
            let mut json =
                serde_json::to_string(counts).map_err(|err| TraceStatsError::Render { err })?;
            json.push('\n');
            Ok(json)
        }
    }
}
