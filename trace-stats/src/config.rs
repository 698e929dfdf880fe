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

use clap::Parser;
use serde::{Deserialize, Serialize};

use tool_config::{ConfigArgs, ToolSpec};

use crate::report::ReportFormat;

pub const TOOL: ToolSpec = ToolSpec {
    name: "trace-stats",
    env_prefix: "TRACE_STATS",
};

pub const DEFAULT_TRACE_PATH: &str = "../build/trace_core_000003e0.log";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TraceStatsConfig {
    #[serde(default = "default_input")]
    pub input: PathBuf,
    #[serde(default)]
    pub format: ReportFormat,
    #[serde(default)]
    pub print_config: bool,
}

impl Default for TraceStatsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            format: ReportFormat::default(),
            print_config: false,
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_TRACE_PATH)
}

#[derive(Parser, Debug, Serialize, Clone)]
pub struct TraceStatsArgs {
    #[arg(
        short('i'),
        long,
        id = "INPUT",
        help = "trace log to scan",
        value_name = "PATH",
        display_order = 1
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<PathBuf>,
    #[arg(
        short('f'),
        long,
        id = "FORMAT",
        help = "report format",
        value_enum,
        display_order = 2
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<ReportFormat>,
    #[arg(
        short('c'),
        long,
        id = "CONFIG_FILE",
        help = "TOML configuration file",
        value_name = "PATH",
        display_order = 3
    )]
    #[serde(skip)]
    config: Vec<PathBuf>,
    #[arg(
        long,
        id = "PRINT_CONFIG",
        help = "Print applied config",
        display_order = 4,
        action = clap::ArgAction::SetTrue
    )]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    print_config: bool,
}

impl ConfigArgs for TraceStatsArgs {
    fn config_files(&self) -> Vec<PathBuf> {
        self.config.clone()
    }
}
