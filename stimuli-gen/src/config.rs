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

use crate::error::Result;
use crate::header::DEFAULT_SECTION;
use crate::params::{StimuliParams, DEFAULT_SIZE};

pub const TOOL: ToolSpec = ToolSpec {
    name: "stimuli-gen",
    env_prefix: "STIMULI",
};

pub const DEFAULT_OUTPUT: &str = "MatrixMul32_stimuli.h";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StimuliConfig {
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_size")]
    pub size: usize,
    /// Overrides the range derived from `size`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<u32>,
    /// Fixed seed for reproducible output; entropy otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default = "default_section")]
    pub section: String,
    /// Read the written header back and check it
    #[serde(default)]
    pub verify: bool,
    #[serde(default)]
    pub print_config: bool,
}

impl Default for StimuliConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            size: default_size(),
            range: None,
            seed: None,
            section: default_section(),
            verify: false,
            print_config: false,
        }
    }
}

impl StimuliConfig {
    pub fn params(&self) -> Result<StimuliParams> {
        let params = StimuliParams::new(self.size);
        let params = match self.range {
            Some(range) => params.with_range(range),
            None => params,
        };
        params.validate()?;

        Ok(params)
    }
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_size() -> usize {
    DEFAULT_SIZE
}

fn default_section() -> String {
    DEFAULT_SECTION.to_string()
}

#[derive(Parser, Debug, Serialize, Clone)]
pub struct StimuliArgs {
    #[arg(
        short('o'),
        long,
        id = "OUTPUT",
        help = "header file to write",
        value_name = "PATH",
        help_heading = "Output",
        display_order = 1
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<PathBuf>,
    #[arg(
        long,
        id = "SECTION",
        help = "linker section for the working buffers",
        value_name = "NAME",
        help_heading = "Output",
        display_order = 2
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<String>,
    #[arg(
        long,
        id = "VERIFY",
        help = "parse the written header back and check m_exp",
        help_heading = "Output",
        display_order = 3,
        action = clap::ArgAction::SetTrue
    )]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    verify: bool,
    #[arg(
        short('s'),
        long,
        id = "SIZE",
        help = "matrix dimension",
        value_name = "N",
        help_heading = "Matrices",
        display_order = 4
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<usize>,
    #[arg(
        short('r'),
        long,
        id = "RANGE",
        help = "elements are drawn from [-RANGE, RANGE-1] (default 32768 / SIZE)",
        value_name = "N",
        help_heading = "Matrices",
        display_order = 5
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<u32>,
    #[arg(
        long,
        id = "SEED",
        help = "seed for reproducible stimuli",
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(..=i64::MAX as u64),
        help_heading = "Matrices",
        display_order = 6
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[arg(
        short('c'),
        long,
        id = "CONFIG_FILE",
        help = "TOML configuration file",
        value_name = "PATH",
        help_heading = "Configuration",
        display_order = 7
    )]
    #[serde(skip)]
    config: Vec<PathBuf>,
    #[arg(
        long,
        id = "PRINT_CONFIG",
        help = "Print applied config",
        help_heading = "Configuration",
        display_order = 8,
        action = clap::ArgAction::SetTrue
    )]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    print_config: bool,
}

impl ConfigArgs for StimuliArgs {
    fn config_files(&self) -> Vec<PathBuf> {
        self.config.clone()
    }
}
