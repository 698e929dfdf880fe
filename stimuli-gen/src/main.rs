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

use eyre::WrapErr;

use stimuli_gen::{StimuliArgs, StimuliConfig, TOOL};
use tool_config::{load_config, print_config, ConfigData};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
const PKG_NAME: &str = env!("CARGO_PKG_NAME");

fn main() -> eyre::Result<()> {
    log_utils::enable_logs();

    let config_data = ConfigData {
        binary_name: PKG_NAME.to_string(),
        version: VERSION.to_string(),
        authors: format!("by {AUTHORS}"),
        description: DESCRIPTION.to_string(),
    };
    let config: StimuliConfig = load_config::<StimuliArgs, _>(&TOOL, Some(config_data))?;

    if config.print_config {
        print_config(&TOOL, &config)?;
    }

    stimuli_gen::run(&config)
        .wrap_err_with(|| format!("failed to generate stimuli into {:?}", config.output))?;

    Ok(())
}
