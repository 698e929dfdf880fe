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

use std::io::Write;

use eyre::WrapErr;

use tool_config::{load_config, print_config, ConfigData};
use trace_stats::{TraceStatsArgs, TraceStatsConfig, TOOL};

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
    let config: TraceStatsConfig = load_config::<TraceStatsArgs, _>(&TOOL, Some(config_data))?;

    if config.print_config {
        print_config(&TOOL, &config)?;
    }

    let report = trace_stats::run(&config)
        .wrap_err_with(|| format!("failed to count stores in {:?}", config.input))?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(report.as_bytes())
        .wrap_err("failed to write report")?;
    stdout.flush().wrap_err("failed to write report")?;

    Ok(())
}
