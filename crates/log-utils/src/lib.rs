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

use tracing::metadata::Level;
use tracing_subscriber::filter::Directive;

fn default_directives() -> Vec<Directive> {
    let namespaces = vec![
        "trace_stats=info",
        "stimuli_gen=info",
        "tool_config=info",
        "fs_utils=info",
        "config=warn",
    ];

    namespaces
        .into_iter()
        .map(|ns| {
            ns.trim()
                .parse()
                .unwrap_or_else(|e| panic!("cannot parse {ns} to Directive: {e}"))
        })
        .collect()
}

/// Enables logs to stderr at `info`, honoring `RUST_LOG`.
pub fn enable_logs() {
    enable_logs_for(LogSpec::default())
}

#[derive(Debug)]
pub struct LogSpec {
    level: Level,
    directives: Vec<Directive>,
}

impl Default for LogSpec {
    fn default() -> Self {
        Self::new(vec![]).with_defaults().with_level(Level::INFO)
    }
}

impl LogSpec {
    pub fn new(directives: Vec<Directive>) -> Self {
        Self {
            level: Level::INFO,
            directives,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;

        self
    }

    pub fn with_defaults(mut self) -> Self {
        self.directives = default_directives()
            .into_iter()
            .chain(self.directives)
            .collect();

        self
    }

    pub fn with_directives(mut self, directives: Vec<Directive>) -> Self {
        self.directives = self.directives.into_iter().chain(directives).collect();

        self
    }

    /// Directives in effect: `RUST_LOG` replaces the built-in ones when it
    /// names anything, so a bare `RUST_LOG=debug` reaches every crate.
    fn effective_directives(&self, rust_log: &str) -> Vec<Directive> {
        let from_env: Vec<Directive> = rust_log
            .split(',')
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .filter_map(|d| match d.parse::<Directive>() {
                Ok(d) => Some(d),
                Err(e) => {
                    eprintln!("ignoring invalid RUST_LOG directive {d:?}: {e}");
                    None
                }
            })
            .collect();

        if from_env.is_empty() {
            self.directives.clone()
        } else {
            from_env
        }
    }

    fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let rust_log = std::env::var("RUST_LOG").unwrap_or_default();

        let mut filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(self.level.into())
            .parse_lossy("");
        for d in self.effective_directives(&rust_log) {
            filter = filter.add_directive(d);
        }

        filter
    }
}

/// Installs a global fmt subscriber writing to stderr, so stdout stays
/// reserved for tool output. A second call is a no-op.
pub fn enable_logs_for(spec: LogSpec) {
    let filter = spec.env_filter();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(filter)
        .try_init()
        .ok();
}
