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

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Command};
use config::{Config, Environment, File, FileFormat, FileSourceFile};
use eyre::WrapErr;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Command-line arguments that double as the highest-priority config source.
///
/// Implementors serialize only the values actually passed on the command
/// line (`None` and unset flags must be skipped), otherwise they would
/// shadow values coming from files and env.
pub trait ConfigArgs: Args + Serialize {
    /// TOML files passed explicitly, in order of increasing priority.
    fn config_files(&self) -> Vec<PathBuf>;
}

/// Static description of a tool: how it is named and which env vars it reads.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    /// Prefix for env overrides, e.g. `STIMULI` for `STIMULI_SIZE=16`
    pub env_prefix: &'static str,
}

impl ToolSpec {
    /// Env var holding comma-separated TOML config paths.
    pub fn config_env_var(&self) -> String {
        format!("{}_CONFIG", self.env_prefix)
    }
}

pub struct ConfigData {
    pub binary_name: String,
    pub version: String,
    pub authors: String,
    pub description: String,
}

/// Hierarchically loads the configuration using args and envs.
/// The source order is:
///  - Load and parse files provided by `<PREFIX>_CONFIG` env var
///  - Load and parse files provided by --config arg
///  - Load config values from `<PREFIX>_*` env vars
///  - Load config values from args
/// On each stage the values override the previous ones. Anything left
/// unset falls back to the serde defaults of `C`.
pub fn load_config<A, C>(spec: &ToolSpec, data: Option<ConfigData>) -> eyre::Result<C>
where
    A: ConfigArgs,
    C: DeserializeOwned,
{
    let raw_args = std::env::args_os().collect::<Vec<_>>();
    load_config_with_args::<A, C>(spec, raw_args, data)
}

pub fn load_config_with_args<A, C>(
    spec: &ToolSpec,
    raw_args: Vec<OsString>,
    data: Option<ConfigData>,
) -> eyre::Result<C>
where
    A: ConfigArgs,
    C: DeserializeOwned,
{
    let args: A = process_args(spec, raw_args, data)?;

    let arg_config_sources: Vec<File<FileSourceFile, FileFormat>> = args
        .config_files()
        .into_iter()
        .map(|path| File::from(path).format(FileFormat::Toml))
        .collect();

    let env_config_sources: Vec<File<FileSourceFile, FileFormat>> =
        std::env::var_os(spec.config_env_var())
            .and_then(|str| str.into_string().ok())
            .map(|str| {
                str.trim()
                    .split(',')
                    .filter(|path| !path.is_empty())
                    .map(PathBuf::from)
                    .map(|path| File::from(path).format(FileFormat::Toml))
                    .collect()
            })
            .unwrap_or_default();

    let env_source = Environment::with_prefix(spec.env_prefix)
        .try_parsing(true)
        .prefix_separator("_")
        .separator("__");

    let arg_source = Config::try_from(&args).wrap_err("invalid command line arguments")?;

    let mut config_builder = Config::builder();
    for source in env_config_sources {
        config_builder = config_builder.add_source(source)
    }
    for source in arg_config_sources {
        config_builder = config_builder.add_source(source)
    }
    config_builder = config_builder.add_source(env_source).add_source(arg_source);
    let config = config_builder
        .build()
        .wrap_err_with(|| format!("failed to load {} config", spec.name))?;

    let config: C = config
        .try_deserialize()
        .wrap_err_with(|| format!("invalid {} config", spec.name))?;

    Ok(config)
}

fn process_args<A: ConfigArgs>(
    spec: &ToolSpec,
    raw_args: Vec<OsString>,
    data: Option<ConfigData>,
) -> eyre::Result<A> {
    let command = Command::new(spec.name);
    let command = if let Some(data) = data {
        command
            .version(data.version)
            .author(data.authors)
            .about(data.description)
            .override_usage(format!("{} [FLAGS] [OPTIONS]", data.binary_name))
    } else {
        command
    };

    let raw_cli_config = <A as Args>::augment_args(command);
    let matches = raw_cli_config.get_matches_from(raw_args);
    let arg_source = <A as clap::FromArgMatches>::from_arg_matches(&matches)?;
    Ok(arg_source)
}

/// Renders the effective config as TOML, for `--print-config`.
pub fn render_config<C: Serialize>(config: &C) -> eyre::Result<String> {
    toml::to_string_pretty(config).wrap_err("failed to render config as toml")
}

/// Logs the effective config at `info` level.
pub fn print_config<C: Serialize>(spec: &ToolSpec, config: &C) -> eyre::Result<()> {
    let rendered = render_config(config)?;
    tracing::info!("Loaded {} config:\n{}", spec.name, rendered);
    Ok(())
}
