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

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("Error opening {path:?}: {err}")]
    Open {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("Error creating {path:?}: {err}")]
    Create {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("Error reading {path:?}: {err}")]
    Read {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("Error writing {path:?}: {err}")]
    Write {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}

impl FsError {
    pub fn path(&self) -> &Path {
        match self {
            FsError::Open { path, .. }
            | FsError::Create { path, .. }
            | FsError::Read { path, .. }
            | FsError::Write { path, .. } => path,
        }
    }

    pub fn io_error(&self) -> &std::io::Error {
        match self {
            FsError::Open { err, .. }
            | FsError::Create { err, .. }
            | FsError::Read { err, .. }
            | FsError::Write { err, .. } => err,
        }
    }
}

/// Resolves `path` against the current working directory.
/// Falls back to the path as-is if cwd is unavailable.
pub fn to_abs_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        return path.to_path_buf();
    }

    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(err) => {
            tracing::warn!("unable to resolve current dir for {:?}: {}", path, err);
            path.to_path_buf()
        }
    }
}

/// Opens an existing file for buffered reading.
pub fn open_reader(path: impl AsRef<Path>) -> Result<BufReader<File>, FsError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| FsError::Open {
        path: path.to_path_buf(),
        err,
    })?;
    tracing::trace!("opened {:?} for reading", path);

    Ok(BufReader::new(file))
}

/// Creates `path` (truncating an existing file) for buffered writing.
/// Parent directories are not created.
pub fn create_writer(path: impl AsRef<Path>) -> Result<BufWriter<File>, FsError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| FsError::Create {
        path: path.to_path_buf(),
        err,
    })?;
    tracing::trace!("created {:?} for writing", path);

    Ok(BufWriter::new(file))
}

pub fn read_to_string(path: impl AsRef<Path>) -> Result<String, FsError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|err| FsError::Read {
        path: path.to_path_buf(),
        err,
    })
}
