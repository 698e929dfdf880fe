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

use std::fmt;
use std::io::BufRead;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TraceStatsError;
use crate::store_width::StoreWidth;

/// Per-width line totals gathered in one pass over a trace.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCounts {
    pub sw: u64,
    pub sh: u64,
    pub sb: u64,
}

impl StoreCounts {
    pub fn record(&mut self, width: StoreWidth) {
        *self.slot(width) += 1;
    }

    pub fn get(&self, width: StoreWidth) -> u64 {
        match width {
            StoreWidth::Byte => self.sb,
            StoreWidth::Half => self.sh,
            StoreWidth::Word => self.sw,
        }
    }

    pub fn total(&self) -> u64 {
        self.sw + self.sh + self.sb
    }

    fn slot(&mut self, width: StoreWidth) -> &mut u64 {
        match width {
            StoreWidth::Byte => &mut self.sb,
            StoreWidth::Half => &mut self.sh,
            StoreWidth::Word => &mut self.sw,
        }
    }
}

/// `sw: N`, `sh: N`, `sb: N`, one per line.
impl fmt::Display for StoreCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for width in StoreWidth::REPORT_ORDER {
            writeln!(f, "{}: {}", width, self.get(width))?;
        }
        Ok(())
    }
}

/// Counts store lines until EOF. Lines are compared as raw bytes, the
/// line terminator included.
pub fn count_lines<R: BufRead>(mut reader: R) -> std::io::Result<StoreCounts> {
    let mut counts = StoreCounts::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if let Some(width) = StoreWidth::classify(&line) {
            counts.record(width);
        }
    }

    Ok(counts)
}

pub fn count_file(path: impl AsRef<Path>) -> Result<StoreCounts, TraceStatsError> {
    let path = path.as_ref();
    tracing::debug!("counting stores in {:?}", path);

    let reader = fs_utils::open_reader(path).map_err(TraceStatsError::Open)?;
    let counts = count_lines(reader).map_err(|err| TraceStatsError::Read {
        path: path.to_path_buf(),
        err,
    })?;

    tracing::info!(
        sw = counts.sw,
        sh = counts.sh,
        sb = counts.sb,
        "counted {} store lines in {:?}",
        counts.total(),
        path
    );

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn count(text: &str) -> StoreCounts {
        count_lines(Cursor::new(text.as_bytes())).unwrap()
    }

    #[test]
    fn one_of_each() {
        let counts = count("xsbx\nxshx\nxswx\nnone\n");
        assert_eq!(counts, StoreCounts { sw: 1, sh: 1, sb: 1 });
        assert_eq!(counts.to_string(), "sw: 1\nsh: 1\nsb: 1\n");
    }

    #[test]
    fn line_with_sb_and_sw_counts_as_sb() {
        let counts = count("sw x1, 4(x2) sb\n");
        assert_eq!(counts, StoreCounts { sw: 0, sh: 0, sb: 1 });
    }

    #[test]
    fn last_line_without_newline() {
        let counts = count("sw\nsw");
        assert_eq!(counts.sw, 2);
    }

    #[test]
    fn mnemonic_split_across_lines_does_not_count() {
        let counts = count("s\nb\n");
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn empty_input() {
        let counts = count("");
        assert_eq!(counts, StoreCounts::default());
        assert_eq!(counts.to_string(), "sw: 0\nsh: 0\nsb: 0\n");
    }

    #[test]
    fn record_and_get() {
        let mut counts = StoreCounts::default();
        counts.record(StoreWidth::Half);
        counts.record(StoreWidth::Half);
        counts.record(StoreWidth::Word);
        assert_eq!(counts.get(StoreWidth::Half), 2);
        assert_eq!(counts.get(StoreWidth::Word), 1);
        assert_eq!(counts.get(StoreWidth::Byte), 0);
        assert_eq!(counts.total(), 3);
    }
}
