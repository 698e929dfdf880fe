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

use serde::{Deserialize, Serialize};

/// Width of a RISC-V store, identified in a trace by its mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreWidth {
    Byte,
    Half,
    Word,
}

impl StoreWidth {
    /// Matching order: a line is attributed to the first width whose
    /// mnemonic it contains.
    pub const PRIORITY: [StoreWidth; 3] = [StoreWidth::Byte, StoreWidth::Half, StoreWidth::Word];

    /// Order in which totals are reported.
    pub const REPORT_ORDER: [StoreWidth; 3] =
        [StoreWidth::Word, StoreWidth::Half, StoreWidth::Byte];

    pub fn mnemonic(self) -> &'static str {
        match self {
            StoreWidth::Byte => "sb",
            StoreWidth::Half => "sh",
            StoreWidth::Word => "sw",
        }
    }

    /// Attributes a trace line to at most one store width.
    pub fn classify(line: &[u8]) -> Option<StoreWidth> {
        Self::PRIORITY
            .into_iter()
            .find(|width| contains(line, width.mnemonic().as_bytes()))
    }
}

impl fmt::Display for StoreWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
