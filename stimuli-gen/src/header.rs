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

//! C header holding MatrixMul32 stimuli.
//!
//! Layout, in order: `m_a`, `m_b` and `m_exp` as `const int` arrays with a
//! line break before every row, `#define SIZE`, then the working buffers
//! placed in a dedicated linker section:
//!
//! ```c
//! const int m_a[] = {
//! 	-12,5,
//! 	7,1,
//! };
//!
//! #define SIZE 2
//! __attribute__ ((section(".heapsram"))) int g_mA[SIZE][SIZE];
//! ```

use std::io::Write;
use std::path::Path;

use fs_utils::FsError;

use crate::error::{Result, StimuliError};
use crate::matrix::Matrix;
use crate::params::MAX_SIZE;
use crate::stimuli::Stimuli;

pub const DEFAULT_SECTION: &str = ".heapsram";

pub const OPERAND_A: &str = "m_a";
pub const OPERAND_B: &str = "m_b";
pub const EXPECTED: &str = "m_exp";

/// Working buffers the test program multiplies into.
pub const BUFFERS: [&str; 4] = ["g_mA", "g_mB", "g_mC", "g_mB_tmp"];

pub fn write_header<W: Write>(
    writer: &mut W,
    stimuli: &Stimuli,
    section: &str,
) -> std::io::Result<()> {
    write_array(writer, OPERAND_A, &stimuli.a)?;
    write_array(writer, OPERAND_B, &stimuli.b)?;
    write_array(writer, EXPECTED, &stimuli.expected)?;

    writeln!(writer, "#define SIZE {}", stimuli.params.size())?;

    for buffer in BUFFERS {
        writeln!(
            writer,
            "__attribute__ ((section(\"{section}\"))) int {buffer}[SIZE][SIZE];"
        )?;
    }

    Ok(())
}

fn write_array<W: Write>(writer: &mut W, name: &str, matrix: &Matrix) -> std::io::Result<()> {
    write!(writer, "const int {name}[] = {{")?;
    for row in matrix.rows() {
        write!(writer, "\n\t")?;
        for value in row {
            write!(writer, "{value},")?;
        }
    }
    write!(writer, "\n}};\n\n")
}

/// Creates or truncates `path` and writes the header. A failed write leaves
/// whatever was written so far in place.
pub fn write_header_file(
    path: impl AsRef<Path>,
    stimuli: &Stimuli,
    section: &str,
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = fs_utils::create_writer(path)?;

    write_header(&mut writer, stimuli, section)
        .and_then(|_| writer.flush())
        .map_err(|err| FsError::Write {
            path: path.to_path_buf(),
            err,
        })?;

    tracing::info!(
        size = stimuli.params.size(),
        "wrote stimuli header {:?}",
        fs_utils::to_abs_path(path)
    );

    Ok(())
}

/// Contents of a stimuli header read back from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    pub size: usize,
    pub a: Matrix,
    pub b: Matrix,
    pub expected: Matrix,
    /// `(section, name)` of every annotated buffer, in file order
    pub buffers: Vec<(String, String)>,
}

impl ParsedHeader {
    /// Recomputes `a x b` and compares it with the stored expectation.
    pub fn verify(&self) -> Result<()> {
        let actual = self.a.multiply(&self.b)?;

        for row in 0..self.size {
            for col in 0..self.size {
                let expected = self.expected.get(row, col);
                let actual = actual.get(row, col);
                if expected != actual {
                    return Err(StimuliError::Mismatch {
                        row,
                        col,
                        expected,
                        actual,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn matches(&self, stimuli: &Stimuli) -> bool {
        self.size == stimuli.params.size()
            && self.a == stimuli.a
            && self.b == stimuli.b
            && self.expected == stimuli.expected
    }
}

pub fn parse_header(text: &str) -> Result<ParsedHeader> {
    let size = parse_size(text)?;

    let a = Matrix::from_vec(size, parse_array(text, OPERAND_A)?)?;
    let b = Matrix::from_vec(size, parse_array(text, OPERAND_B)?)?;
    let expected = Matrix::from_vec(size, parse_array(text, EXPECTED)?)?;

    let buffers = text
        .lines()
        .filter_map(|line| parse_buffer(line.trim()))
        .collect::<Result<Vec<_>>>()?;

    Ok(ParsedHeader {
        size,
        a,
        b,
        expected,
        buffers,
    })
}

pub fn parse_header_file(path: impl AsRef<Path>) -> Result<ParsedHeader> {
    let text = fs_utils::read_to_string(path)?;
    parse_header(&text)
}

fn parse_size(text: &str) -> Result<usize> {
    let value = text
        .lines()
        .find_map(|line| line.trim().strip_prefix("#define SIZE "))
        .ok_or_else(|| StimuliError::Parse("missing #define SIZE".to_string()))?;

    let size: usize = value
        .trim()
        .parse()
        .map_err(|err| StimuliError::Parse(format!("invalid SIZE {value:?}: {err}")))?;
    if size == 0 || size > MAX_SIZE {
        return Err(StimuliError::Parse(format!(
            "SIZE {size} outside 1..={MAX_SIZE}"
        )));
    }

    Ok(size)
}

fn parse_array(text: &str, name: &str) -> Result<Vec<i32>> {
    let opening = format!("const int {name}[] = {{");
    let start = text
        .find(&opening)
        .ok_or_else(|| StimuliError::Parse(format!("missing array {name}")))?
        + opening.len();
    let len = text[start..]
        .find("};")
        .ok_or_else(|| StimuliError::Parse(format!("unterminated array {name}")))?;

    text[start..start + len]
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<i32>().map_err(|err| {
                StimuliError::Parse(format!("invalid element {item:?} in {name}: {err}"))
            })
        })
        .collect()
}

fn parse_buffer(line: &str) -> Option<Result<(String, String)>> {
    let rest = line.strip_prefix("__attribute__ ((section(\"")?;

    let parsed = rest.split_once("\"))) int ").and_then(|(section, decl)| {
        let name = decl.strip_suffix("[SIZE][SIZE];")?;
        Some((section.to_string(), name.to_string()))
    });

    Some(parsed.ok_or_else(|| {
        StimuliError::Parse(format!("malformed buffer declaration {line:?}"))
    }))
}
