//! Output reassembly
//!
//! Translation engines may turn one input character into several cells,
//! several characters into one cell, or spaces into cells. The filter
//! contract however requires the input's whitespace to survive untouched and
//! break markers to sit in the output stream. This module walks the engine's
//! output together with its output-to-input index map and restores both.

use crate::breakpoint::Breakpoint;
use crate::error::{CoreError, Result};

/// Rebuild a filter string from engine output.
///
/// * `input` - text that was sent to the engine (without break markers)
/// * `output` - text produced by the engine
/// * `input_positions` - for every output code point, the input code point
///   index it was produced from; must be non-decreasing
/// * `breakpoints` - class of every input gap; missing entries mean no break
///
/// Output code points produced from input whitespace are replaced by that
/// whitespace, once per input position, and whitespace the engine dropped is
/// restored. For consecutive emitted input positions `p < q` the marker of
/// gap `q - 1` is placed between their output.
pub fn reassemble(
    input: &str,
    output: &str,
    input_positions: &[usize],
    breakpoints: &[Breakpoint],
) -> Result<String> {
    let input: Vec<char> = input.chars().collect();
    let output: Vec<char> = output.chars().collect();

    if input_positions.len() != output.len() {
        return Err(CoreError::InvalidIndexMap {
            reason: format!(
                "{} positions for {} output code points",
                input_positions.len(),
                output.len()
            ),
        });
    }

    let mut writer = Writer {
        out: String::with_capacity(output.len() + input.len() / 4),
        previous: None,
        breakpoints,
    };
    // First input position whose output has not been seen yet
    let mut cursor = 0;

    for (&ch, &position) in output.iter().zip(input_positions) {
        let Some(&source) = input.get(position) else {
            return Err(CoreError::InvalidIndexMap {
                reason: format!(
                    "position {position} is outside the input ({} code points)",
                    input.len()
                ),
            });
        };

        if writer.previous == Some(position) {
            // More output for the same input position; whitespace was written once
            if !source.is_whitespace() {
                writer.out.push(ch);
            }
            continue;
        }

        if position < cursor {
            return Err(CoreError::InvalidIndexMap {
                reason: format!("position {position} follows position {}", cursor - 1),
            });
        }

        writer.restore_whitespace(&input[..position], cursor);
        writer.open(position);
        writer.out.push(if source.is_whitespace() { source } else { ch });
        cursor = position + 1;
    }

    writer.restore_whitespace(&input, cursor);
    Ok(writer.out)
}

struct Writer<'a> {
    out: String,
    previous: Option<usize>,
    breakpoints: &'a [Breakpoint],
}

impl Writer<'_> {
    /// Start the output of input position `position`
    fn open(&mut self, position: usize) {
        if self.previous.is_some() && position > 0 {
            let gap = self
                .breakpoints
                .get(position - 1)
                .copied()
                .unwrap_or_default();
            if let Some(marker) = gap.marker() {
                self.out.push(marker);
            }
        }
        self.previous = Some(position);
    }

    /// Emit the whitespace of `input[from..]` that produced no output
    fn restore_whitespace(&mut self, input: &[char], from: usize) {
        for (position, &ch) in input.iter().enumerate().skip(from) {
            if ch.is_whitespace() {
                self.open(position);
                self.out.push(ch);
            }
        }
    }
}
