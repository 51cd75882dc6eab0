//! Code-indexed decay table grammar.
//!
//! ```text
//! parent_code
//! channel_count
//! branching_ratio daughter_code daughter_code ...   (channel_count times)
//! ```
//!
//! The declared channel count decides how many lines belong to a parent.
//! A block that runs into the next `parent` + `count` pair early, or a
//! channel-shaped line where a parent is expected, is reported as a
//! count mismatch rather than as a generic syntax error.

use crate::model::decay::{CodeBlock, DecayBlock, DecayChannel};
use crate::model::particle::ParticleCode;
use crate::table::{content_lines, parse_real, TableError, TableResult};
use log::debug;
use std::time::Instant;

const MIN_CHANNEL_TOKENS: usize = 2;

/// Parses a code-indexed decay table into ordered blocks.
///
/// # Errors
/// Returns the first grammar error; see [`TableError`].
pub fn parse_code_table(text: &str) -> TableResult<Vec<CodeBlock>> {
    let started_at = Instant::now();
    let lines: Vec<(usize, &str)> = content_lines(text).collect();
    let mut blocks: Vec<CodeBlock> = Vec::new();
    let mut cursor = 0;

    while let Some(&(parent_line, parent_text)) = lines.get(cursor) {
        let Ok(parent) = parent_text.parse::<ParticleCode>() else {
            return Err(unexpected_parent_line(&lines, cursor, blocks.last()));
        };
        cursor += 1;

        let Some(&(count_line, count_text)) = lines.get(cursor) else {
            return Err(TableError::MissingChannelCount {
                line: parent_line,
                parent: parent.to_string(),
            });
        };
        let declared = count_text
            .parse::<usize>()
            .map_err(|_| TableError::InvalidChannelCount {
                line: count_line,
                parent: parent.to_string(),
                token: count_text.to_string(),
            })?;
        cursor += 1;

        let mut block = DecayBlock::new(parent, parent_line);
        for channel in 1..=declared {
            let Some(&(line, content)) = lines.get(cursor) else {
                let last_line = lines.last().map_or(count_line, |(line, _)| *line);
                return Err(TableError::ChannelCountMismatch {
                    line: last_line,
                    parent: parent.to_string(),
                    declared,
                    found: channel - 1,
                });
            };
            if starts_next_block(&lines, cursor) {
                return Err(TableError::ChannelCountMismatch {
                    line,
                    parent: parent.to_string(),
                    declared,
                    found: channel - 1,
                });
            }
            block
                .channels
                .push(parse_channel(parent, channel, line, content)?);
            cursor += 1;
        }
        blocks.push(block);
    }

    debug!(
        "event=decay_table_parse module=table status=ok dialect=code blocks={} lines={} duration_ms={}",
        blocks.len(),
        lines.len(),
        started_at.elapsed().as_millis()
    );
    Ok(blocks)
}

fn parse_channel(
    parent: ParticleCode,
    channel: usize,
    line: usize,
    content: &str,
) -> TableResult<DecayChannel<ParticleCode>> {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.len() < MIN_CHANNEL_TOKENS {
        return Err(TableError::ChannelTooShort {
            line,
            parent: parent.to_string(),
            channel,
            min_tokens: MIN_CHANNEL_TOKENS,
        });
    }

    let branching_ratio =
        parse_real(tokens[0]).ok_or_else(|| TableError::InvalidBranchingRatio {
            line,
            parent: parent.to_string(),
            channel,
            token: tokens[0].to_string(),
        })?;

    let daughters = tokens[1..]
        .iter()
        .map(|token| {
            token
                .parse::<ParticleCode>()
                .map_err(|_| TableError::InvalidDaughter {
                    line,
                    parent: parent.to_string(),
                    channel,
                    token: (*token).to_string(),
                })
        })
        .collect::<TableResult<Vec<_>>>()?;

    Ok(DecayChannel {
        branching_ratio,
        daughters,
        angular_momentum: None,
        line,
    })
}

/// A lone integer followed by a lone non-negative integer is the start of
/// the next `parent` + `count` pair.
fn starts_next_block(lines: &[(usize, &str)], idx: usize) -> bool {
    let is_code = lines
        .get(idx)
        .is_some_and(|(_, text)| text.parse::<ParticleCode>().is_ok());
    let is_count = lines
        .get(idx + 1)
        .is_some_and(|(_, text)| text.parse::<usize>().is_ok());
    is_code && is_count
}

fn looks_like_channel(text: &str) -> bool {
    let mut tokens = text.split_whitespace();
    let has_ratio = tokens.next().and_then(parse_real).is_some();
    let daughters: Vec<&str> = tokens.collect();
    has_ratio
        && !daughters.is_empty()
        && daughters
            .iter()
            .all(|token| token.parse::<ParticleCode>().is_ok())
}

fn unexpected_parent_line(
    lines: &[(usize, &str)],
    idx: usize,
    previous: Option<&CodeBlock>,
) -> TableError {
    let (line, text) = lines[idx];
    match previous {
        Some(block) if looks_like_channel(text) => {
            let extra = lines[idx..]
                .iter()
                .take_while(|(_, text)| looks_like_channel(text))
                .count();
            TableError::ChannelCountMismatch {
                line,
                parent: block.parent.to_string(),
                declared: block.channels.len(),
                found: block.channels.len() + extra,
            }
        }
        _ => TableError::InvalidParent {
            line,
            token: text.to_string(),
        },
    }
}
