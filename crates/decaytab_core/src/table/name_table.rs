//! Name-indexed decay table grammar.
//!
//! A line whose first token is not a number starts a parent block (the whole
//! line, canonicalized, is the parent name). A line whose first token is a
//! number is a channel of the current parent:
//!
//! ```text
//! branching_ratio angular_momentum daughter_name daughter_name ...
//! ```

use crate::model::decay::{DecayBlock, DecayChannel, NameBlock};
use crate::names::canonicalize;
use crate::table::{content_lines, parse_real, TableError, TableResult};
use log::debug;
use std::time::Instant;

const MIN_CHANNEL_TOKENS: usize = 3;

/// Parses a name-indexed decay table into ordered blocks.
///
/// Parent and daughter names are stored in canonical form. A non-integer
/// angular-momentum token is recorded as absent.
///
/// # Errors
/// Returns the first grammar error; see [`TableError`].
pub fn parse_name_table(text: &str) -> TableResult<Vec<NameBlock>> {
    let started_at = Instant::now();
    let mut blocks: Vec<NameBlock> = Vec::new();
    let mut channel_lines = 0_usize;

    for (line, content) in content_lines(text) {
        let tokens: Vec<&str> = content.split_whitespace().collect();
        let Some(branching_ratio) = tokens.first().copied().and_then(parse_real) else {
            blocks.push(DecayBlock::new(canonicalize(content), line));
            continue;
        };

        let Some(block) = blocks.last_mut() else {
            return Err(TableError::ChannelBeforeParent { line });
        };
        let channel = block.channels.len() + 1;
        if tokens.len() < MIN_CHANNEL_TOKENS {
            return Err(TableError::ChannelTooShort {
                line,
                parent: block.parent.clone(),
                channel,
                min_tokens: MIN_CHANNEL_TOKENS,
            });
        }

        block.channels.push(DecayChannel {
            branching_ratio,
            daughters: tokens[2..].iter().map(|name| canonicalize(name)).collect(),
            angular_momentum: tokens[1].parse::<i32>().ok(),
            line,
        });
        channel_lines += 1;
    }

    debug!(
        "event=decay_table_parse module=table status=ok dialect=name blocks={} channels={} duration_ms={}",
        blocks.len(),
        channel_lines,
        started_at.elapsed().as_millis()
    );
    Ok(blocks)
}
