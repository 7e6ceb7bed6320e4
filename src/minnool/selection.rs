//! Line-range selections over a book's content.
//!
//! A terminal has no mouse selection to hand over, so a selection is written
//! as a 1-based inclusive line range: `12-40`, or `7` for a single line.

use crate::error::{MinnoolError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start == 0 {
            return Err(MinnoolError::Api("Line numbers start at 1".to_string()));
        }
        if end < start {
            return Err(MinnoolError::Api(format!(
                "Invalid line range {}-{}: end before start",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// The selected lines of `content`, trimmed. Lines past the end of the
    /// content are ignored; an empty result means nothing was selected.
    pub fn apply(&self, content: &str) -> Option<String> {
        let selected: Vec<&str> = content
            .lines()
            .skip(self.start - 1)
            .take(self.end - self.start + 1)
            .collect();
        let text = selected.join("\n");
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl FromStr for LineRange {
    type Err = MinnoolError;

    fn from_str(s: &str) -> Result<Self> {
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| MinnoolError::Api(format!("Invalid line range: {}", s)))
        };
        match s.split_once('-') {
            Some((start, end)) => Self::new(parse(start)?, parse(end)?),
            None => {
                let line = parse(s)?;
                Self::new(line, line)
            }
        }
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}
