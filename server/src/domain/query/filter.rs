//! Filter token resolution
//!
//! A filter token from the caller is either the name of a registered preset
//! or a raw LQL filter line. Presets expand in place to their full line
//! sequence; raw lines must start with a filter directive and are passed on
//! verbatim.

use super::error::{PresetError, QueryError};
use super::registry::TableRegistry;

/// Directive prefixes accepted for raw filter lines
pub const FILTER_DIRECTIVES: [&str; 4] = ["Filter:", "Negate:", "Or:", "And:"];

/// Check whether `line` starts with one of the filter directives
pub fn is_filter_directive(line: &str) -> bool {
    FILTER_DIRECTIVES.iter().any(|d| line.starts_with(d))
}

/// A classified filter token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken<'a> {
    /// Reference to a registered preset and its expansion
    Preset { name: &'a str, lines: &'a [String] },
    /// Raw filter or combinator line
    Raw(&'a str),
}

impl<'a> FilterToken<'a> {
    /// Classify a caller token. Preset names win over the directive check.
    pub fn classify(token: &'a str, registry: &'a TableRegistry) -> Result<Self, QueryError> {
        if let Some(lines) = registry.filter_preset(token) {
            return Ok(Self::Preset { name: token, lines });
        }
        if !is_filter_directive(token) {
            return Err(QueryError::InvalidFilter(token.to_string()));
        }
        Ok(Self::Raw(token))
    }

    fn append_to(&self, out: &mut Vec<String>) {
        match self {
            Self::Preset { lines, .. } => out.extend(lines.iter().cloned()),
            Self::Raw(line) => out.push(line.to_string()),
        }
    }
}

/// Resolve caller filter tokens into LQL filter lines, keeping token order.
///
/// Fails on the first token that is neither a preset nor a directive line.
pub fn expand_filters<S: AsRef<str>>(
    registry: &TableRegistry,
    tokens: &[S],
) -> Result<Vec<String>, QueryError> {
    let mut lines = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = FilterToken::classify(token.as_ref(), registry).inspect_err(|e| {
            tracing::debug!(error = %e, "Rejected filter token");
        })?;
        token.append_to(&mut lines);
    }
    Ok(lines)
}

/// Verify that a preset is well-formed LQL filter syntax.
///
/// Simulates the filter stack: `Filter:` pushes one entry, `And: n` and
/// `Or: n` fold the top `n` entries into one, `Negate:` replaces the top entry.
pub fn check_preset<S: AsRef<str>>(lines: &[S]) -> Result<(), PresetError> {
    if lines.is_empty() {
        return Err(PresetError::Empty);
    }

    let mut depth: usize = 0;
    for line in lines {
        let line = line.as_ref();
        if line.starts_with("Filter:") {
            depth += 1;
        } else if line.starts_with("Negate:") {
            if depth == 0 {
                return Err(PresetError::Underflow {
                    line: line.to_string(),
                    available: depth,
                });
            }
        } else if let Some(count) = line
            .strip_prefix("And:")
            .or_else(|| line.strip_prefix("Or:"))
        {
            let n: usize = count
                .trim()
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| PresetError::InvalidCount(line.to_string()))?;
            if n > depth {
                return Err(PresetError::Underflow {
                    line: line.to_string(),
                    available: depth,
                });
            }
            depth = depth - n + 1;
        } else {
            return Err(PresetError::UnknownDirective(line.to_string()));
        }
    }
    Ok(())
}
