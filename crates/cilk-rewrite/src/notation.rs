//! Slice-notation recognizer.
//!
//! Recognizes the two bracketed slice forms, `a[0:N]` and the shorthand
//! `a[vALL]`, and the reduction built-in wrapped around a single slice.
//! Patterns are compiled from the [`RewriteConfig`] so the shorthand literal,
//! the reduction call name and the scalar types are not hard-wired.

use std::ops::Range;

use regex::{Captures, Regex};

use crate::config::RewriteConfig;
use crate::error::Result;

/// One occurrence of slice notation inside a text span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliceMatch<'a> {
    pub array: &'a str,
    /// Explicit start offset; `None` for the shorthand form.
    pub start: Option<&'a str>,
    /// Resolved trip-count symbol.
    pub length: &'a str,
    /// Byte range of the whole `array[...]` occurrence within the text.
    pub range: Range<usize>,
}

/// Length symbols found in a span, after resolving the shorthand form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SliceLength<'a> {
    Absent,
    Single(&'a str),
    /// Occurrences disagree; listed in order of first appearance.
    Ambiguous(Vec<&'a str>),
}

/// `[type] name = reduce(array[slice]);` broken into its parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReductionMatch<'a> {
    pub scalar_type: Option<&'a str>,
    pub target: &'a str,
    pub array: &'a str,
    pub length: &'a str,
}

pub struct SliceRecognizer {
    slice: Regex,
    reduction: Regex,
    reduce_call: String,
    length_symbol: String,
}

impl SliceRecognizer {
    pub fn new(config: &RewriteConfig) -> Result<Self> {
        let slice_form = format!(
            r"(?:(?P<start>\d+):(?P<length>\w+)|{})",
            regex::escape(&config.all_literal)
        );
        let slice = format!(r"(?P<array>\w+)\[{slice_form}\]");
        let types = config
            .reduction_types
            .iter()
            .map(|ty| regex::escape(ty))
            .collect::<Vec<_>>()
            .join("|");
        let reduction = format!(
            r"^(?:(?P<type>{types})\s+)?(?P<target>\w+)\s*=\s*{call}\(\s*(?P<array>\w+)\[{slice_form}\]\s*\)\s*;$",
            call = regex::escape(&config.reduce_call),
        );

        Ok(Self {
            slice: Regex::new(&slice)?,
            reduction: Regex::new(&reduction)?,
            reduce_call: config.reduce_call.clone(),
            length_symbol: config.length_symbol.clone(),
        })
    }

    /// Does `text` contain at least one slice occurrence?
    pub fn has_slice(&self, text: &str) -> bool {
        self.slice.is_match(text)
    }

    /// Does `text` mention the reduction built-in at all?
    pub fn has_reduction_call(&self, text: &str) -> bool {
        text.contains(&self.reduce_call)
    }

    pub fn slices<'a>(&'a self, text: &'a str) -> impl Iterator<Item = SliceMatch<'a>> + 'a {
        self.slice
            .captures_iter(text)
            .map(move |caps| self.slice_match(&caps))
    }

    fn slice_match<'a>(&'a self, caps: &Captures<'a>) -> SliceMatch<'a> {
        SliceMatch {
            array: caps.name("array").map_or("", |m| m.as_str()),
            start: caps.name("start").map(|m| m.as_str()),
            length: self.resolve(caps.name("length").map(|m| m.as_str())),
            range: caps.get(0).map_or(0..0, |m| m.range()),
        }
    }

    fn resolve<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit.unwrap_or(&self.length_symbol)
    }

    /// Resolve the single trip-count symbol shared by every occurrence.
    pub fn slice_length<'a>(&'a self, text: &'a str) -> SliceLength<'a> {
        let mut symbols: Vec<&str> = Vec::new();
        for slice in self.slices(text) {
            if !symbols.contains(&slice.length) {
                symbols.push(slice.length);
            }
        }
        match symbols.len() {
            0 => SliceLength::Absent,
            1 => SliceLength::Single(symbols[0]),
            _ => SliceLength::Ambiguous(symbols),
        }
    }

    /// Replace every slice occurrence with `array[index]`.
    pub fn index_slices(&self, text: &str, index: &str) -> String {
        self.slice
            .replace_all(text, |caps: &Captures<'_>| {
                format!("{}[{index}]", &caps["array"])
            })
            .into_owned()
    }

    /// Match the exact reduction statement shape. `text` must already be
    /// trimmed.
    pub fn match_reduction<'a>(&'a self, text: &'a str) -> Option<ReductionMatch<'a>> {
        let caps = self.reduction.captures(text)?;
        Some(ReductionMatch {
            scalar_type: caps.name("type").map(|m| m.as_str()),
            target: caps.name("target")?.as_str(),
            array: caps.name("array")?.as_str(),
            length: self.resolve(caps.name("length").map(|m| m.as_str())),
        })
    }
}
