//! Selects the pin that applies to an invocation.
//!
//! Only positional tokens take part. Anything starting with a dash is a flag
//! and is dropped before matching, so `--zone=us-east1` is harmless while a
//! short flag with a separate value (`-z us-east1`) would leave its value
//! behind as a positional. That limitation is accepted.

use crate::pin::{Pin, PinList};
use std::ops::ControlFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Positional(&'a str),
    Flag,
}

impl<'a> TokenKind<'a> {
    pub fn classify(token: &'a str) -> Self {
        if token.starts_with('-') {
            TokenKind::Flag
        } else {
            TokenKind::Positional(token)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult<'a> {
    Exact(&'a Pin),
    Partial(&'a Pin),
    NoMatch,
}

impl<'a> MatchResult<'a> {
    pub fn pin(&self) -> Option<&'a Pin> {
        match *self {
            MatchResult::Exact(pin) | MatchResult::Partial(pin) => Some(pin),
            MatchResult::NoMatch => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PinFit {
    Exact,
    Partial,
    Miss,
}

/// Positional tokens after argv[0]. argv[0] stands in for the sentinel and is
/// never compared.
pub fn positionals<S: AsRef<str>>(invocation: &[S]) -> Vec<&str> {
    invocation
        .iter()
        .skip(1)
        .filter_map(|arg| match TokenKind::classify(arg.as_ref()) {
            TokenKind::Positional(tok) => Some(tok),
            TokenKind::Flag => None,
        })
        .collect()
}

/// First exact match in file order wins. Without one, the *last* partial match
/// seen is returned.
pub fn match_pins<'a, S: AsRef<str>>(pins: &'a PinList, invocation: &[S]) -> MatchResult<'a> {
    let words = positionals(invocation);
    let scan = pins.iter().try_fold(None, |partial, pin| match fit(pin.subcommand(), &words) {
        PinFit::Exact => ControlFlow::Break(pin),
        PinFit::Partial => ControlFlow::Continue(Some(pin)),
        PinFit::Miss => ControlFlow::Continue(partial),
    });
    match scan {
        ControlFlow::Break(pin) => MatchResult::Exact(pin),
        ControlFlow::Continue(Some(pin)) => MatchResult::Partial(pin),
        ControlFlow::Continue(None) => MatchResult::NoMatch,
    }
}

fn fit(pattern: &[String], words: &[&str]) -> PinFit {
    // cannot be a prefix of something shorter
    if pattern.len() > words.len() {
        return PinFit::Miss;
    }
    for (i, (want, got)) in pattern.iter().zip(words).enumerate() {
        if want != got {
            let last = i + 1 == pattern.len();
            return if last && want.starts_with(got) {
                PinFit::Partial
            } else {
                PinFit::Miss
            };
        }
    }
    PinFit::Exact
}
