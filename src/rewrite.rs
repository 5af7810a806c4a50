use crate::default_sdk::DefaultResolver;
use crate::error::ResolveError;
use crate::matcher::{match_pins, MatchResult};
use crate::pin::PinList;
use std::path::PathBuf;

pub const COMP_LINE_ENV: &str = "COMP_LINE";
pub const COMP_POINT_ENV: &str = "COMP_POINT";

/// Bash completion request state (`COMP_LINE` / `COMP_POINT`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionState {
    pub line: String,
    /// Cursor offset; `None` when `COMP_POINT` was missing or not a number.
    pub point: Option<usize>,
}

impl CompletionState {
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let line = lookup(COMP_LINE_ENV).filter(|l| !l.is_empty())?;
        let point = lookup(COMP_POINT_ENV).and_then(|p| p.trim().parse().ok());
        Some(CompletionState { line, point })
    }

    /// Words of the line being completed; used in place of argv.
    pub fn words(&self) -> Vec<String> {
        self.line.split_whitespace().map(String::from).collect()
    }

    /// Insert `extra` after the first word and move the cursor by the growth
    /// of the line. Returns `None` when there is nothing to adjust.
    pub fn with_inserted(&self, extra: &[String]) -> Option<Self> {
        let point = self.point?;
        if extra.is_empty() {
            return None;
        }
        let mut words: Vec<&str> = Vec::with_capacity(extra.len() + 2);
        match self.line.split_once(' ') {
            Some((first, rest)) => {
                words.push(first);
                words.extend(extra.iter().map(String::as_str));
                words.push(rest);
            }
            None => {
                words.push(&self.line);
                words.extend(extra.iter().map(String::as_str));
            }
        }
        let line = words.join(" ");
        let point = point + (line.len() - self.line.len());
        Some(CompletionState {
            line,
            point: Some(point),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Final argv: executable, inserted args, then the caller's args.
    pub argv: Vec<String>,
    /// Replacement completion state for the child, if it must change.
    pub completion: Option<CompletionState>,
    pub pinned: bool,
}

impl Resolution {
    pub fn executable(&self) -> PathBuf {
        PathBuf::from(&self.argv[0])
    }
}

/// Build the final argv for a match. `default` is only consulted when no pin applies.
pub fn rewrite<S: AsRef<str>>(
    matched: MatchResult<'_>,
    invocation: &[S],
    completion: Option<&CompletionState>,
    default: &dyn DefaultResolver,
) -> Result<Resolution, ResolveError> {
    let caller_args = invocation.iter().skip(1).map(|a| a.as_ref().to_string());
    match matched.pin() {
        Some(pin) => {
            let argv = pin
                .replacement()
                .iter()
                .cloned()
                .chain(caller_args)
                .collect();
            let completion = completion.and_then(|c| c.with_inserted(pin.inserted_args()));
            if let Some(c) = &completion {
                log::debug!("completion line adjusted to {:?}", c.line);
            }
            Ok(Resolution {
                argv,
                completion,
                pinned: true,
            })
        }
        None => {
            let gcloud = default.resolve().ok_or(ResolveError::NoDefault)?;
            let argv = std::iter::once(gcloud.to_string_lossy().into_owned())
                .chain(caller_args)
                .collect();
            Ok(Resolution {
                argv,
                completion: None,
                pinned: false,
            })
        }
    }
}

/// Match then rewrite. With a completion request, its words replace `argv`.
pub fn resolve(
    pins: &PinList,
    argv: &[String],
    completion: Option<&CompletionState>,
    default: &dyn DefaultResolver,
) -> Result<Resolution, ResolveError> {
    let words;
    let invocation = match completion {
        Some(c) => {
            words = c.words();
            words.as_slice()
        }
        None => argv,
    };
    let matched = match_pins(pins, invocation);
    log::debug!("match for {invocation:?}: {matched:?}");
    rewrite(matched, invocation, completion, default)
}
