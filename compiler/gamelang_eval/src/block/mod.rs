//! Block scanner for `try` / `catch` / `finally`.
//!
//! There is no parser, so regions are found by counting braces line by line.
//! Scanning starts at the `try` line and walks a small state machine:
//!
//! ```text
//! Try ──catch──▶ Catch ──finally──▶ Finally ──▶ Done
//!  └──────────────finally─────────────▶┘
//! ```
//!
//! A region ends when its brace depth returns to zero. A keyword that opens
//! the next region may sit on the closing line (`} catch (e) {`) or on the
//! next non-blank line. The body of a region is the lines strictly between
//! its opener and its closing line. When the braces balance on the opener
//! itself (`try { x = 1 }`, `} catch { print(error) }`) the region is
//! inline: its body is the text between those braces.
//!
//! Only one level is supported: a `try` anywhere inside the construct is
//! recorded in [`TryConstruct::nested_try`] and the caller rejects the whole
//! construct.

use crate::splitter::find_top_level;

/// Which part of a try construct a region belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Try,
    Catch,
    Finally,
}

const KEYWORDS: &[(&str, BlockKind)] = &[
    ("try", BlockKind::Try),
    ("尝试", BlockKind::Try),
    ("catch", BlockKind::Catch),
    ("捕获", BlockKind::Catch),
    ("finally", BlockKind::Finally),
    ("最终", BlockKind::Finally),
];

/// Line range of one region's body: `start..end`, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockRegion {
    pub kind: BlockKind,
    pub start: usize,
    pub end: usize,
    /// The body is the braced text on line `start` (see [`inline_body`]),
    /// and `end` is `start + 1`.
    pub inline: bool,
}

/// Everything the dispatcher needs to run one try construct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TryConstruct {
    pub try_block: BlockRegion,
    pub catch_block: Option<BlockRegion>,
    pub finally_block: Option<BlockRegion>,
    /// Name given in `catch (e)` / `catch e`.
    pub catch_binding: Option<String>,
    /// First line after the whole construct.
    pub resume_at: usize,
    /// Index of the first `try` found inside the construct.
    pub nested_try: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    Try,
    Catch,
    Finally,
    Done,
}

impl ScanState {
    fn kind(self) -> Option<BlockKind> {
        match self {
            ScanState::Try => Some(BlockKind::Try),
            ScanState::Catch => Some(BlockKind::Catch),
            ScanState::Finally => Some(BlockKind::Finally),
            ScanState::Done => None,
        }
    }

    /// State after seeing `keyword` while in `self`. Any keyword that cannot
    /// continue the construct ends it.
    fn next(self, keyword: BlockKind) -> ScanState {
        match (self, keyword) {
            (ScanState::Try, BlockKind::Catch) => ScanState::Catch,
            (ScanState::Try | ScanState::Catch, BlockKind::Finally) => ScanState::Finally,
            _ => ScanState::Done,
        }
    }
}

/// The block keyword a line opens with, after any leading `}`s.
///
/// Returns the keyword, the number of leading closing braces, and the text
/// following the keyword.
pub fn leading_keyword(line: &str) -> Option<(BlockKind, usize, &str)> {
    let trimmed = line.trim_start();
    let closers = trimmed.chars().take_while(|&c| c == '}' || c.is_whitespace());
    let closer_count = closers.clone().filter(|&c| c == '}').count();
    let skip: usize = closers.map(char::len_utf8).sum();
    let body = &trimmed[skip..];

    KEYWORDS.iter().find_map(|&(word, kind)| {
        let rest = body.strip_prefix(word)?;
        let boundary = rest
            .chars()
            .next()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_'));
        let assignment = rest.trim_start().starts_with('=');
        (boundary && !assignment).then_some((kind, closer_count, rest))
    })
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Count `{` and `}` outside of quoted strings.
fn brace_counts(text: &str) -> (isize, isize) {
    let mut quote = None;
    let (mut opens, mut closes) = (0, 0);
    for c in text.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '{' => opens += 1,
                '}' => closes += 1,
                _ => {}
            },
        }
    }
    (opens, closes)
}

/// Parse `(e) {`, `e {` or `{` after a `catch` keyword.
fn catch_binding(rest: &str) -> Option<String> {
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('(').unwrap_or(rest).trim_start();
    let name: String = rest
        .chars()
        .take_while(|&c| c.is_alphanumeric() || c == '_')
        .collect();
    (!name.is_empty()).then_some(name)
}

/// Open region being scanned.
struct OpenRegion {
    state: ScanState,
    start: usize,
    depth: isize,
    seen_open: bool,
}

impl OpenRegion {
    /// A region whose opener is on line `at`, with `rest` following the
    /// keyword.
    fn opened(state: ScanState, at: usize, rest: &str) -> Self {
        let (opens, closes) = brace_counts(rest);
        OpenRegion {
            state,
            start: at + 1,
            depth: opens - closes,
            seen_open: opens > 0,
        }
    }

    fn is_closed(&self) -> bool {
        self.seen_open && self.depth <= 0
    }
}

/// Open the region whose keyword is on line `at`. Regions that close on
/// their own opener line are recorded as inline and chained to the next
/// opener; `None` means the construct ended and `resume_at` is set.
fn open_region<'a>(
    construct: &mut TryConstruct,
    lines: &[&'a str],
    mut state: ScanState,
    mut at: usize,
    mut rest: &'a str,
) -> Option<OpenRegion> {
    loop {
        if state == ScanState::Catch {
            construct.catch_binding = catch_binding(rest);
        }
        let open = OpenRegion::opened(state, at, rest);
        if !open.is_closed() {
            return Some(open);
        }
        let body = lines.get(at).copied().and_then(inline_body);
        if let Some((BlockKind::Try, _, _)) = body.and_then(leading_keyword) {
            construct.nested_try.get_or_insert(at);
        }
        if let Some(kind) = state.kind() {
            record(
                construct,
                BlockRegion {
                    kind,
                    start: at,
                    end: at + 1,
                    inline: true,
                },
            );
        }
        let Some((next_at, next, next_rest)) = follow_on(lines, at + 1, state) else {
            construct.resume_at = at + 1;
            return None;
        };
        (state, at, rest) = (next, next_at, next_rest);
    }
}

/// Text between the braces of a one-line region opener.
pub fn inline_body(line: &str) -> Option<&str> {
    let (_, _, rest) = leading_keyword(line)?;
    let open = find_top_level(rest, '{')?;
    let body = &rest[open + 1..];
    let close = find_top_level(body, '}')?;
    Some(body[..close].trim())
}

/// Scan the try construct whose `try` keyword is on `lines[start]`.
pub fn scan_try(lines: &[&str], start: usize) -> TryConstruct {
    let opener_rest = lines
        .get(start)
        .and_then(|line| leading_keyword(line))
        .map_or("", |(_, _, rest)| rest);

    let mut construct = TryConstruct {
        try_block: BlockRegion {
            kind: BlockKind::Try,
            start: start + 1,
            end: start + 1,
            inline: false,
        },
        catch_block: None,
        finally_block: None,
        catch_binding: None,
        resume_at: lines.len(),
        nested_try: None,
    };
    let Some(mut open) = open_region(&mut construct, lines, ScanState::Try, start, opener_rest)
    else {
        return construct;
    };
    let mut i = open.start;

    while i < lines.len() {
        let line = lines[i];
        if is_skippable(line) {
            i += 1;
            continue;
        }

        let keyword = leading_keyword(line);
        if let Some((BlockKind::Try, _, _)) = keyword {
            construct.nested_try.get_or_insert(i);
        }

        // `} catch {` / `} finally {` closing the current region in place.
        if let Some((kind @ (BlockKind::Catch | BlockKind::Finally), closers, rest)) = keyword {
            #[allow(clippy::cast_possible_wrap, reason = "closers on one line are few")]
            let closes_here = open.depth - closers as isize <= 0;
            if closes_here {
                close(&mut construct, &open, i);
                let next = open.state.next(kind);
                if next == ScanState::Done {
                    construct.resume_at = i;
                    return construct;
                }
                match open_region(&mut construct, lines, next, i, rest) {
                    Some(region) => open = region,
                    None => return construct,
                }
                i = open.start;
                continue;
            }
        }

        let (opens, closes) = brace_counts(line);
        open.depth += opens - closes;
        open.seen_open |= opens > 0;
        if open.is_closed() {
            close(&mut construct, &open, i);
            let Some((at, next, rest)) = follow_on(lines, i + 1, open.state) else {
                construct.resume_at = i + 1;
                tracing::trace!(start, resume_at = i + 1, "try construct scanned");
                return construct;
            };
            match open_region(&mut construct, lines, next, at, rest) {
                Some(region) => open = region,
                None => return construct,
            }
            i = open.start;
            continue;
        }
        i += 1;
    }

    close(&mut construct, &open, lines.len());
    construct.resume_at = lines.len();
    construct
}

/// Record the body of the open region as ending before line `end`.
fn close(construct: &mut TryConstruct, open: &OpenRegion, end: usize) {
    let Some(kind) = open.state.kind() else {
        return;
    };
    record(
        construct,
        BlockRegion {
            kind,
            start: open.start,
            end: end.max(open.start),
            inline: false,
        },
    );
}

fn record(construct: &mut TryConstruct, region: BlockRegion) {
    match region.kind {
        BlockKind::Try => construct.try_block = region,
        BlockKind::Catch => construct.catch_block = Some(region),
        BlockKind::Finally => construct.finally_block = Some(region),
    }
}

/// A catch/finally opener on the next meaningful line after a closed
/// region, when it is a legal continuation of `state`.
fn follow_on<'a>(
    lines: &[&'a str],
    from: usize,
    state: ScanState,
) -> Option<(usize, ScanState, &'a str)> {
    let at = (from..lines.len()).find(|&j| !is_skippable(lines[j]))?;
    let (kind, closers, rest) = leading_keyword(lines[at])?;
    if closers > 0 {
        return None;
    }
    match state.next(kind) {
        ScanState::Done => None,
        next => Some((at, next, rest)),
    }
}

/// Index of the first line after the braced body opened on `lines[start]`.
///
/// When the opener has no `{`, a body starting on the next meaningful line
/// with `{` is accepted; otherwise the declaration has no body.
pub fn braced_block_end(lines: &[&str], start: usize) -> usize {
    let mut depth: isize = 0;
    let mut seen_open = false;
    let mut i = start;
    while i < lines.len() {
        let line = lines[i];
        if i > start && is_skippable(line) {
            i += 1;
            continue;
        }
        if i > start && !seen_open && !line.trim_start().starts_with('{') {
            return i;
        }
        // Closers in front of the opener belong to the enclosing block.
        let counted = if i == start {
            line.trim_start_matches(|c: char| c == '}' || c.is_whitespace())
        } else {
            line
        };
        let (opens, closes) = brace_counts(counted);
        depth += opens - closes;
        seen_open |= opens > 0;
        if seen_open && depth <= 0 {
            return i + 1;
        }
        i += 1;
    }
    lines.len()
}

#[cfg(test)]
mod tests;
