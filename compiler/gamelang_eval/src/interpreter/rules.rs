//! Line classification.
//!
//! Each source line is matched against [`LINE_RULES`] in order; the first
//! matcher that recognizes the line decides its [`Statement`]. Anything no
//! rule claims is an expression.

use crate::block::{leading_keyword, BlockKind};
use crate::splitter::find_top_level;

/// What a single source line asks the dispatcher to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Statement<'a> {
    /// Only braces: closes or opens a block already handled elsewhere.
    Structural,
    Import { module: &'a str },
    Declaration { keyword: &'a str, signature: &'a str },
    TryOpener,
    /// `catch` or `finally` with no `try` in front of it.
    OrphanBlock(BlockKind),
    Assignment { name: &'a str, expr: &'a str },
    Call { name: &'a str, args: &'a str },
    Expression(&'a str),
}

type Matcher = for<'a> fn(&'a str) -> Option<Statement<'a>>;

/// Ordered rule table. Order matters: imports and declarations are
/// recognized by their leading keyword before `=` or `(` are considered.
pub const LINE_RULES: &[(&str, Matcher)] = &[
    ("structural", match_structural),
    ("import", match_import),
    ("declaration", match_declaration),
    ("block", match_block),
    ("assignment", match_assignment),
    ("call", match_call),
];

const IMPORT_KEYWORDS: &[&str] = &["import", "use", "导入"];
const DECLARATION_KEYWORDS: &[&str] = &[
    "fn", "function", "def", "class", "event", "on", "函数", "类", "事件",
];
const VARIABLE_KEYWORDS: &[&str] = &["var", "let", "变量"];

/// Classify a trimmed, non-blank, non-comment line.
pub fn classify(line: &str) -> Statement<'_> {
    LINE_RULES
        .iter()
        .find_map(|(rule, matcher)| {
            let statement = matcher(line)?;
            tracing::trace!(rule, line, "line classified");
            Some(statement)
        })
        .unwrap_or(Statement::Expression(line))
}

/// `name` followed by whitespace at the start of `line`: the remainder.
fn strip_word<'a>(line: &'a str, word: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(word)?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
}

pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Split `name(args)` when the parenthesis opened after `name` is the one
/// closed by the final `)`.
pub fn split_call(text: &str) -> Option<(&str, &str)> {
    let text = text.trim();
    if !text.ends_with(')') {
        return None;
    }
    let open = text.find('(')?;
    let name = text[..open].trim();
    if !is_identifier(name) {
        return None;
    }

    let mut depth = 0usize;
    let mut quote = None;
    for (idx, c) in text[open..].char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' => depth += 1,
                ')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        let close = open + idx;
                        return (close == text.len() - 1).then(|| (name, &text[open + 1..close]));
                    }
                }
                _ => {}
            },
        }
    }
    None
}

fn match_structural(line: &str) -> Option<Statement<'_>> {
    line.chars()
        .all(|c| matches!(c, '{' | '}' | ';') || c.is_whitespace())
        .then_some(Statement::Structural)
}

/// `import name`, `import name as alias`, `use name`, `导入 name`.
fn match_import(line: &str) -> Option<Statement<'_>> {
    let rest = IMPORT_KEYWORDS
        .iter()
        .find_map(|kw| strip_word(line, kw))?;
    let module = rest
        .split_whitespace()
        .next()?
        .trim_end_matches(';');
    is_identifier(module).then_some(Statement::Import { module })
}

/// `fn name(...) {`, `class Name:`, `on event {` and friends.
fn match_declaration(line: &str) -> Option<Statement<'_>> {
    DECLARATION_KEYWORDS.iter().find_map(|&keyword| {
        let rest = strip_word(line, keyword)?;
        let name_len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let (name, after) = rest.split_at(name_len);
        if !is_identifier(name) || after.trim_start().starts_with('=') {
            return None;
        }
        let signature = rest.trim_end_matches(['{', ':', ' ']);
        Some(Statement::Declaration { keyword, signature })
    })
}

fn match_block(line: &str) -> Option<Statement<'_>> {
    let (kind, _, _) = leading_keyword(line)?;
    Some(match kind {
        BlockKind::Try => Statement::TryOpener,
        other => Statement::OrphanBlock(other),
    })
}

/// Byte offset of the first top-level `=` that is not part of `==`, `!=`,
/// `<=` or `>=`.
fn assignment_operator(text: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(pos) = find_top_level(&text[offset..], '=') {
        let at = offset + pos;
        let before = text[..at].chars().next_back();
        let after = text[at + 1..].chars().next();
        if after == Some('=') {
            offset = at + 2;
        } else if matches!(before, Some('!' | '<' | '>' | '=')) {
            offset = at + 1;
        } else {
            return Some(at);
        }
        if offset >= text.len() {
            return None;
        }
    }
    None
}

/// `name = expr`, optionally prefixed by `var` or `let`.
fn match_assignment(line: &str) -> Option<Statement<'_>> {
    let text = VARIABLE_KEYWORDS
        .iter()
        .find_map(|kw| strip_word(line, kw))
        .unwrap_or(line);
    let at = assignment_operator(text)?;
    let name = text[..at].trim();
    let expr = text[at + 1..].trim();
    (is_identifier(name) && !expr.is_empty()).then_some(Statement::Assignment { name, expr })
}

fn match_call(line: &str) -> Option<Statement<'_>> {
    let (name, args) = split_call(line)?;
    Some(Statement::Call { name, args })
}
