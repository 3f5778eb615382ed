use super::*;
use pretty_assertions::assert_eq;

fn lines(source: &str) -> Vec<&str> {
    source.lines().collect()
}

fn region(kind: BlockKind, start: usize, end: usize) -> BlockRegion {
    BlockRegion {
        kind,
        start,
        end,
        inline: false,
    }
}

fn inline(kind: BlockKind, at: usize) -> BlockRegion {
    BlockRegion {
        kind,
        start: at,
        end: at + 1,
        inline: true,
    }
}

#[test]
fn leading_keyword_recognizes_both_languages() {
    assert_eq!(leading_keyword("try {").map(|(k, n, _)| (k, n)), Some((BlockKind::Try, 0)));
    assert_eq!(
        leading_keyword("  } 捕获 (e) {").map(|(k, n, _)| (k, n)),
        Some((BlockKind::Catch, 1))
    );
    assert_eq!(
        leading_keyword("}finally{").map(|(k, n, _)| (k, n)),
        Some((BlockKind::Finally, 1))
    );
}

#[test]
fn leading_keyword_needs_word_boundary() {
    assert!(leading_keyword("try_count = 3").is_none());
    assert!(leading_keyword("trying()").is_none());
    assert!(leading_keyword("try = 1").is_none());
    assert!(leading_keyword("print(\"try\")").is_none());
}

#[test]
fn try_catch_finally_on_closing_lines() {
    let src = lines(
        "try {\n\
         \x20   throw(\"boom\")\n\
         } catch (e) {\n\
         \x20   print(error)\n\
         } finally {\n\
         \x20   print(\"done\")\n\
         }\n\
         print(\"after\")",
    );
    let construct = scan_try(&src, 0);
    assert_eq!(construct.try_block, region(BlockKind::Try, 1, 2));
    assert_eq!(construct.catch_block, Some(region(BlockKind::Catch, 3, 4)));
    assert_eq!(construct.finally_block, Some(region(BlockKind::Finally, 5, 6)));
    assert_eq!(construct.catch_binding.as_deref(), Some("e"));
    assert_eq!(construct.resume_at, 7);
    assert_eq!(construct.nested_try, None);
}

#[test]
fn keywords_on_their_own_lines() {
    let src = lines(
        "尝试 {\n\
         \x20   x = 1\n\
         }\n\
         \n\
         # recover\n\
         捕获 {\n\
         \x20   y = 2\n\
         }\n\
         z = 3",
    );
    let construct = scan_try(&src, 0);
    assert_eq!(construct.try_block, region(BlockKind::Try, 1, 2));
    assert_eq!(construct.catch_block, Some(region(BlockKind::Catch, 6, 7)));
    assert_eq!(construct.finally_block, None);
    assert_eq!(construct.catch_binding, None);
    assert_eq!(construct.resume_at, 8);
}

#[test]
fn try_finally_without_catch() {
    let src = lines("try {\n  a = 1\n} finally {\n  b = 2\n}\nc = 3");
    let construct = scan_try(&src, 0);
    assert_eq!(construct.catch_block, None);
    assert_eq!(construct.finally_block, Some(region(BlockKind::Finally, 3, 4)));
    assert_eq!(construct.resume_at, 5);
}

#[test]
fn inner_braces_are_counted() {
    let src = lines("try {\n  m = {a: 1}\n  if x {\n    y = 1\n  }\n} catch {\n}\nafter()");
    let construct = scan_try(&src, 0);
    assert_eq!(construct.try_block, region(BlockKind::Try, 1, 5));
    assert_eq!(construct.catch_block, Some(region(BlockKind::Catch, 6, 6)));
    assert_eq!(construct.resume_at, 7);
}

#[test]
fn braces_inside_strings_are_ignored() {
    let src = lines("try {\n  print(\"}\")\n} catch {\n}\nnext()");
    let construct = scan_try(&src, 0);
    assert_eq!(construct.try_block, region(BlockKind::Try, 1, 2));
    assert_eq!(construct.resume_at, 4);
}

#[test]
fn catch_after_finally_ends_the_construct() {
    let src = lines("try {\n} finally {\n} catch {\n}");
    let construct = scan_try(&src, 0);
    assert_eq!(construct.finally_block, Some(region(BlockKind::Finally, 2, 2)));
    assert_eq!(construct.catch_block, None);
    assert_eq!(construct.resume_at, 2);
}

#[test]
fn nested_try_is_reported() {
    let src = lines(
        "try {\n  try {\n    throw(\"inner\")\n  } catch {\n  }\n} catch {\n  print(error)\n}\nafter()",
    );
    let construct = scan_try(&src, 0);
    assert_eq!(construct.nested_try, Some(1));
    assert_eq!(construct.try_block, region(BlockKind::Try, 1, 5));
    assert_eq!(construct.resume_at, 8);
}

#[test]
fn unterminated_construct_runs_to_end_of_file() {
    let src = lines("try {\n  a = 1\n  b = 2");
    let construct = scan_try(&src, 0);
    assert_eq!(construct.try_block, region(BlockKind::Try, 1, 3));
    assert_eq!(construct.resume_at, 3);
}

#[test]
fn one_line_try_keeps_the_following_lines() {
    let src = lines("try { x = 1 }\nprint(\"after\")\nprint(\"later\")");
    let construct = scan_try(&src, 0);
    assert_eq!(construct.try_block, inline(BlockKind::Try, 0));
    assert_eq!(construct.catch_block, None);
    assert_eq!(construct.resume_at, 1);
    assert_eq!(inline_body(src[0]), Some("x = 1"));
}

#[test]
fn one_line_catch_on_the_closing_line() {
    let src = lines("try {\n  throw(\"boom\")\n} catch { print(error) }\nprint(\"after\")");
    let construct = scan_try(&src, 0);
    assert_eq!(construct.try_block, region(BlockKind::Try, 1, 2));
    assert_eq!(construct.catch_block, Some(inline(BlockKind::Catch, 2)));
    assert_eq!(construct.resume_at, 3);
    assert_eq!(inline_body(src[2]), Some("print(error)"));
}

#[test]
fn one_line_regions_chain_across_lines() {
    let src = lines(
        "try { risky() }\n\
         catch (e) { print(e) }\n\
         finally {\n\
         \x20   done()\n\
         }\n\
         next()",
    );
    let construct = scan_try(&src, 0);
    assert_eq!(construct.try_block, inline(BlockKind::Try, 0));
    assert_eq!(construct.catch_block, Some(inline(BlockKind::Catch, 1)));
    assert_eq!(construct.catch_binding.as_deref(), Some("e"));
    assert_eq!(construct.finally_block, Some(region(BlockKind::Finally, 3, 4)));
    assert_eq!(construct.resume_at, 5);
}

#[test]
fn try_inside_a_one_line_body_is_nested() {
    let src = lines("try { try { x = 1 } }\nafter()");
    let construct = scan_try(&src, 0);
    assert_eq!(construct.nested_try, Some(0));
    assert_eq!(construct.resume_at, 1);
}

#[test]
fn inline_body_ignores_braces_in_strings() {
    assert_eq!(inline_body("try { print(\"}\") }"), Some("print(\"}\")"));
    assert_eq!(inline_body("} finally {}"), Some(""));
    assert_eq!(inline_body("x = 1"), None);
}

#[test]
fn braced_block_end_skips_bodies() {
    let src = lines("fn attack(target) {\n  print(target)\n  if x {\n  }\n}\nprint(1)");
    assert_eq!(braced_block_end(&src, 0), 5);

    let src = lines("class Hero\n{\n  hp = 1\n}\nprint(1)");
    assert_eq!(braced_block_end(&src, 0), 4);

    let src = lines("on start\nprint(1)");
    assert_eq!(braced_block_end(&src, 0), 1);
}
