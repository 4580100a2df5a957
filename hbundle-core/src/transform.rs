//! Neutralizing directives that are redundant once headers are merged

/// Include guard emitted by every header in the library.
pub const INCLUDE_GUARD: &str = "#pragma once";

/// Opening of a quoted (project-local) include. Angle-bracket includes stay active.
pub const LOCAL_INCLUDE: &str = "#include \"";

/// Prefix that turns a directive into a line comment.
pub const DISABLE_PREFIX: &str = "// ";

/// Comment out every include guard and local include in `content`.
///
/// This is plain substring replacement: occurrences inside string literals
/// or block comments are rewritten too.
pub fn neutralize(content: &str) -> String {
    let guard = format!("{DISABLE_PREFIX}{INCLUDE_GUARD}");
    let include = format!("{DISABLE_PREFIX}{LOCAL_INCLUDE}");
    content
        .replace(INCLUDE_GUARD, &guard)
        .replace(LOCAL_INCLUDE, &include)
}
