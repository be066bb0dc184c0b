use serde::Deserialize;

use crate::error::MinifyError;

/// Upper bound on `{` nesting; exceeding it aborts minification outright
const MAX_NESTING_DEPTH: usize = 256;

/// Minifier configuration
///
/// An empty configuration object deserializes to the defaults, so
/// `minify: true` and `minify: {}` behave identically.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinifyConfig {
    /// Strip `/* ... */` comments
    pub remove_comments: bool,

    /// Keep `/*! ... */` banner comments even when stripping
    pub keep_bang_comments: bool,

    /// Collapse whitespace runs and drop separator-adjacent spaces
    pub collapse_whitespace: bool,

    /// Drop semicolons directly preceding a closing brace
    pub drop_trailing_semicolons: bool,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            remove_comments: true,
            keep_bang_comments: true,
            collapse_whitespace: true,
            drop_trailing_semicolons: true,
        }
    }
}

/// Minified text plus the non-fatal diagnostics collected along the way
#[derive(Debug, Clone, Default)]
pub struct MinifyOutput {
    pub css: String,

    /// Recoverable structural problems, e.g. unbalanced braces
    pub errors: Vec<String>,

    /// Cosmetic problems the minifier recovered from
    pub warnings: Vec<String>,
}

/// Single-pass CSS minification over opaque text
///
/// No selector or value analysis happens here; the routine only knows enough
/// tokenization to never touch the inside of strings, comments it keeps, and
/// `url(...)` payloads. Whitespace removal is conservative: a space is
/// dropped only next to `{` `}` `;` `,` `>` or after `:`, so constructs that
/// need their spaces (`calc(100% - 50px)`, `a :hover`, media-query `and (`)
/// survive.
pub fn minify(source: &str, config: &MinifyConfig) -> Result<MinifyOutput, MinifyError> {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut pending_space = false;
    let mut depth = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];

        if c == '/' && chars.get(i + 1) == Some(&'*') {
            let is_bang = chars.get(i + 2) == Some(&'!');
            let keep = !config.remove_comments || (is_bang && config.keep_bang_comments);
            match comment_end(&chars, i + 2) {
                Some(end) => {
                    if keep {
                        flush_space(&mut out, '/', &mut pending_space);
                        out.extend(&chars[i..=end]);
                    } else {
                        // a comment separates tokens just like whitespace
                        pending_space = true;
                    }
                    i = end + 1;
                }
                None => {
                    warnings.push(format!("unterminated comment at character {}", i));
                    if keep {
                        flush_space(&mut out, '/', &mut pending_space);
                        out.extend(&chars[i..]);
                    }
                    i = chars.len();
                }
            }
            continue;
        }

        if c == '"' || c == '\'' {
            flush_space(&mut out, c, &mut pending_space);
            let (next, terminated) = copy_string(&chars, i, &mut out);
            if !terminated {
                warnings.push(format!("unterminated string at character {}", i));
            }
            i = next;
            continue;
        }

        if is_url_start(&chars, i) {
            flush_space(&mut out, c, &mut pending_space);
            let (next, terminated) = copy_url(&chars, i, &mut out);
            if !terminated {
                warnings.push(format!("unterminated url() at character {}", i));
            }
            i = next;
            continue;
        }

        if c.is_whitespace() {
            if config.collapse_whitespace {
                pending_space = true;
            } else {
                out.push(c);
            }
            i += 1;
            continue;
        }

        match c {
            '{' => {
                depth += 1;
                if depth > MAX_NESTING_DEPTH {
                    return Err(MinifyError::NestingTooDeep {
                        max: MAX_NESTING_DEPTH,
                        offset: i,
                    });
                }
            }
            '}' => {
                if depth == 0 {
                    errors.push(format!("unbalanced '}}' at character {}", i));
                } else {
                    depth -= 1;
                }
                if config.drop_trailing_semicolons {
                    while out.ends_with(';') {
                        out.pop();
                    }
                }
            }
            _ => {}
        }

        flush_space(&mut out, c, &mut pending_space);
        out.push(c);
        i += 1;
    }

    if depth > 0 {
        errors.push(format!("{} unclosed block(s) at end of input", depth));
    }

    Ok(MinifyOutput {
        css: out,
        errors,
        warnings,
    })
}

/// Emit the pending collapsed space unless a separator absorbs it
fn flush_space(out: &mut String, next: char, pending: &mut bool) {
    if !*pending {
        return;
    }
    *pending = false;
    let Some(prev) = out.chars().last() else {
        return;
    };
    // space after ':' is droppable; space before ':' is not (`a :hover`)
    if matches!(prev, '{' | '}' | ';' | ',' | '>' | ':') {
        return;
    }
    if matches!(next, '{' | '}' | ';' | ',' | '>') {
        return;
    }
    out.push(' ');
}

/// Index of the `/` closing a comment opened before `from`
fn comment_end(chars: &[char], from: usize) -> Option<usize> {
    let mut j = from;
    while j + 1 < chars.len() {
        if chars[j] == '*' && chars[j + 1] == '/' {
            return Some(j + 1);
        }
        j += 1;
    }
    None
}

/// Copy a quoted string verbatim, returning (next index, terminated)
fn copy_string(chars: &[char], start: usize, out: &mut String) -> (usize, bool) {
    let quote = chars[start];
    out.push(quote);
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        if c == '\\' {
            if let Some(escaped) = chars.get(i + 1) {
                out.push(*escaped);
                i += 2;
                continue;
            }
        } else if c == quote {
            return (i + 1, true);
        }
        i += 1;
    }
    (chars.len(), false)
}

/// Copy a `url(...)` token verbatim, returning (next index, terminated)
fn copy_url(chars: &[char], start: usize, out: &mut String) -> (usize, bool) {
    out.extend(&chars[start..start + 4]);
    let mut i = start + 4;
    while i < chars.len() {
        let c = chars[i];
        if c == '"' || c == '\'' {
            let (next, terminated) = copy_string(chars, i, out);
            if !terminated {
                return (next, false);
            }
            i = next;
            continue;
        }
        out.push(c);
        if c == ')' {
            return (i + 1, true);
        }
        i += 1;
    }
    (chars.len(), false)
}

fn is_url_start(chars: &[char], i: usize) -> bool {
    let prefix_matches = chars[i].eq_ignore_ascii_case(&'u')
        && chars.get(i + 1).is_some_and(|c| c.eq_ignore_ascii_case(&'r'))
        && chars.get(i + 2).is_some_and(|c| c.eq_ignore_ascii_case(&'l'))
        && chars.get(i + 3) == Some(&'(');
    if !prefix_matches {
        return false;
    }
    // reject a longer identifier ending in "url"
    i == 0 || !matches!(chars[i - 1], c if c.is_alphanumeric() || c == '-' || c == '_')
}
