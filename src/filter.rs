//! Include and exclude matching for module identifiers.
use anyhow::Result;
use regex::Regex;

/// Compiled include and exclude patterns.
///
/// Pattern semantics follow the usual bundler filter conventions:
/// `**` spans path separators, `*` and `?` do not, an empty include
/// list admits everything and exclusion always wins.
#[derive(Debug)]
pub struct FileFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl FileFilter {
    /// Compile a filter from glob style patterns.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(FileFilter {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Whether the identifier passes the filter.
    pub fn matches(&self, id: &str) -> bool {
        let id = id.replace('\\', "/");
        if self.exclude.iter().any(|pattern| pattern.is_match(&id)) {
            return false;
        }
        if self.include.is_empty() {
            return true;
        }
        self.include.iter().any(|pattern| pattern.is_match(&id))
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| glob_to_regex(pattern))
        .collect()
}

/// Translate a glob pattern to an anchored regular expression.
fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut out = String::from("^");
    // A relative pattern may match at any depth.
    if !pattern.starts_with('/') && !pattern.starts_with("**") {
        out.push_str("(?:.*/)?");
    }
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    // Swallow a separator after `**` so that
                    // `a/**/b` also matches `a/b`.
                    if chars.peek() == Some(&'/') {
                        chars.next();
                        out.push_str("(?:.*/)?");
                    } else {
                        out.push_str(".*");
                    }
                } else {
                    out.push_str("[^/]*");
                }
            }
            '?' => out.push_str("[^/]"),
            '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$'
            | '|' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push('$');
    Ok(Regex::new(&out)?)
}
