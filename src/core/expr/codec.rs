//! Escaping-aware splitting on the three reserved delimiters
//!
//! `|` separates task columns, `/` separates path segments and `&` separates
//! repeated fields or conjunctive line queries. A backslash directly before a
//! delimiter makes it literal; any other backslash is kept as-is.

/// Reserved delimiter characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `|`, between task columns
    Bar,
    /// `/`, between path segments
    Slash,
    /// `&`, between assignments or query clauses
    Ampersand,
}

impl Delimiter {
    pub const fn as_char(self) -> char {
        match self {
            Delimiter::Bar => '|',
            Delimiter::Slash => '/',
            Delimiter::Ampersand => '&',
        }
    }

    /// Split `value`, honoring `\<delimiter>` escapes
    ///
    /// An empty input yields no parts at all, so an absent path is distinct from a
    /// path with one empty segment.
    pub fn split(self, value: &str) -> Vec<String> {
        split(value, self)
    }

    /// Inverse of [`Delimiter::split`] for parts that came out of it
    pub fn join<S: AsRef<str>>(self, parts: &[S]) -> String {
        let delimiter = self.as_char();
        let escaped = format!("\\{}", delimiter);
        parts
            .iter()
            .map(|part| part.as_ref().replace(delimiter, &escaped))
            .collect::<Vec<_>>()
            .join(&delimiter.to_string())
    }
}

/// Split `value` on the unescaped occurrences of `delimiter`
pub fn split(value: &str, delimiter: Delimiter) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }

    let target = delimiter.as_char();
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&target) {
            current.push(target);
            chars.next();
        } else if c == target {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
}

/// Column `index` of a `|`-split task, or `""` when absent
pub fn column(parts: &[String], index: usize) -> &str {
    parts.get(index).map(String::as_str).unwrap_or("")
}
