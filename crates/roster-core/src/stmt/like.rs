//! In-memory `LIKE` matching with the semantics of SQLite's default
//! `LIKE`: `%` matches any run of characters, `_` matches exactly one, and
//! ASCII letters compare case-insensitively. There is no escape character.

/// Returns `true` when `value` matches `pattern`.
pub fn like(value: &str, pattern: &str) -> bool {
    let value: Vec<char> = value.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let (mut v, mut p) = (0, 0);
    // Position of the last `%` seen, and the value index it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while v < value.len() {
        match pattern.get(p) {
            Some('%') => {
                backtrack = Some((p, v));
                p += 1;
            }
            Some('_') => {
                p += 1;
                v += 1;
            }
            Some(&c) if c.eq_ignore_ascii_case(&value[v]) => {
                p += 1;
                v += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    p = star + 1;
                    v = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '%')
}
