//! Glob matching with Redis `KEYS` semantics.

/// Returns true if `text` matches the Redis-style glob `pattern`.
///
/// Supports `*`, `?`, `[abc]`, `[a-z]`, `[^abc]` and `\` escapes. An
/// unterminated class runs to the end of the pattern.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    matches(&pattern, &text)
}

/// Escapes glob metacharacters so `text` matches only itself.
pub fn escape_glob(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn matches(p: &[char], t: &[char]) -> bool {
    match p.first() {
        None => t.is_empty(),
        Some('*') => {
            let rest = skip_stars(p);
            if rest.is_empty() {
                return true;
            }
            (0..=t.len()).any(|i| matches(rest, &t[i..]))
        }
        Some('?') => !t.is_empty() && matches(&p[1..], &t[1..]),
        Some('[') => match t.first() {
            None => false,
            Some(&c) => {
                let (hit, consumed) = match_class(&p[1..], c);
                hit && matches(&p[1 + consumed..], &t[1..])
            }
        },
        Some('\\') if p.len() > 1 => t.first() == Some(&p[1]) && matches(&p[2..], &t[1..]),
        Some(c) => t.first() == Some(c) && matches(&p[1..], &t[1..]),
    }
}

fn skip_stars(p: &[char]) -> &[char] {
    let n = p.iter().take_while(|&&c| c == '*').count();
    &p[n..]
}

/// Matches `c` against the class body following `[`. Returns the result and
/// how many pattern chars the body (including the closing `]`) used.
fn match_class(p: &[char], c: char) -> (bool, usize) {
    let mut i = 0;
    let negate = p.first() == Some(&'^');
    if negate {
        i += 1;
    }

    let mut hit = false;
    while i < p.len() && p[i] != ']' {
        if p[i] == '\\' && i + 1 < p.len() {
            hit |= p[i + 1] == c;
            i += 2;
        } else if i + 2 < p.len() && p[i + 1] == '-' && p[i + 2] != ']' {
            let (lo, hi) = if p[i] <= p[i + 2] {
                (p[i], p[i + 2])
            } else {
                (p[i + 2], p[i])
            };
            hit |= lo <= c && c <= hi;
            i += 3;
        } else {
            hit |= p[i] == c;
            i += 1;
        }
    }
    if i < p.len() {
        i += 1;
    }

    (hit != negate, i)
}
