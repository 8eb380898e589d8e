//! Shell-style `$VAR` and `${VAR}` expansion

use crate::env::Store;

/// Replace `$VAR` and `${VAR}` references in `value` with their values.
///
/// Unset variables expand to the empty string. A `$` that does not start a
/// reference is kept; malformed `${` references are dropped.
pub fn expand(value: &str, store: &dyn Store) -> String {
    expand_with(value, |name| store.read(name).unwrap_or_default())
}

/// Like [`expand`], resolving names with `lookup`.
pub fn expand_with(value: &str, mut lookup: impl FnMut(&str) -> String) -> String {
    let bytes = value.as_bytes();
    let mut out = String::with_capacity(value.len());
    let mut start = 0;
    let mut j = 0;

    while j < bytes.len() {
        if bytes[j] == b'$' && j + 1 < bytes.len() {
            out.push_str(&value[start..j]);
            let (name, width) = reference(&value[j + 1..]);
            match name {
                Some(name) => out.push_str(&lookup(name)),
                // `$` not followed by a name is kept as is.
                None if width == 0 => out.push('$'),
                None => {}
            }
            j += width;
            start = j + 1;
        }
        j += 1;
    }

    out.push_str(&value[start..]);
    out
}

fn is_special(c: u8) -> bool {
    matches!(c, b'*' | b'#' | b'$' | b'@' | b'!' | b'?' | b'-') || c.is_ascii_digit()
}

fn is_name(c: u8) -> bool {
    c == b'_' || c.is_ascii_alphanumeric()
}

// Name following a `$` and the number of bytes it spans. `(None, 0)` means
// no reference; `(None, n)` is a malformed reference to be skipped.
fn reference(s: &str) -> (Option<&str>, usize) {
    let bytes = s.as_bytes();
    if bytes[0] == b'{' {
        if bytes.len() > 2 && is_special(bytes[1]) && bytes[2] == b'}' {
            return (Some(&s[1..2]), 3);
        }
        return match s[1..].find('}') {
            Some(0) => (None, 2),
            Some(end) => (Some(&s[1..end + 1]), end + 2),
            None => (None, 1),
        };
    }
    if is_special(bytes[0]) {
        return (Some(&s[0..1]), 1);
    }
    let end = bytes.iter().position(|&c| !is_name(c)).unwrap_or(bytes.len());
    if end == 0 {
        (None, 0)
    } else {
        (Some(&s[..end]), end)
    }
}
