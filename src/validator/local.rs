/// Ponctuation admise dans un dot-atom (RFC 5322 §3.2.3), hors '.'.
const ATEXT_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~";

fn is_atext(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_alphanumeric() || ATEXT_SPECIALS.contains(c)
    } else {
        // RFC 6531: UTF-8 imprimable
        !c.is_control() && !c.is_whitespace()
    }
}

/// Dot-atom: atomes non vides séparés par des points simples.
pub(crate) fn is_local_strict(s: &str) -> bool {
    s.split('.')
        .all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
}

/// Relaxed: une quoted-string sans caractère de contrôle, ou un dot-atom.
pub(crate) fn is_local_relaxed(s: &str) -> bool {
    match s.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        Some(inner) => !inner.chars().any(char::is_control),
        None => is_local_strict(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_must_separate_atoms() {
        for bad in [".abc", "abc.", "a..b", "."] {
            assert!(!is_local_strict(bad), "{bad}");
        }
        assert!(is_local_strict("first.last+tag"));
    }

    #[test]
    fn strict_rejects_space_and_quotes() {
        assert!(!is_local_strict("a b"));
        assert!(!is_local_strict("\"ab\""));
    }

    #[test]
    fn strict_accepts_utf8_letters() {
        assert!(is_local_strict("pelé"));
    }

    #[test]
    fn relaxed_takes_quoted_strings() {
        assert!(is_local_relaxed("\"a b\""));
        assert!(!is_local_relaxed("\"a\tb\""));
        assert!(!is_local_relaxed("\""));
    }
}
