//! Static syntax checks for e-mail addresses. Nothing here touches the network.

mod domain;
mod local;
mod types;

pub use types::{NormalizedEmail, SyntaxCheck, ValidationMode, ValidationReport};

use unicode_normalization::UnicodeNormalization;

use domain::{check_domain, normalize_domain};
use local::{is_local_relaxed, is_local_strict};

pub fn validate_email(email: &str, mode: ValidationMode) -> ValidationReport {
    let input = email.trim();

    let mut reasons = Vec::new();

    if input.is_empty() {
        reasons.push("address is empty".to_string());
        return ValidationReport { ok: false, reasons };
    }

    if input.len() > 254 {
        reasons.push(format!("total length {} > 254", input.len()));
    }

    let Some((local, domain)) = split_address(input) else {
        reasons.push("must contain exactly one '@'".to_string());
        return ValidationReport { ok: false, reasons };
    };

    if local.is_empty() || local.len() > 64 {
        reasons.push(format!(
            "local part length {} invalid (1..=64)",
            local.len()
        ));
    }

    check_domain(domain, &mut reasons);

    let local_ok = match mode {
        ValidationMode::Strict => is_local_strict(local),
        ValidationMode::Relaxed => is_local_relaxed(local),
    };
    if !local_ok && !local.is_empty() {
        reasons.push(match mode {
            ValidationMode::Strict => "invalid local part (strict rules)".into(),
            ValidationMode::Relaxed => "invalid local part (relaxed rules)".into(),
        });
    }

    let ok = reasons.is_empty();
    ValidationReport { ok, reasons }
}

/// Valide et renvoie une sortie normalisée (local NFC, domaine en
/// minuscules, domaine ASCII).
pub fn normalize_email(email: &str, mode: ValidationMode) -> NormalizedEmail {
    let input = email.trim().nfc().collect::<String>();
    let (local, domain) = split_address(&input).unwrap_or(("", ""));

    let ValidationReport { ok, reasons } = validate_email(&input, mode);
    let (domain_lower, ascii_domain) = normalize_domain(domain);

    NormalizedEmail {
        original: email.to_string(),
        local: local.to_string(),
        domain: domain_lower,
        ascii_domain,
        mode,
        valid: ok,
        reasons,
    }
}

/// Syntax stage of the verification pipeline: canonical address and domain
/// on success, a single "Syntax error" note otherwise.
pub fn check_syntax(email: &str, mode: ValidationMode) -> SyntaxCheck {
    let normalized = normalize_email(email, mode);
    if normalized.valid {
        let ascii = normalized.lookup_domain().to_string();
        SyntaxCheck {
            valid: true,
            normalized: normalized.address(),
            domain: Some(normalized.domain),
            ascii_domain: Some(ascii),
            notes: Vec::new(),
        }
    } else {
        SyntaxCheck {
            valid: false,
            normalized: None,
            domain: None,
            ascii_domain: None,
            notes: vec![format!("Syntax error: {}", normalized.reasons.join("; "))],
        }
    }
}

fn split_address(input: &str) -> Option<(&str, &str)> {
    // l'arobase d'une quoted-string ne compte pas, on coupe sur le dernier
    let (local, domain) = input.rsplit_once('@')?;
    let quoted = local.len() >= 2 && local.starts_with('"') && local.ends_with('"');
    if local.contains('@') && !quoted {
        return None;
    }
    Some((local, domain))
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn accepts_basic() {
        let r = validate_email("alice@example.com", ValidationMode::Strict);
        assert!(r.ok, "{:?}", r.reasons);
    }

    #[test]
    fn rejects_double_at() {
        let r = validate_email("a@@b.com", ValidationMode::Strict);
        assert!(!r.ok);
    }

    #[test]
    fn rejects_missing_at() {
        let r = validate_email("not-an-email", ValidationMode::Strict);
        assert!(!r.ok);
        assert_eq!(r.reasons, vec!["must contain exactly one '@'".to_string()]);
    }

    #[test]
    fn normalized_has_ascii_domain() {
        let n = normalize_email("alice@exämple.com", ValidationMode::Strict);
        assert!(n.valid, "{:?}", n.reasons);
        assert_eq!(n.ascii_domain, "xn--exmple-cua.com");
    }

    #[test]
    fn relaxed_accepts_quoted_at() {
        let n = normalize_email("\"a@b\"@example.com", ValidationMode::Relaxed);
        assert!(n.valid, "{:?}", n.reasons);
        assert_eq!(n.local, "\"a@b\"");
        let strict = normalize_email("\"a@b\"@example.com", ValidationMode::Strict);
        assert!(!strict.valid);
    }

    #[test]
    fn syntax_check_canonicalizes_domain_case_and_whitespace() {
        let check = check_syntax("  Alice@Example.COM ", ValidationMode::Strict);
        assert!(check.valid);
        assert_eq!(check.normalized.as_deref(), Some("Alice@example.com"));
        assert_eq!(check.domain.as_deref(), Some("example.com"));
        assert!(check.notes.is_empty());
    }

    #[test]
    fn syntax_check_reports_defect_as_note() {
        let check = check_syntax("not-an-email", ValidationMode::Strict);
        assert!(!check.valid);
        assert!(check.normalized.is_none());
        assert!(check.domain.is_none());
        assert_eq!(check.notes.len(), 1);
        assert!(check.notes[0].starts_with("Syntax error:"));
    }

    #[test]
    fn syntax_check_accepts_test_tld() {
        let check = check_syntax("user@no-mx-domain.test", ValidationMode::Strict);
        assert!(check.valid, "{:?}", check.notes);
        assert_eq!(check.ascii_domain.as_deref(), Some("no-mx-domain.test"));
    }
}
