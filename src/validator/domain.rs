use unicode_normalization::UnicodeNormalization;

const MAX_LABEL_LEN: usize = 63;

/// Checks the domain part after IDNA conversion and appends every defect to
/// `reasons`.
pub(crate) fn check_domain(domain: &str, reasons: &mut Vec<String>) {
    if domain.is_empty() {
        reasons.push("domain part is empty".to_string());
        return;
    }

    let ascii = match idna::domain_to_ascii(domain) {
        Ok(ascii) if !ascii.is_empty() => ascii,
        Ok(_) => {
            reasons.push("domain empty after IDNA conversion".to_string());
            return;
        }
        Err(_) => {
            reasons.push("domain punycode conversion failed".to_string());
            return;
        }
    };

    let labels: Vec<&str> = ascii.split('.').collect();
    if labels.len() < 2 {
        reasons.push("domain must contain at least one dot".to_string());
    }
    reasons.extend(labels.iter().filter_map(|label| label_defect(label)));

    if let Some(tld) = labels.last().filter(|tld| !tld.is_empty()) {
        if tld.bytes().all(|b| b.is_ascii_digit()) {
            reasons.push(format!("top-level label '{tld}' cannot be all-numeric"));
        }
    }
}

/// LDH rule for one ASCII label; first defect only.
fn label_defect(label: &str) -> Option<String> {
    if label.is_empty() {
        Some("empty domain label".to_string())
    } else if label.len() > MAX_LABEL_LEN {
        Some(format!("domain label '{label}' length {} > {MAX_LABEL_LEN}", label.len()))
    } else if label.starts_with('-') || label.ends_with('-') {
        Some(format!("domain label '{label}' cannot start/end with '-'"))
    } else if !label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        Some(format!("domain label '{label}' has invalid chars"))
    } else {
        None
    }
}

/// Retourne (domaine NFC en minuscules, forme ASCII IDNA ou vide si échec).
pub(crate) fn normalize_domain(domain: &str) -> (String, String) {
    let lower = domain.trim().nfc().collect::<String>().to_lowercase();
    let ascii = idna::domain_to_ascii(&lower).unwrap_or_default();
    (lower, ascii)
}
