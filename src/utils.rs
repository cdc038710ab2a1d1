/// Prepare user input as an absolute URL: strip whitespace and default to https
pub fn ensure_scheme(url: &str) -> String {
    let compact: String = url.split_whitespace().collect();
    if compact.is_empty() {
        return compact;
    }

    let lower = compact.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        compact
    } else {
        format!("https://{compact}")
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
