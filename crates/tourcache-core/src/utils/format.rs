/// Normalize a phone number for international dialing.
/// Keeps only the digits and prepends `country_prefix` unless already present.
pub fn normalize_phone(phone: &str, country_prefix: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.starts_with(country_prefix) {
        digits
    } else {
        format!("{}{}", country_prefix, digits)
    }
}

/// Build a `wa.me` chat link for a tour.
/// `{name}` in `message_template` is replaced with `tour_name` before encoding.
pub fn whatsapp_link(phone: &str, country_prefix: &str, tour_name: &str, message_template: &str) -> String {
    let number = normalize_phone(phone, country_prefix);
    let message = message_template.replace("{name}", tour_name);
    format!("https://wa.me/{}?text={}", number, urlencoding::encode(&message))
}

/// Case-insensitive substring test
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
