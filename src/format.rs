// Display-as-you-type helpers for payment fields

pub const CARD_DIGIT_LIMIT: usize = 16;

// Reshape raw card input for display: keep digits only, cap at 16, group into
// chunks of 4 separated by single spaces. Shape only - a well-formed fake
// number passes through untouched.
pub fn format_card_number(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(CARD_DIGIT_LIMIT)
        .collect();

    digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

// Last four digits of whatever the guest typed, used by the check-in form.
pub fn card_last4(raw: &str) -> Option<String> {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return None;
    }
    Some(digits[digits.len() - 4..].iter().collect())
}
