//! Nigerian mobile number validation and network detection.
//!
//! Accepts the shapes customers actually type: `08031234567`, `8031234567`,
//! `+2348031234567`, `2348031234567`, with or without separators. The
//! prefix table is the NCC allocation; a valid number whose prefix is not
//! listed has no detectable network.

use crate::core_types::Network;

/// Strips separators and country-code decoration and returns the 10-digit
/// local part (e.g. "8031234567"), or None if the shape is wrong.
pub fn normalize(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    let local = if let Some(rest) = digits.strip_prefix("234") {
        rest.to_string()
    } else if digits.len() == 11 && digits.starts_with('0') {
        digits[1..].to_string()
    } else {
        digits
    };

    if local.len() == 10 && matches!(local.as_bytes()[0], b'7' | b'8' | b'9') {
        Some(local)
    } else {
        None
    }
}

pub fn is_valid(input: &str) -> bool {
    normalize(input).is_some()
}

/// Derives the operator from the number's prefix.
pub fn detect_network(input: &str) -> Option<Network> {
    let local = normalize(input)?;
    network_for_prefix(&local[..3])
}

fn network_for_prefix(prefix: &str) -> Option<Network> {
    match prefix {
        "703" | "706" | "803" | "806" | "810" | "813" | "814" | "816" | "903" | "906" | "913"
        | "916" => Some(Network::Mtn),
        "702" | "708" | "802" | "808" | "812" | "901" | "902" | "904" | "907" | "912" => {
            Some(Network::Airtel)
        }
        "705" | "805" | "807" | "811" | "815" | "905" | "915" => Some(Network::Glo),
        "709" | "809" | "817" | "818" | "908" | "909" => Some(Network::NineMobile),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_accepted_shapes() {
        assert_eq!(normalize("08031234567").as_deref(), Some("8031234567"));
        assert_eq!(normalize("8031234567").as_deref(), Some("8031234567"));
        assert_eq!(normalize("+2348031234567").as_deref(), Some("8031234567"));
        assert_eq!(normalize("2348031234567").as_deref(), Some("8031234567"));
        assert_eq!(normalize("0803 123 4567").as_deref(), Some("8031234567"));
    }

    #[test]
    fn test_rejects_malformed_numbers() {
        assert!(!is_valid(""));
        assert!(!is_valid("12345"));
        assert!(!is_valid("06031234567")); // local part must start 7/8/9
        assert!(!is_valid("080312345678")); // too long
        assert!(!is_valid("not a number"));
    }

    #[test]
    fn test_network_detection() {
        assert_eq!(detect_network("08031234567"), Some(Network::Mtn));
        assert_eq!(detect_network("+2349051234567"), Some(Network::Glo));
        assert_eq!(detect_network("07021234567"), Some(Network::Airtel));
        assert_eq!(detect_network("08091234567"), Some(Network::NineMobile));
        // Valid shape, unallocated prefix.
        assert_eq!(detect_network("07991234567"), None);
    }
}
