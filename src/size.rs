use std::sync::OnceLock;

use regex::Regex;

use crate::error::SizeParseError;

const KIB: u64 = 1024;

fn size_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)([kKmMgG]?)$").expect("size pattern is valid"))
}

/// Parses a byte count such as `500`, `500k`, `10M` or `1G` (base 1024).
pub fn parse_size(input: &str) -> Result<u64, SizeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SizeParseError::Empty);
    }
    let caps = size_regex()
        .captures(trimmed)
        .ok_or_else(|| SizeParseError::Invalid(trimmed.to_string()))?;

    let number: u64 = caps[1]
        .parse()
        .map_err(|_| SizeParseError::Overflow(trimmed.to_string()))?;
    let multiplier = match &caps[2] {
        "k" | "K" => KIB,
        "m" | "M" => KIB * KIB,
        "g" | "G" => KIB * KIB * KIB,
        _ => 1,
    };

    number
        .checked_mul(multiplier)
        .ok_or_else(|| SizeParseError::Overflow(trimmed.to_string()))
}
