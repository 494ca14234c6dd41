/// Store-assigned record identifier. Serialized as `Id` on every entity.
pub type RecordId = i64;

/// Coerce a raw identifier the way the presentation layer always has:
/// optional surrounding whitespace, an optional sign, then the leading run
/// of ASCII digits. Anything after the digits is ignored (`"12abc"` → 12).
/// Returns `None` when there is no leading integer at all.
pub fn coerce_id(raw: &str) -> Option<RecordId> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: RecordId = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
