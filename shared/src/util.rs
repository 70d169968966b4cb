/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at kiosk scale)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Generate a prefixed resource id, e.g. `rest_88412736271` / `item_88412736272`.
pub fn prefixed_id(prefix: &str) -> String {
    format!("{}_{}", prefix, snowflake_id())
}

/// Derive the URL-safe part of a public slug from a display name.
///
/// Lowercases, maps every non-alphanumeric run to a single `-`, and trims
/// leading/trailing dashes. The uniqueness suffix is appended by the caller.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Mario's Pizza"), "mario-s-pizza");
        assert_eq!(slugify("The  Golden   Spoon"), "the-golden-spoon");
    }

    #[test]
    fn test_slugify_trims_and_collapses() {
        assert_eq!(slugify("--Café!!"), "caf");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("A&B"), "a-b");
    }

    #[test]
    fn test_prefixed_id_shape() {
        let id = prefixed_id("rest");
        assert!(id.starts_with("rest_"));
        assert!(id["rest_".len()..].parse::<i64>().is_ok());
    }
}
