/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at property scale)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Round a monetary amount to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_monetary_amounts() {
        assert_eq!(round2(10.128), 10.13);
        assert_eq!(round2(10.124), 10.12);
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert_eq!(round2(99.999), 100.0);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn snowflake_id_encodes_recent_timestamp() {
        const EPOCH_MS: i64 = 1_704_067_200_000;
        let id = snowflake_id();
        assert!(id > 0);
        let ts = id >> 12;
        let elapsed = now_millis() - EPOCH_MS;
        assert!(ts <= elapsed);
        // Generated after 2024-01-01, so the timestamp bits are non-zero.
        assert!(ts > 0);
    }
}
