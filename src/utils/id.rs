use chrono::Utc;
use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_LEN: usize = 7;

pub const ENTRY_ID_PREFIX: &str = "waitlist";

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    // 只會推入 ASCII
    String::from_utf8(digits).unwrap_or_default()
}

/// `<prefix>-<millis since epoch, base36>-<7 random base36 chars>`
pub fn generate_id(prefix: Option<&str>) -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let mut rng = rand::thread_rng();
    let random: String = (0..RANDOM_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    let id = format!("{}-{}", to_base36(millis), random);
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}-{}", prefix, id),
        _ => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id(Some(ENTRY_ID_PREFIX));
        let parts: Vec<&str> = id.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "waitlist");
        assert_eq!(parts[2].len(), RANDOM_LEN);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));

        assert_eq!(generate_id(None).split('-').count(), 2);
    }

    #[test]
    fn test_generate_id_distinct() {
        let ids: HashSet<String> = (0..200).map(|_| generate_id(Some("w"))).collect();
        assert_eq!(ids.len(), 200);
    }
}
