//! Generated booking references and pass validity.

use rand::Rng;

/// `prefix` followed by nine random digits, e.g. `TKT482913075`.
pub fn reference_code(prefix: &str, rng: &mut impl Rng) -> String {
    format!("{prefix}{}", rng.gen_range(100_000_000..=999_999_999u32))
}

/// A seat from `A01` to `A99`.
pub fn seat_number(rng: &mut impl Rng) -> String {
    format!("A{:02}", rng.gen_range(1..=99u8))
}

/// Days a pass of `pass_type` stays valid.
pub fn pass_duration_days(pass_type: &str) -> i64 {
    match pass_type {
        "Daily" => 1,
        "Weekly" => 7,
        "Monthly" | "Student" => 30,
        "Quarterly" => 90,
        "Annual" => 365,
        _ => 30,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn codes_have_prefix_and_nine_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for prefix in ["TKT", "PASS", "COMP"] {
            let code = reference_code(prefix, &mut rng);
            let digits = code.strip_prefix(prefix).unwrap();
            assert_eq!(digits.len(), 9);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
            assert!(!digits.starts_with('0'));
        }
    }

    #[test]
    fn seats_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let seat = seat_number(&mut rng);
            let n: u8 = seat.strip_prefix('A').unwrap().parse().unwrap();
            assert_eq!(seat.len(), 3);
            assert!((1..=99).contains(&n));
        }
    }

    #[test]
    fn pass_durations() {
        assert_eq!(pass_duration_days("Daily"), 1);
        assert_eq!(pass_duration_days("Weekly"), 7);
        assert_eq!(pass_duration_days("Monthly"), 30);
        assert_eq!(pass_duration_days("Student"), 30);
        assert_eq!(pass_duration_days("Quarterly"), 90);
        assert_eq!(pass_duration_days("Annual"), 365);
        assert_eq!(pass_duration_days("Lifetime"), 30);
        assert_eq!(pass_duration_days("daily"), 30);
    }
}
