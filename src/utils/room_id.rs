//! Room identifier format and generation.

pub const MIN_LEN: usize = 4;
pub const MAX_LEN: usize = 10;
pub const GENERATED_LEN: usize = 6;

/// Base-36, already upper-cased.
const ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// `^[A-Za-z0-9]{4,10}$`
pub fn is_valid(id: &str) -> bool {
    (MIN_LEN..=MAX_LEN).contains(&id.len()) && id.bytes().all(|b| b.is_ascii_alphanumeric())
}

pub fn generate() -> String {
    nanoid::nanoid!(GENERATED_LEN, &ALPHABET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bounds() {
        assert!(is_valid("abcd"));
        assert!(is_valid("AB12cd34EF"));
        assert!(!is_valid("abc"));
        assert!(!is_valid("abcdefghijk"));
        assert!(!is_valid("ab-cd"));
        assert!(!is_valid("ábcd"));
        assert!(!is_valid(""));
    }

    #[test]
    fn generated_ids_are_six_upper_base36() {
        for _ in 0..200 {
            let id = generate();
            assert_eq!(id.len(), GENERATED_LEN);
            assert!(is_valid(&id));
            assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }
}
