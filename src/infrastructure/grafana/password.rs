//! Bootstrap password generation for provisioned org users

use rand::Rng;
use rand::seq::SliceRandom;

const LENGTH: usize = 8;
// 0 and 1 are excluded as visually ambiguous with O and l.
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"-_+=";
const ALL: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz23456789-_+=";

/// Generates an 8-character password containing at least one digit from
/// `23456789` and one symbol from `-_+=`, then shuffles the buffer so the
/// class positions are not predictable.
///
/// This is a low-assurance bootstrap credential: it is echoed back in the
/// provisioning response and expected to be rotated by the tenant.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    let mut buf = [0u8; LENGTH];

    buf[0] = DIGITS[rng.gen_range(0..DIGITS.len())];
    buf[1] = SYMBOLS[rng.gen_range(0..SYMBOLS.len())];
    for slot in buf.iter_mut().skip(2) {
        *slot = ALL[rng.gen_range(0..ALL.len())];
    }

    buf.shuffle(&mut rng);

    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_fixed() {
        for _ in 0..100 {
            assert_eq!(generate().len(), 8);
        }
    }

    #[test]
    fn test_charset_is_bounded() {
        for _ in 0..100 {
            let password = generate();
            assert!(
                password.bytes().all(|b| ALL.contains(&b)),
                "unexpected character in {password:?}"
            );
        }
    }

    #[test]
    fn test_contains_digit_and_symbol() {
        for _ in 0..100 {
            let password = generate();
            assert!(
                password.bytes().any(|b| DIGITS.contains(&b)),
                "no digit in {password:?}"
            );
            assert!(
                password.bytes().any(|b| SYMBOLS.contains(&b)),
                "no symbol in {password:?}"
            );
        }
    }

    #[test]
    fn test_outputs_vary() {
        let first = generate();
        assert!((0..50).map(|_| generate()).any(|p| p != first));
    }
}
