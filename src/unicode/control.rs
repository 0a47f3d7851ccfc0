//! Control-character and whitespace classification.

/// Check if a character should be rendered as a control character.
///
/// Covers C0 controls except tab, DEL, and the Unicode directional
/// formatting characters (embeddings, overrides, isolates and marks).
#[must_use]
pub fn is_control_character(c: char) -> bool {
    let code = u32::from(c);
    if code < 32 {
        return c != '\t';
    }
    if code == 127 {
        return true;
    }
    matches!(
        code,
        0x202A..=0x202E | 0x2066..=0x2069 | 0x200E..=0x200F | 0x061C
    )
}

/// Check if a string only contains tab, line feed, carriage return and
/// printable ASCII.
#[must_use]
pub fn is_basic_ascii(s: &str) -> bool {
    s.bytes()
        .all(|b| b == b'\t' || b == b'\n' || b == b'\r' || (0x20..=0x7E).contains(&b))
}

/// Index of the first character that is neither a space nor a tab.
#[must_use]
pub fn first_non_whitespace_index(chars: &[char]) -> Option<usize> {
    chars.iter().position(|&c| c != ' ' && c != '\t')
}

/// Index of the last character that is neither a space nor a tab.
#[must_use]
pub fn last_non_whitespace_index(chars: &[char]) -> Option<usize> {
    chars.iter().rposition(|&c| c != ' ' && c != '\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c0_controls() {
        assert!(is_control_character('\0'));
        assert!(is_control_character('\u{1b}'));
        assert!(!is_control_character('\t'));
        assert!(is_control_character('\u{7f}'));
        assert!(!is_control_character(' '));
    }

    #[test]
    fn test_bidi_formatting_controls() {
        for code in [0x202A, 0x202E, 0x2066, 0x2069, 0x200E, 0x200F, 0x061C] {
            let c = char::from_u32(code).unwrap();
            assert!(is_control_character(c), "U+{code:04X}");
        }
        assert!(!is_control_character('\u{2029}'));
    }

    #[test]
    fn test_basic_ascii() {
        assert!(is_basic_ascii("fn main() {\t}\r\n"));
        assert!(is_basic_ascii(""));
        assert!(!is_basic_ascii("a\u{1}b"));
        assert!(!is_basic_ascii("café"));
        assert!(!is_basic_ascii("\u{7f}"));
    }

    #[test]
    fn test_whitespace_bounds() {
        let chars: Vec<char> = "  \tab c \t".chars().collect();
        assert_eq!(first_non_whitespace_index(&chars), Some(3));
        assert_eq!(last_non_whitespace_index(&chars), Some(6));

        let blank: Vec<char> = " \t ".chars().collect();
        assert_eq!(first_non_whitespace_index(&blank), None);
        assert_eq!(last_non_whitespace_index(&blank), None);
    }
}
