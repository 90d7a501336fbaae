//! Visual alignment of mixed-width strings.
//!
//! Chinese glosses mix full-width glyphs (two terminal columns) with
//! half-width ones. Padding with ASCII spaces alone cannot line up two
//! such strings, so full-width and half-width deficits are padded
//! independently: full-width spaces (U+3000) for the former, ASCII
//! spaces for the latter.

use unicode_width::UnicodeWidthChar;

/// Count the full-width and half-width characters of a string.
///
/// A character is full-width when it occupies two columns under
/// East-Asian-width rules; everything else counts as half-width.
pub fn count_widths(s: &str) -> (usize, usize) {
    let mut fullwidth = 0;
    let mut halfwidth = 0;

    for c in s.chars() {
        if c.width().unwrap_or(1) == 2 {
            fullwidth += 1;
        } else {
            halfwidth += 1;
        }
    }

    (fullwidth, halfwidth)
}

/// Pad two strings so their full-width and half-width counts match.
///
/// Only appends, never truncates or inserts internally. After the call
/// both strings occupy the same number of terminal columns.
pub fn align_strings(a: &str, b: &str) -> (String, String) {
    let (full_a, half_a) = count_widths(a);
    let (full_b, half_b) = count_widths(b);

    let mut a = a.to_string();
    let mut b = b.to_string();

    if full_a < full_b {
        a.extend(std::iter::repeat('\u{3000}').take(full_b - full_a));
    } else {
        b.extend(std::iter::repeat('\u{3000}').take(full_a - full_b));
    }

    if half_a < half_b {
        a.extend(std::iter::repeat(' ').take(half_b - half_a));
    } else {
        b.extend(std::iter::repeat(' ').take(half_a - half_b));
    }

    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_cjk_as_fullwidth() {
        assert_eq!(count_widths("苹果"), (2, 0));
        assert_eq!(count_widths("abc"), (0, 3));
        assert_eq!(count_widths("苹果ab"), (2, 2));
        assert_eq!(count_widths(""), (0, 0));
    }

    #[test]
    fn fullwidth_space_counts_as_fullwidth() {
        assert_eq!(count_widths("\u{3000}"), (1, 0));
    }

    #[test]
    fn aligned_strings_have_equal_counts() {
        let cases = [
            ("苹果", "逃跑，逃离"),
            ("abc", "一二三"),
            ("", "混合mix"),
            ("短", "a much longer half-width string"),
        ];

        for (a, b) in cases {
            let (pa, pb) = align_strings(a, b);
            assert_eq!(count_widths(&pa), count_widths(&pb), "{a:?} vs {b:?}");
            // Padding only appends.
            assert!(pa.starts_with(a));
            assert!(pb.starts_with(b));
        }
    }

    #[test]
    fn equal_strings_are_untouched() {
        let (a, b) = align_strings("苹果", "银行");
        assert_eq!(a, "苹果");
        assert_eq!(b, "银行");
    }

    #[test]
    fn pads_fullwidth_deficit_with_ideographic_space() {
        let (a, b) = align_strings("苹果", "逃跑，逃离");
        assert_eq!(a, "苹果\u{3000}\u{3000}\u{3000}");
        assert_eq!(b, "逃跑，逃离");
    }
}
