//! Trailing member indices,
//! as in `name[3]`.

const OPEN: char = '[';
const CLOSE: char = ']';
const ESCAPE: char = '\\';

/// Split a name ending in `[N]`
/// into the text before the `[`
/// and `N`.
///
/// Returns `None`
/// if the name does not end in `]`,
/// if the last `[` is escaped,
/// or if the brackets do not hold a non-negative integer.
pub(super) fn split(name: &str) -> Option<(&str, usize)> {
    let inner = name.strip_suffix(CLOSE)?;
    let open = inner.rfind(OPEN)?;
    let (stem, digits) = (&inner[..open], &inner[(open + OPEN.len_utf8())..]);
    if stem.ends_with(ESCAPE) || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        None
    } else {
        digits.parse().ok().map(|index| (stem, index))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    #[test]
    fn split_returns_stem_and_index() {
        assert_eq!(split("foo[0]"), Some(("foo", 0)));
        assert_eq!(split("foo[12]"), Some(("foo", 12)));
        assert_eq!(split("foo[1][2]"), Some(("foo[1]", 2)));
        assert_eq!(split("[7]"), Some(("", 7)));
    }

    #[test]
    fn split_returns_none_without_index() {
        assert_eq!(split("foo"), None);
        assert_eq!(split("foo]"), None);
        assert_eq!(split("foo[]"), None);
        assert_eq!(split("foo[-1]"), None);
        assert_eq!(split("foo[+1]"), None);
        assert_eq!(split("foo[1x]"), None);
        assert_eq!(split("foo[1]x"), None);
    }

    #[test]
    fn split_returns_none_for_escaped_bracket() {
        assert_eq!(split(r"foo\[1]"), None);
    }

    #[test]
    fn split_returns_none_for_overflowing_index() {
        assert_eq!(split("foo[99999999999999999999999999]"), None);
    }

    #[proptest]
    fn split_inverts_format(#[strategy("[a-z]{0,8}")] stem: String, index: usize) {
        let name = format!("{stem}[{index}]");
        prop_assert_eq!(split(&name), Some((stem.as_str(), index)));
    }
}
