//! Text manipulation utilities for working with identifiers.

/// Check if a character can continue an identifier.
///
/// Uses Unicode Standard Annex #31 rules for identifier characters.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Check whether `name` is a valid identifier (module names, symbol names).
///
/// `_` is accepted as a start character, matching Swift.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {}
        _ => return false,
    }
    chars.all(is_word_character)
}

/// Find the byte range of the identifier touching `offset` in `text`.
///
/// An offset directly after the last character still touches the word.
pub fn word_at(text: &str, offset: usize) -> Option<(usize, usize)> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        return None;
    }
    let start = text[..offset]
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_character(*c))
        .last()
        .map(|(i, _)| i)
        .unwrap_or(offset);
    let end = text[offset..]
        .char_indices()
        .find(|(_, c)| !is_word_character(*c))
        .map(|(i, _)| offset + i)
        .unwrap_or(text.len());
    (start < end).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Foo2"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("Ünïcode"));
        assert!(!is_identifier("2Foo"));
        assert!(!is_identifier("Foo-Bar"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_word_at() {
        let line = "public class FooOverlayClassBase {";
        assert_eq!(word_at(line, 15), Some((13, 32)));
        assert_eq!(word_at(line, 32), Some((13, 32)));
        assert_eq!(word_at(line, 33), None);
    }
}
