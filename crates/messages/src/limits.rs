//! Shared field-limit checks.
//!
//! The Cloud API enforces these limits server-side but reports them poorly;
//! checking at construction keeps the failure next to the offending call.

use crate::error::MessageError;

/// Bounded-collection invariant: `1 <= count <= max`.
pub(crate) fn check_count(
    parent: &'static str,
    child: &'static str,
    count: usize,
    max: usize,
) -> Result<(), MessageError> {
    if count == 0 {
        return Err(MessageError::AtLeastOne { parent, child });
    }
    if count > max {
        return Err(MessageError::TooMany { parent, child, max });
    }
    Ok(())
}

/// Character-count ceiling. Limits are characters, not bytes.
pub(crate) fn check_len(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), MessageError> {
    if value.chars().count() > max {
        return Err(MessageError::TooLong { field, max });
    }
    Ok(())
}

pub(crate) fn check_not_empty(field: &'static str, value: &str) -> Result<(), MessageError> {
    if value.is_empty() {
        return Err(MessageError::Empty { field });
    }
    Ok(())
}

/// Non-empty and within `max` characters.
pub(crate) fn check_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), MessageError> {
    check_not_empty(field, value)?;
    check_len(field, value, max)
}

/// Every section must carry a title once more than one is given.
pub(crate) fn check_section_titles<'a, I>(
    parent: &'static str,
    titles: I,
) -> Result<(), MessageError>
where
    I: ExactSizeIterator<Item = Option<&'a str>>,
{
    if titles.len() > 1 && titles.into_iter().any(|t| t.is_none()) {
        return Err(MessageError::UntitledSection { parent });
    }
    Ok(())
}

/// Rough emoji scan covering the pictographic and symbol blocks the API
/// rejects in plain-text fields such as the flow CTA.
pub(crate) fn contains_emoji(value: &str) -> bool {
    value.chars().any(|c| {
        matches!(
            u32::from(c),
            0x1F000..=0x1FAFF | 0x2600..=0x27BF | 0x2B00..=0x2BFF | 0xFE00..=0xFE0F | 0x2190..=0x21FF
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_bounds() {
        assert!(check_count("ActionButtons", "buttons", 3, 3).is_ok());
        assert_eq!(
            check_count("ActionButtons", "buttons", 4, 3),
            Err(MessageError::TooMany {
                parent: "ActionButtons",
                child: "buttons",
                max: 3
            })
        );
        assert_eq!(
            check_count("ActionButtons", "buttons", 0, 3),
            Err(MessageError::AtLeastOne {
                parent: "ActionButtons",
                child: "buttons"
            })
        );
    }

    #[test]
    fn limits_are_characters_not_bytes() {
        // Four chars, twelve bytes.
        assert!(check_len("text body", "❤️❤️", 4).is_ok());
    }

    #[test]
    fn emoji_detection() {
        assert!(contains_emoji("pay now 🚀"));
        assert!(contains_emoji("☕ break"));
        assert!(!contains_emoji("Open catalog"));
        assert!(!contains_emoji("Précis à 100%"));
    }
}
