/// Shortens `label` to at most `max_chars` characters, ending in an ellipsis
/// when anything was cut.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    let label = label.trim();
    if label.chars().count() <= max_chars {
        return label.to_owned();
    }

    let mut truncated = label
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    truncated.truncate(truncated.trim_end().len());
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_labels_are_untouched() {
        assert_eq!(truncate_label("Pricing", 24), "Pricing");
        assert_eq!(truncate_label("  padded  ", 24), "padded");
    }

    #[test]
    fn long_labels_end_in_an_ellipsis() {
        let label = truncate_label("Quarterly partnership review notes", 12);
        assert_eq!(label, "Quarterly p…");
        assert_eq!(label.chars().count(), 12);
    }

    #[test]
    fn trailing_space_is_dropped_before_the_ellipsis() {
        assert_eq!(truncate_label("Grant round two", 7), "Grant…");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(truncate_label("Māori kōrero pūrākau", 6), "Māori…");
    }
}
