//! # Table Names
//!
//! The single canonicalization rule for table identity.
//!
//! ```text
//!   waiter types        normalize()        key in ActiveTables
//!   ────────────        ───────────        ───────────────────
//!   "5"            ──►  "Mesa 5"
//!   " 5 "          ──►  "Mesa 5"      ──►  same table
//!   "Mesa 5"       ──►  "Mesa 5"
//!   "Familia Pérez"──►  "Familia Pérez"
//! ```
//!
//! Editing goes the other way: [`display_identifier`] strips the prefix so the
//! waiter sees "5" in the input box, and saving restores "Mesa 5".

/// Prefix applied to numeric table identifiers.
pub const TABLE_PREFIX: &str = "Mesa ";

/// Canonicalizes raw table-name input.
///
/// Trimmed input that starts with an integer (optional sign, then at least one
/// digit) and does not mention "mesa" in any case gets the `"Mesa "` prefix.
/// Anything else is kept verbatim after trimming.
///
/// ```rust
/// use mesa_core::table_name::normalize;
///
/// assert_eq!(normalize("5"), "Mesa 5");
/// assert_eq!(normalize("Mesa 5"), "Mesa 5");
/// assert_eq!(normalize("Familia Pérez"), "Familia Pérez");
/// ```
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if starts_with_integer(trimmed) && !trimmed.to_lowercase().contains("mesa") {
        format!("{}{}", TABLE_PREFIX, trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Returns the identifier shown while editing: a leading "mesa " prefix
/// (any case) is removed, other names are returned unchanged.
pub fn display_identifier(table_name: &str) -> &str {
    let prefix_len = TABLE_PREFIX.len();
    match table_name.get(..prefix_len) {
        Some(head) if head.eq_ignore_ascii_case(TABLE_PREFIX) => &table_name[prefix_len..],
        _ => table_name,
    }
}

// "12", "+3", "-1", "4B" and "7 terraza" all count; "B4" and "" do not.
fn starts_with_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    digits.chars().next().is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_input_gets_prefix() {
        assert_eq!(normalize("5"), "Mesa 5");
        assert_eq!(normalize("  12  "), "Mesa 12");
        assert_eq!(normalize("4B"), "Mesa 4B");
    }

    #[test]
    fn test_names_kept_verbatim() {
        assert_eq!(normalize("Mesa 5"), "Mesa 5");
        assert_eq!(normalize("MESA 5"), "MESA 5");
        assert_eq!(normalize("Familia Pérez"), "Familia Pérez");
        assert_eq!(normalize("B4"), "B4");
        assert_eq!(normalize("  Barra "), "Barra");
    }

    #[test]
    fn test_numeric_with_mesa_word_not_prefixed() {
        assert_eq!(normalize("5 mesa grande"), "5 mesa grande");
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_display_identifier() {
        assert_eq!(display_identifier("Mesa 5"), "5");
        assert_eq!(display_identifier("mesa 7"), "7");
        assert_eq!(display_identifier("Familia Pérez"), "Familia Pérez");
        assert_eq!(display_identifier("Mesa"), "Mesa");
        // Multi-byte name shorter than the prefix must not panic
        assert_eq!(display_identifier("Ñú"), "Ñú");
    }

    #[test]
    fn test_display_then_normalize_restores_name() {
        assert_eq!(normalize(display_identifier("Mesa 5")), "Mesa 5");
    }
}
