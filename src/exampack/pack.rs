//! Plain-text exam-pack export
//!
//! Pinned library items are concatenated into a single revision document
//! with a small header per item.

use crate::library::Item;

/// Render pinned items as one exportable text blob.
pub fn build_pack(pinned: &[&Item]) -> String {
    pinned
        .iter()
        .map(|item| {
            format!(
                "--- {} ({}) ---\nTags: {}\n\n{}\n\n",
                item.title,
                item.kind.label(),
                item.tags.join(", "),
                item.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Filename for a unit's exam pack, derived from the unit name.
pub fn pack_filename(unit_name: &str) -> String {
    let slug = unit_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("exam-pack-{}.txt", slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::ItemKind;
    use uuid::Uuid;

    #[test]
    fn test_pack_contains_headers_and_content() {
        let unit = Uuid::new_v4();
        let a = Item::new(
            unit,
            "Carlill v Carbolic".into(),
            ItemKind::Case,
            vec!["Offer".into()],
            "Unilateral offers can be accepted by performance.".into(),
        );
        let b = Item::new(unit, "Week 1".into(), ItemKind::Note, vec![], "Notes.".into());

        let pack = build_pack(&[&a, &b]);
        assert!(pack.contains("--- Carlill v Carbolic (case) ---"));
        assert!(pack.contains("Tags: Offer"));
        assert!(pack.contains("accepted by performance"));
        assert!(pack.contains("--- Week 1 (note) ---"));
    }

    #[test]
    fn test_pack_filename_slug() {
        assert_eq!(pack_filename("Criminal Law"), "exam-pack-criminal-law.txt");
    }
}
