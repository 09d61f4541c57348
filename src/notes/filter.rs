use crate::models::Note;
use serde::{Deserialize, Serialize};

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ViewFilter {
    #[default]
    Home,
    Favorites,
}

impl ViewFilter {
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "All Notes",
            Self::Favorites => "Favorite Notes",
        }
    }

    pub fn admits(self, note: &Note) -> bool {
        match self {
            Self::Home => true,
            Self::Favorites => note.favorite,
        }
    }
}

/// Case-insensitive substring match on title or content. An empty query
/// matches everything.
pub(crate) fn matches_query(note: &Note, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let q = query.to_lowercase();
    note.title.to_lowercase().contains(&q) || note.content.to_lowercase().contains(&q)
}

pub(crate) fn visible_notes<'a>(notes: &'a [Note], view: ViewFilter, query: &str) -> Vec<&'a Note> {
    notes
        .iter()
        .filter(|n| view.admits(n) && matches_query(n, query))
        .collect()
}

/// Hint shown under "No notes found".
pub(crate) fn empty_state_hint(view: ViewFilter, query: &str) -> &'static str {
    if !query.is_empty() {
        "Try adjusting your search query"
    } else if view == ViewFilter::Favorites {
        "You haven't added any favorites yet"
    } else {
        "Click the \"Add Note\" button to create your first note"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::note;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Note> {
        vec![
            note("1", "Groceries", "milk, eggs", false),
            note("2", "Standup", "Ship the RELEASE notes", true),
            note("3", "Ideas", "release party?", true),
            note("4", "", "", false),
        ]
    }

    fn ids(notes: Vec<&Note>) -> Vec<&str> {
        notes.into_iter().filter_map(|n| n.id()).collect()
    }

    #[test]
    fn test_home_with_empty_query_shows_everything() {
        let notes = sample();
        let visible = visible_notes(&notes, ViewFilter::Home, "");
        assert_eq!(visible.len(), notes.len());
        assert!(visible.iter().zip(&notes).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_favorites_is_exactly_the_favorite_subset() {
        let notes = sample();
        assert_eq!(ids(visible_notes(&notes, ViewFilter::Favorites, "")), vec!["2", "3"]);
    }

    #[test]
    fn test_search_is_case_insensitive_on_title_and_content() {
        let notes = sample();
        assert_eq!(ids(visible_notes(&notes, ViewFilter::Home, "release")), vec!["2", "3"]);
        assert_eq!(ids(visible_notes(&notes, ViewFilter::Home, "GROC")), vec!["1"]);
        assert_eq!(ids(visible_notes(&notes, ViewFilter::Home, "eggs")), vec!["1"]);
        assert!(visible_notes(&notes, ViewFilter::Home, "zebra").is_empty());
    }

    #[test]
    fn test_search_intersects_with_view() {
        let mut notes = sample();
        notes[2].favorite = false;
        assert_eq!(
            ids(visible_notes(&notes, ViewFilter::Favorites, "release")),
            vec!["2"]
        );
    }

    #[test]
    fn test_search_matches_every_note_it_should() {
        let notes = sample();
        for q in ["e", "s", "notes", "?"] {
            let expected: Vec<&str> = notes
                .iter()
                .filter(|n| {
                    n.title.to_lowercase().contains(q) || n.content.to_lowercase().contains(q)
                })
                .filter_map(|n| n.id())
                .collect();
            assert_eq!(ids(visible_notes(&notes, ViewFilter::Home, q)), expected, "query {q:?}");
        }
    }

    #[test]
    fn test_empty_state_hints() {
        assert_eq!(
            empty_state_hint(ViewFilter::Favorites, "x"),
            "Try adjusting your search query"
        );
        assert_eq!(
            empty_state_hint(ViewFilter::Favorites, ""),
            "You haven't added any favorites yet"
        );
        assert!(empty_state_hint(ViewFilter::Home, "").contains("Add Note"));
    }

    #[test]
    fn test_view_titles() {
        assert_eq!(ViewFilter::Home.title(), "All Notes");
        assert_eq!(ViewFilter::Favorites.title(), "Favorite Notes");
    }
}
