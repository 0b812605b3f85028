//! Change classification: note/add/delete tagging and the conspicuity
//! filter used to build the chart-check shortlist.

use once_cell::sync::Lazy;
use regex::Regex;

static NOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\bnote\b)|(tabulation)").expect("note pattern is valid")
});

// Item kinds that are hard to spot as a date-specific, labeled change on a
// paper chart: depth tabulations, submarine cables, anchorages and the like.
static UNOBVIOUS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(anchorage)|(black double dashed line)|(black label)|(channel limit)|(dashed magenta line)|(depth legend)|(double solid lines)|(ferry maneuvering area)|(ferry route)|(legend)|(note)|(obstruction)|(pipeline)|(prohibited area)|(restricted area)|(shoaling)|(submarine cable)|(security zone)|(\(see note)|(sound )|(sounding)|(tabulation)",
    )
    .expect("unobvious-item pattern is valid")
});

static NONE_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^none").expect("none-label pattern is valid"));

/// True when the item text refers to a chart note or tabulation rather
/// than a discrete charted feature.
pub fn is_note(item: &str) -> bool {
    NOTE_RE.is_match(item)
}

pub fn is_add(action: &str) -> bool {
    action.to_lowercase() == "add"
}

pub fn is_delete(action: &str) -> bool {
    action.to_lowercase() == "delete"
}

/// Conspicuity filter: keep only changes one could realistically verify
/// against a chart. Requires a resolved effective week, an add/delete
/// action, an item that is not in the hard-to-spot class, and a real
/// charting label.
pub fn is_conspicuous(
    effective: Option<&str>,
    is_add: bool,
    is_delete: bool,
    item: &str,
    label: &str,
) -> bool {
    effective.is_some()
        && (is_add || is_delete)
        && !UNOBVIOUS_RE.is_match(item)
        && !NONE_LABEL_RE.is_match(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_matches_word_and_tabulation() {
        assert!(is_note("NOTE"));
        assert!(is_note("Some change NOTE extra"));
        assert!(is_note("ends with NOTE"));
        assert!(is_note("Tabulation of soundings"));
        assert!(is_note("tabulation"));
        assert!(!is_note("Mooring ball removed"));
        // Word boundary: "NOTE" embedded in a longer word does not count.
        assert!(!is_note("denoted position"));
    }

    #[test]
    fn add_and_delete_are_case_insensitive_and_exclusive() {
        assert!(is_add("add"));
        assert!(is_add("ADD"));
        assert!(is_delete("Delete"));
        assert!(!is_add("added"));
        assert!(!is_delete("remove"));
        for action in ["add", "delete", "relocate", ""] {
            assert!(!(is_add(action) && is_delete(action)));
        }
    }

    #[test]
    fn conspicuous_accepts_plain_labeled_buoy() {
        assert!(is_conspicuous(
            Some("2011w08"),
            true,
            false,
            "Lighted Buoy 2",
            "Fl G 4s"
        ));
    }

    #[test]
    fn conspicuous_rejects_unresolved_and_unlabeled() {
        assert!(!is_conspicuous(None, true, false, "Lighted Buoy 2", "Fl G 4s"));
        assert!(!is_conspicuous(
            Some("2011w08"),
            false,
            false,
            "Lighted Buoy 2",
            "Fl G 4s"
        ));
        assert!(!is_conspicuous(
            Some("2011w08"),
            true,
            false,
            "Lighted Buoy 2",
            "NONE"
        ));
    }

    #[test]
    fn conspicuous_rejects_hard_to_spot_items() {
        for item in [
            "Anchorage A",
            "Submarine cable area",
            "Tabulation of soundings",
            "Depth legend",
            "Pipeline area",
            "(see note A)",
            "Sounding 23ft",
        ] {
            assert!(!is_conspicuous(Some("2011w08"), true, false, item, "Fl G 4s"));
        }
    }
}
