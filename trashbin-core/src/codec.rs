use std::sync::OnceLock;

use regex::Regex;

const MARKER_SEPARATOR: &str = ".d";

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"^(?s)(.+)\.d(0|[1-9][0-9]*)$").expect("Failed to compile regex"))
}

/// Splits a stored trash name into its display name and the deletion timestamp
/// of its marker. Names without a marker are returned unchanged. Digits with a
/// leading zero are no marker, since encoding could not reproduce them.
pub fn decode(stored_name: &str) -> (String, Option<u64>) {
    if let Some(captures) = marker_regex().captures(stored_name) {
        let deleted_at = captures
            .get(2)
            .and_then(|timestamp| timestamp.as_str().parse::<u64>().ok());

        if let (Some(name), Some(deleted_at)) = (captures.get(1), deleted_at) {
            return (name.as_str().to_owned(), Some(deleted_at));
        }
    }

    (stored_name.to_owned(), None)
}

/// Builds the name used on the wire. Only entries located at the trash root
/// carry a marker, everything below is addressed by its plain name.
pub fn encode(display_name: &str, deleted_at: Option<u64>, is_root: bool) -> String {
    match deleted_at {
        Some(deleted_at) if is_root => {
            format!("{}{}{}", display_name, MARKER_SEPARATOR, deleted_at)
        }
        _ => display_name.to_owned(),
    }
}
