use carve_core::{TextRange, TextSize};

const CARET: &str = "$0";
const START: &str = "/*start*/";
const END: &str = "/*end*/";

/// Extracts a caret position from a fixture containing a single `$0`
/// marker.
///
/// Returns the fixture with the marker removed and an empty range at the
/// caret.
pub fn extract_caret(fixture: &str) -> (String, TextRange) {
    let offset = fixture.find(CARET).expect("fixture missing $0 marker");
    assert!(
        fixture[offset + CARET.len()..].find(CARET).is_none(),
        "fixture has more than one $0 marker"
    );

    let mut text = String::with_capacity(fixture.len());
    text.push_str(&fixture[..offset]);
    text.push_str(&fixture[offset + CARET.len()..]);
    (text, TextRange::empty(size(offset)))
}

/// Extracts a byte range selection from a fixture containing `/*start*/` and
/// `/*end*/` markers.
///
/// Returns the fixture with markers removed and the selection `TextRange`
/// pointing at the extracted region.
pub fn extract_range(fixture: &str) -> (String, TextRange) {
    let start = fixture
        .find(START)
        .expect("fixture missing /*start*/ marker");
    let after_start = start + START.len();
    let end = fixture.find(END).expect("fixture missing /*end*/ marker");
    assert!(end >= after_start, "/*end*/ must come after /*start*/");

    let mut text = String::with_capacity(fixture.len());
    text.push_str(&fixture[..start]);
    text.push_str(&fixture[after_start..end]);
    text.push_str(&fixture[end + END.len()..]);

    // The end shrinks by the length of the start marker.
    let range = TextRange::new(size(start), size(end - START.len()));
    (text, range)
}

/// Either marker style: a `$0` caret or a `/*start*/…/*end*/` selection.
pub fn extract_span(fixture: &str) -> (String, TextRange) {
    if fixture.contains(CARET) {
        extract_caret(fixture)
    } else {
        extract_range(fixture)
    }
}

fn size(offset: usize) -> TextSize {
    TextSize::try_from(offset).expect("fixture larger than 4GiB")
}
