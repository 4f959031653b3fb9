//! Behavior-driven tests for safe path extraction
//!
//! These tests verify WHAT a caller gets back from `pluck` for reachable,
//! partially reachable and unreachable paths.

use feedpluck_core::{decode, locate, pluck, pluck_value, JsonValue, Path, Pluck, PluckResult};
use serde_json::json;

fn annunciator_document() -> JsonValue {
    decode(br#"{"slides":[{"lines":[{},{"member":{"nameFullTitle":"Lord Example","id":4321}}]}]}"#)
        .expect("fixture is valid JSON")
}

fn path(text: &str) -> Path {
    text.parse().expect("valid path")
}

// =============================================================================
// Pluck: reachable paths
// =============================================================================

#[test]
fn when_path_reaches_member_id_caller_receives_the_id() {
    // Given: An annunciator message with a member on the second line
    let document = annunciator_document();

    // When: The member id is plucked
    let id = pluck(&document, &path("slides[0].lines[1].member.id"), 0_u64);

    // Then: The id comes back as found
    assert_eq!(id, PluckResult::Found(4321));
}

#[test]
fn when_path_is_reachable_the_default_is_irrelevant() {
    let document = annunciator_document();
    let target = path("slides[0].lines[1].member");

    for default in [json!(null), json!(0), json!("x"), json!({"id": 1}), json!([1, 2])] {
        assert_eq!(
            pluck_value(&document, &target, default),
            PluckResult::Found(json!({"nameFullTitle": "Lord Example", "id": 4321}))
        );
    }
}

#[test]
fn empty_path_returns_the_root_document() {
    let document = annunciator_document();
    assert_eq!(
        pluck_value(&document, &Path::root(), json!("unused")).into_inner(),
        document
    );
}

// =============================================================================
// Pluck: unreachable paths
// =============================================================================

#[test]
fn when_terminal_key_is_missing_caller_receives_default() {
    // Given: A member object without the requested field
    let document = annunciator_document();

    // When: The missing field is plucked with a text default
    let value = pluck(
        &document,
        &path("slides[0].lines[1].member.nonexistentField"),
        "Value not found",
    );

    // Then: The default comes back, marked as such
    assert_eq!(value, PluckResult::Default("Value not found"));
}

#[test]
fn default_is_returned_however_long_the_valid_prefix_is() {
    let document = annunciator_document();
    let broken_paths = [
        "missing",
        "slides[1]",
        "slides[0].missing",
        "slides[0].lines[2]",
        "slides[0].lines[0].member",
        "slides[0].lines[1].member.id.deeper",
        "slides.lines",
        "[0]",
    ];

    for text in broken_paths {
        let result = pluck_value(&document, &path(text), json!("fallback"));
        assert_eq!(
            result,
            PluckResult::Default(json!("fallback")),
            "path '{text}' should not be reachable"
        );
    }
}

#[test]
fn explicit_null_is_distinguished_from_absence() {
    // Given: A forecast period whose precipitation value is an explicit null
    let period = json!({"probabilityOfPrecipitation": {"value": null}});

    // When: The value and a sibling that does not exist are plucked
    let present = pluck_value(&period, &path("probabilityOfPrecipitation.value"), json!(-1));
    let absent = pluck_value(&period, &path("probabilityOfPrecipitation.unitCode"), json!(-1));

    // Then: Only the absent one falls back to the default
    assert_eq!(present, PluckResult::Found(JsonValue::Null));
    assert_eq!(absent, PluckResult::Default(json!(-1)));
    assert!(present.is_found());
    assert!(absent.is_default());
}

#[test]
fn value_of_the_wrong_shape_falls_back_to_default() {
    let document = annunciator_document();
    let name = pluck(&document, &path("slides[0].lines[1].member.nameFullTitle"), 0_u64);
    assert_eq!(name, PluckResult::Default(0));
}

#[test]
fn extraction_is_deterministic() {
    let document = annunciator_document();
    let target = path("slides[0].lines[1].member.nameFullTitle");

    let first: Option<&JsonValue> = locate(&document, &target);
    let second: Option<&JsonValue> = document.locate(&target);
    assert_eq!(first, second);
    assert_eq!(
        document.pluck_or(&target, String::new()),
        document.pluck_or(&target, String::from("other default"))
    );
}
