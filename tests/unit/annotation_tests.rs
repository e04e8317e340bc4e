/*!
 * Tests for slide annotations and power marks
 */

use std::sync::Arc;

use storyboard::annotation::{
    annotate, placeholder_runs, power_marks, resolve_credits, PowerThresholds, QuestionCredits, POWER_GLYPH,
    SUPERPOWER_GLYPH,
};
use storyboard::database::{build_packets, load_rows_from_reader, Question};
use storyboard::providers::{CachedLookup, MockLookup};

use crate::common::SAMPLE_DATABASE;

fn sample_question(packet: usize, index: usize) -> Question {
    let rows = load_rows_from_reader(SAMPLE_DATABASE.as_bytes(), "sample").unwrap();
    build_packets(&rows).unwrap()[packet].questions[index].clone()
}

#[test]
fn test_powerMarks_withRepeatedPowerValue_shouldGlyphLastOfRun() {
    let marks = power_marks(&[10, 10, 15, 15, 5], PowerThresholds::default());
    assert_eq!(marks[3].glyph, Some(POWER_GLYPH));
    assert!(marks[3].bold);
    assert!(!marks[0].bold && !marks[1].bold);
    assert!(marks.iter().all(|m| m.glyph != Some(SUPERPOWER_GLYPH)));
}

#[test]
fn test_powerMarks_withCustomThresholds_shouldUseThem() {
    let thresholds = PowerThresholds { superpower: 30, power: 20 };
    let marks = power_marks(&[30, 20, 10], thresholds);
    assert_eq!(marks[0].glyph, Some(SUPERPOWER_GLYPH));
    assert_eq!(marks[1].glyph, Some(POWER_GLYPH));
}

#[test]
fn test_placeholderRuns_shouldStartWithQuestionNumber() {
    let runs = placeholder_runs(14, &[20, 20, 10], true, PowerThresholds::default());
    let text: String = runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(text, "14. 1 2 (+) 3");
}

#[test]
fn test_annotate_withQuotedSource_shouldNotItalicize() {
    let question = sample_question(0, 2);
    let annotations = annotate(&question, &QuestionCredits::default());

    assert_eq!(annotations.len(), 3);
    assert_eq!(annotations[1].source_text, "“Thriller”");
    assert!(!annotations[1].source_is_italic);
    assert!(annotations[0].source_is_italic);
    assert_eq!(annotations[1].credit_text.as_deref(), Some("John Landis"));
}

#[tokio::test]
async fn test_resolveCredits_withLookup_shouldFillMissingDirector() {
    let question = sample_question(0, 2);
    let mock = Arc::new(MockLookup::working().with_directors("The Shining", &["Stanley Kubrick"]));
    let lookup = CachedLookup::new(mock.clone());

    let credits = resolve_credits(&question, Some(&lookup)).await;
    let annotations = annotate(&question, &credits);

    assert_eq!(annotations[0].credit_text.as_deref(), Some("Stanley Kubrick"));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_resolveCredits_withFailingLookup_shouldDegradeToNoCredit() {
    let question = sample_question(0, 0);
    let lookup = CachedLookup::new(Arc::new(MockLookup::failing()));

    let credits = resolve_credits(&question, Some(&lookup)).await;
    assert_eq!(credits, QuestionCredits::default());
}
