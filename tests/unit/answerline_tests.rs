/*!
 * Tests for answerline parsing, quote normalization and run styling
 */

use storyboard::answerline::{make_curly, normalize, parse, style_alternate, style_answerline, style_main, Directive};
use storyboard::database::AnswerType;
use storyboard::document::StyledRun;

fn text(runs: &[StyledRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

#[test]
fn test_parse_withAcceptAndReject_shouldKeepOrder() {
    let parsed = parse("Citizen Kane [accept Kane; reject Rosebud]");
    assert_eq!(parsed.main, "Citizen Kane");
    assert!(!parsed.has_pronunciation());
    assert_eq!(parsed.alternates.len(), 2);
    assert_eq!(parsed.alternates[0].directive, Directive::Accept);
    assert_eq!(parsed.alternates[0].text, "Kane");
    assert_eq!(parsed.alternates[1].directive, Directive::Reject);
    assert_eq!(parsed.alternates[1].text, "Rosebud");
}

#[test]
fn test_parse_withPronunciation_shouldReattachParen() {
    let parsed = parse("Orson Welles (WELZ) [or Welles]");
    assert_eq!(parsed.main, "Orson Welles");
    assert_eq!(parsed.pronunciation, " (WELZ)");
    assert_eq!(parsed.alternates.len(), 1);
    assert_eq!(parsed.alternates[0].directive, Directive::Or);
    assert_eq!(parsed.alternates[0].text, "Welles");
}

#[test]
fn test_parse_withUnknownDirective_shouldDropCandidate() {
    let parsed = parse("Heat [also Heat 1995; prompt on Mann]");
    assert_eq!(parsed.alternates.len(), 1);
    assert_eq!(parsed.alternates[0].directive, Directive::PromptOn);
    assert_eq!(parsed.alternates[0].text, "Mann");
}

#[test]
fn test_normalize_shouldBeIdempotentOnTypographicText() {
    let once = normalize(Some("\"Jump\" and 'Panama' aren't Van Halen's only hits")).unwrap();
    assert_eq!(once, "“Jump” and ‘Panama’ aren’t Van Halen’s only hits");
    assert_eq!(normalize(Some(&once)).unwrap(), once);
    assert_eq!(make_curly(&once), once);
    assert_eq!(normalize(None), None);
}

#[test]
fn test_styleMain_withTitleArticle_shouldLeaveArticlePlain() {
    let runs = style_main("The Godfather", &AnswerType::Misc);
    assert_eq!(runs, vec![StyledRun::plain("The "), StyledRun::new("Godfather", true, false, true)]);

    let film = style_main("The Godfather", &AnswerType::Film);
    assert_eq!(film, vec![StyledRun::italic("The "), StyledRun::new("Godfather", true, true, true)]);
}

#[test]
fn test_styleAlternate_withReject_shouldNeverEmphasize() {
    for answer_type in [AnswerType::Film, AnswerType::Director, AnswerType::Misc, AnswerType::Surname] {
        let runs = style_alternate("The Big Sleep", Directive::Reject, &answer_type);
        assert!(runs.iter().all(|r| !r.bold && !r.underline && !r.italic));
    }
}

#[test]
fn test_styleAlternate_withPromptOn_shouldUnderlineWithoutBold() {
    let runs = style_alternate("Ridley Scott", Directive::PromptOn, &AnswerType::Director);
    let last = runs.last().unwrap();
    assert_eq!(last.text, "Scott");
    assert!(last.underline && !last.bold);
}

#[test]
fn test_styleAnswerline_shouldWrapAlternatesInBrackets() {
    let parsed = parse("Orson Welles (WELZ) [or Welles; reject Kane]");
    let runs = style_answerline(&parsed, &AnswerType::Director);
    assert_eq!(text(&runs), "Orson Welles (WELZ) [or Welles; reject Kane]");

    let guide = runs.iter().find(|r| r.text == " (WELZ)").unwrap();
    assert!(guide.is_plain());
    assert_eq!(runs.last().unwrap(), &StyledRun::plain("]"));
}
