/*!
 * Tests for text segmentation
 */

use docalign::app_config::{NoisePattern, SegmenterConfig};
use docalign::errors::SegmentError;
use docalign::segmenter::{is_heading, rebuild_paragraph, NoiseFilter, Segmenter};
use docalign::AlignmentRecord;
use crate::common;

fn sections_and_text(records: &[AlignmentRecord]) -> Vec<(&str, &str)> {
    records
        .iter()
        .map(|r| (r.section.as_str(), r.source_text.as_str()))
        .collect()
}

/// Test that numbered headings label the paragraphs that follow them
#[test]
fn test_segment_withHeadingTransitions_shouldLabelParagraphs() {
    let segmenter = Segmenter::default();
    let records = segmenter.segment("1 INTRODUCTION\n\nHello world\n\n2 DETAILS\n\nMore text\n\n");

    assert_eq!(
        sections_and_text(&records),
        vec![("1 INTRODUCTION", "Hello world"), ("2 DETAILS", "More text")]
    );
    assert!(records.iter().all(|r| r.translated_text.is_empty()));
}

/// Test that N plain paragraphs give N records under the default section
#[test]
fn test_segment_withPlainParagraphs_shouldKeepCountAndOrder() {
    let paragraphs: Vec<String> = (1..=7)
        .map(|i| format!("Paragraph number {} first line\nand its second line", i))
        .collect();
    let text = paragraphs.join("\n\n\n");

    let records = Segmenter::default().segment(&text);

    assert_eq!(records.len(), 7);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.section, "General");
        assert_eq!(
            record.source_text,
            format!("Paragraph number {} first line and its second line", i + 1)
        );
    }
}

/// Test that wrap hyphens are collapsed when rebuilding a paragraph
#[test]
fn test_rebuildParagraph_withWrapHyphen_shouldJoinWord() {
    assert_eq!(
        rebuild_paragraph(&["This is a com-", "pany name."]),
        "This is a company name."
    );
}

/// Test the documented limitation: a real hyphen at a line end is collapsed too
#[test]
fn test_rebuildParagraph_withCompoundHyphenAtLineEnd_shouldAlsoCollapse() {
    assert_eq!(rebuild_paragraph(&["a well-", "known seller"]), "a wellknown seller");
    assert_eq!(rebuild_paragraph(&["a well-known seller"]), "a well-known seller");
}

/// Test that a heading flushes the pending paragraph into the previous section
#[test]
fn test_segment_withHeadingWithoutBlankLine_shouldFlushPreviousSection() {
    let text = "Preamble text\n1 SCOPE\nline a\nline b";
    let records = Segmenter::default().segment(text);

    assert_eq!(
        sections_and_text(&records),
        vec![("General", "Preamble text"), ("1 SCOPE", "line a line b")]
    );
}

/// Test heading recognition rules
#[test]
fn test_isHeading_withVariousLines_shouldMatchNumberedUppercaseOnly() {
    assert!(is_heading("1 ABSTRACT"));
    assert!(is_heading("3.1 ACCESS METHOD"));
    assert!(is_heading("3.1.2 FILE FORMAT"));

    assert!(!is_heading("1 Introduction"));
    assert!(!is_heading("1. ABSTRACT"));
    assert!(!is_heading("ABSTRACT"));
    assert!(!is_heading("1 ABSTRACT."));
    assert!(!is_heading("1"));
}

/// Test that mixed-case headings stay in the body
#[test]
fn test_segment_withMixedCaseHeading_shouldTreatAsBodyText() {
    let records = Segmenter::default().segment("1 Introduction\nSome text\n");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].section, "General");
    assert_eq!(records[0].source_text, "1 Introduction Some text");
}

/// Test that consecutive headings emit no empty records
#[test]
fn test_segment_withConsecutiveHeadings_shouldOnlyKeepLastForBody() {
    let records = Segmenter::default().segment("3 SPECIFICATION\n3.1 ACCESS METHOD\n\nBody\n");

    assert_eq!(sections_and_text(&records), vec![("3.1 ACCESS METHOD", "Body")]);
}

/// Test that surrounding whitespace is trimmed from lines and headings
#[test]
fn test_segment_withIndentedLines_shouldTrimLines() {
    let records = Segmenter::default().segment("   2 DETAILS   \n\t  indented   text  \n  more\n");

    assert_eq!(
        sections_and_text(&records),
        vec![("2 DETAILS", "indented   text more")]
    );
}

/// Test that empty or blank input yields no records
#[test]
fn test_segment_withBlankInput_shouldReturnNoRecords() {
    let segmenter = Segmenter::default();
    assert!(segmenter.segment("").is_empty());
    assert!(segmenter.segment("\n\n   \n\t\n").is_empty());
}

/// Test that Windows line endings behave like Unix ones
#[test]
fn test_segment_withCrLfInput_shouldMatchLfInput() {
    let segmenter = Segmenter::default();
    let lf = segmenter.segment("1 INTRODUCTION\n\nHello\nworld\n\nAgain\n");
    let crlf = segmenter.segment("1 INTRODUCTION\r\n\r\nHello\r\nworld\r\n\r\nAgain\r\n");

    assert_eq!(lf, crlf);
    assert_eq!(lf.len(), 2);
}

/// Test the built-in boilerplate patterns on a realistic extract
#[test]
fn test_segment_withDefaultNoise_shouldStripBoilerplate() {
    let records = Segmenter::default().segment(common::SAMPLE_EXTRACT);

    assert_eq!(
        sections_and_text(&records),
        vec![
            (
                "1 ABSTRACT",
                "This document describes a simple mechanism for publishers to declare authorized sellers of their inventory."
            ),
            (
                "3.1 ACCESS METHOD",
                "The declarations must be accessible via HTTP and/or HTTPS from the website."
            ),
        ]
    );
}

/// Test that noise patterns come from configuration
#[test]
fn test_segment_withConfiguredNoise_shouldApplyRulesInOrder() -> Result<(), SegmentError> {
    let config = SegmenterConfig {
        default_section: "Preface".to_string(),
        noise_patterns: vec![
            NoisePattern::strip(r"CONFIDENTIAL").ignoring_case(),
            NoisePattern {
                pattern: r"Rev\. (\d+)".to_string(),
                replacement: "revision $1".to_string(),
                case_insensitive: false,
            },
        ],
    };
    let segmenter = Segmenter::from_config(&config)?;

    let records = segmenter.segment("Confidential\n\nSee Rev. 4 for details.\n");

    assert_eq!(sections_and_text(&records), vec![("Preface", "See revision 4 for details.")]);
    assert_eq!(segmenter.default_section(), "Preface");
    Ok(())
}

/// Test that an empty noise table leaves text untouched
#[test]
fn test_segment_withoutNoiseRules_shouldKeepBoilerplate() {
    let segmenter = Segmenter::new(NoiseFilter::default(), "General");
    let records = segmenter.segment("Page 1 of 2\n");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source_text, "Page 1 of 2");
}

/// Test that an invalid pattern is reported with its text
#[test]
fn test_noiseFilter_withInvalidPattern_shouldFail() {
    let result = NoiseFilter::from_patterns(&[
        NoisePattern::strip(r"valid"),
        NoisePattern::strip(r"(unclosed"),
    ]);

    match result {
        Err(SegmentError::InvalidNoisePattern { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
        other => panic!("expected invalid pattern error, got {:?}", other.map(|f| f.len())),
    }
}

/// Test that the default configuration compiles every built-in rule
#[test]
fn test_noiseFilter_withDefaultConfig_shouldCompileAllRules() {
    let config = SegmenterConfig::default();
    let filter = NoiseFilter::from_patterns(&config.noise_patterns).unwrap();

    assert_eq!(filter.len(), config.noise_patterns.len());
    assert_eq!(filter.apply("x Page 3 of 10 y"), "x  y");
    assert_eq!(filter.apply("IAB.tech lab"), "");
}
