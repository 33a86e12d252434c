/*!
 * End-to-end tests for the render pipeline
 */

use anyhow::Result;
use docalign::app_config::Config;
use docalign::app_controller::Controller;
use docalign::errors::AppError;
use crate::common;

const TRANSLATED_JSON: &str = r#"[
  {"section": "1 ABSTRACT", "en": "Ads.txt is a text file.", "ja": "ads.txt はテキストファイルです。"},
  {"section": "1 ABSTRACT", "en": "Second paragraph.", "ja": ""},
  {"section": "3.1 ACCESS METHOD", "en": "Use HTTP & HTTPS.", "ja": "HTTP と HTTPS を使用します。"}
]"#;

fn render(config: Config, json: &str) -> Result<Vec<common::DocxParagraph>> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "translated.json", json)?;
    let output = temp_dir.path().join("out").join("nested").join("result.docx");

    Controller::with_config(config)?.run_render(&input, &output)?;

    let bytes = std::fs::read(&output)?;
    common::docx_paragraphs(&bytes)
}

/// Test the translation-only layout end to end
#[test]
fn test_runRender_translationOnly_shouldWriteTranslationsAndTodoMarker() -> Result<()> {
    common::init_test_logging();
    let paragraphs = render(Config::default(), TRANSLATED_JSON)?;

    let headings: Vec<(&str, &str)> = paragraphs
        .iter()
        .filter_map(|p| p.style.as_deref().map(|s| (s, p.text.as_str())))
        .collect();
    assert_eq!(
        headings,
        vec![
            ("Title", "Document Translation"),
            ("Heading1", "1 ABSTRACT"),
            ("Heading2", "3.1 ACCESS METHOD"),
        ]
    );

    let body = common::body_paragraphs(&paragraphs);
    let texts: Vec<&str> = body.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "ads.txt はテキストファイルです。",
            "[TODO: 翻訳が必要] Second paragraph.",
            "HTTP と HTTPS を使用します。",
        ]
    );
    assert_eq!(body[1].color.as_deref(), Some("FF6400"));
    assert_eq!(body[0].color, None);
    Ok(())
}

/// Test the bilingual layout end to end
#[test]
fn test_runRender_bilingual_shouldInterleaveSourceAndTranslation() -> Result<()> {
    common::init_test_logging();
    let mut config = Config::default();
    config.renderer.bilingual = true;
    config.renderer.title = Some("Ads.txt Specification".to_string());

    let paragraphs = render(config, TRANSLATED_JSON)?;

    assert_eq!(paragraphs[0].style.as_deref(), Some("Title"));
    assert_eq!(paragraphs[0].text, "Ads.txt Specification");

    let body = common::body_paragraphs(&paragraphs);
    let texts: Vec<&str> = body.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Ads.txt is a text file.",
            "ads.txt はテキストファイルです。",
            "Second paragraph.",
            "[未翻訳]",
            "Use HTTP & HTTPS.",
            "HTTP と HTTPS を使用します。",
        ]
    );

    assert_eq!(body[0].color.as_deref(), Some("646464"));
    assert_eq!(body[0].size_half_points, Some(18));
    assert_eq!(body[1].space_after_twips, Some(240));
    assert_eq!(body[3].color.as_deref(), Some("FF0000"));
    Ok(())
}

/// Test that an empty alignment array still yields a titled document
#[test]
fn test_runRender_withEmptyArray_shouldWriteTitleOnly() -> Result<()> {
    common::init_test_logging();
    let paragraphs = render(Config::default(), "[]")?;

    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].text, "Document Translation");
    Ok(())
}

/// Test that broken JSON is reported as malformed input
#[test]
fn test_runRender_withInvalidJson_shouldFailWithMalformedInput() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "bad.json", "[{\"en\": ")?;
    let output = temp_dir.path().join("out.docx");

    let result = Controller::with_config(Config::default())?.run_render(&input, &output);

    match result {
        Err(AppError::MalformedInput(message)) => assert!(message.starts_with("Invalid JSON format")),
        other => panic!("expected MalformedInput, got {:?}", other),
    }
    assert!(!output.exists());
    Ok(())
}

/// Test that a missing input file is reported
#[test]
fn test_runRender_withMissingInput_shouldFailWithInputNotFound() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let result = Controller::with_config(Config::default())?
        .run_render(&temp_dir.path().join("none.json"), &temp_dir.path().join("out.docx"));

    assert!(matches!(result, Err(AppError::InputNotFound(_))));
    Ok(())
}

/// Test that an unwritable destination is reported as a write failure
#[test]
fn test_runRender_withDirectoryAsOutput_shouldFailWithWriteFailure() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "translated.json", TRANSLATED_JSON)?;

    let result = Controller::with_config(Config::default())?.run_render(&input, temp_dir.path());

    assert!(matches!(result, Err(AppError::WriteFailure { .. })));
    Ok(())
}
