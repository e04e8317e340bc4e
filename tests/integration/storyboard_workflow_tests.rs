/*!
 * End-to-end formatting runs over a temporary set folder
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use storyboard::app_config::Config;
use storyboard::app_controller::Controller;
use storyboard::assembler::HybridOutcome;
use storyboard::document::{load_document, DocumentFormat, ParagraphStyle};
use storyboard::providers::MockLookup;

use crate::common;

fn test_config(root: &Path, format: DocumentFormat) -> Result<Config> {
    let mut config = Config::default();
    config.set_name = "film set".to_string();
    config.database_path = common::create_sample_database(root)?;
    config.output_dir = root.join("answers");
    config.output_format = format;
    config.hybrid.source_dir = Some(root.join("written"));
    config.hybrid.dest_dir = Some(root.join("hybrid"));
    Ok(config)
}

fn mock_lookup() -> Arc<MockLookup> {
    Arc::new(
        MockLookup::working()
            .with_directors("Citizen Kane", &["Orson Welles"])
            .with_directors("The Shining", &["Stanley Kubrick"]),
    )
}

/// Combined visual document with film credits, notes and nested slide lists
#[tokio::test]
async fn test_run_withCombinedTextDocument_shouldWriteAllPackets() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = test_config(temp_dir.path(), DocumentFormat::Text)?;
    let lookup = mock_lookup();

    let summary = Controller::with_lookup(config, lookup.clone()).run().await?;

    assert_eq!(summary.packets.len(), 2);
    assert_eq!(summary.question_count(), 4);
    assert!(summary.hybrid_files.is_empty());
    assert!(summary.packets.iter().all(|p| p.hybrid == HybridOutcome::Disabled));

    let path = temp_dir.path().join("answers").join("Film-Set_Answers-raw.txt");
    assert_eq!(summary.answers_files, vec![path.clone()]);

    let content = fs::read_to_string(&path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "film set - Visual Answerlines");
    assert_eq!(lines[1], "Packet 1");
    assert_eq!(lines[2], "1. Citizen Kane [accept Kane] (dir. Orson Welles)");
    assert_eq!(lines[3], "2. Ridley Scott [prompt on Scott]");
    assert_eq!(lines[4], "    1. Alien");
    assert_eq!(lines[5], "    2. Gladiator");
    assert_eq!(lines[6], "    3. Top Gun (dir. Tony Scott)");
    assert_eq!(lines[7], "3. The Shining (don’t stay in room 237)");
    assert_eq!(lines[8], "    1. The Shining (dir. Stanley Kubrick)");
    assert_eq!(lines[9], "    2. “Thriller” (dir. John Landis)");
    assert_eq!(lines[10], "    3. Room 237 (dir. Rodney Ascher)");
    assert_eq!(lines[11], "\u{000C}");
    assert_eq!(lines[12], "Packet 2");
    assert_eq!(lines[13], "1. Heat (dir. Michael Mann)");

    // Kane and The Shining, one lookup each
    assert_eq!(lookup.call_count(), 2);
    Ok(())
}

/// Hybrid packets get placeholders numbered after the written questions
#[tokio::test]
async fn test_run_withHybridPackets_shouldAppendPlaceholders() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let written = temp_dir.path().join("written");
    common::create_written_packet(&written, "Film-Set_01_raw.txt", 10)?;
    common::create_written_packet(&written, "Film-Set_02_raw.txt", 8)?;

    let mut config = test_config(temp_dir.path(), DocumentFormat::Text)?;
    config.hybrid.enabled = true;

    let summary = Controller::with_lookup(config, mock_lookup()).run().await?;

    assert_eq!(
        summary.packets[0].hybrid,
        HybridOutcome::Written {
            written: 10,
            placeholders: 3
        }
    );
    assert_eq!(summary.hybrid_files.len(), 2);

    let first = fs::read_to_string(temp_dir.path().join("hybrid").join("Film-Set_01.txt"))?;
    let appended: Vec<&str> = first.lines().skip_while(|l| !l.starts_with("11.")).collect();
    assert_eq!(
        appended,
        vec![
            "11. 1",
            "ANSWER: Citizen Kane [accept Kane] (dir. Orson Welles)",
            "<Ani, Visual>",
            "",
            "12. 1 (+) 2 (*) 3",
            "ANSWER: Ridley Scott [prompt on Scott] (Sources: Alien; Gladiator; Top Gun)",
            "<Visual>",
            "",
            "13. 1 (+) 2 (*) 3",
            "ANSWER: The Shining (Sources: The Shining - dir. Stanley Kubrick; “Thriller” - dir. John Landis; Room 237 - dir. Rodney Ascher)",
            "<Visual>",
        ]
    );

    let second = fs::read_to_string(temp_dir.path().join("hybrid").join("Film-Set_02.txt"))?;
    assert!(second.contains("9. 1\nANSWER: Heat (dir. Michael Mann)\n<Ben, Visual>"));
    assert!(second.starts_with("1. Written question number 1."));
    Ok(())
}

/// A written packet without room for the visual questions is skipped alone
#[tokio::test]
async fn test_run_withFullWrittenPacket_shouldSkipOnlyThatPacket() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let written = temp_dir.path().join("written");
    common::create_written_packet(&written, "Film-Set_01_raw.txt", 12)?;
    common::create_written_packet(&written, "Film-Set_02_raw.txt", 10)?;

    let mut config = test_config(temp_dir.path(), DocumentFormat::Text)?;
    config.hybrid.enabled = true;

    let summary = Controller::with_lookup(config, mock_lookup()).run().await?;

    assert_eq!(summary.packets[0].hybrid, HybridOutcome::SkippedCapacity { written: 12 });
    assert_eq!(summary.skipped_hybrid_count(), 1);
    assert_eq!(summary.hybrid_files, vec![temp_dir.path().join("hybrid").join("Film-Set_02.txt")]);
    assert!(!temp_dir.path().join("hybrid").join("Film-Set_01.txt").exists());
    assert_eq!(summary.answers_files.len(), 1);
    Ok(())
}

/// Written packet count must match the database's packet count
#[tokio::test]
async fn test_run_withPacketCountMismatch_shouldSkipHybridEntirely() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let written = temp_dir.path().join("written");
    common::create_written_packet(&written, "Film-Set_01_raw.txt", 10)?;

    let mut config = test_config(temp_dir.path(), DocumentFormat::Html)?;
    config.hybrid.enabled = true;

    let summary = Controller::with_lookup(config, mock_lookup()).run().await?;

    assert!(summary.hybrid_files.is_empty());
    assert!(!temp_dir.path().join("hybrid").exists());

    let html = fs::read_to_string(&summary.answers_files[0])?;
    assert!(html.contains("<b><i><u>Citizen Kane</u></i></b>"));
    assert!(html.contains("<div class=\"page-break\"></div>"));
    Ok(())
}

/// Split documents are written per packet and can be read back
#[tokio::test]
async fn test_run_withSplitJsonDocuments_shouldWriteOneFilePerPacket() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = test_config(temp_dir.path(), DocumentFormat::Json)?;
    config.split_docs = true;

    let summary = Controller::with_config(config)?.run().await?;

    let answers = temp_dir.path().join("answers");
    assert_eq!(
        summary.answers_files,
        vec![
            answers.join("Film-Set_Answers-raw_01.json"),
            answers.join("Film-Set_Answers-raw_02.json"),
        ]
    );

    let second = load_document(&summary.answers_files[1])?;
    assert_eq!(second.paragraphs[0].style, ParagraphStyle::Heading(0));
    assert_eq!(second.paragraphs[1].text(), "Packet 2");
    // Credit comes from the database row, no lookup needed
    assert_eq!(second.paragraphs[2].text(), "Heat (dir. Michael Mann)");
    assert!(second.paragraphs.iter().all(|p| p.style != ParagraphStyle::PageBreak));
    Ok(())
}

/// Duplicated slide indices abort the run before anything is written
#[tokio::test]
async fn test_run_withDuplicateSlideIndex_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let database = common::create_test_file(
        temp_dir.path(),
        "bad.csv",
        "Packet,Number,Slide,Value,Answerline,Answerline_Type\n1,1,1,20,Heat,Film\n1,1,1,10,,\n",
    )?;
    let mut config = test_config(temp_dir.path(), DocumentFormat::Text)?;
    config.database_path = database;

    let result = Controller::with_config(config)?.run().await;

    assert!(result.is_err());
    assert!(!temp_dir.path().join("answers").exists());
    Ok(())
}
