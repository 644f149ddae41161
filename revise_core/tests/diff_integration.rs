use revise_core::{
    compute_diff, DiffEngine, DiffLine, DiffLineKind, DiffSide, DiffStats, Result, TextDocument,
};

fn doc(lines: &[&str]) -> TextDocument {
    TextDocument::from_lines(lines.iter().copied())
}

#[test]
fn single_changed_line_is_modified() {
    let lines = compute_diff(&doc(&["A", "B", "C"]), &doc(&["A", "X", "C"]));

    assert_eq!(
        lines,
        vec![
            DiffLine::Unchanged {
                line: 1,
                text: "A".into(),
            },
            DiffLine::Modified {
                original_line: 2,
                modified_line: 2,
                original_text: "B".into(),
                modified_text: "X".into(),
            },
            DiffLine::Unchanged {
                line: 3,
                text: "C".into(),
            },
        ]
    );
}

#[test]
fn longer_modified_reports_additions() {
    let lines = compute_diff(&doc(&["A", "B"]), &doc(&["A", "B", "C"]));

    assert_eq!(
        lines,
        vec![
            DiffLine::Unchanged {
                line: 1,
                text: "A".into(),
            },
            DiffLine::Unchanged {
                line: 2,
                text: "B".into(),
            },
            DiffLine::Added {
                modified_line: 3,
                text: "C".into(),
            },
        ]
    );
}

#[test]
fn identical_documents_are_all_unchanged() {
    let document = TextDocument::from_text("Sub Main()\n    MsgBox \"hi\"\nEnd Sub\n");
    let lines = compute_diff(&document, &document);

    assert_eq!(lines.len(), document.line_count());
    assert!(lines
        .iter()
        .all(|line| line.kind() == DiffLineKind::Unchanged));
    assert!(DiffEngine::new().stats(&document, &document).is_identical());
}

#[test]
fn side_by_side_rendering_of_refinement() {
    let original = "Sub CreatePart()\n    MsgBox \"ok\"\nEnd Sub";
    let refined = format!("{original}\n\n' Added error handling");
    let lines = DiffEngine::new().diff_texts(original, &refined);

    let left: Vec<_> = lines
        .iter()
        .map(|line| (line.line_number(DiffSide::Original), line.marker(DiffSide::Original)))
        .collect();
    let right: Vec<_> = lines
        .iter()
        .map(|line| (line.line_number(DiffSide::Modified), line.marker(DiffSide::Modified)))
        .collect();

    assert_eq!(
        left,
        [(Some(1), None), (Some(2), None), (Some(3), None), (None, None), (None, None)]
    );
    assert_eq!(
        right,
        [
            (Some(1), None),
            (Some(2), None),
            (Some(3), None),
            (Some(4), Some('+')),
            (Some(5), Some('+')),
        ]
    );
    assert_eq!(lines[4].text(DiffSide::Modified), Some("' Added error handling"));
}

#[test]
fn stats_count_every_row() {
    let stats = DiffEngine::new().stats(&doc(&["A", "B", "C", "D"]), &doc(&["A", "X"]));
    assert_eq!(
        stats,
        DiffStats {
            unchanged: 1,
            added: 0,
            deleted: 2,
            modified: 1,
        }
    );
    assert_eq!(stats.changes(), 3);
}

#[test]
fn unified_patch_shows_changed_lines() -> Result<()> {
    let patch = DiffEngine::new().unified_patch(
        "macro.vbs",
        &TextDocument::from_text("line 1\nline 2\n"),
        &TextDocument::from_text("line 1\nline two\n"),
    )?;

    assert!(patch.contains("--- a/macro.vbs"));
    assert!(patch.contains("+++ b/macro.vbs"));
    assert!(patch.contains("-line 2"));
    assert!(patch.contains("+line two"));

    Ok(())
}

#[test]
fn unified_patch_is_empty_for_equal_documents() -> Result<()> {
    let document = TextDocument::from_text("same\n");
    let patch = DiffEngine::new().unified_patch("same.vbs", &document, &document)?;
    assert!(patch.is_empty());
    Ok(())
}
