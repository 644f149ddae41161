use std::sync::{Arc, Barrier};
use std::thread;

use revise_core::ffi::{compute_diff, open, CoreError, RefineSession};
use revise_core::refiners::{Refinement, Refiner, RefinerError, RefinerRegistry, RefinerService};
use revise_core::{DiffLine, DiffStats, RevisionHistory, TextDocument};

struct GatedRefiner {
    entered: Arc<Barrier>,
    release: Arc<Barrier>,
}

impl Refiner for GatedRefiner {
    fn id(&self) -> &'static str {
        "gated"
    }

    fn label(&self) -> &'static str {
        "Gated"
    }

    fn refine(&self, document: &TextDocument) -> Result<Refinement, RefinerError> {
        self.entered.wait();
        self.release.wait();
        let mut lines = document.lines().to_vec();
        lines.push("' gated".into());
        Ok(Refinement::new(TextDocument::from_lines(lines), "Gated"))
    }
}

#[test]
fn ffi_refine_and_apply_flow() {
    let session = open("Sub Main()\nEnd Sub".into(), "Original version".into());

    assert!(session
        .refiners()
        .iter()
        .any(|refiner| refiner.id == "annotate"));

    let refined = session.refine("annotate".into()).expect("refine");
    assert_eq!(refined.label, "Added error handling");
    assert_eq!(session.cursor().expect("cursor"), 1);

    let stats = session.stats_from_baseline().expect("stats");
    assert_eq!(
        stats,
        DiffStats {
            unchanged: 2,
            added: 2,
            deleted: 0,
            modified: 0,
        }
    );

    let committed = session.commit().expect("commit");
    assert_eq!(committed.content, refined.content);
    assert_eq!(session.revisions().expect("revisions").len(), 1);
    assert!(session
        .diff_from_baseline()
        .expect("diff")
        .iter()
        .all(|line| !line.is_change()));
}

#[test]
fn ffi_navigation_and_cancel() {
    let session = open("v0".into(), "Original version".into());
    session.append("v1".into(), "one".into()).expect("append");
    session.append("v2".into(), "two".into()).expect("append");

    let undone = session.undo().expect("undo");
    assert_eq!(undone.content.text(), "v1");

    let jumped = session.jump_to(2).expect("jump");
    assert_eq!(jumped.content.text(), "v2");

    match session.redo() {
        Err(CoreError::AtBoundary) => {}
        other => panic!("expected AtBoundary, got {other:?}"),
    }
    match session.jump_to(7) {
        Err(CoreError::IndexOutOfRange) => {}
        other => panic!("expected IndexOutOfRange, got {other:?}"),
    }

    let restored = session.rollback().expect("rollback");
    assert_eq!(restored.content.text(), "v0");
    assert_eq!(session.current().expect("current").content.text(), "v0");
}

#[test]
fn ffi_unknown_refiner_is_reported() {
    let session = open("v0".into(), "Original version".into());
    match session.refine("missing".into()) {
        Err(CoreError::RefinerNotRegistered) => {}
        other => panic!("expected RefinerNotRegistered, got {other:?}"),
    }
}

#[test]
fn ffi_patch_covers_baseline_to_current() {
    let session = open("line 1\nline 2\n".into(), "Original version".into());
    session
        .append("line 1\nline two\n".into(), "Edit".into())
        .expect("append");

    let patch = session.unified_patch("macro.vbs".into()).expect("patch");
    assert!(patch.contains("-line 2"));
    assert!(patch.contains("+line two"));
}

#[test]
fn ffi_compute_diff_splits_text() {
    let lines = compute_diff("A\nB".into(), "A\nX\nC".into());
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
            DiffLine::Added {
                modified_line: 3,
                text: "C".into(),
            },
        ]
    );
}

#[test]
fn ffi_session_stays_usable_while_refining() {
    let entered = Arc::new(Barrier::new(2));
    let release = Arc::new(Barrier::new(2));
    let mut registry = RefinerRegistry::new();
    registry.register(GatedRefiner {
        entered: Arc::clone(&entered),
        release: Arc::clone(&release),
    });
    let session = Arc::new(RefineSession::new(
        RevisionHistory::new(TextDocument::from_text("v0"), "Original version"),
        RefinerService::new(registry),
    ));

    let worker = {
        let session = Arc::clone(&session);
        thread::spawn(move || session.refine("gated".into()))
    };

    entered.wait();
    assert_eq!(session.cursor().expect("cursor"), 0);
    assert_eq!(session.current().expect("current").content.text(), "v0");
    release.wait();

    let refined = worker
        .join()
        .expect("refine thread")
        .expect("refine");
    assert_eq!(refined.content.text(), "v0\n' gated");
    assert_eq!(session.cursor().expect("cursor"), 1);
}
