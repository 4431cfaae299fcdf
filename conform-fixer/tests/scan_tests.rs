//! End-to-end remediation over real git repositories.

mod common;

use std::fs;

use common::{commit_files, context, init_repo, APACHE_2016_ACME, MAR_1_2016};
use conform_core::HeaderTemplate;
use conform_detector::{FileFilter, PREFIX_LEN};
use conform_fixer::{scan_repository, Outcome, OutcomeStatus, Reporter, SkipReason, Tally};

const PLAIN: &str = "package a\n\nfunc A() {}\n";
const LICENSED: &str = "// Copyright 2001 Someone. All rights reserved.\npackage b\n";
const GENERATED: &str = "// Code generated by tool. DO NOT EDIT!\npackage c\n";

fn run(ctx: std::sync::Arc<conform_core::RunContext>, k: usize) -> Vec<Outcome> {
    scan_repository(ctx, FileFilter::default(), k)
        .expect("spawn")
        .collect()
}

fn status_of<'a>(outcomes: &'a [Outcome], name: &str) -> &'a OutcomeStatus {
    &outcomes
        .iter()
        .find(|o| o.path.file_name().is_some_and(|n| n == name))
        .unwrap_or_else(|| panic!("no outcome for {name}"))
        .status
}

#[test]
fn fix_stamps_the_earliest_year_in_apache_form() {
    let (dir, repo) = init_repo();
    let head = commit_files(&repo, &[("a.go", PLAIN)], MAR_1_2016);

    let outcomes = run(context(dir.path(), head, true, HeaderTemplate::Apache2), 6);
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0].status, OutcomeStatus::Rewritten));

    let content = fs::read_to_string(dir.path().join("a.go")).unwrap();
    assert_eq!(content, format!("{APACHE_2016_ACME}{PLAIN}"));
}

#[test]
fn fix_keeps_the_bytes_past_the_sniffed_prefix() {
    let mut body = String::from("package big\n\n");
    for i in 0..120 {
        body.push_str(&format!("func F{i}() int {{ return {i} }}\n"));
    }
    assert!(body.len() > 3 * PREFIX_LEN);
    let (dir, repo) = init_repo();
    let head = commit_files(&repo, &[("big.go", body.as_str())], MAR_1_2016);

    let outcomes = run(context(dir.path(), head, true, HeaderTemplate::Apache2), 2);
    assert!(matches!(outcomes[0].status, OutcomeStatus::Rewritten));

    let content = fs::read(dir.path().join("big.go")).unwrap();
    assert_eq!(content, format!("{APACHE_2016_ACME}{body}").into_bytes());
}

#[test]
fn repository_checked_out_under_an_excluded_name_is_scanned() {
    let parent = tempfile::TempDir::new().unwrap();
    let root = parent.path().join("vendor").join("myrepo");
    fs::create_dir_all(&root).unwrap();
    let repo = git2::Repository::init(&root).unwrap();
    let head = commit_files(&repo, &[("a.go", PLAIN)], MAR_1_2016);

    let outcomes = run(context(&root, head, false, HeaderTemplate::Apache2), 2);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].path, root.join("a.go"));
}

#[test]
fn second_fix_run_is_a_no_op() {
    let (dir, repo) = init_repo();
    let head = commit_files(&repo, &[("a.go", PLAIN), ("pkg/b.go", PLAIN)], MAR_1_2016);
    let ctx = context(dir.path(), head, true, HeaderTemplate::Bsd);

    let first: Tally = Reporter::new(Vec::new()).consume(run(ctx.clone(), 2)).unwrap();
    assert_eq!(first.fixed, 2);
    let after_first = fs::read(dir.path().join("pkg/b.go")).unwrap();

    let second: Tally = Reporter::new(Vec::new()).consume(run(ctx, 2)).unwrap();
    assert_eq!(second.fixed, 0);
    assert_eq!(second.compliant, 2);
    assert_eq!(fs::read(dir.path().join("pkg/b.go")).unwrap(), after_first);
}

#[test]
fn report_only_leaves_every_file_untouched() {
    let (dir, repo) = init_repo();
    let head = commit_files(
        &repo,
        &[("a.go", PLAIN), ("b.go", LICENSED), ("c.go", GENERATED)],
        MAR_1_2016,
    );

    let outcomes = run(context(dir.path(), head, false, HeaderTemplate::Apache2), 3);
    assert!(matches!(
        status_of(&outcomes, "a.go"),
        OutcomeStatus::NoActionNeeded(SkipReason::ReportOnly)
    ));
    assert!(matches!(
        status_of(&outcomes, "b.go"),
        OutcomeStatus::NoActionNeeded(SkipReason::AlreadyLicensed)
    ));
    assert!(matches!(
        status_of(&outcomes, "c.go"),
        OutcomeStatus::NoActionNeeded(SkipReason::Generated)
    ));

    assert_eq!(fs::read_to_string(dir.path().join("a.go")).unwrap(), PLAIN);
    assert_eq!(fs::read_to_string(dir.path().join("b.go")).unwrap(), LICENSED);
    assert_eq!(fs::read_to_string(dir.path().join("c.go")).unwrap(), GENERATED);
}

#[test]
fn marked_files_are_untouched_in_fix_mode() {
    let (dir, repo) = init_repo();
    let head = commit_files(&repo, &[("b.go", LICENSED), ("c.go", GENERATED)], MAR_1_2016);

    let tally = Reporter::new(Vec::new())
        .consume(run(context(dir.path(), head, true, HeaderTemplate::Apache2), 6))
        .unwrap();
    assert_eq!(tally.compliant, 2);
    assert_eq!(tally.flagged, 0);
    assert_eq!(fs::read_to_string(dir.path().join("b.go")).unwrap(), LICENSED);
    assert_eq!(fs::read_to_string(dir.path().join("c.go")).unwrap(), GENERATED);
}

#[test]
fn excluded_paths_never_reach_a_worker() {
    let (dir, repo) = init_repo();
    let head = commit_files(
        &repo,
        &[
            ("a.go", PLAIN),
            ("doc.go", PLAIN),
            ("vendor/x/v.go", PLAIN),
            ("notes.txt", "hello\n"),
        ],
        MAR_1_2016,
    );

    let outcomes = run(context(dir.path(), head, true, HeaderTemplate::Apache2), 4);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].path, dir.path().join("a.go"));
    assert_eq!(fs::read_to_string(dir.path().join("doc.go")).unwrap(), PLAIN);
    assert_eq!(fs::read_to_string(dir.path().join("vendor/x/v.go")).unwrap(), PLAIN);
}

#[test]
fn untracked_file_fails_without_disturbing_others() {
    let (dir, repo) = init_repo();
    let head = commit_files(&repo, &[("a.go", PLAIN)], MAR_1_2016);
    fs::write(dir.path().join("new.go"), PLAIN).unwrap();

    let outcomes = run(context(dir.path(), head, true, HeaderTemplate::Apache2), 6);
    assert_eq!(outcomes.len(), 2);
    assert!(matches!(status_of(&outcomes, "a.go"), OutcomeStatus::Rewritten));
    assert!(matches!(status_of(&outcomes, "new.go"), OutcomeStatus::Failed(_)));
    assert_eq!(fs::read_to_string(dir.path().join("new.go")).unwrap(), PLAIN);
}

#[test]
fn empty_file_is_a_failure() {
    let (dir, repo) = init_repo();
    let head = commit_files(&repo, &[("a.go", PLAIN), ("empty.go", "")], MAR_1_2016);

    let outcomes = run(context(dir.path(), head, false, HeaderTemplate::Apache2), 2);
    assert!(matches!(status_of(&outcomes, "empty.go"), OutcomeStatus::Failed(_)));
}

#[test]
fn unopenable_repository_fails_every_item() {
    // A plain directory: discovery works, but no worker can open git.
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("a.go"), PLAIN).unwrap();
    fs::write(dir.path().join("b.go"), PLAIN).unwrap();
    let ctx = context(dir.path(), git2::Oid::zero(), true, HeaderTemplate::Apache2);

    let outcomes = run(ctx, 3);
    assert_eq!(outcomes.len(), 2);
    for o in &outcomes {
        assert!(
            matches!(o.status, OutcomeStatus::Failed(conform_fixer::JobError::WorkerInit(_))),
            "got: {:?}",
            o.status
        );
    }
    assert_eq!(fs::read_to_string(dir.path().join("a.go")).unwrap(), PLAIN);
}

#[test]
fn tally_serializes_to_json() {
    let tally = Tally {
        total: 3,
        fixed: 1,
        compliant: 1,
        errored: 1,
        flagged: 0,
    };
    let json = serde_json::to_value(tally).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"total": 3, "fixed": 1, "compliant": 1, "errored": 1, "flagged": 0})
    );
}
