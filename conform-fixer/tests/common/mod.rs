//! Shared fixtures: git repositories with controlled commit dates.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use conform_core::{HeaderTemplate, RevisionId, RunContext};
use git2::{Commit, Oid, Repository, Signature, Time};
use tempfile::TempDir;

/// 2016-03-01T00:00:00Z
pub const MAR_1_2016: i64 = 1_456_790_400;
/// 2019-01-01T00:00:00Z
pub const JAN_1_2019: i64 = 1_546_300_800;

pub fn init_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().expect("tempdir");
    let repo = Repository::init(dir.path()).expect("git init");
    (dir, repo)
}

/// Write `files` and commit them all at `secs` (UTC).
pub fn commit_files(repo: &Repository, files: &[(&str, &str)], secs: i64) -> Oid {
    let root = repo.workdir().expect("workdir").to_path_buf();
    let mut index = repo.index().expect("index");
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(&path, content).expect("write");
        index.add_path(Path::new(rel)).expect("add");
    }
    index.write().expect("index write");
    let tree = repo.find_tree(index.write_tree().expect("tree")).expect("find tree");

    let sig = Signature::new("Tester", "tester@example.com", &Time::new(secs, 0)).expect("sig");
    let parents: Vec<Commit<'_>> = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().expect("parent")],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<&Commit<'_>> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, "fixture", &tree, &parent_refs)
        .expect("commit")
}

pub fn context(root: &Path, head: Oid, fix: bool, template: HeaderTemplate) -> Arc<RunContext> {
    Arc::new(RunContext {
        repo_root: root.to_path_buf(),
        holder: "ACME".to_string(),
        fix,
        head: RevisionId(head.to_string()),
        template,
    })
}

pub const APACHE_2016_ACME: &str = "\
// Copyright 2016 ACME. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the \"License\");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an \"AS IS\" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

";
