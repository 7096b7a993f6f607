// tests/integration_test.rs
use std::fs;
use std::path::Path;

use git2::{Oid, Repository, Signature, Time};
use git_bump::config::Config;
use git_bump::git::{Git2Repository, Repository as _};
use git_bump::ui::ScriptedPrompter;
use git_bump::{BumpError, VersionBumper};
use tempfile::TempDir;

const COMMITTER_SECONDS: i64 = 1_600_000_000;
const COMMITTER_OFFSET: i32 = 120;

// Helper function to setup a temporary git repo for testing
fn setup_test_repo(tags: &[&str]) -> (TempDir, Oid) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    fs::write(temp_dir.path().join("README.md"), b"Initial content\n")
        .expect("Could not write initial file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new("README.md"))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");

    let author = repo.signature().expect("Could not get sig");
    let committer = Signature::new(
        "Committer",
        "committer@example.com",
        &Time::new(COMMITTER_SECONDS, COMMITTER_OFFSET),
    )
    .expect("Could not build committer");

    let commit_id = repo
        .commit(
            Some("HEAD"),
            &author,
            &committer,
            "feat: add readme\n\nLonger body.\n",
            &tree,
            &[],
        )
        .expect("Could not create commit");

    let object = repo.find_object(commit_id, None).unwrap();
    for tag in tags {
        repo.tag_lightweight(tag, &object, false)
            .expect("Could not create tag");
    }

    (temp_dir, commit_id)
}

fn add_bare_origin(repo_dir: &Path) -> TempDir {
    let remote_dir = TempDir::new().expect("Could not create remote dir");
    Repository::init_bare(remote_dir.path()).expect("Could not init bare repo");

    let repo = Repository::open(repo_dir).unwrap();
    repo.remote("origin", remote_dir.path().to_str().unwrap())
        .expect("Could not add origin");
    remote_dir
}

#[test]
fn test_open_discovers_repository() {
    let (temp_dir, _) = setup_test_repo(&[]);
    let nested = temp_dir.path().join("nested");
    fs::create_dir(&nested).unwrap();

    assert!(Git2Repository::open(&nested).is_ok());
}

#[test]
fn test_list_tags_returns_short_names() {
    let (temp_dir, _) = setup_test_repo(&["v1.0.0", "v1.1.0", "not-a-version"]);
    let repo = Git2Repository::open(temp_dir.path()).unwrap();

    let mut tags = repo.list_tags().unwrap();
    tags.sort();
    assert_eq!(tags, vec!["not-a-version", "v1.0.0", "v1.1.0"]);
}

#[test]
fn test_head_commit_and_identity() {
    let (temp_dir, commit_id) = setup_test_repo(&[]);
    let repo = Git2Repository::open(temp_dir.path()).unwrap();

    let head = repo.head_commit().unwrap();
    assert_eq!(head.oid, commit_id);
    assert_eq!(head.message, "feat: add readme\n\nLonger body.\n");
    assert_eq!(head.committer_time.seconds, COMMITTER_SECONDS);
    assert_eq!(head.committer_time.offset_minutes, COMMITTER_OFFSET);

    let identity = repo.identity().unwrap();
    assert_eq!(identity.name, "Test User");
    assert_eq!(identity.email, "test@example.com");
}

#[test]
fn test_unborn_head_is_repository_error() {
    let temp_dir = TempDir::new().unwrap();
    Repository::init(temp_dir.path()).unwrap();
    let repo = Git2Repository::open(temp_dir.path()).unwrap();

    assert!(matches!(repo.head_commit(), Err(BumpError::Repository(_))));
}

#[test]
fn test_bump_pushes_annotated_tag_to_origin() {
    let (temp_dir, commit_id) = setup_test_repo(&["v1.0.0", "v1.1.0", "not-a-version"]);
    let remote_dir = add_bare_origin(temp_dir.path());

    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    let prompter = ScriptedPrompter::new().with_selections([2]);
    let bumper = VersionBumper::new(repo, prompter, Config::default());

    let pushed = bumper.run().unwrap();
    assert_eq!(pushed.to_string(), "v2.0.0");

    let local = Repository::open(temp_dir.path()).unwrap();
    let tag = local
        .find_reference("refs/tags/v2.0.0")
        .unwrap()
        .peel_to_tag()
        .expect("tag should be annotated");
    assert_eq!(tag.target_id(), commit_id);
    assert_eq!(tag.message(), Some("feat: add readme\n\nLonger body.\n"));
    let tagger = tag.tagger().unwrap();
    assert_eq!(tagger.name(), Some("Test User"));
    assert_eq!(tagger.email(), Some("test@example.com"));
    assert_eq!(tagger.when().seconds(), COMMITTER_SECONDS);
    assert_eq!(tagger.when().offset_minutes(), COMMITTER_OFFSET);

    let remote = Repository::open_bare(remote_dir.path()).unwrap();
    let remote_tag = remote
        .find_reference("refs/tags/v2.0.0")
        .expect("tag should exist on the remote");
    assert_eq!(remote_tag.target(), Some(tag.id()));
}

#[test]
fn test_initial_version_on_repository_without_tags() {
    let (temp_dir, _) = setup_test_repo(&[]);
    let remote_dir = add_bare_origin(temp_dir.path());

    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    let prompter = ScriptedPrompter::new().with_inputs([""]);
    let bumper = VersionBumper::new(repo, prompter, Config::default());

    assert_eq!(bumper.run().unwrap().to_string(), "v0.1.0");

    let remote = Repository::open_bare(remote_dir.path()).unwrap();
    assert!(remote.find_reference("refs/tags/v0.1.0").is_ok());
}

#[test]
fn test_failed_push_deletes_local_tag() {
    let (temp_dir, _) = setup_test_repo(&["v1.0.0"]);
    let missing = temp_dir.path().join("no-such-remote");
    Repository::open(temp_dir.path())
        .unwrap()
        .remote("origin", missing.to_str().unwrap())
        .unwrap();

    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    let prompter = ScriptedPrompter::new().with_selections([0]);
    let bumper = VersionBumper::new(repo, prompter, Config::default());

    let err = bumper.run().unwrap_err();
    assert!(matches!(err, BumpError::Push { .. }));
    assert!(err.to_string().contains("automatically deleted"));

    assert!(!bumper.repository().tag_exists("v1.0.1").unwrap());
    assert!(bumper.repository().tag_exists("v1.0.0").unwrap());
}

#[test]
fn test_missing_remote_deletes_local_tag() {
    let (temp_dir, _) = setup_test_repo(&[]);

    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    let prompter = ScriptedPrompter::new().with_inputs(["v0.0.1"]);
    let bumper = VersionBumper::new(repo, prompter, Config::default());

    let err = bumper.run().unwrap_err();
    assert!(err.to_string().contains("origin"));

    let local = Repository::open(temp_dir.path()).unwrap();
    assert!(local.find_reference("refs/tags/v0.0.1").is_err());
}
