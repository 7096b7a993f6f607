//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of Git
//! operations git-bump needs, so the tagging workflow can run against a real
//! repository or an in-memory one in tests.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust
//! # use git_bump::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_bump::Result<()> {
//! let head = repo.head_commit()?;
//! for tag in repo.list_tags()? {
//!     println!("{} (HEAD is {})", tag, head.oid);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// The commit HEAD points at, with the fields an annotated tag copies from it
#[derive(Debug, Clone, PartialEq)]
pub struct HeadCommit {
    pub oid: Oid,
    pub message: String,
    pub committer_time: Timestamp,
}

/// Seconds since the epoch plus the UTC offset in minutes, as git stores it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub seconds: i64,
    pub offset_minutes: i32,
}

impl From<git2::Time> for Timestamp {
    fn from(time: git2::Time) -> Self {
        Timestamp {
            seconds: time.seconds(),
            offset_minutes: time.offset_minutes(),
        }
    }
}

impl From<Timestamp> for git2::Time {
    fn from(ts: Timestamp) -> Self {
        git2::Time::new(ts.seconds, ts.offset_minutes)
    }
}

/// Operator identity as configured in git (`user.name` / `user.email`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// Tagger metadata recorded on an annotated tag
#[derive(Debug, Clone, PartialEq)]
pub struct Tagger {
    pub name: String,
    pub email: String,
    pub when: Timestamp,
}

/// Basic auth credentials for pushing
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Common git operation trait for abstraction
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map failures
/// to read the repository to [crate::error::BumpError::Repository], tag
/// object failures to [crate::error::BumpError::Tag] and transport failures
/// to [crate::error::BumpError::Remote].
pub trait Repository {
    /// Short names of all tags (`v1.0.0`, not `refs/tags/v1.0.0`)
    fn list_tags(&self) -> Result<Vec<String>>;

    /// The commit currently checked out
    fn head_commit(&self) -> Result<HeadCommit>;

    /// The operator's configured name and email
    fn identity(&self) -> Result<Identity>;

    /// Whether a tag with this short name exists
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Create an annotated tag pointing at `target`
    ///
    /// Fails if a tag with the same name already exists.
    fn create_annotated_tag(
        &self,
        name: &str,
        target: Oid,
        tagger: &Tagger,
        message: &str,
    ) -> Result<Oid>;

    /// Delete a local tag
    fn delete_tag(&self, name: &str) -> Result<()>;

    /// Push `refs/tags/<name>` to the remote under the same name
    ///
    /// A ref the remote refuses to update counts as a failure.
    fn push_tag(&self, remote: &str, name: &str, credentials: &Credentials) -> Result<()>;
}
