use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use git2::Oid;

use crate::error::{BumpError, Result};
use crate::git::{Credentials, HeadCommit, Identity, Repository, Tagger, Timestamp};

/// An annotated tag as recorded by [`MockRepository`]
#[derive(Debug, Clone, PartialEq)]
pub struct MockTag {
    pub target: Oid,
    pub tagger: Tagger,
    pub message: String,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    tags: RefCell<BTreeMap<String, MockTag>>,
    head: Option<HeadCommit>,
    identity: Option<Identity>,
    pushed: RefCell<Vec<(String, String, Credentials)>>,
    fail_push: Option<String>,
    fail_delete: Option<String>,
    next_tag_id: Cell<u8>,
}

impl MockRepository {
    /// Create a new mock repository with a HEAD commit and a configured identity
    pub fn new() -> Self {
        MockRepository {
            tags: RefCell::new(BTreeMap::new()),
            head: Some(HeadCommit {
                oid: Oid::from_bytes(&[0xaa; 20]).unwrap_or_else(|_| Oid::zero()),
                message: "Initial commit\n".to_string(),
                committer_time: Timestamp {
                    seconds: 1_700_000_000,
                    offset_minutes: 60,
                },
            }),
            identity: Some(Identity {
                name: "Test User".to_string(),
                email: "test@example.com".to_string(),
            }),
            pushed: RefCell::new(Vec::new()),
            fail_push: None,
            fail_delete: None,
            next_tag_id: Cell::new(1),
        }
    }

    /// Add an existing tag pointing at HEAD
    pub fn add_tag(&mut self, name: impl Into<String>) {
        let head = self.head.clone();
        let target = head.as_ref().map(|h| h.oid).unwrap_or_else(Oid::zero);
        let when = head
            .as_ref()
            .map(|h| h.committer_time)
            .unwrap_or(Timestamp {
                seconds: 0,
                offset_minutes: 0,
            });
        self.tags.borrow_mut().insert(
            name.into(),
            MockTag {
                target,
                tagger: Tagger {
                    name: "Someone Else".to_string(),
                    email: "someone@example.com".to_string(),
                    when,
                },
                message: String::new(),
            },
        );
    }

    pub fn set_head(&mut self, head: Option<HeadCommit>) {
        self.head = head;
    }

    pub fn set_identity(&mut self, identity: Option<Identity>) {
        self.identity = identity;
    }

    /// Make every push fail with the given message
    pub fn fail_push(&mut self, message: impl Into<String>) {
        self.fail_push = Some(message.into());
    }

    /// Make every tag deletion fail with the given message
    pub fn fail_delete(&mut self, message: impl Into<String>) {
        self.fail_delete = Some(message.into());
    }

    pub fn tag(&self, name: &str) -> Option<MockTag> {
        self.tags.borrow().get(name).cloned()
    }

    /// `(remote, tag, credentials)` for every successful push, in order
    pub fn pushed(&self) -> Vec<(String, String, Credentials)> {
        self.pushed.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.borrow().keys().cloned().collect())
    }

    fn head_commit(&self) -> Result<HeadCommit> {
        self.head
            .clone()
            .ok_or_else(|| BumpError::repository("cannot resolve HEAD: reference not found"))
    }

    fn identity(&self) -> Result<Identity> {
        self.identity
            .clone()
            .ok_or_else(|| BumpError::repository("'user.name' is not set in git config"))
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.tags.borrow().contains_key(name))
    }

    fn create_annotated_tag(
        &self,
        name: &str,
        target: Oid,
        tagger: &Tagger,
        message: &str,
    ) -> Result<Oid> {
        let mut tags = self.tags.borrow_mut();
        if tags.contains_key(name) {
            return Err(BumpError::tag(format!(
                "Cannot create tag '{}': tag already exists",
                name
            )));
        }

        tags.insert(
            name.to_string(),
            MockTag {
                target,
                tagger: tagger.clone(),
                message: message.to_string(),
            },
        );

        let id = self.next_tag_id.get();
        self.next_tag_id.set(id.wrapping_add(1));
        Ok(Oid::from_bytes(&[id; 20])?)
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        if let Some(reason) = &self.fail_delete {
            return Err(BumpError::tag(format!(
                "Cannot delete tag '{}': {}",
                name, reason
            )));
        }

        self.tags
            .borrow_mut()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| BumpError::tag(format!("Cannot delete tag '{}': not found", name)))
    }

    fn push_tag(&self, remote: &str, name: &str, credentials: &Credentials) -> Result<()> {
        if let Some(reason) = &self.fail_push {
            return Err(BumpError::remote(format!(
                "Failed to push tag '{}': {}",
                name, reason
            )));
        }
        if !self.tags.borrow().contains_key(name) {
            return Err(BumpError::remote(format!(
                "src refspec refs/tags/{} does not match any existing object",
                name
            )));
        }

        self.pushed
            .borrow_mut()
            .push((remote.to_string(), name.to_string(), credentials.clone()));
        Ok(())
    }
}
