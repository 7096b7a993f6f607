use std::cell::{Cell, RefCell};
use std::io::Write;
use std::path::Path;

use git2::{
    Cred, CredentialType, ErrorCode, Oid, PushOptions, RemoteCallbacks, Repository as Git2Repo,
    Signature,
};
use log::{debug, info, warn};

use crate::error::{BumpError, Result};
use crate::git::{Credentials, HeadCommit, Identity, Tagger};

/// libgit2 calls the credentials callback again after every rejected
/// attempt; stop before it loops forever.
const MAX_CREDENTIAL_ATTEMPTS: u32 = 5;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            BumpError::repository(format!("cannot open repository at {}: {}", path.display(), e))
        })?;

        debug!("Opened repository at {}", repo.path().display());
        Ok(Git2Repository { repo })
    }

    fn config_value(&self, key: &str) -> Result<String> {
        let config = self
            .repo
            .config()
            .map_err(|e| BumpError::repository(format!("cannot read git config: {}", e)))?;

        config.get_string(key).map_err(|e| {
            BumpError::repository(format!("'{}' is not set in git config: {}", key, e))
        })
    }

    fn push_callbacks<'a>(
        &'a self,
        credentials: &'a Credentials,
        rejection: &'a RefCell<Option<BumpError>>,
    ) -> RemoteCallbacks<'a> {
        let mut callbacks = RemoteCallbacks::new();
        let attempts = Cell::new(0u32);

        callbacks.credentials(move |url, username_from_url, allowed_types| {
            let attempt = attempts.get() + 1;
            attempts.set(attempt);
            debug!(
                "Credentials callback attempt {}: url={}, allowed_types={:?}",
                attempt, url, allowed_types
            );

            if attempt > MAX_CREDENTIAL_ATTEMPTS {
                warn!("Too many credential attempts, authentication likely failing");
                return Err(git2::Error::from_str(
                    "authentication failed after multiple attempts",
                ));
            }

            if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                // Without an explicit password the first attempt goes to the
                // credential helper, later ones fall through to basic auth.
                if credentials.password.is_empty() && attempt == 1 {
                    if let Ok(config) = self.repo.config() {
                        if let Ok(cred) = Cred::credential_helper(
                            &config,
                            url,
                            Some(credentials.username.as_str()),
                        ) {
                            return Ok(cred);
                        }
                    }
                }
                return Cred::userpass_plaintext(&credentials.username, &credentials.password);
            }

            if allowed_types.contains(CredentialType::SSH_KEY) {
                return Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"));
            }

            if allowed_types.contains(CredentialType::USERNAME) {
                return Cred::username(username_from_url.unwrap_or(&credentials.username));
            }

            Cred::default()
        });

        callbacks.sideband_progress(|data| {
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(data);
            let _ = stdout.flush();
            true
        });

        callbacks.push_update_reference(move |refname, status| {
            if let Err(e) = check_ref_update(refname, status) {
                warn!("{}", e);
                *rejection.borrow_mut() = Some(e);
            }
            Ok(())
        });

        callbacks
    }
}

/// A ref update the remote answered with a status message was not applied.
fn check_ref_update(refname: &str, status: Option<&str>) -> Result<()> {
    match status {
        Some(status) => Err(BumpError::remote(format!(
            "Remote rejected {}: {}",
            refname, status
        ))),
        None => Ok(()),
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self
            .repo
            .tag_names(None)
            .map_err(|e| BumpError::repository(format!("cannot list tags: {}", e)))?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn head_commit(&self) -> Result<HeadCommit> {
        let head = self
            .repo
            .head()
            .map_err(|e| BumpError::repository(format!("cannot resolve HEAD: {}", e)))?;
        let commit = head
            .peel_to_commit()
            .map_err(|e| BumpError::repository(format!("HEAD is not a commit: {}", e)))?;
        let message = commit.message().unwrap_or_default().to_string();
        let committer_time = commit.committer().when().into();

        Ok(HeadCommit {
            oid: commit.id(),
            message,
            committer_time,
        })
    }

    fn identity(&self) -> Result<Identity> {
        Ok(Identity {
            name: self.config_value("user.name")?,
            email: self.config_value("user.email")?,
        })
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(BumpError::tag(format!("Cannot look up tag '{}': {}", name, e))),
        }
    }

    fn create_annotated_tag(
        &self,
        name: &str,
        target: Oid,
        tagger: &Tagger,
        message: &str,
    ) -> Result<Oid> {
        let object = self
            .repo
            .find_object(target, None)
            .map_err(|e| BumpError::tag(format!("Cannot find object: {}", e)))?;

        let signature = Signature::new(&tagger.name, &tagger.email, &tagger.when.into())
            .map_err(|e| BumpError::tag(format!("Invalid tagger signature: {}", e)))?;

        let oid = self
            .repo
            .tag(name, &object, &signature, message, false)
            .map_err(|e| BumpError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        info!("Created tag {} at {}", name, target);
        Ok(oid)
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.repo
            .tag_delete(name)
            .map_err(|e| BumpError::tag(format!("Cannot delete tag '{}': {}", name, e)))?;

        info!("Deleted tag {}", name);
        Ok(())
    }

    fn push_tag(&self, remote_name: &str, name: &str, credentials: &Credentials) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|e| {
            BumpError::remote(format!("Cannot find remote '{}': {}", remote_name, e))
        })?;

        let rejection = RefCell::new(None);
        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(self.push_callbacks(credentials, &rejection));

        let refspec = format!("refs/tags/{}:refs/tags/{}", name, name);
        debug!("Pushing {} to {}", refspec, remote_name);

        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => BumpError::remote(format!("Network error during push: {}", e)),
                _ => BumpError::remote(format!("Failed to push tag '{}': {}", name, e)),
            })?;

        if let Some(err) = rejection.borrow_mut().take() {
            return Err(err);
        }

        info!("Pushed tag {} to {}", name, remote_name);
        Ok(())
    }
}
