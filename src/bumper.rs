//! The interactive tag-bumping workflow.
//!
//! [VersionBumper] owns the repository handle, the prompter and the loaded
//! configuration, and runs one bump per [VersionBumper::run] call:
//!
//! 1. List the repository's tags
//! 2. Parse and sort the ones that are semantic versions
//! 3. Ask for an initial version, or for the next one relative to the current
//! 4. Create an annotated tag at HEAD and push it, deleting it again if the
//!    push fails

use log::{debug, info, warn};

use crate::config::Config;
use crate::error::{BumpError, Result};
use crate::git::{Credentials, Repository, Tagger};
use crate::ui::{self, Prompter};
use crate::version::{self, TaggedVersion};

pub struct VersionBumper<R, P> {
    repo: R,
    prompter: P,
    config: Config,
}

impl<R: Repository, P: Prompter> VersionBumper<R, P> {
    pub fn new(repo: R, prompter: P, config: Config) -> Self {
        VersionBumper {
            repo,
            prompter,
            config,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Short names of every tag in the repository
    pub fn list_tags(&self) -> Result<Vec<String>> {
        self.repo.list_tags()
    }

    /// Tags that parse as semantic versions, in input order
    pub fn parse_versions(&self, tags: &[String]) -> Vec<TaggedVersion> {
        version::parse_versions(tags)
    }

    /// Asks for the first version of a repository without version tags.
    pub fn prompt_initial_version(&self) -> Result<TaggedVersion> {
        let validate = |input: &str| {
            TaggedVersion::parse(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        };

        let answer = self.prompter.input(
            "input new version:",
            &self.config.initial_version,
            &validate,
        )?;

        TaggedVersion::parse(&answer)
    }

    /// Offers the patch, minor and major bumps of `current`.
    pub fn prompt_next_version(&self, current: &TaggedVersion) -> Result<TaggedVersion> {
        let candidates = current.candidates();
        let options = candidates.options();

        let index = self
            .prompter
            .select("select the next version", &options, 0)?;

        candidates.by_index(index).cloned().ok_or_else(|| {
            BumpError::selection(format!(
                "choice {} does not match any of {} candidates",
                index,
                options.len()
            ))
        })
    }

    /// Tags HEAD with `version` and pushes the tag.
    ///
    /// The tag copies HEAD's commit message and committer time. If the push
    /// fails the local tag is deleted again; a failed deletion is reported
    /// instead of the push failure.
    pub fn create_and_push_tag(&self, version: &TaggedVersion) -> Result<()> {
        let tag = version.original.as_str();

        let head = self.repo.head_commit()?;
        let identity = self.repo.identity()?;

        if self.repo.tag_exists(tag)? {
            return Err(BumpError::tag(format!("tag '{}' already exists", tag)));
        }

        let tagger = Tagger {
            name: identity.name.clone(),
            email: identity.email,
            when: head.committer_time,
        };
        self.repo
            .create_annotated_tag(tag, head.oid, &tagger, &head.message)?;
        debug!("Created annotated tag {} at {}", tag, head.oid);

        let credentials = Credentials {
            username: self
                .config
                .auth
                .username
                .clone()
                .unwrap_or(identity.name),
            password: self.config.auth.password(),
        };
        if credentials.password.is_empty() {
            debug!(
                "{} is unset, pushing with an empty password",
                self.config.auth.password_env
            );
        }

        if let Err(push_err) = self.repo.push_tag(&self.config.remote, tag, &credentials) {
            warn!("Push of {} failed, deleting local tag: {}", tag, push_err);
            self.repo.delete_tag(tag)?;
            return Err(BumpError::push(tag, push_err));
        }

        info!("Pushed {} to {}", tag, self.config.remote);
        ui::display_bumped(tag);
        Ok(())
    }

    /// Runs one full bump and returns the version that was pushed.
    pub fn run(&self) -> Result<TaggedVersion> {
        let tags = self.list_tags()?;
        let mut versions = self.parse_versions(&tags);

        version::sort_versions(&mut versions);

        let next = match versions.last() {
            Some(current) => {
                ui::display_tags(&versions);
                self.prompt_next_version(current)?
            }
            None => {
                if !tags.is_empty() {
                    warn!(
                        "None of the {} tags is a semantic version, starting fresh",
                        tags.len()
                    );
                }
                self.prompt_initial_version()?
            }
        };

        self.create_and_push_tag(&next)?;
        Ok(next)
    }
}
