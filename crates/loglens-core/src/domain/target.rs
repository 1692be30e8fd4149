//! Pull request addressing for comment publishing.

use std::fmt;

use super::error::PublishError;

/// Repository (`owner/name`) and pull request number a comment is posted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTarget {
    owner: String,
    name: String,
    pr_number: u64,
}

impl CommentTarget {
    /// Validate a repository slug and PR number.
    pub fn new(repo: &str, pr_number: u64) -> Result<Self, PublishError> {
        let (owner, name) = parse_repo(repo)?;
        if pr_number == 0 {
            return Err(PublishError::InvalidInput(
                "PR number must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            pr_number,
        })
    }

    /// Validate string arguments as given on the command line.
    pub fn parse(repo: &str, pr_number: &str) -> Result<Self, PublishError> {
        let trimmed = pr_number.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PublishError::InvalidInput(format!(
                "invalid PR number {pr_number:?}: must be a positive integer"
            )));
        }
        let number = trimmed.parse::<u64>().map_err(|_| {
            PublishError::InvalidInput(format!("PR number {pr_number:?} is out of range"))
        })?;
        Self::new(repo, number)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pr_number(&self) -> u64 {
        self.pr_number
    }

    /// Browser URL of the pull request on github.com.
    pub fn html_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/pull/{}",
            self.owner, self.name, self.pr_number
        )
    }
}

impl fmt::Display for CommentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.name, self.pr_number)
    }
}

fn parse_repo(repo: &str) -> Result<(&str, &str), PublishError> {
    let invalid = || {
        PublishError::InvalidInput(format!(
            "invalid repository {repo:?}: expected 'owner/name'"
        ))
    };

    let (owner, name) = repo.split_once('/').ok_or_else(invalid)?;
    let well_formed = |part: &str| !part.is_empty() && !part.chars().any(char::is_whitespace);
    if !well_formed(owner) || !well_formed(name) || name.contains('/') {
        return Err(invalid());
    }
    Ok((owner, name))
}
