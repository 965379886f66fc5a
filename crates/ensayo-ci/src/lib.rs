//! CI helper: posts the suite's run status as a pull request comment.
//!
//! Every failure mode is soft. Missing environment means the job is not
//! running in a PR context, a 403 means the token cannot comment (fork
//! PRs), and neither should fail the pipeline. The binary logs what
//! happened and always exits zero.

#![warn(missing_docs)]

use clap::Parser;

/// Errors raised while posting the status comment.
#[derive(Debug, thiserror::Error)]
pub enum CiError {
    /// The GitHub API rejected the request
    #[error("github api error: {0}")]
    Api(String),
    /// The HTTP call itself failed
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Environment-sourced arguments for the comment script.
///
/// All PR-context fields are optional so the binary degrades to a no-op
/// outside pull request jobs.
#[derive(Debug, Parser)]
#[command(name = "ensayo-ci", about = "Post suite run status to the pull request")]
pub struct CiArgs {
    /// Token used to authenticate against the GitHub API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository in `owner/name` form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Pull request number the job runs against
    #[arg(long, env = "PR_NUMBER")]
    pub pr_number: Option<u64>,

    /// Outcome of the suite job, `success` or `failure`
    #[arg(long, env = "JOB_STATUS")]
    pub job_status: Option<String>,

    /// Toolchain version the job ran with, for the comment body
    #[arg(long, env = "TOOLCHAIN_VERSION", default_value = "unknown")]
    pub toolchain_version: String,
}

/// A fully-resolved comment ready to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRequest {
    /// Repository in `owner/name` form
    pub repository: String,
    /// Pull request number
    pub pr_number: u64,
    /// Job outcome string
    pub job_status: String,
    /// Toolchain version line
    pub toolchain_version: String,
    token: String,
}

impl CommentRequest {
    /// Resolve a request from parsed arguments.
    ///
    /// Returns `None` when any PR-context field is missing; the caller
    /// treats that as "not a PR job" and skips posting.
    #[must_use]
    pub fn from_args(args: CiArgs) -> Option<Self> {
        Some(Self {
            token: args.github_token?,
            repository: args.repository?,
            pr_number: args.pr_number?,
            job_status: args.job_status?,
            toolchain_version: args.toolchain_version,
        })
    }

    /// Issue-comment endpoint for this pull request.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "https://api.github.com/repos/{}/issues/{}/comments",
            self.repository, self.pr_number
        )
    }

    /// Markdown body of the status comment.
    #[must_use]
    pub fn body(&self) -> String {
        format!(
            "{} E2E suite finished with status: **{}**\n\nToolchain: `{}`",
            status_emoji(&self.job_status),
            self.job_status,
            self.toolchain_version
        )
    }

    /// Post the comment. Non-2xx responses become [`CiError::Api`].
    pub async fn post(&self) -> Result<(), CiError> {
        let client = reqwest::Client::new();
        let response = client
            .post(self.endpoint())
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "ensayo-ci")
            .json(&serde_json::json!({ "body": self.body() }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let detail = response.text().await.unwrap_or_default();
        Err(CiError::Api(format!("{status}: {detail}")))
    }
}

fn status_emoji(job_status: &str) -> &'static str {
    match job_status {
        "success" => "\u{2705}",
        "failure" => "\u{274c}",
        _ => "\u{26a0}\u{fe0f}",
    }
}

/// Whether an error is a permissions rejection (fork PRs cannot comment).
#[must_use]
pub fn is_permission_denied(err: &CiError) -> bool {
    match err {
        CiError::Api(detail) => detail.starts_with("403"),
        CiError::Http(_) => false,
    }
}

/// Run the comment flow end to end, never failing the pipeline.
pub async fn run(args: CiArgs) {
    let Some(request) = CommentRequest::from_args(args) else {
        tracing::info!("missing PR context, skipping status comment");
        return;
    };
    tracing::info!(
        repository = %request.repository,
        pr = request.pr_number,
        status = %request.job_status,
        "posting status comment"
    );
    match request.post().await {
        Ok(()) => tracing::info!("status comment posted"),
        Err(e) if is_permission_denied(&e) => {
            tracing::warn!("token cannot comment on this PR, skipping");
        }
        Err(e) => tracing::warn!(error = %e, "status comment failed"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn args(token: Option<&str>) -> CiArgs {
        CiArgs {
            github_token: token.map(String::from),
            repository: Some("ensayo-suite/ensayo".to_string()),
            pr_number: Some(42),
            job_status: Some("success".to_string()),
            toolchain_version: "1.75.0".to_string(),
        }
    }

    #[test]
    fn test_missing_token_skips() {
        assert!(CommentRequest::from_args(args(None)).is_none());
    }

    #[test]
    fn test_endpoint_shape() {
        let request = CommentRequest::from_args(args(Some("t"))).unwrap();
        assert_eq!(
            request.endpoint(),
            "https://api.github.com/repos/ensayo-suite/ensayo/issues/42/comments"
        );
    }

    #[test]
    fn test_body_reports_status_and_toolchain() {
        let request = CommentRequest::from_args(args(Some("t"))).unwrap();
        let body = request.body();
        assert!(body.contains("\u{2705}"));
        assert!(body.contains("**success**"));
        assert!(body.contains("`1.75.0`"));
    }

    #[test]
    fn test_status_emoji_mapping() {
        assert_eq!(status_emoji("success"), "\u{2705}");
        assert_eq!(status_emoji("failure"), "\u{274c}");
        assert_eq!(status_emoji("cancelled"), "\u{26a0}\u{fe0f}");
    }

    #[test]
    fn test_permission_denied_detection() {
        assert!(is_permission_denied(&CiError::Api(
            "403 Forbidden: Resource not accessible by integration".to_string()
        )));
        assert!(!is_permission_denied(&CiError::Api("500: boom".to_string())));
    }

    #[test]
    fn test_cli_parses_flags() {
        let parsed = CiArgs::parse_from([
            "ensayo-ci",
            "--repository",
            "o/r",
            "--pr-number",
            "7",
            "--job-status",
            "failure",
        ]);
        assert_eq!(parsed.repository.as_deref(), Some("o/r"));
        assert_eq!(parsed.pr_number, Some(7));
        assert_eq!(parsed.toolchain_version, "unknown");
    }
}
