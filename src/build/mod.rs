// ABOUTME: Test runner image pipeline: render a Dockerfile, build, tag, and push.
// ABOUTME: Strictly sequential shell-outs to an external build tool; no retries.

mod error;
mod template;

pub use error::{BuildError, BuildErrorKind};
pub use template::{TemplateError, render};

use chrono::{DateTime, Utc};
use snafu::ResultExt;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::config::BuildConfig;
use crate::types::{NameComponent, RunnerImage};

use error::{
    InvalidNameSnafu, InvalidTagSnafu, ReadTemplateSnafu, RenderSnafu, SpawnSnafu,
    ToolFailedSnafu, WriteDockerfileSnafu,
};

/// Timestamp format used for image tags, e.g. `20261018093000`.
pub const TAG_FORMAT: &str = "%Y%m%d%H%M%S";

/// What to build: one project's runner image for one category of tests.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub test_type: NameComponent,
    pub project: NameComponent,
    pub branch: String,
    pub timestamp: DateTime<Utc>,
}

impl BuildRequest {
    pub fn new(
        test_type: &str,
        project: &str,
        branch: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, BuildError> {
        Ok(Self {
            test_type: NameComponent::new(test_type).context(InvalidNameSnafu {
                field: "test type",
            })?,
            project: NameComponent::new(project).context(InvalidNameSnafu { field: "project" })?,
            branch: branch.to_string(),
            timestamp,
        })
    }

    pub fn timestamp_tag(&self) -> String {
        self.timestamp.format(TAG_FORMAT).to_string()
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub dockerfile: PathBuf,
    pub tags: Vec<String>,
    pub published: bool,
}

/// Renders, builds, and publishes runner images with an external tool.
#[derive(Debug, Clone)]
pub struct ImagePipeline {
    config: BuildConfig,
}

impl ImagePipeline {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn template_path(&self, request: &BuildRequest) -> PathBuf {
        self.config
            .workdir
            .join(request.test_type.as_str())
            .join(&self.config.template)
    }

    pub fn dockerfile_path(&self, request: &BuildRequest) -> PathBuf {
        self.config
            .workdir
            .join(request.test_type.as_str())
            .join(request.project.as_str())
            .join("Dockerfile")
    }

    pub fn image(&self, request: &BuildRequest) -> RunnerImage {
        RunnerImage::new(
            &self.config.registry,
            request.test_type.clone(),
            request.project.clone(),
        )
    }

    /// Fully qualified references the build is tagged with: timestamp, then `latest`.
    pub fn tags(&self, request: &BuildRequest) -> Result<Vec<String>, BuildError> {
        let image = self.image(request);
        [request.timestamp_tag().as_str(), "latest"]
            .into_iter()
            .map(|tag| image.tagged(tag).context(InvalidTagSnafu))
            .collect()
    }

    /// Render the project's Dockerfile from the test type's template.
    pub async fn render(&self, request: &BuildRequest) -> Result<PathBuf, BuildError> {
        let template_path = self.template_path(request);
        let template = tokio::fs::read_to_string(&template_path)
            .await
            .context(ReadTemplateSnafu {
                path: &template_path,
            })?;

        let image = self.image(request);
        let vars = HashMap::from([
            ("test_type", request.test_type.to_string()),
            ("project", request.project.to_string()),
            ("branch", request.branch.clone()),
            ("timestamp", request.timestamp_tag()),
            ("registry_project_name", self.config.registry.clone()),
            ("image", image.repository()),
        ]);
        let rendered = render(&template, &vars).context(RenderSnafu {
            path: &template_path,
        })?;

        let dockerfile = self.dockerfile_path(request);
        if let Some(parent) = dockerfile.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context(WriteDockerfileSnafu { path: parent })?;
        }
        tokio::fs::write(&dockerfile, rendered)
            .await
            .context(WriteDockerfileSnafu { path: &dockerfile })?;

        tracing::info!(dockerfile = %dockerfile.display(), "rendered Dockerfile");
        Ok(dockerfile)
    }

    /// Build the image from an already rendered Dockerfile.
    pub async fn build(&self, request: &BuildRequest) -> Result<Vec<String>, BuildError> {
        let tags = self.tags(request)?;
        let dockerfile = self.dockerfile_path(request);

        let mut args = vec!["build".to_string()];
        for tag in &tags {
            args.push("-t".to_string());
            args.push(tag.clone());
        }
        args.push("-f".to_string());
        args.push(dockerfile.display().to_string());
        args.push(self.config.workdir.display().to_string());

        self.run_tool(&args).await?;
        tracing::info!(image = %self.image(request), "built image");
        Ok(tags)
    }

    /// Push each tag to the registry.
    pub async fn publish(&self, tags: &[String]) -> Result<(), BuildError> {
        for tag in tags {
            self.run_tool(&["push".to_string(), tag.clone()]).await?;
            tracing::info!(%tag, "published");
        }
        Ok(())
    }

    /// Render, build, and (if configured) publish.
    pub async fn run(&self, request: &BuildRequest) -> Result<BuildOutcome, BuildError> {
        let dockerfile = self.render(request).await?;
        let tags = self.build(request).await?;

        let published = self.config.publish;
        if published {
            self.publish(&tags).await?;
        } else {
            tracing::info!("publishing disabled, skipping push");
        }

        Ok(BuildOutcome {
            dockerfile,
            tags,
            published,
        })
    }

    async fn run_tool(&self, args: &[String]) -> Result<(), BuildError> {
        let tool = &self.config.tool;
        let command_line = format!("{} {}", tool, args.join(" "));
        tracing::debug!(command = %command_line, "running build tool");

        let mut command = Command::new(tool);
        command.args(args);

        if self.config.stream_output {
            let status = command
                .stdin(Stdio::null())
                .status()
                .await
                .context(SpawnSnafu { tool })?;
            if !status.success() {
                return ToolFailedSnafu {
                    command: command_line,
                    code: status.code(),
                    stderr: String::new(),
                }
                .fail();
            }
            return Ok(());
        }

        let output = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context(SpawnSnafu { tool })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!(output = %stdout.trim_end(), "build tool output");
        }

        if !output.status.success() {
            return ToolFailedSnafu {
                command: command_line,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .fail();
        }

        Ok(())
    }
}
