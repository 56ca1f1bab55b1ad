//! Build freshness check for the `express` flow.
//!
//! A rebuild is needed when the output directory is missing or the source
//! directory was modified after it. The check and the build command run
//! alongside the Figma fetch, so they are async.

use std::path::Path;
use std::process::Stdio;

use figmacopy_shared::{BuildConfig, FigmaCopyError, Result};
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

/// What the build step ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Output was newer than sources; nothing ran.
    UpToDate,
    /// The build command ran and succeeded.
    Rebuilt,
    /// The caller disabled the build step.
    Skipped,
}

/// Whether `source_dir` has changed since `output_dir` was produced.
///
/// Any stat failure (missing output, unreadable mtime) counts as stale.
pub async fn build_required(source_dir: &Path, output_dir: &Path) -> bool {
    let (source, output) = tokio::join!(
        tokio::fs::metadata(source_dir),
        tokio::fs::metadata(output_dir),
    );

    let mtimes = source
        .and_then(|m| m.modified())
        .and_then(|s| output.and_then(|m| m.modified()).map(|o| (s, o)));

    match mtimes {
        Ok((source_mtime, output_mtime)) => {
            debug!(?source_mtime, ?output_mtime, "compared build mtimes");
            source_mtime > output_mtime
        }
        Err(e) => {
            debug!(error = %e, "cannot compare build mtimes, assuming stale");
            true
        }
    }
}

/// Rebuild the project if its output is stale.
#[instrument(skip_all, fields(command = %config.command))]
pub async fn smart_build(config: &BuildConfig) -> Result<BuildOutcome> {
    info!("checking if build is required");

    if !build_required(&config.source_dir, &config.output_dir).await {
        info!("build up to date, skipping");
        return Ok(BuildOutcome::UpToDate);
    }

    info!("building project");
    run_shell(&config.command).await?;
    info!("build complete");

    Ok(BuildOutcome::Rebuilt)
}

/// Run a command line through the platform shell, capturing its output.
async fn run_shell(command_line: &str) -> Result<()> {
    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command_line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command_line);
        c
    };

    let output = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| FigmaCopyError::Build(format!("failed to spawn `{command_line}`: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(status = ?output.status, stderr = %stderr.trim(), "build command failed");
        return Err(FigmaCopyError::Build(format!(
            "`{command_line}` exited with status {}",
            output.status.code().unwrap_or(-1)
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "figmacopy-build-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn missing_output_requires_build() {
        let root = temp_dir("missing");
        let src = root.join("src");
        std::fs::create_dir_all(&src).unwrap();

        assert!(build_required(&src, &root.join("dist")).await);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn newer_output_is_up_to_date() {
        let root = temp_dir("fresh");
        let src = root.join("src");
        let dist = root.join("dist");
        std::fs::create_dir_all(&src).unwrap();
        std::thread::sleep(Duration::from_millis(50));
        std::fs::create_dir_all(&dist).unwrap();

        assert!(!build_required(&src, &dist).await);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn newer_source_requires_build() {
        let root = temp_dir("stale");
        let src = root.join("src");
        let dist = root.join("dist");
        std::fs::create_dir_all(&dist).unwrap();
        std::thread::sleep(Duration::from_millis(50));
        std::fs::create_dir_all(&src).unwrap();

        assert!(build_required(&src, &dist).await);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn smart_build_runs_command_when_stale() {
        let root = temp_dir("run");
        let marker = root.join("built");
        let config = BuildConfig {
            command: format!("touch {}", marker.display()),
            source_dir: root.join("src"),
            output_dir: root.join("dist"),
        };

        let outcome = smart_build(&config).await.unwrap();
        assert_eq!(outcome, BuildOutcome::Rebuilt);
        assert!(marker.exists());
        let _ = std::fs::remove_dir_all(&root);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_command_is_build_error() {
        let root = temp_dir("fail");
        let config = BuildConfig {
            command: "exit 3".into(),
            source_dir: root.join("src"),
            output_dir: root.join("dist"),
        };

        let err = smart_build(&config).await.unwrap_err();
        assert!(matches!(err, FigmaCopyError::Build(_)));
        assert!(err.to_string().contains("status 3"));
        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn up_to_date_skips_command() {
        let root = temp_dir("skip");
        let src = root.join("src");
        let dist = root.join("dist");
        std::fs::create_dir_all(&src).unwrap();
        std::thread::sleep(Duration::from_millis(50));
        std::fs::create_dir_all(&dist).unwrap();

        let config = BuildConfig {
            command: "exit 1".into(),
            source_dir: src,
            output_dir: dist,
        };
        assert_eq!(smart_build(&config).await.unwrap(), BuildOutcome::UpToDate);
        let _ = std::fs::remove_dir_all(&root);
    }
}
