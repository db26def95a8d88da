//! Listing sources: a system command or a captured file.

use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::process::Command;

use super::ListingError;
use crate::config::defaults;

/// Trait for obtaining the raw address listing.
///
/// # Design
///
/// - The listing is returned as text; parsing is done by the caller
/// - Enables dependency injection for testing with canned listings
pub trait ListingSource: Send + Sync {
    /// Fetches the complete listing text.
    ///
    /// # Errors
    ///
    /// Returns a [`ListingError`] when the listing cannot be produced.
    fn fetch(&self) -> impl Future<Output = Result<String, ListingError>> + Send;
}

/// Runs an external command and returns its standard output.
///
/// Defaults to `ip -4 -o a`, which prints one IPv4 address per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    /// Creates a source running `program` with `args`.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Returns the program that will be executed.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the arguments passed to the program.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the full command line, for logging.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CommandSource {
    fn default() -> Self {
        Self::new(
            defaults::LISTING_PROGRAM,
            defaults::LISTING_ARGS.iter().map(ToString::to_string).collect(),
        )
    }
}

impl ListingSource for CommandSource {
    async fn fetch(&self) -> Result<String, ListingError> {
        tracing::debug!("Fetching addresses with '{}'", self.command_line());

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .await
            .map_err(|source| ListingError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ListingError::CommandFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|source| ListingError::InvalidOutput {
            program: self.program.clone(),
            source,
        })
    }
}

/// Reads a previously captured listing from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the listing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ListingSource for FileSource {
    async fn fetch(&self) -> Result<String, ListingError> {
        tracing::debug!("Reading addresses from {}", self.path.display());

        let result = tokio::fs::read_to_string(&self.path).await;
        result.map_err(|source| ListingError::FileRead {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    mod command_source {
        use super::*;

        #[test]
        fn default_runs_ip_listing() {
            let source = CommandSource::default();

            assert_eq!(source.program(), "ip");
            assert_eq!(source.args(), ["-4", "-o", "a"]);
            assert_eq!(source.command_line(), "ip -4 -o a");
        }

        #[cfg(unix)]
        #[tokio::test]
        async fn returns_stdout_on_success() {
            let source = CommandSource::new(
                "sh",
                vec![
                    "-c".to_string(),
                    "echo '2: eth0 inet 10.0.0.5/8'".to_string(),
                ],
            );

            let text = source.fetch().await.unwrap();

            assert_eq!(text, "2: eth0 inet 10.0.0.5/8\n");
        }

        #[cfg(unix)]
        #[tokio::test]
        async fn non_zero_exit_captures_stderr() {
            let source = CommandSource::new(
                "sh",
                vec!["-c".to_string(), "echo 'boom' >&2; exit 3".to_string()],
            );

            let error = source.fetch().await.unwrap_err();

            match error {
                ListingError::CommandFailed {
                    program,
                    status,
                    stderr,
                } => {
                    assert_eq!(program, "sh");
                    assert_eq!(status.code(), Some(3));
                    assert_eq!(stderr, "boom");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[tokio::test]
        async fn missing_program_is_spawn_error() {
            let source = CommandSource::new("renew-ip-definitely-missing-binary", vec![]);

            let error = source.fetch().await.unwrap_err();

            assert!(matches!(error, ListingError::Spawn { .. }));
        }
    }

    mod file_source {
        use super::*;

        #[tokio::test]
        async fn reads_file_contents() {
            let mut file = NamedTempFile::new().unwrap();
            write!(file, "2: eth0 inet 10.0.0.5/8").unwrap();

            let source = FileSource::new(file.path());
            let text = source.fetch().await.unwrap();

            assert_eq!(text, "2: eth0 inet 10.0.0.5/8");
        }

        #[tokio::test]
        async fn missing_file_is_file_read_error() {
            let dir = tempfile::tempdir().unwrap();
            let source = FileSource::new(dir.path().join("missing.txt"));

            let error = source.fetch().await.unwrap_err();

            assert!(matches!(error, ListingError::FileRead { .. }));
        }
    }
}
