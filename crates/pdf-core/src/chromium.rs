//! Headless Chromium backend
//!
//! Each render launches a fresh browser process with a private profile in a
//! temporary directory, prints the page with `--print-to-pdf`, and removes
//! the directory afterwards.

use crate::document::PDF_MAGIC;
use crate::{PageConfig, PdfBackend, PdfError, Result};
use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Default rendering deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executable names searched on `PATH`, in order
pub const BROWSER_CANDIDATES: [&str; 6] = [
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
    "msedge",
];

/// Environment variable naming the browser executable
const CHROME_PATH_ENV: &str = "CHROME_PATH";

/// How often the child process is polled for exit
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Longest stderr excerpt carried in an error
const STDERR_LIMIT: usize = 2000;

/// Renders PDFs by running a Chromium-family browser headless
#[derive(Debug, Clone)]
pub struct ChromiumBackend {
    /// Browser executable
    executable: PathBuf,
    /// Arguments placed before the print flags
    args: Vec<OsString>,
}

impl ChromiumBackend {
    /// Create a backend for a specific executable
    pub fn new<P: Into<PathBuf>>(executable: P) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
        }
    }

    /// Locate a browser from `CHROME_PATH` or the `PATH` search list
    pub fn detect() -> Result<Self> {
        if let Some(path) = std::env::var_os(CHROME_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(Self::new(path));
        }

        find_in_path(&BROWSER_CANDIDATES, std::env::var_os("PATH").as_deref())
            .map(Self::new)
            .ok_or_else(|| {
                PdfError::BrowserNotFound(format!(
                    "none of {} found on PATH; set {} or pass the executable explicitly",
                    BROWSER_CANDIDATES.join(", "),
                    CHROME_PATH_ENV
                ))
            })
    }

    /// Add an argument passed ahead of the print flags
    pub fn with_arg<S: Into<OsString>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Browser executable in use
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn command(&self, workdir: &Path, html_path: &Path, pdf_path: &Path) -> Result<Command> {
        let mut profile_arg = OsString::from("--user-data-dir=");
        profile_arg.push(workdir.join("profile"));
        let mut output_arg = OsString::from("--print-to-pdf=");
        output_arg.push(pdf_path);

        let mut cmd = Command::new(&self.executable);
        cmd.args(&self.args)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-extensions")
            .arg("--hide-scrollbars")
            .arg("--run-all-compositor-stages-before-draw")
            .arg("--no-pdf-header-footer")
            .arg(profile_arg)
            .arg(output_arg)
            .arg(file_url(html_path)?);
        Ok(cmd)
    }
}

impl PdfBackend for ChromiumBackend {
    fn name(&self) -> &str {
        "chromium"
    }

    fn render(&self, html: &str, page: &PageConfig, timeout: Duration) -> Result<Vec<u8>> {
        let workdir = tempfile::Builder::new().prefix("einvoice-").tempdir()?;
        let html_path = workdir.path().join("document.html");
        let pdf_path = workdir.path().join("document.pdf");
        let stderr_path = workdir.path().join("stderr.log");

        fs::write(&html_path, page.apply_to(html))?;

        let mut cmd = self.command(workdir.path(), &html_path, &pdf_path)?;
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(File::create(&stderr_path)?);

        debug!(executable = %self.executable.display(), ?timeout, "launching browser");
        let started = Instant::now();
        let child = cmd.spawn().map_err(|e| {
            PdfError::LaunchError(format!("{}: {}", self.executable.display(), e))
        })?;

        // A deadline past the clock's range means waiting without one
        let deadline = started.checked_add(timeout);
        let status = ChildGuard::new(child).wait_until(deadline)?;
        let Some(status) = status else {
            warn!(?timeout, "browser did not finish in time, killed");
            return Err(PdfError::Timeout(timeout));
        };

        if !status.success() {
            return Err(PdfError::BackendFailed {
                status: status.to_string(),
                stderr: read_stderr(&stderr_path),
            });
        }

        let bytes = match fs::read(&pdf_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PdfError::MissingOutput)
            }
            Err(e) => return Err(e.into()),
        };

        if !bytes.starts_with(PDF_MAGIC) {
            return Err(PdfError::InvalidOutput(format!(
                "{} bytes without a %PDF- header",
                bytes.len()
            )));
        }

        info!(
            bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "browser rendered PDF"
        );
        Ok(bytes)
    }
}

/// Kills and reaps the child on drop unless it already exited
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    /// Wait for exit until `deadline`; `None` means the deadline passed
    fn wait_until(mut self, deadline: Option<Instant>) -> Result<Option<ExitStatus>> {
        loop {
            if let Some(status) = self.child.try_wait()? {
                self.reaped = true;
                return Ok(Some(status));
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Search `path_var` for the first executable among `names`
pub fn find_in_path(names: &[&str], path_var: Option<&OsStr>) -> Option<PathBuf> {
    let path_var = path_var?;
    for dir in std::env::split_paths(path_var) {
        for name in names {
            let candidate = dir.join(name);
            if is_executable(&candidate) {
                return Some(candidate);
            }
            if cfg!(windows) {
                let exe = candidate.with_extension("exe");
                if is_executable(&exe) {
                    return Some(exe);
                }
            }
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Percent-encoded `file://` URL for a local absolute path
fn file_url(path: &Path) -> Result<String> {
    Url::from_file_path(path)
        .map(String::from)
        .map_err(|()| PdfError::LaunchError(format!("not an absolute path: {}", path.display())))
}

/// Last part of the captured stderr, trimmed
fn read_stderr(path: &Path) -> String {
    let text = fs::read_to_string(path).unwrap_or_default();
    let text = text.trim();
    let mut start = text.len().saturating_sub(STDERR_LIMIT);
    while !text.is_char_boundary(start) {
        start += 1;
    }
    text[start..].to_string()
}
