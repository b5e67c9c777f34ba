//! Headless capture of a live page via Playwright over Node.js.
//!
//! The core only needs one capability from this module: produce an RGB
//! raster of a URL (or of a single element selected by CSS) at a given
//! viewport. Everything else - navigation, network idle, settle delay -
//! is plumbing around that call.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use url::Url;

use crate::error::{DsxError, Result};
use crate::viewport::Viewport;

/// Default timeout for page navigation.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for the entire Playwright process.
pub const DEFAULT_PROCESS_TIMEOUT: Duration = Duration::from_secs(60);

/// Default settle delay after navigation, before the screenshot.
pub const DEFAULT_WAIT: Duration = Duration::from_millis(2000);

/// Timeout for checking node/playwright availability.
const NODE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Script to check if Playwright is installed.
const PLAYWRIGHT_CHECK_SCRIPT: &str = "require('playwright'); process.stdout.write('ok');";

/// Capture script: navigate, settle, screenshot the page or one element.
const CAPTURE_SCRIPT: &str = r#"
const [, url, width, height, navTimeout, waitMs, selector, screenshotPath, headlessFlag] = process.argv;

async function run() {
  let browser;
  try {
    const { chromium } = require('playwright');
    browser = await chromium.launch({ headless: headlessFlag !== '0' });
    const context = await browser.newContext({
      viewport: {
        width: parseInt(width, 10),
        height: parseInt(height, 10)
      }
    });
    const page = await context.newPage();

    await page.goto(url, { waitUntil: 'networkidle', timeout: parseInt(navTimeout, 10) });
    await page.waitForTimeout(parseInt(waitMs, 10));

    if (selector) {
      const element = await page.$(selector);
      if (!element) {
        console.error(JSON.stringify({ status: 'error', message: `Selector not found: ${selector}` }));
        process.exitCode = 1;
        return;
      }
      await element.screenshot({ path: screenshotPath });
    } else {
      await page.screenshot({ path: screenshotPath });
    }

    console.log(JSON.stringify({ status: 'ok' }));
  } catch (err) {
    const message = err && err.message ? err.message : String(err);
    console.error(JSON.stringify({ status: 'error', message }));
    process.exitCode = 1;
  } finally {
    if (browser) {
      await browser.close();
    }
  }
}

run();
"#;

/// Configuration options for capture sessions.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// The Node.js command to use (default: "node").
    pub node_command: String,
    /// Viewport dimensions for the browser.
    pub viewport: Viewport,
    /// Whether to run in headless mode.
    pub headless: bool,
    /// Settle delay after navigation before the screenshot.
    pub wait: Duration,
    /// Timeout for page navigation.
    pub navigation_timeout: Duration,
    /// Timeout for the entire Playwright process.
    pub process_timeout: Duration,
    /// Maximum number of concurrent capture sessions.
    pub max_concurrent_sessions: usize,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            node_command: "node".to_string(),
            viewport: Viewport::default(),
            headless: true,
            wait: DEFAULT_WAIT,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            process_timeout: DEFAULT_PROCESS_TIMEOUT,
            max_concurrent_sessions: 1,
        }
    }
}

/// Result of capturing a page.
#[derive(Debug, Clone)]
pub struct CaptureResult {
    /// Path to the saved screenshot.
    pub screenshot_path: PathBuf,
    /// Viewport used for rendering.
    pub viewport: Viewport,
    /// Time taken to capture the page.
    pub elapsed: Duration,
}

/// Manages capture sessions with semaphore-based limiting.
#[derive(Debug, Clone)]
pub struct BrowserManager {
    options: BrowserOptions,
    semaphore: Arc<Semaphore>,
}

#[derive(Debug, serde::Deserialize)]
struct ScriptError {
    #[allow(dead_code)]
    status: String,
    message: String,
}

impl BrowserManager {
    pub fn new(options: BrowserOptions) -> Self {
        let permits = options.max_concurrent_sessions.max(1);
        Self {
            options,
            semaphore: Arc::new(Semaphore::new(permits)),
        }
    }

    /// Capture a screenshot of a URL (or one element within it) to the
    /// given path.
    pub async fn capture_url(
        &self,
        url: &str,
        selector: Option<&str>,
        screenshot_path: &Path,
    ) -> Result<CaptureResult> {
        Url::parse(url)?;
        ensure_node_available(&self.options.node_command).await?;
        ensure_playwright_available(&self.options.node_command).await?;

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| DsxError::capture("Browser manager unavailable"))?;

        if let Some(parent) = screenshot_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut cmd = Command::new(&self.options.node_command);
        cmd.arg("-e")
            .arg(CAPTURE_SCRIPT)
            .arg(url)
            .arg(self.options.viewport.width.to_string())
            .arg(self.options.viewport.height.to_string())
            .arg(self.options.navigation_timeout.as_millis().to_string())
            .arg(self.options.wait.as_millis().to_string())
            .arg(selector.unwrap_or_default())
            .arg(screenshot_path.to_string_lossy().to_string())
            .arg(if self.options.headless { "1" } else { "0" })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let start = Instant::now();
        let mut child = cmd
            .spawn()
            .map_err(|err| map_spawn_error(err, &self.options.node_command))?;

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            if let Some(mut err) = stderr_pipe {
                let _ = err.read_to_end(&mut buf).await;
            }
            buf
        });
        let stdout_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            if let Some(mut out) = stdout_pipe {
                let _ = out.read_to_end(&mut buf).await;
            }
            buf
        });

        let status = match timeout(self.options.process_timeout, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(err)) => return Err(DsxError::Io(err)),
            Err(_) => {
                let _ = child.kill().await;
                let _ = child.wait().await;
                return Err(DsxError::capture(format!(
                    "Playwright timed out after {:?}",
                    self.options.process_timeout
                )));
            }
        };

        let stderr = stderr_task.await.unwrap_or_default();
        let _ = stdout_task.await;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(map_playwright_error(status.to_string(), &stderr));
        }

        Ok(CaptureResult {
            screenshot_path: screenshot_path.to_path_buf(),
            viewport: self.options.viewport,
            elapsed: start.elapsed(),
        })
    }
}

/// Maps a spawn error to an appropriate DsxError.
fn map_spawn_error(err: io::Error, command: &str) -> DsxError {
    if err.kind() == io::ErrorKind::NotFound {
        DsxError::capture(format!(
            "Unable to spawn Playwright helper; '{}' was not found on PATH",
            command
        ))
    } else {
        DsxError::Io(err)
    }
}

/// Maps Playwright stderr output to an appropriate DsxError.
fn map_playwright_error(status_text: impl Into<String>, stderr: &str) -> DsxError {
    if let Ok(error) = serde_json::from_str::<ScriptError>(stderr.trim()) {
        return map_script_error(error.message);
    }

    if stderr
        .to_ascii_lowercase()
        .contains("cannot find module 'playwright'")
    {
        return DsxError::capture(
            "Playwright npm package is missing; install with `npm install playwright`.",
        );
    }

    DsxError::capture(format!(
        "Playwright exited with status {}: {}",
        status_text.into(),
        stderr.trim()
    ))
}

fn map_script_error(message: String) -> DsxError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("cannot find module 'playwright'") {
        DsxError::capture(
            "Playwright npm package is missing; install with `npm install playwright`.",
        )
    } else if lower.contains("timeout") {
        DsxError::capture(format!(
            "Playwright error: {}. Hint: increase --nav-timeout or ensure the page finishes loading.",
            message
        ))
    } else {
        DsxError::capture(format!("Playwright error: {}", message))
    }
}

/// Ensures Node.js is available on the system.
async fn ensure_node_available(node_command: &str) -> Result<()> {
    let mut cmd = Command::new(node_command);
    cmd.arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let status = timeout(NODE_CHECK_TIMEOUT, cmd.status())
        .await
        .map_err(|_| {
            DsxError::capture(format!(
                "Timed out checking node availability after {:?}",
                NODE_CHECK_TIMEOUT
            ))
        })?
        .map_err(|err| map_spawn_error(err, node_command))?;

    if !status.success() {
        return Err(DsxError::capture(format!(
            "Node command {:?} is not available (exit {})",
            node_command, status
        )));
    }

    Ok(())
}

/// Ensures the Playwright npm package is installed.
async fn ensure_playwright_available(node_command: &str) -> Result<()> {
    let mut cmd = Command::new(node_command);
    cmd.arg("-e")
        .arg(PLAYWRIGHT_CHECK_SCRIPT)
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    let output = timeout(NODE_CHECK_TIMEOUT, cmd.output())
        .await
        .map_err(|_| {
            DsxError::capture(format!(
                "Timed out checking Playwright availability after {:?}",
                NODE_CHECK_TIMEOUT
            ))
        })?
        .map_err(|err| map_spawn_error(err, node_command))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(map_playwright_error(format!("{:?}", output.status), &stderr));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_playwright_error_detects_missing_module() {
        let err = map_playwright_error(
            "1",
            r#"{"status":"error","message":"Cannot find module 'playwright'"}"#,
        );
        let msg = format!("{}", err);
        assert!(
            msg.contains("Playwright npm package is missing"),
            "expected missing playwright hint, got: {msg}"
        );
    }

    #[test]
    fn map_playwright_error_handles_plain_stderr_missing_module() {
        let err = map_playwright_error(
            "1",
            "Error: Cannot find module 'playwright'\n    at Module._resolveFilename",
        );
        let msg = format!("{}", err);
        assert!(
            msg.contains("npm install playwright"),
            "expected npm install hint, got: {msg}"
        );
    }

    #[test]
    fn map_playwright_error_includes_timeout_hint() {
        let err = map_playwright_error(
            "1",
            r#"{"status":"error","message":"Navigation timeout of 30000ms exceeded"}"#,
        );
        let msg = format!("{}", err);
        assert!(msg.to_ascii_lowercase().contains("timeout"));
        assert!(msg.contains("--nav-timeout"));
    }

    #[test]
    fn map_playwright_error_preserves_selector_message() {
        let err = map_playwright_error(
            "1",
            r#"{"status":"error","message":"Selector not found: .hero"}"#,
        );
        let msg = format!("{}", err);
        assert!(msg.contains("Selector not found: .hero"));
    }

    #[tokio::test]
    async fn ensure_node_available_fails_for_missing_binary() {
        let result = ensure_node_available("definitely-not-a-binary").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn capture_rejects_invalid_url() {
        let manager = BrowserManager::new(BrowserOptions::default());
        let result = manager
            .capture_url("not a url", None, Path::new("/tmp/out.png"))
            .await;
        assert!(matches!(result, Err(DsxError::InvalidUrl(_))));
    }
}
