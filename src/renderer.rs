//! External renderer subprocess capability.

use futures::future::BoxFuture;
use std::io;
use std::process::Stdio;
use tokio::io::AsyncRead;
use tokio::process::Command;

/// A started render: the stdout byte stream plus the eventual exit outcome.
///
/// The exit future resolves to `Ok(())` only for a clean zero exit; it is
/// awaited after stdout is exhausted because a clean-looking byte stream
/// does not guarantee a valid document if the renderer reported failure.
pub struct RenderProcess {
    pub stdout: Box<dyn AsyncRead + Send + Unpin>,
    pub exit: BoxFuture<'static, io::Result<()>>,
}

/// Capability to run the external renderer.
///
/// The pipeline only ever needs to spawn with a given argument list and
/// read stdout, learning the exit outcome later, so that is the whole
/// interface. Tests substitute an in-memory implementation.
pub trait Renderer: Send + Sync {
    fn spawn(&self, args: &[String]) -> io::Result<RenderProcess>;
}

/// Runs the real renderer binary as a child process.
#[derive(Debug, Clone)]
pub struct WkhtmltopdfRenderer {
    bin: String,
}

impl WkhtmltopdfRenderer {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

impl Renderer for WkhtmltopdfRenderer {
    fn spawn(&self, args: &[String]) -> io::Result<RenderProcess> {
        // stderr passes through to the host process untouched; it is a
        // diagnostic channel, not something this service parses.
        let mut child = Command::new(&self.bin)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("renderer stdout was not captured"))?;

        let exit = Box::pin(async move {
            let status = child.wait().await?;
            if status.success() {
                Ok(())
            } else {
                Err(io::Error::other(format!("renderer exited with {status}")))
            }
        });

        Ok(RenderProcess {
            stdout: Box::new(stdout),
            exit,
        })
    }
}
