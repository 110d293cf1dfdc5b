//! Streamed response body bridging the renderer process and the client.
//!
//! Once the renderer has started, the 200 status is committed and PDF bytes
//! may already be in flight, so the protocol's error channel is gone. From
//! that point a copy failure or a non-zero exit can only be reported by
//! severing the connection mid-body: the client sees a truncated download,
//! never a falsely complete one.

use bytes::Bytes;
use futures::future::BoxFuture;
use futures::stream::Stream;
use futures::StreamExt;
use std::io;
use tempfile::TempDir;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use tracing::{error, info};

use crate::renderer::RenderProcess;

/// Everything the in-flight response owns: the renderer's stdout, its
/// deferred exit outcome, the request workspace (the renderer may still be
/// reading uploaded files), and the argument view used for logging.
struct StreamCtx {
    stdout: ReaderStream<Box<dyn AsyncRead + Send + Unpin>>,
    exit: BoxFuture<'static, io::Result<()>>,
    _workspace: TempDir,
    redacted: Vec<String>,
}

/// Copy renderer stdout into a response body stream.
///
/// Bytes are forwarded as they become available; backpressure from a slow
/// client propagates through the stdout pipe to the renderer. At stdout
/// end-of-file the exit outcome is awaited, and a failure there aborts the
/// connection just like a copy error. Dropping the stream early (client
/// disconnect) kills the process and removes the workspace.
pub fn body_stream(
    process: RenderProcess,
    workspace: TempDir,
    redacted: Vec<String>,
) -> impl Stream<Item = io::Result<Bytes>> + Send {
    let ctx = StreamCtx {
        stdout: ReaderStream::new(process.stdout),
        exit: process.exit,
        _workspace: workspace,
        redacted,
    };
    futures::stream::try_unfold(ctx, |mut ctx| async move {
        match ctx.stdout.next().await {
            Some(Ok(chunk)) => Ok(Some((chunk, ctx))),
            Some(Err(err)) => {
                error!(args = ?ctx.redacted, "streaming renderer output failed: {err}");
                Err(err)
            }
            None => {
                if let Err(err) = ctx.exit.await {
                    error!(args = ?ctx.redacted, "{err}");
                    return Err(err);
                }
                info!(args = ?ctx.redacted, "success");
                Ok(None)
            }
        }
    })
}
