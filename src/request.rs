//! Multipart request decoding.
//!
//! A render request arrives as `multipart/form-data` with two kinds of
//! parts: `option` parts carrying one literal renderer argument each, and
//! `file` parts carrying uploaded documents and assets. Parts are decoded
//! in arrival order into a [`RenderJob`].

use axum::extract::Multipart;
use std::path::Path;
use tempfile::TempDir;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::ApiError;

/// Options that make the renderer print documentation on stdout instead of
/// rendering a PDF.
const DOC_OPTIONS: &[&str] = &[
    "-h",
    "--help",
    "-H",
    "--extended-help",
    "-V",
    "--version",
    "--readme",
    "--license",
    "--htmldoc",
    "--manpage",
];

pub(crate) fn is_doc_option(arg: &str) -> bool {
    DOC_OPTIONS.contains(&arg)
}

/// One render invocation decoded from a multipart upload: the renderer
/// argument sequence, the output classification, and the temporary
/// workspace holding the uploaded files.
///
/// The workspace is removed when the job (or whatever it was dismantled
/// into) is dropped, so cleanup runs on every exit path.
pub struct RenderJob {
    args: Vec<String>,
    doc_output: bool,
    workspace: TempDir,
}

impl RenderJob {
    /// Decode `option` and `file` parts in arrival order.
    ///
    /// Uploaded files keep their basename inside the workspace so relative
    /// references between them (and `document.location` in embedded
    /// scripts) keep working; any directory components the client supplied
    /// are stripped. Two files sharing a basename overwrite each other.
    pub async fn decode(mut multipart: Multipart) -> Result<Self, ApiError> {
        let workspace = tempfile::Builder::new()
            .prefix("wkhtmltopdf-api")
            .tempdir()
            .map_err(ApiError::Workspace)?;

        let mut args = Vec::new();
        let mut doc_output = false;

        while let Some(mut field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("option") => {
                    let arg = field.text().await?;
                    if is_doc_option(&arg) {
                        doc_output = true;
                    }
                    args.push(arg);
                }
                Some("file") => {
                    let name = basename(field.file_name().unwrap_or_default());
                    let path = workspace.path().join(&name);
                    let mut file = File::create(&path).await.map_err(|source| {
                        ApiError::Asset {
                            name: name.clone(),
                            source,
                        }
                    })?;
                    while let Some(chunk) = field.chunk().await? {
                        file.write_all(&chunk)
                            .await
                            .map_err(|source| ApiError::Asset {
                                name: name.clone(),
                                source,
                            })?;
                    }
                    args.push(path.to_string_lossy().into_owned());
                }
                other => {
                    return Err(ApiError::UnexpectedPart(
                        other.unwrap_or_default().to_string(),
                    ));
                }
            }
        }

        Ok(Self {
            args,
            doc_output,
            workspace,
        })
    }

    /// Whether any supplied option asks for documentation output.
    pub fn doc_output(&self) -> bool {
        self.doc_output
    }

    /// Renderer arguments in part arrival order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Dismantle the job for execution; the caller takes over ownership of
    /// the workspace.
    pub fn into_parts(self) -> (Vec<String>, bool, TempDir) {
        (self.args, self.doc_output, self.workspace)
    }
}

/// Strip any directory components from a client-supplied filename.
fn basename(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
