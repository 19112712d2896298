//! Blob download: fetching a binary resource and saving it under a filename.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::Method;
use tokio::io::AsyncWriteExt;

use crate::client::Client;
use crate::config::RequestOptions;
use crate::error::{Error, Result};

impl Client {
    /// Fetches a binary resource and saves it to `dest`.
    ///
    /// Token and schema resolution follow the same precedence as
    /// [`request`](Client::request), but no default `Content-Type` is forced
    /// since binary responses vary. The method defaults to GET and can be
    /// overridden through `options`.
    ///
    /// The body streams into a `<dest>.part` sibling file which is renamed
    /// into place once fully written. The partial file is removed on any
    /// failure, so an aborted download never leaves `dest` or a stray
    /// temporary behind.
    ///
    /// # Errors
    ///
    /// - non-2xx status: error with the status and reason phrase only; the
    ///   body is not read for error detail
    /// - transport failure, expired deadline, or filesystem failure
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// client
    ///     .download("/api/export", "relatorio.pdf", RequestOptions::new())
    ///     .await?;
    /// ```
    pub async fn download(
        &self,
        path: &str,
        dest: impl AsRef<Path>,
        options: RequestOptions,
    ) -> Result<PathBuf> {
        let dest = dest.as_ref();
        let url = self.endpoint(path)?;
        let method = options.method.clone().unwrap_or(Method::GET);
        let headers = self.build_headers(&options, false)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(method = %method, url = %url, dest = %dest.display(), "downloading");

        // Per-request timeout, covering the streamed body: a stalled stream
        // errors out at the deadline and the chunk loop below surfaces it.
        let deadline = options.timeout.unwrap_or(self.timeout);
        let request = self.http.request(method, url).headers(headers).timeout(deadline);
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(
                status.as_u16(),
                None,
                status.canonical_reason().unwrap_or(""),
            ));
        }

        let part = part_path(dest);
        let guard = PartFileGuard::new(part.clone());

        let mut file = tokio::fs::File::create(&part).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(Error::from)?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&part, dest).await?;
        guard.defuse();

        Ok(dest.to_path_buf())
    }
}

/// Sibling path for the in-progress download: `<dest>.part`.
fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("download"));
    name.push(".part");
    dest.with_file_name(name)
}

/// Removes the partial file on drop unless the download completed.
struct PartFileGuard {
    path: PathBuf,
    armed: bool,
}

impl PartFileGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn defuse(mut self) {
        self.armed = false;
    }
}

impl Drop for PartFileGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
