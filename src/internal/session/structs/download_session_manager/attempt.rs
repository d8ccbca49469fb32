//! 单次下载尝试：流式读取、逐块累计、完整后保存。

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures_util::TryStreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::internal::session::structs::download_error::{DownloadError, TransportError};
use crate::internal::session::structs::download_status::DownloadStatus;
use crate::internal::session::structs::saved_artifact::SavedArtifact;
use crate::internal::session::structs::session_config::SessionConfig;
use crate::internal::session::traits::file_sink::FileSink;
use crate::internal::session::traits::transport::Transport;

use super::publisher::SessionPublisher;

pub(super) struct Attempt {
    pub(super) url: String,
    pub(super) filename: String,
    pub(super) config: SessionConfig,
    pub(super) transport: Arc<dyn Transport>,
    pub(super) sink: Arc<dyn FileSink>,
    pub(super) publisher: SessionPublisher,
    pub(super) abort: CancellationToken,
}

impl Attempt {
    /// 执行到终态。所有失败都落在会话状态上，不向外返回。
    pub(super) async fn run(mut self) {
        match self.drive().await {
            Ok(()) => {
                info!(
                    bytes = self.publisher.current().bytes_downloaded,
                    "download complete"
                );
            }
            Err(DownloadError::Cancelled) => {
                info!(
                    discarded = self.publisher.current().bytes_downloaded,
                    "download cancelled"
                );
                self.publisher.advance(DownloadStatus::Cancelled, |_| {});
            }
            Err(e) => {
                let message = e.session_message();
                warn!(error = %message, "download failed");
                self.publisher
                    .advance(DownloadStatus::Error, |s| s.error = Some(message));
            }
        }
    }

    async fn drive(&mut self) -> Result<(), DownloadError> {
        let url = Url::parse(&self.url)?;

        let response = self.guarded(self.transport.open(&url)).await?;
        debug!(
            status = response.status,
            content_length = ?response.content_length,
            "response headers received"
        );

        if !response.is_success() {
            return Err(DownloadError::HttpStatus {
                status: response.status,
                reason: response.reason,
            });
        }
        let mut body = response.body.ok_or(DownloadError::MissingBody)?;

        let total_bytes = response.content_length.unwrap_or(0);
        self.publisher.advance(DownloadStatus::Downloading, |s| {
            s.total_bytes = total_bytes;
        });

        // 按到达顺序保存，结束时一次性拼接
        let mut chunks: Vec<Bytes> = Vec::new();
        while let Some(chunk) = self.guarded(body.try_next()).await? {
            if chunk.is_empty() {
                continue;
            }
            let len = chunk.len() as u64;
            self.publisher.run_on_chunk(&chunk);
            chunks.push(chunk);
            self.publisher
                .advance(DownloadStatus::Downloading, |s| s.record_chunk(len));
            trace!(
                chunk = len,
                bytes = self.publisher.current().bytes_downloaded,
                "chunk received"
            );
        }
        drop(body);

        if self.abort.is_cancelled() {
            return Err(DownloadError::Cancelled);
        }

        let received = self.publisher.current().bytes_downloaded;
        if total_bytes > 0 && received < total_bytes {
            return Err(DownloadError::Truncated {
                expected: total_bytes,
                received,
            });
        }

        let bytes = assemble(chunks, received);
        debug!(bytes = bytes.len(), "saving artifact");
        self.sink
            .save(SavedArtifact {
                filename: self.filename.clone(),
                content_type: self.config.content_type.clone(),
                bytes,
            })
            .await?;

        // 超出声明大小时以实际收到的字节为准；大小未知时保持 0
        self.publisher.advance(DownloadStatus::Complete, |s| {
            if s.total_bytes > 0 {
                s.total_bytes = s.total_bytes.max(s.bytes_downloaded);
            }
            s.percentage = 100;
        });
        Ok(())
    }

    /// 在中止信号和空闲超时下等待一个传输层操作。
    ///
    /// 中止优先：同时就绪时总是返回 `Cancelled`。
    async fn guarded<F, T>(&self, fut: F) -> Result<T, DownloadError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        tokio::select! {
            biased;
            _ = self.abort.cancelled() => Err(DownloadError::Cancelled),
            result = with_idle_timeout(self.config.idle_timeout(), fut) => result,
        }
    }
}

async fn with_idle_timeout<F, T>(limit: Option<Duration>, fut: F) -> Result<T, DownloadError>
where
    F: Future<Output = Result<T, TransportError>>,
{
    match limit {
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(DownloadError::Stalled(limit.as_millis() as u64)),
        },
        None => Ok(fut.await?),
    }
}

fn assemble(chunks: Vec<Bytes>, total: u64) -> Bytes {
    let mut buf = BytesMut::with_capacity(total as usize);
    for chunk in &chunks {
        buf.extend_from_slice(chunk);
    }
    buf.freeze()
}
