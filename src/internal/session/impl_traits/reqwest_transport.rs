//! 基于 reqwest 的流式传输层。

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use reqwest::header::CONTENT_LENGTH;
use url::Url;

use crate::internal::session::structs::download_error::TransportError;
use crate::internal::session::traits::transport::{Transport, TransportResponse};

/// reqwest 传输层：整文件 GET，响应体按块流式读取。
///
/// 不附加认证头或查询参数，这些由调用方拼进 URL 或通过自定义 `Client` 提供。
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn open(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        let resp = self.client.get(url.clone()).send().await?;

        let status = resp.status();
        let content_length = resp
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let body = resp.bytes_stream().map_err(TransportError::from).boxed();

        Ok(TransportResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            content_length,
            body: Some(body),
        })
    }
}
