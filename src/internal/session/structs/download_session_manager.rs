//! 下载会话管理器
//!
//! 负责一个下载组件实例的完整生命周期：发起流式请求、逐块累计字节、发布进度、
//! 响应取消，最后把完整字节交给 [`FileSink`] 保存。
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use download_session::session::DownloadSessionManager;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = DownloadSessionManager::to_downloads_dir()?;
//! manager
//!     .start_download("https://example.com/model-book.pdf", "model-book.pdf")
//!     .await;
//!
//! let session = manager.settled().await;
//! println!("{}: {} bytes", session.status, session.bytes_downloaded);
//! # Ok(())
//! # }
//! ```
//!
//! ## 并发约束
//!
//! - 同一时刻只有一个中止令牌有效：再次 `start_download` 会先中止上一次尝试并等待其结束，
//!   之后才发布新的 preparing，两次累计不会写入同一份状态。
//! - `start_download` / `reset` 通过异步锁串行执行。
//! - 状态只由管理器内部写入，外部只读（快照、watch、订阅、钩子）。

mod attempt;
mod publisher;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::internal::session::impl_traits::directory_sink::DirectorySink;
use crate::internal::session::impl_traits::reqwest_transport::ReqwestTransport;
use crate::internal::session::structs::download_error::SinkError;
use crate::internal::session::structs::download_hooks_container::DownloadHooksContainer;
use crate::internal::session::structs::download_session::DownloadSession;
use crate::internal::session::structs::hook_adapters::{OnChunkHookAdapter, OnStateHookAdapter};
use crate::internal::session::structs::session_config::SessionConfig;
use crate::internal::session::traits::file_sink::FileSink;
use crate::internal::session::traits::session_hook::SessionHook;
use crate::internal::session::traits::transport::Transport;
use crate::states::unlock_reactive::{PropertyWatcher, UnlockReactiveProperty};

use attempt::Attempt;
use publisher::{SessionPublisher, SharedHooks, publish_idle};

/// 正在运行（或已结束但尚未回收）的一次尝试；`handle` 在任务启动前为 `None`
struct ActiveAttempt {
    id: u64,
    abort: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

/// 下载会话管理器，不实现 Clone：一个实例对应一个下载组件，只维护一份会话状态。
pub struct DownloadSessionManager {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn FileSink>,
    config: SessionConfig,
    state: UnlockReactiveProperty<DownloadSession>,
    hooks: SharedHooks,
    active: Mutex<Option<ActiveAttempt>>,
    /// 串行化 start / reset
    control: tokio::sync::Mutex<()>,
    next_attempt_id: AtomicU64,
}

/// 构建
impl DownloadSessionManager {
    pub fn new(transport: Arc<dyn Transport>, sink: Arc<dyn FileSink>) -> Self {
        Self {
            transport,
            sink,
            config: SessionConfig::default(),
            state: UnlockReactiveProperty::new(DownloadSession::idle()),
            hooks: Arc::new(Mutex::new(DownloadHooksContainer::default())),
            active: Mutex::new(None),
            control: tokio::sync::Mutex::new(()),
            next_attempt_id: AtomicU64::new(0),
        }
    }

    /// 使用 reqwest 传输层，保存到用户的下载目录。
    pub fn to_downloads_dir() -> Result<Self, SinkError> {
        Ok(Self::new(
            Arc::new(ReqwestTransport::default()),
            Arc::new(DirectorySink::downloads()?),
        ))
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置保存文件的 MIME 类型
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.config.content_type = content_type.into();
        self
    }

    /// 设置空闲超时（毫秒）
    pub fn idle_timeout_ms(mut self, idle_timeout_ms: u64) -> Self {
        self.config.idle_timeout_ms = Some(idle_timeout_ms);
        self
    }

    /// 注册完整钩子；可多次调用，按注册顺序执行。
    pub fn with_hook(self, hook: impl SessionHook + 'static) -> Self {
        self.hooks_guard().add(hook);
        self
    }

    /// 注册状态发布钩子
    pub fn with_on_state_hook<F>(self, f: F) -> Self
    where
        F: FnMut(&DownloadSession) + Send + 'static,
    {
        self.with_hook(OnStateHookAdapter(f))
    }

    /// 注册数据块钩子
    pub fn with_on_chunk_hook<F>(self, f: F) -> Self
    where
        F: FnMut(&[u8]) + Send + 'static,
    {
        self.with_hook(OnChunkHookAdapter(f))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

/// 控制操作：start / cancel / reset
impl DownloadSessionManager {
    /// 开始下载 `url`，完成后以 `filename` 保存。
    ///
    /// 返回时状态已是 preparing，下载在后台任务中进行；结果通过会话状态观察，
    /// 本方法不会失败。若上一次尝试仍在进行，会先中止并等待其发布 cancelled。
    pub async fn start_download(&self, url: &str, filename: &str) {
        let _control = self.control.lock().await;

        // 新令牌先入槽：等待上一次尝试期间的 cancel_download 作用于本次尝试
        let id = self.next_attempt_id.fetch_add(1, Ordering::Relaxed) + 1;
        let abort = CancellationToken::new();
        let previous = self.active_slot().replace(ActiveAttempt {
            id,
            abort: abort.clone(),
            handle: None,
        });
        Self::settle(previous).await;

        let publisher = SessionPublisher::start(
            self.state.clone(),
            Arc::clone(&self.hooks),
            Utc::now(),
        );

        let attempt = Attempt {
            url: url.to_string(),
            filename: filename.to_string(),
            config: self.config.clone(),
            transport: Arc::clone(&self.transport),
            sink: Arc::clone(&self.sink),
            publisher,
            abort,
        };

        info!(attempt = id, url, filename, "download started");
        let span = info_span!("download", attempt = id, filename = %filename);
        let handle = tokio::spawn(attempt.run().instrument(span));

        if let Some(active) = self.active_slot().as_mut() {
            active.handle = Some(handle);
        }
    }

    /// 中止正在进行的下载；没有进行中的下载或已到终态时无效果。
    ///
    /// 下载任务会在下一个挂起点观察到中止并发布 cancelled。
    pub fn cancel_download(&self) {
        if let Some(active) = self.active_slot().as_ref() {
            let running = active.handle.as_ref().is_none_or(|h| !h.is_finished());
            if running && !active.abort.is_cancelled() {
                debug!(attempt = active.id, "cancel requested");
            }
            active.abort.cancel();
        }
    }

    /// 中止正在进行的下载并回到初始状态，任何状态下都可以调用。
    pub async fn reset(&self) {
        let _control = self.control.lock().await;
        let previous = self.active_slot().take();
        Self::settle(previous).await;
        publish_idle(&self.state, &self.hooks);
        debug!("session reset");
    }

    /// 中止上一次尝试并等待其任务结束，保证之后不再有旧状态发布。
    async fn settle(previous: Option<ActiveAttempt>) {
        let Some(previous) = previous else {
            return;
        };
        previous.abort.cancel();
        if let Some(handle) = previous.handle {
            if let Err(e) = handle.await {
                warn!(attempt = previous.id, error = %e, "download task ended abnormally");
            }
        }
    }

    fn active_slot(&self) -> MutexGuard<'_, Option<ActiveAttempt>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn hooks_guard(&self) -> MutexGuard<'_, DownloadHooksContainer> {
        self.hooks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 状态读取与订阅
impl DownloadSessionManager {
    /// 当前会话快照
    pub fn session(&self) -> DownloadSession {
        self.state.get_or_default()
    }

    /// 监听会话变化；watch 只保留最新值，逐块观察请使用钩子。
    pub fn watch(&self) -> PropertyWatcher<DownloadSession> {
        self.state.watch()
    }

    /// 等待会话离开 preparing / downloading，返回此时的快照。
    pub async fn settled(&self) -> DownloadSession {
        let mut watcher = self.state.watch();
        loop {
            let current = watcher.borrow().unwrap_or_default();
            if !current.status.is_active() {
                return current;
            }
            if watcher.changed().await.is_err() {
                return self.session();
            }
        }
    }

    /// 订阅会话变化，回调在独立任务中执行。
    pub fn subscribe_session<F>(&self, return_current_value: bool, callback: F)
    where
        F: Fn(&DownloadSession) + Send + 'static,
    {
        let mut watcher = self.state.watch();
        // 订阅时刻的值，而不是任务首次运行时的值
        let current = watcher.borrow_and_update();

        tokio::spawn(async move {
            if return_current_value {
                if let Some(current) = current {
                    callback(&current);
                }
            }

            while let Ok(session) = watcher.changed().await {
                callback(&session);
            }
        });
    }
}

impl Drop for DownloadSessionManager {
    fn drop(&mut self) {
        let slot = self.active.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(active) = slot.take() {
            active.abort.cancel();
        }
    }
}

impl std::fmt::Debug for DownloadSessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadSessionManager")
            .field("config", &self.config)
            .field("session", &self.session())
            .finish_non_exhaustive()
    }
}
