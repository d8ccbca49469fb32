//! 会话状态发布：同时写入响应式属性并同步调用钩子。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::internal::session::structs::download_hooks_container::DownloadHooksContainer;
use crate::internal::session::structs::download_session::DownloadSession;
use crate::internal::session::structs::download_status::DownloadStatus;
use crate::states::unlock_reactive::UnlockReactiveProperty;

pub(super) type SharedHooks = Arc<Mutex<DownloadHooksContainer>>;

/// 单次尝试的发布器，持有本次尝试的当前状态。
///
/// 只由一个任务持有，发布顺序即调用顺序。
pub(super) struct SessionPublisher {
    state: UnlockReactiveProperty<DownloadSession>,
    hooks: SharedHooks,
    current: DownloadSession,
}

impl SessionPublisher {
    /// 开始新一次尝试：整体替换为 preparing 并立即发布。
    pub(super) fn start(
        state: UnlockReactiveProperty<DownloadSession>,
        hooks: SharedHooks,
        start_time: DateTime<Utc>,
    ) -> Self {
        let publisher = Self {
            state,
            hooks,
            current: DownloadSession::preparing(start_time),
        };
        publisher.emit();
        publisher
    }

    pub(super) fn current(&self) -> &DownloadSession {
        &self.current
    }

    /// 在本次尝试内推进到 `next`，`update` 修改其余字段。
    ///
    /// 非法的状态跳转会被忽略并返回 `false`。
    pub(super) fn advance<F>(&mut self, next: DownloadStatus, update: F) -> bool
    where
        F: FnOnce(&mut DownloadSession),
    {
        if !self.current.status.can_advance_to(next) {
            warn!(from = %self.current.status, to = %next, "ignored illegal status transition");
            return false;
        }
        self.current.status = next;
        update(&mut self.current);
        self.emit();
        true
    }

    pub(super) fn run_on_chunk(&self, chunk: &[u8]) {
        lock_hooks(&self.hooks).run_on_chunk(chunk);
    }

    fn emit(&self) {
        emit(&self.state, &self.hooks, &self.current);
    }
}

/// 回到初始状态（reset）。
pub(super) fn publish_idle(state: &UnlockReactiveProperty<DownloadSession>, hooks: &SharedHooks) {
    emit(state, hooks, &DownloadSession::idle());
}

/// 先执行钩子再写入属性：watch 监听者看到某个状态时，钩子一定已经收到它。
fn emit(
    state: &UnlockReactiveProperty<DownloadSession>,
    hooks: &SharedHooks,
    session: &DownloadSession,
) {
    lock_hooks(hooks).run_on_state(session);
    let _ = state.update(session.clone());
}

fn lock_hooks(hooks: &SharedHooks) -> MutexGuard<'_, DownloadHooksContainer> {
    hooks.lock().unwrap_or_else(PoisonError::into_inner)
}
