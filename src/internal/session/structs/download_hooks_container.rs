use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::warn;

use crate::internal::session::structs::download_session::DownloadSession;
use crate::internal::session::traits::session_hook::SessionHook;

/// 钩子容器：按注册顺序依次执行多个钩子。
#[derive(Default)]
pub struct DownloadHooksContainer {
    hooks: Vec<Box<dyn SessionHook>>,
}

impl DownloadHooksContainer {
    /// 添加一个钩子；支持多次调用以注册多个钩子。
    pub fn add(&mut self, hook: impl SessionHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// 钩子 panic 时记录并继续执行其余钩子，下载任务不受影响。
    pub fn run_on_state(&mut self, session: &DownloadSession) {
        for (index, h) in self.hooks.iter_mut().enumerate() {
            if catch_unwind(AssertUnwindSafe(|| h.on_state(session))).is_err() {
                warn!(hook = index, status = %session.status, "on_state hook panicked");
            }
        }
    }

    pub fn run_on_chunk(&mut self, chunk: &[u8]) {
        for (index, h) in self.hooks.iter_mut().enumerate() {
            if catch_unwind(AssertUnwindSafe(|| h.on_chunk(chunk))).is_err() {
                warn!(hook = index, chunk = chunk.len(), "on_chunk hook panicked");
            }
        }
    }
}

impl std::fmt::Debug for DownloadHooksContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadHooksContainer")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
