/// 内部实现模块
mod internal;


/// 下载会话：管理器、状态、错误、配置，以及传输层 / 保存 / 钩子接口
pub mod session {
    use crate::internal;
    // 结构体模型
    pub use internal::session::structs::*;
    // 接口与默认实现
    pub use internal::session::impl_traits::*;
    pub use internal::session::traits::*;
}

/// 进度展示辅助：字节格式化、剩余时间估算、对话框展示模型
pub mod format {
    use crate::internal;
    pub use internal::format::*;
}

pub mod states {
    pub mod unlock_reactive {
        use crate::internal;
        pub use internal::states::unlock_reactive::*;
    }
}

pub use session::{DownloadSession, DownloadSessionManager, DownloadStatus};
