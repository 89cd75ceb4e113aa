use sqlx::SqlitePool;

use crate::core::Config;
use crate::db;

/// 服务器状态 - 所有 handler 共享的引用
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | 嵌入式数据库连接池 |
///
/// Clone 只复制池句柄，成本极低。
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SQLite)
    pub pool: SqlitePool,
}

impl ServerState {
    /// 创建服务器状态 (手动构造，测试常用)
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// 初始化服务器状态
    ///
    /// 1. 确保工作目录结构存在
    /// 2. 打开数据库 (work_dir/database/telecare.db) 并应用迁移
    ///
    /// # Panics
    ///
    /// 工作目录或数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("telecare.db");
        let pool = db::connect(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::new(config.clone(), pool)
    }
}
