//! Telecare Order Server - 远程医疗药房订单服务
//!
//! # 架构概述
//!
//! 患者端下单，药房端流转状态，双方通过 HTTP/JSON 轮询对账：
//!
//! - **HTTP API** (`api`): RESTful 接口 (订单、患者、药房、处方)
//! - **数据库** (`db`): 嵌入式 SQLite 存储，部分唯一索引保证
//!   同一 (patient, pharmacy, prescription) 三元组最多一个活跃订单
//! - **核心** (`core`): 配置、状态、服务器启动
//!
//! # 模块结构
//!
//! ```text
//! telecare-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repository)
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型 (self:: 前缀避免与内建 core crate 歧义)
pub use self::core::{Config, Server, ServerState, build_app};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
///
/// 必须在读取 [`Config`] 之前调用，保证 .env 中的覆盖生效
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logger();
    Ok(())
}

/// 打印启动横幅
pub fn print_banner() {
    println!(
        r#"
  ______     __
 /_  __/__  / /__  _________ _________
  / / / _ \/ / _ \/ ___/ __ `/ ___/ _ \
 / / /  __/ /  __/ /__/ /_/ / /  /  __/
/_/  \___/_/\___/\___/\__,_/_/   \___/
    "#
    );
}
