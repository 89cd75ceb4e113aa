//! Telecare client - 患者端订单客户端
//!
//! 服务端没有推送通道，客户端靠固定间隔轮询把“每家药房的我的订单”
//! 视图保持大致新鲜：
//!
//! - [`TelecareClient`] - 类型化 HTTP 调用 (reqwest)
//! - [`OrderBoard`] - 每家药房一个槽位的本地状态机，纯 reducer 驱动
//! - [`OrderSync`] - 轮询循环：并发拉取药房列表和最新订单，
//!   世代计数丢弃迟到的旧响应
//!
//! 下单走乐观更新：先写占位槽，请求完成后用服务器记录替换；
//! 409 冲突采纳服务器返回的已有订单，失败则把槽位翻为错误态。

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod poller;
pub mod reconcile;

pub use api::{OrderPlacement, TelecareClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use poller::OrderSync;
pub use reconcile::{BoardEvent, OrderBoard, OrderSlot};
