//! 配置管理
//!
//! 静态配置来自配置文件与环境变量，启动时加载一次并全局共享。

mod r#impl;
mod structs;

pub use structs::*;
