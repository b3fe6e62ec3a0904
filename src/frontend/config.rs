//! 编译配置

use crate::middle::OptimizerConfig;
use serde::{Deserialize, Serialize};

/// 编译器配置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// 语法树改写开关
    pub optimizer: OptimizerConfig,
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 不做任何改写，按源码逐节点生成
    pub fn unoptimized() -> Self {
        Self {
            optimizer: OptimizerConfig::disabled(),
        }
    }
}
