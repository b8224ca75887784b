//! Settings：可选的JSON配置文件

use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;
use thiserror::Error;

/// 指定配置文件路径的环境变量
pub const SETTINGS_ENV_VAR: &str = "SIMPLE_CALC_SETTINGS";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_title: String,
    /// 结果闪烁持续时间（毫秒）
    pub flash_duration_ms: u64,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_title: "计算器".to_string(),
            flash_duration_ms: 200,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// 从JSON文件加载，缺失字段使用默认值
    pub fn load_file(p: &Path) -> Result<Self, SettingsError> {
        let rdr = BufReader::new(File::open(p)?);
        Ok(serde_json::from_reader(rdr)?)
    }

    /// 按环境变量加载；未设置时返回默认配置
    pub fn load_from_env() -> Result<Self, SettingsError> {
        match std::env::var_os(SETTINGS_ENV_VAR) {
            Some(path) => Self::load_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// 日志级别，无法识别时回退到INFO
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
