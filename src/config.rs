//! 配置文件加载与管理

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::mapping::Tables;

/// 主配置结构
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 转换配置
    pub convert: ConvertConfig,
    /// 诊断输出配置
    pub diagnostics: DiagnosticsConfig,
    /// 映射表配置
    pub tables: TablesConfig,
}

/// 转换配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// 属性文件目录
    pub stats_dir: PathBuf,
    /// 刷新集文件目录
    pub sets_dir: PathBuf,
    /// 输出文件
    pub output: PathBuf,
    /// 按物种并行处理
    pub parallel: bool,
    /// 稀有度上限
    pub max_rarity: f64,
    /// 概率保留的小数位数
    pub rarity_rounding: u32,
    /// 刷新区域占位值（尚未映射真实区域）
    pub spawn_area: u32,
}

/// 诊断输出配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// 报告未知物品 ID
    pub unknown_items: bool,
    /// 报告与物种名不符的 spec
    pub unknown_spec: bool,
    /// 报告 tags
    pub unknown_tags: bool,
    /// 报告 rarityMultipliers
    pub unknown_multipliers: bool,
}

/// 映射表配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    /// 追加或覆盖的物品映射
    pub items: BTreeMap<String, u32>,
}

// ============== 默认值 ==============

impl Default for Config {
    fn default() -> Self {
        Self {
            convert: ConvertConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
            tables: TablesConfig::default(),
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            stats_dir: PathBuf::from("stats"),
            sets_dir: PathBuf::from("spawning"),
            output: PathBuf::from("conversion_result.json"),
            parallel: true,
            max_rarity: 300.0,
            rarity_rounding: 5,
            spawn_area: 1337,
        }
    }
}

// ============== 配置加载 ==============

impl Config {
    /// 从文件加载配置（.yaml/.yml 按 YAML 解析，其余按 TOML）
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            toml::to_string_pretty(self)?
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// 获取默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pxspawn").join("config.toml"))
    }

    /// 按优先级加载配置：
    /// 1. 当前目录的 pxspawn.toml
    /// 2. 用户配置目录的 config.toml
    /// 3. 默认配置
    pub fn load() -> Self {
        // 当前目录
        let local_config = Path::new("pxspawn.toml");
        if local_config.exists() {
            match Self::load_from_file(local_config) {
                Ok(config) => {
                    info!("已加载配置: pxspawn.toml");
                    return config;
                }
                Err(e) => warn!("无法加载配置 pxspawn.toml: {}", e),
            }
        }

        // 用户配置目录
        if let Some(user_config) = Self::default_config_path() {
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        info!("已加载配置: {}", user_config.display());
                        return config;
                    }
                    Err(e) => warn!("无法加载配置 {}: {}", user_config.display(), e),
                }
            }
        }

        // 默认配置
        Self::default()
    }

    /// 显式指定的配置文件必须能加载，否则按 `load()` 的优先级查找
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                let config = Self::load_from_file(path)
                    .with_context(|| format!("无法加载配置 {}", path.display()))?;
                info!("已加载配置: {}", path.display());
                Ok(config)
            }
            None => Ok(Self::load()),
        }
    }

    /// 根据配置构建映射表
    pub fn tables(&self) -> Tables {
        Tables::with_items(
            self.tables
                .items
                .iter()
                .map(|(name, id)| (name.clone(), *id)),
        )
    }

    /// 生成默认配置文件内容
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
