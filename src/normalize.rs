//! 刷新条目规范化

use crate::condition::Condition;
use crate::config::{Config, DiagnosticsConfig};
use crate::mapping::Tables;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// 刷新条目中可识别的字段
pub const SPAWN_INFO_KEYS: &[&str] = &[
    "minLevel",
    "maxLevel",
    "tags",
    "spec",
    "rarityMultipliers",
    "typeID",
    "stringLocationTypes",
    "condition",
    "anticondition",
    "heldItems",
    "rarity",
];

/// condition / anticondition 中可识别的字段
pub const CONDITION_KEYS: &[&str] = &[
    "baseBlocks",
    "dimensions",
    "maxLightLevel",
    "stringBiomes",
    "temperature",
    "minY",
    "maxY",
    "neededNearbyBlocks",
    "weathers",
    "times",
];

/// 刷新集文件中的原始条目
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpawnEntry {
    pub min_level: u32,
    pub max_level: u32,
    /// 0..=300 的稀有度
    pub rarity: f64,
    #[serde(default)]
    pub held_items: Vec<RawHeldItem>,
    pub condition: Option<Map<String, Value>>,
    pub anticondition: Option<Map<String, Value>>,
    /// 任意 JSON 值，非 "pokemon" 只报告
    #[serde(rename = "typeID")]
    pub type_id: Option<Value>,
    pub tags: Option<Value>,
    pub spec: Option<Value>,
    pub rarity_multipliers: Option<Value>,
    pub string_location_types: Option<Value>,
    /// 未识别的字段，仅用于诊断
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHeldItem {
    /// 非字符串的 ID 视为未知物品
    #[serde(rename = "itemID")]
    pub item_id: Value,
    #[serde(rename = "percentChance")]
    pub percent_chance: f64,
}

/// 输出中的持有物品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeldItem {
    pub item: u32,
    /// 0..=1
    pub chance: f64,
}

/// 规范化后的刷新条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSpawnEntry {
    pub min_level: u32,
    pub max_level: u32,
    pub held_items: Vec<HeldItem>,
    pub male_chance: f64,
    /// 占位值，真实区域映射尚未实现
    pub spawn_area: u32,
    pub probability: f64,
    pub conditions: Vec<Condition>,
}

/// 单个物种的转换上下文
#[derive(Debug, Clone, Copy)]
pub struct SpeciesContext<'a> {
    pub id: u32,
    pub name: &'a str,
    /// malePercent / 100
    pub male_chance: f64,
}

/// 把原始条目转换为输出格式
pub struct Normalizer<'a> {
    tables: &'a Tables,
    diagnostics: DiagnosticsConfig,
    max_rarity: f64,
    rounding: u32,
    spawn_area: u32,
}

impl<'a> Normalizer<'a> {
    pub fn new(tables: &'a Tables, config: &Config) -> Self {
        Self {
            tables,
            diagnostics: config.diagnostics.clone(),
            max_rarity: config.convert.max_rarity,
            rounding: config.convert.rarity_rounding,
            spawn_area: config.convert.spawn_area,
        }
    }

    /// 转换一个物种的全部条目，顺序不变
    pub fn normalize(
        &self,
        species: &SpeciesContext<'_>,
        entries: &[RawSpawnEntry],
    ) -> Vec<NormalizedSpawnEntry> {
        entries
            .iter()
            .map(|entry| self.normalize_entry(species, entry))
            .collect()
    }

    pub fn normalize_entry(
        &self,
        species: &SpeciesContext<'_>,
        entry: &RawSpawnEntry,
    ) -> NormalizedSpawnEntry {
        self.check_entry(species, entry);

        NormalizedSpawnEntry {
            min_level: entry.min_level,
            max_level: entry.max_level,
            held_items: self.map_held_items(species, &entry.held_items),
            male_chance: species.male_chance,
            spawn_area: self.spawn_area,
            probability: round_to(entry.rarity / self.max_rarity, self.rounding),
            // 结构化条件解析尚未实现，统一使用不限条件
            conditions: vec![Condition::any()],
        }
    }

    fn map_held_items(&self, species: &SpeciesContext<'_>, items: &[RawHeldItem]) -> Vec<HeldItem> {
        items
            .iter()
            .filter(|item| item.percent_chance > 0.0)
            .filter_map(|item| match item.item_id.as_str().and_then(|id| self.tables.item_id(id)) {
                Some(id) => Some(HeldItem {
                    item: id,
                    chance: item.percent_chance / 100.0,
                }),
                None => {
                    if self.diagnostics.unknown_items {
                        warn!(species = species.id, item = %item.item_id, "未知物品 ID");
                    }
                    None
                }
            })
            .collect()
    }

    /// 只报告，不影响输出
    fn check_entry(&self, species: &SpeciesContext<'_>, entry: &RawSpawnEntry) {
        for key in entry.unrecognized.keys() {
            warn!(species = species.id, key = %key, "未知字段");
        }

        for block in [&entry.condition, &entry.anticondition].into_iter().flatten() {
            self.check_condition_block(species, block);
        }

        if let Some(type_id) = &entry.type_id {
            if type_id.as_str() != Some("pokemon") {
                warn!(species = species.id, type_id = %type_id, "未知 typeID");
            }
        }

        if self.diagnostics.unknown_spec {
            if let Some(spec) = &entry.spec {
                if *spec != json!({ "name": species.name }) {
                    warn!(species = species.id, name = species.name, "spec 与物种不符");
                }
            }
        }
        if self.diagnostics.unknown_multipliers && entry.rarity_multipliers.is_some() {
            warn!(species = species.id, "存在 rarityMultipliers");
        }
        if self.diagnostics.unknown_tags && entry.tags.is_some() {
            warn!(species = species.id, "存在 tags");
        }
    }

    fn check_condition_block(&self, species: &SpeciesContext<'_>, block: &Map<String, Value>) {
        for key in block.keys() {
            if !CONDITION_KEYS.contains(&key.as_str()) {
                warn!(species = species.id, key = %key, "未知条件字段");
            }
        }

        for biome in string_values(block.get("stringBiomes")) {
            if self.tables.biome_groups(biome).is_none() {
                debug!(species = species.id, biome, "未知生物群系");
            }
        }
        for time in string_values(block.get("times")) {
            if self.tables.time_bucket(time).is_none() {
                debug!(species = species.id, time, "未知时段");
            }
        }
        if let Some(phase) = block.get("moonPhase") {
            let known = phase
                .as_u64()
                .and_then(|p| u8::try_from(p).ok())
                .and_then(|p| self.tables.moon_phase(p))
                .is_some();
            if !known {
                debug!(species = species.id, phase = %phase, "未知月相");
            }
        }
    }
}

fn string_values(value: Option<&Value>) -> impl Iterator<Item = &str> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}

/// 按十进制四舍五入到指定位数
pub fn round_to(value: f64, digits: u32) -> f64 {
    // 经由十进制格式化，避免 value * 10^n 的二进制误差
    let text = format!("{:.*}", digits as usize, value);
    text.parse().unwrap_or(value)
}
