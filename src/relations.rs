//! 手工维护的刷新关系表：物种编号 → 刷新关系列表

use crate::catalog::read_json;
use crate::condition::Condition;
use crate::enums::SpawnType;
use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// 物种在某类区域中的刷新概率及条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRelation {
    pub spawn_area: SpawnType,
    pub probability: f64,
    pub conditions: Vec<Condition>,
}

pub type RelationTable = BTreeMap<u32, Vec<SpawnRelation>>;

impl SpawnRelation {
    /// 没有条件时使用不限条件
    pub fn new(spawn_area: SpawnType, probability: f64, conditions: Vec<Condition>) -> Result<Self> {
        if !probability.is_finite() || probability < 0.0 {
            return Err(ConvertError::InvalidRelation(format!(
                "概率无效: {}",
                probability
            )));
        }
        let conditions = if conditions.is_empty() {
            vec![Condition::any()]
        } else {
            conditions
        };
        Ok(Self {
            spawn_area,
            probability,
            conditions,
        })
    }
}

/// 读取关系表，文件不存在时返回空表
pub fn load(path: &Path) -> Result<RelationTable> {
    if !path.exists() {
        return Ok(RelationTable::new());
    }
    read_json(path)
}

pub fn save(path: &Path, table: &RelationTable) -> Result<()> {
    let content = serde_json::to_string_pretty(table).map_err(ConvertError::Encode)?;
    fs::write(path, content).map_err(|e| ConvertError::io(path, e))
}

/// 追加一条关系
pub fn add(table: &mut RelationTable, species: u32, relation: SpawnRelation) {
    table.entry(species).or_default().push(relation);
}

/// 解析以空格或逗号分隔的枚举列表，每项可以是整数或名称
pub fn parse_values<T>(items: &[String]) -> Result<Vec<T>>
where
    T: FromStr<Err = ConvertError>,
{
    items
        .iter()
        .flat_map(|item| item.split([' ', ',']))
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{MoonType, TimeType, WeatherType};

    #[test]
    fn parse_values_accepts_names_and_numbers() {
        let items = vec!["clear, 6".to_string(), "SNOWY".to_string()];
        let weathers: Vec<WeatherType> = parse_values(&items).unwrap();
        assert_eq!(
            weathers,
            vec![WeatherType::Clear, WeatherType::Rainy, WeatherType::Snowy]
        );

        let bad = vec!["FULL HALF".to_string()];
        assert!(parse_values::<MoonType>(&bad).is_err());
    }

    #[test]
    fn relation_defaults_to_any_condition() {
        let r = SpawnRelation::new(SpawnType::Forest, 0.25, vec![]).unwrap();
        assert_eq!(r.conditions, vec![Condition::any()]);
        assert!(SpawnRelation::new(SpawnType::Forest, -1.0, vec![]).is_err());
    }

    #[test]
    fn load_add_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relations.json");

        let mut table = load(&path).unwrap();
        assert!(table.is_empty());

        let night = Condition::new(1, 2.0, vec![], vec![MoonType::Full], vec![TimeType::Night]).unwrap();
        add(&mut table, 25, SpawnRelation::new(SpawnType::Forest, 0.3, vec![night]).unwrap());
        add(&mut table, 25, SpawnRelation::new(SpawnType::Urban, 0.1, vec![]).unwrap());
        save(&path, &table).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"25\": ["));
        assert!(text.contains("\"spawn_area\": 12"));

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, table);
        assert_eq!(loaded[&25].len(), 2);
        assert_eq!(loaded[&25][0].conditions[0].moons, vec![MoonType::Full]);
    }
}
