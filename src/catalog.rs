//! 物种目录：枚举属性文件与刷新集文件并按名称匹配

use crate::error::{ConvertError, Result};
use crate::normalize::RawSpawnEntry;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 属性文件名：`<编号>.<扩展名>`，编号允许前导 `+`、首尾空白和数字间的 `_`
static STATS_FILENAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\+?(\d+(?:_\d+)*)\s*(?:\.|$)").expect("属性文件名正则无效")
});

/// 刷新集文件后缀
pub const SPAWN_SET_SUFFIX: &str = ".set.json";

/// 单个物种的属性
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesStats {
    /// 来自文件名
    #[serde(skip)]
    pub id: u32,
    #[serde(rename = "pokemon")]
    pub name: String,
    /// 0..=100
    pub male_percent: f64,
    pub catch_rate: Option<f64>,
    pub spawn_level: Option<u32>,
    pub spawn_level_range: Option<u32>,
}

impl SpeciesStats {
    pub fn male_chance(&self) -> f64 {
        self.male_percent / 100.0
    }

    /// 期望的刷新集文件名
    pub fn spawn_set_filename(&self) -> String {
        format!("{}{}", title_case(&self.name), SPAWN_SET_SUFFIX)
    }
}

/// 单个物种的刷新集
#[derive(Debug, Clone, Deserialize)]
pub struct SpawnSet {
    #[serde(rename = "spawnInfos")]
    pub spawn_infos: Vec<RawSpawnEntry>,
}

/// 没有刷新集的物种
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedSpecies {
    pub id: u32,
    pub name: String,
}

/// 单个属性文件的处理结果
#[derive(Debug)]
pub enum Lookup {
    /// 编号为 0，跳过
    Skipped,
    /// 没有对应的刷新集
    Unmatched(UnmatchedSpecies),
    /// 找到刷新集
    Matched(SpeciesStats, SpawnSet),
}

/// 两个输入目录的文件清单
#[derive(Debug, Clone)]
pub struct Catalog {
    stats_dir: PathBuf,
    sets_dir: PathBuf,
    stats_files: Vec<String>,
    spawn_sets: HashSet<String>,
}

impl Catalog {
    /// 扫描属性目录与刷新集目录（只看顶层文件）
    pub fn scan(stats_dir: &Path, sets_dir: &Path) -> Result<Self> {
        let mut stats_files = list_files(stats_dir)?;
        stats_files.sort();
        let spawn_sets = list_files(sets_dir)?.into_iter().collect();

        Ok(Self {
            stats_dir: stats_dir.to_path_buf(),
            sets_dir: sets_dir.to_path_buf(),
            stats_files,
            spawn_sets,
        })
    }

    /// 按字典序排列的属性文件名
    pub fn stats_files(&self) -> &[String] {
        &self.stats_files
    }

    pub fn has_spawn_set(&self, filename: &str) -> bool {
        self.spawn_sets.contains(filename)
    }

    /// 处理单个属性文件
    pub fn lookup(&self, filename: &str) -> Result<Lookup> {
        let id = species_id(filename)?;
        if id == 0 {
            return Ok(Lookup::Skipped);
        }

        let mut stats: SpeciesStats = read_json(&self.stats_dir.join(filename))?;
        stats.id = id;

        let set_filename = stats.spawn_set_filename();
        if !self.has_spawn_set(&set_filename) {
            return Ok(Lookup::Unmatched(UnmatchedSpecies {
                id,
                name: stats.name,
            }));
        }

        let set: SpawnSet = read_json(&self.sets_dir.join(&set_filename))?;
        Ok(Lookup::Matched(stats, set))
    }
}

/// 从属性文件名解析物种编号
///
/// 负数或超出 u32 的编号视为无效文件名。
pub fn species_id(filename: &str) -> Result<u32> {
    STATS_FILENAME
        .captures(filename)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().replace('_', "").parse().ok())
        .ok_or_else(|| ConvertError::InvalidStatsFilename(filename.to_string()))
}

/// 每段字母首字母大写、其余小写
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        if prev_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_cased = c.is_lowercase() || c.is_uppercase();
    }
    out
}

fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|source| ConvertError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(files)
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| ConvertError::json(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_matches_set_filenames() {
        assert_eq!(title_case("pikachu"), "Pikachu");
        assert_eq!(title_case("Mr. Mime"), "Mr. Mime");
        assert_eq!(title_case("ho-oh"), "Ho-Oh");
        assert_eq!(title_case("farfetch'd"), "Farfetch'D");
        assert_eq!(title_case("PORYGON2"), "Porygon2");
        assert_eq!(title_case("tapu koko"), "Tapu Koko");
    }

    #[test]
    fn species_id_from_filename() {
        assert_eq!(species_id("25.json").unwrap(), 25);
        assert_eq!(species_id("0.json").unwrap(), 0);
        assert_eq!(species_id("151").unwrap(), 151);
        assert!(species_id("pikachu.json").is_err());
        assert!(species_id("25a.json").is_err());
    }

    #[test]
    fn species_id_accepts_signed_and_padded_numbers() {
        assert_eq!(species_id("+25.json").unwrap(), 25);
        assert_eq!(species_id(" 25 .json").unwrap(), 25);
        assert_eq!(species_id("0025.json").unwrap(), 25);
        assert_eq!(species_id("1_000.json").unwrap(), 1000);
        assert_eq!(species_id("4294967295.json").unwrap(), u32::MAX);

        assert!(matches!(
            species_id("4294967296.json"),
            Err(ConvertError::InvalidStatsFilename(_))
        ));
        assert!(species_id("-25.json").is_err());
        assert!(species_id("++25.json").is_err());
        assert!(species_id("_25.json").is_err());
        assert!(species_id("25_.json").is_err());
    }

    #[test]
    fn scan_lists_top_level_files_sorted() {
        let stats = tempfile::tempdir().unwrap();
        let sets = tempfile::tempdir().unwrap();
        for name in ["25.json", "1.json", "133.json"] {
            fs::write(stats.path().join(name), "{}").unwrap();
        }
        fs::create_dir(stats.path().join("nested")).unwrap();
        fs::write(sets.path().join("Pikachu.set.json"), "{}").unwrap();

        let catalog = Catalog::scan(stats.path(), sets.path()).unwrap();
        assert_eq!(catalog.stats_files(), &["1.json", "133.json", "25.json"]);
        assert!(catalog.has_spawn_set("Pikachu.set.json"));
        assert!(!catalog.has_spawn_set("Eevee.set.json"));
    }

    #[test]
    fn lookup_reports_unmatched_and_skips_zero() {
        let stats = tempfile::tempdir().unwrap();
        let sets = tempfile::tempdir().unwrap();
        fs::write(
            stats.path().join("0.json"),
            r#"{"pokemon": "MissingNo", "malePercent": 0}"#,
        )
        .unwrap();
        fs::write(
            stats.path().join("999.json"),
            r#"{"pokemon": "Missingno", "malePercent": 50, "catchRate": 3}"#,
        )
        .unwrap();

        let catalog = Catalog::scan(stats.path(), sets.path()).unwrap();
        assert!(matches!(catalog.lookup("0.json").unwrap(), Lookup::Skipped));
        match catalog.lookup("999.json").unwrap() {
            Lookup::Unmatched(u) => {
                assert_eq!(u, UnmatchedSpecies { id: 999, name: "Missingno".to_string() })
            }
            other => panic!("unexpected lookup result: {:?}", other),
        }
    }

    #[test]
    fn missing_required_stats_key_is_fatal() {
        let stats = tempfile::tempdir().unwrap();
        let sets = tempfile::tempdir().unwrap();
        fs::write(stats.path().join("25.json"), r#"{"pokemon": "Pikachu"}"#).unwrap();

        let catalog = Catalog::scan(stats.path(), sets.path()).unwrap();
        let err = catalog.lookup("25.json").unwrap_err();
        assert!(matches!(err, ConvertError::Json { .. }));
    }
}
