//! 汇总所有物种的刷新数据并写出结果

use crate::catalog::{Catalog, Lookup, UnmatchedSpecies};
use crate::config::Config;
use crate::error::{ConvertError, Result};
use crate::mapping::Tables;
use crate::normalize::{NormalizedSpawnEntry, Normalizer, SpeciesContext};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// 转换结果，唯一持久化的产物
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// 物种编号 → 刷新条目
    pub spawns: BTreeMap<u32, Vec<NormalizedSpawnEntry>>,
    /// 没有刷新集的物种，按属性文件顺序
    pub no_spawns: Vec<UnmatchedSpecies>,
}

/// 单个属性文件的转换结果
enum Outcome {
    Skipped,
    Unmatched(UnmatchedSpecies),
    Converted(u32, Vec<NormalizedSpawnEntry>),
}

/// 转换目录中的全部物种（不写文件）
pub fn convert_all(config: &Config, tables: &Tables) -> Result<ConversionResult> {
    let catalog = Catalog::scan(&config.convert.stats_dir, &config.convert.sets_dir)?;
    let normalizer = Normalizer::new(tables, config);
    let files = catalog.stats_files();

    if config.convert.parallel {
        info!("转换 {} 个物种 (并行处理)", files.len());
    } else {
        info!("转换 {} 个物种", files.len());
    }

    // 有序收集，并行与串行结果一致
    let outcomes: Vec<Outcome> = if config.convert.parallel {
        files
            .par_iter()
            .map(|f| convert_species(&catalog, &normalizer, f))
            .collect::<Result<_>>()?
    } else {
        files
            .iter()
            .map(|f| convert_species(&catalog, &normalizer, f))
            .collect::<Result<_>>()?
    };

    Ok(aggregate(outcomes))
}

fn convert_species(catalog: &Catalog, normalizer: &Normalizer<'_>, filename: &str) -> Result<Outcome> {
    match catalog.lookup(filename)? {
        Lookup::Skipped => {
            debug!(file = filename, "跳过编号 0");
            Ok(Outcome::Skipped)
        }
        Lookup::Unmatched(species) => {
            debug!(species = species.id, name = %species.name, "没有刷新集");
            Ok(Outcome::Unmatched(species))
        }
        Lookup::Matched(stats, set) => {
            let context = SpeciesContext {
                id: stats.id,
                name: &stats.name,
                male_chance: stats.male_chance(),
            };
            let entries = normalizer.normalize(&context, &set.spawn_infos);
            Ok(Outcome::Converted(stats.id, entries))
        }
    }
}

fn aggregate(outcomes: Vec<Outcome>) -> ConversionResult {
    let mut result = ConversionResult::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Skipped => {}
            Outcome::Unmatched(species) => result.no_spawns.push(species),
            Outcome::Converted(id, entries) => {
                if result.spawns.insert(id, entries).is_some() {
                    warn!(species = id, "物种编号重复，使用后出现的文件");
                }
            }
        }
    }
    result
}

impl ConversionResult {
    /// 以 2 空格缩进序列化
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ConvertError::Encode)
    }

    /// 写出结果，覆盖已存在的文件
    pub fn write(&self, path: &Path) -> Result<()> {
        let content = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent, e))?;
        }
        fs::write(path, content).map_err(|e| ConvertError::io(path, e))
    }
}

/// 转换并写出；任一物种失败时不写文件
pub fn run(config: &Config, tables: &Tables) -> Result<ConversionResult> {
    let result = convert_all(config, tables)?;
    result.write(&config.convert.output)?;
    info!(
        "转换完成: {} 个物种有刷新数据, {} 个物种没有",
        result.spawns.len(),
        result.no_spawns.len()
    );
    Ok(result)
}
