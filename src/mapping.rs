//! 静态映射表：时段、月相、生物群系与持有物品
//!
//! 表在启动时构建一次，之后只读，显式传递给需要它的组件。

use crate::enums::{MoonType, TimeType};
use std::collections::{BTreeMap, HashMap};

/// 默认持有物品表：物品 ID → 内部物品编号
pub const DEFAULT_ITEMS: &[(&str, u32)] = &[
    ("pixelmon:smoke_ball", 75),
    ("pixelmon:razor_claw", 105),
    ("pixelmon:razor_fang", 110),
    ("pixelmon:charcoal", 136),
    ("pixelmon:silver_powder", 146),
    ("pixelmon:poison_barb", 142),
    ("pixelmon:pecha_berry", 391),
    ("pixelmon:sharp_beak", 144),
    ("pixelmon:light_ball", 186),
    ("pixelmon:grip_claw", 89),
    ("pixelmon:moon_stone", 16),
    ("pixelmon:snowball", 542),
    ("pixelmon:absorb_bulb", 98),
    ("pixelmon:big_mushroom", 39),
    ("pixelmon:tiny_mushroom", 38),
    ("pixelmon:shed_shell", 74),
    ("pixelmon:soft_sand", 143),
    ("pixelmon:quick_claw", 112),
    ("pixelmon:kings_rock", 109),
    ("pixelmon:twisted_spoon", 145),
    ("pixelmon:focus_band", 113),
    ("pixelmon:ever_stone", 202),
    ("pixelmon:cell_battery", 99),
    ("pixelmon:lagging_tail", 111),
    ("pixelmon:metal_coat", 151),
    ("pixelmon:black_sludge", 92),
    ("pixelmon:big_pearl", 42),
    ("pixelmon:pearl", 41),
    ("pixelmon:psychic_seed", 538),
    ("pixelmon:thick_club", 190),
    ("pixelmon:protector", 206),
    ("pixelmon:lucky_punch", 187),
    ("pixelmon:dragon_scale", 203),
    ("pixelmon:mystic_water", 137),
    ("pixelmon:star_piece", 45),
    ("pixelmon:stardust", 44),
    ("pixelmon:electirizer", 207),
    ("pixelmon:magmarizer", 208),
    ("pixelmon:leftovers", 93),
    ("pixelmon:deep_sea_scale", 194),
    ("pixelmon:wide_lens", 107),
    ("pixelmon:berry_juice", 234),
    ("pixelmon:luminous_moss", 541),
    ("pixelmon:moomoo_milk", 240),
    ("pixelmon:lucky_egg", 76),
    ("pixelmon:revive", 232),
    ("pixelmon:potion", 217),
    ("pixelmon:max_revive", 233),
    ("pixelmon:bright_powder", 67),
    ("pixelmon:mental_herb", 95),
    ("pixelmon:power_herb", 97),
    ("pixelmon:black_belt", 141),
    ("pixelmon:magnet", 138),
    ("pixelmon:iron_ball", 118),
    ("pixelmon:hard_stone", 147),
    ("pixelmon:sitrus_berry", 398),
    ("pixelmon:oran_berry", 395),
    ("pixelmon:deep_sea_tooth", 193),
    ("pixelmon:sticky_barb", 117),
    ("pixelmon:sun_stone", 17),
    ("pixelmon:light_clay", 88),
    ("pixelmon:prism_scale", 210),
    ("pixelmon:icy_rock", 87),
    ("pixelmon:damp_rock", 85),
    ("pixelmon:heat_rock", 84),
    ("pixelmon:spell_tag", 148),
    ("pixelmon:kasib_berry", 436),
    ("pixelmon:heart_scale", 49),
    ("pixelmon:dragon_fang", 149),
    ("pixelmon:metronome", 102),
    ("pixelmon:miracle_seed", 139),
    ("pixelmon:never_melt_ice", 140),
    ("pixelmon:reaper_cloth", 209),
    ("pixelmon:black_glasses", 150),
    ("pixelmon:silk_scarf", 152),
    ("pixelmon:sachet", 614),
    ("pixelmon:whipped_dream", 613),
    ("pixelmon:rawst_berry", 392),
    ("pixelmon:aspear_berry", 393),
    ("pixelmon:cheri_berry", 389),
    ("pixelmon:grassy_seed", 540),
    ("pixelmon:misty_seed", 539),
    ("pixelmon:electric_seed", 537),
    ("pixelmon:chesto_berry", 390),
    ("pixelmon:persim_berry", 396),
    ("pixelmon:leek", 191),
];

/// 已知的原版生物群系
pub const KNOWN_BIOMES: &[&str] = &[
    "the_void",
    "plains",
    "sunflower_plains",
    "snowy_plains",
    "ice_spikes",
    "desert",
    "swamp",
    "forest",
    "flower_forest",
    "birch_forest",
    "dark_forest",
    "old_growth_birch_forest",
    "old_growth_pine_taiga",
    "old_growth_spruce_taiga",
    "taiga",
    "snowy_taiga",
    "savanna",
    "savanna_plateau",
    "windswept_hills",
    "windswept_gravelly_hills",
    "windswept_forest",
    "windswept_savanna",
    "jungle",
    "sparse_jungle",
    "bamboo_jungle",
    "badlands",
    "eroded_badlands",
    "wooded_badlands",
    "meadow",
    "grove",
    "snowy_slopes",
    "frozen_peaks",
    "jagged_peaks",
    "stony_peaks",
    "river",
    "frozen_river",
    "beach",
    "snowy_beach",
    "stony_shore",
    "warm_ocean",
    "lukewarm_ocean",
    "deep_lukewarm_ocean",
    "ocean",
    "deep_ocean",
    "cold_ocean",
    "deep_cold_ocean",
    "frozen_ocean",
    "deep_frozen_ocean",
    "mushroom_fields",
    "dripstone_caves",
    "lush_caves",
    "nether_wastes",
    "warped_forest",
    "crimson_forest",
    "soul_sand_valley",
    "basalt_deltas",
    "the_end",
    "end_highlands",
    "end_midlands",
    "small_end_islands",
    "end_barrens",
];

/// 时段名称 → 时段枚举（过渡时段对应两个值）
const TIME_BUCKETS: &[(&str, &[TimeType])] = &[
    ("DAWN", &[TimeType::Night, TimeType::Morning]),
    ("MORNING", &[TimeType::Morning]),
    ("DAY", &[TimeType::Morning, TimeType::Noon]),
    ("MIDDAY", &[TimeType::Noon]),
    ("AFTERNOON", &[TimeType::Noon, TimeType::Evening]),
    ("DUSK", &[TimeType::Evening]),
    ("NIGHT", &[TimeType::Evening, TimeType::Night]),
    ("MIDNIGHT", &[TimeType::Night]),
];

/// 月相编号 0..=7 → 月相枚举
const MOON_PHASES: [&[MoonType]; 8] = [
    &[MoonType::Full],
    &[MoonType::Full, MoonType::Decreasing],
    &[MoonType::Decreasing],
    &[MoonType::Decreasing, MoonType::New],
    &[MoonType::New],
    &[MoonType::New, MoonType::Increasing],
    &[MoonType::Increasing],
    &[MoonType::Increasing, MoonType::Full],
];

/// 转换所用的全部映射表
#[derive(Debug, Clone)]
pub struct Tables {
    items: HashMap<String, u32>,
    times: HashMap<&'static str, &'static [TimeType]>,
    biomes: BTreeMap<String, Vec<String>>,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            items: DEFAULT_ITEMS
                .iter()
                .map(|(name, id)| (name.to_string(), *id))
                .collect(),
            times: TIME_BUCKETS.iter().copied().collect(),
            biomes: KNOWN_BIOMES
                .iter()
                .map(|b| (b.to_string(), Vec::new()))
                .collect(),
        }
    }
}

impl Tables {
    /// 在默认表基础上追加或覆盖物品条目
    pub fn with_items<I, S>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut tables = Self::default();
        for (name, id) in overrides {
            tables.items.insert(name.into(), id);
        }
        tables
    }

    /// 不含任何物品的表（所有持有物品都会被丢弃）
    pub fn without_items() -> Self {
        let mut tables = Self::default();
        tables.items.clear();
        tables
    }

    pub fn item_id(&self, item: &str) -> Option<u32> {
        self.items.get(item).copied()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn time_bucket(&self, bucket: &str) -> Option<&'static [TimeType]> {
        self.times.get(bucket).copied()
    }

    pub fn moon_phase(&self, phase: u8) -> Option<&'static [MoonType]> {
        MOON_PHASES.get(phase as usize).copied()
    }

    /// 生物群系所属分组，未知群系返回 None
    pub fn biome_groups(&self, biome: &str) -> Option<&[String]> {
        let key = biome.strip_prefix("minecraft:").unwrap_or(biome);
        self.biomes.get(key).map(Vec::as_slice)
    }
}
