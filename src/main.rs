//! Pixelmon 刷新数据转换工具

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use pxspawn::relations::{self, parse_values};
use pxspawn::{logging, Condition, Config, SpawnRelation, SpawnType, World};

/// Pixelmon 刷新数据转换工具
#[derive(Parser)]
#[command(name = "pxspawn", version, about)]
struct Cli {
    /// 配置文件路径（.toml / .yaml）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 转换属性与刷新集为刷新概率 JSON
    Convert {
        /// 属性文件目录
        #[arg(long)]
        stats: Option<PathBuf>,
        /// 刷新集文件目录
        #[arg(long)]
        sets: Option<PathBuf>,
        /// 输出文件（默认: conversion_result.json）
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// 禁用并行处理
        #[arg(long)]
        sequential: bool,
    },
    /// 编辑手工刷新关系表
    Relation {
        #[command(subcommand)]
        action: RelationCommands,
    },
    /// 将世界文件导出为 GeoJSON
    Geojson {
        /// 世界 JSON 文件
        world: PathBuf,
        /// 输出文件（默认: 同名 .geojson）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// 生成默认配置文件
    Config {
        /// 输出路径（默认: pxspawn.toml）
        #[arg(short, long, default_value = "pxspawn.toml")]
        output: PathBuf,
        /// 覆盖已存在的文件
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum RelationCommands {
    /// 追加一条刷新关系
    Add {
        /// 关系表文件
        file: PathBuf,
        /// 物种编号
        #[arg(long)]
        id: u32,
        /// 刷新区域（名称或编号）
        #[arg(long)]
        area: String,
        /// 刷新概率
        #[arg(long)]
        probability: f64,
        /// 天气限制（为空表示不限）
        #[arg(long, num_args = 1..)]
        weathers: Vec<String>,
        /// 月相限制（为空表示不限）
        #[arg(long, num_args = 1..)]
        moons: Vec<String>,
        /// 时段限制（为空表示不限）
        #[arg(long, num_args = 1..)]
        times: Vec<String>,
        /// 条件修正值
        #[arg(long, default_value_t = 1.0)]
        modifier: f64,
    },
    /// 列出关系表内容
    List {
        /// 关系表文件
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut config = Config::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert {
            stats,
            sets,
            output,
            sequential,
        } => {
            // 命令行参数优先于配置
            if let Some(stats) = stats {
                config.convert.stats_dir = stats;
            }
            if let Some(sets) = sets {
                config.convert.sets_dir = sets;
            }
            if let Some(output) = output {
                config.convert.output = output;
            }
            if sequential {
                config.convert.parallel = false;
            }

            println!("属性目录: {:?}", config.convert.stats_dir);
            println!("刷新集目录: {:?}", config.convert.sets_dir);
            println!("输出文件: {:?}", config.convert.output);
            println!();

            let start = Instant::now();
            let tables = config.tables();
            let result = pxspawn::run(&config, &tables).context("转换失败")?;
            println!(
                "有刷新数据: {}, 无刷新数据: {}",
                result.spawns.len(),
                result.no_spawns.len()
            );
            println!("\n耗时: {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Relation { action } => match action {
            RelationCommands::Add {
                file,
                id,
                area,
                probability,
                weathers,
                moons,
                times,
                modifier,
            } => {
                if id == 0 {
                    anyhow::bail!("物种编号不能为 0");
                }
                let mut table = relations::load(&file)?;
                println!("已加载 {} 个物种的刷新关系", table.len());

                let spawn_area: SpawnType = area.parse()?;
                let condition = Condition::new(
                    1,
                    modifier,
                    parse_values(&weathers)?,
                    parse_values(&moons)?,
                    parse_values(&times)?,
                )?;
                let relation = SpawnRelation::new(spawn_area, probability, vec![condition])?;

                relations::add(&mut table, id, relation);
                relations::save(&file, &table)?;
                println!("已添加: {} → {} ({})", id, spawn_area, probability);
            }
            RelationCommands::List { file } => {
                let table = relations::load(&file)?;
                for (id, list) in &table {
                    for relation in list {
                        println!(
                            "{:>5}  {:<18} {:<8} 条件 {}",
                            id,
                            relation.spawn_area,
                            relation.probability,
                            relation.conditions.len()
                        );
                    }
                }
                println!("共 {} 个物种", table.len());
            }
        },

        Commands::Geojson { world, output } => {
            let output_path = output.unwrap_or_else(|| world.with_extension("geojson"));
            let loaded = World::load(&world)?;
            let geojson = serde_json::to_string_pretty(&loaded.to_geojson())?;
            fs::write(&output_path, geojson)
                .with_context(|| format!("写入 {:?} 失败", output_path))?;
            println!(
                "已导出 {} 个兴趣点, {} 条道路, {} 个区域: {:?}",
                loaded.points.len(),
                loaded.streets.len(),
                loaded.areas.len(),
                output_path
            );
        }

        Commands::Config { output, force } => {
            if output.exists() && !force {
                anyhow::bail!("文件已存在: {:?}\n使用 --force 覆盖", output);
            }

            let default_config = Config::default();
            default_config.save_to_file(&output)?;
            println!("已生成配置文件: {:?}", output);
            println!("\n配置项说明:");
            println!("  [convert]");
            println!("    stats_dir / sets_dir / output   # 输入目录与输出文件");
            println!(
                "    parallel = {}         # 按物种并行处理",
                default_config.convert.parallel
            );
            println!(
                "    max_rarity = {}      # 稀有度上限",
                default_config.convert.max_rarity
            );
            println!(
                "    spawn_area = {}      # 刷新区域占位值",
                default_config.convert.spawn_area
            );
            println!("  [diagnostics]");
            println!("    unknown_items / unknown_spec / unknown_tags / unknown_multipliers");
            println!("  [tables.items]");
            println!("    \"pixelmon:xxx\" = 123   # 追加或覆盖物品映射");
        }
    }

    Ok(())
}
