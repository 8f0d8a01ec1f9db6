mod config;
mod contexts;
mod patches;
mod render;
mod templates;

use crate::config::Config;
use crate::patches::{PatchOutcome, apply_patch, build_rules};
use anyhow::{Context, Result};
use clap::Parser;
use signing_block::{SigningValues, parse_signing_block};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Level, info, warn};

/// 更新 Android Gradle 构建文件中的 release 签名配置
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Gradle 文件地址，默认取配置中的 file
    #[arg(env = "GRADLE_FILE")]
    file: Option<PathBuf>,
    /// 配置文件地址
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// 只报告结果，不写文件
    #[arg(long)]
    dry_run: bool,
    /// 打印文件中当前的签名配置
    #[arg(long, conflicts_with = "dry_run")]
    check: bool,
    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let config = Config::load(cli.config.as_deref())?;
    let path = cli.file.unwrap_or_else(|| PathBuf::from(&config.file));
    let name = display_name(&path);
    info!("Target {}", path.display());

    if cli.check {
        return check(&path, &name);
    }

    let rules = build_rules(&config)?;
    let outcome = apply_patch(&path, &rules, cli.dry_run)?;
    let verb = if cli.dry_run { "Would update" } else { "Successfully updated" };

    match outcome {
        PatchOutcome::Exact => println!("{verb} {name}"),
        PatchOutcome::RegexFallback => {
            println!("Could not find the old block to replace. Content might have changed.");
            println!("{verb} {name} using regex fallback");
        }
        PatchOutcome::NotFound => {
            println!("Could not find the old block to replace. Content might have changed.");
            println!("FAILED: Could not find config to update.");
            return Ok(ExitCode::FAILURE);
        }
    }

    if !cli.dry_run {
        verify(&path, &config.new)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// 写入后重新读取，确认新值生效
fn verify(path: &Path, expected: &SigningValues) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    match parse_signing_block(&content) {
        Some(values) if values == *expected => info!("Verified signing block in {}", path.display()),
        Some(values) => warn!(
            "Signing block in {} reads {}/{} after patching",
            path.display(),
            values.store_file,
            values.key_alias
        ),
        None => warn!("No readable signing block in {} after patching", path.display()),
    }
    Ok(())
}

fn check(path: &Path, name: &str) -> Result<ExitCode> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let Some(values) = parse_signing_block(&content) else {
        println!("No release signing block found in {name}");
        return Ok(ExitCode::FAILURE);
    };

    println!("storeFile: {}", values.store_file);
    println!("storePassword: {}", mask(&values.store_password));
    println!("keyAlias: {}", values.key_alias);
    println!("keyPassword: {}", mask(&values.key_password));
    Ok(ExitCode::SUCCESS)
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}
