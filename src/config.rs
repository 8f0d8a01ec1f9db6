use anyhow::{Context, Result, bail};
use serde::Deserialize;
use signing_block::SigningValues;
use std::fs;
use std::path::Path;

/// 内置配置
pub const DEFAULT_CONFIG: &str = include_str!("config.toml");

fn default_indent() -> String {
    " ".repeat(8)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// 目标文件
    pub file: String,
    /// `release {` 行的缩进
    #[serde(default = "default_indent")]
    pub indent: String,
    pub old: SigningValues,
    pub new: SigningValues,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Invalid config")?;
        config.validate()?;
        Ok(config)
    }

    /// 读取配置文件，未指定时使用内置配置
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                Self::from_toml(&content)
                    .with_context(|| format!("Failed to load config {}", path.display()))
            }
            None => Self::from_toml(DEFAULT_CONFIG),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.indent.chars().any(|c| c != ' ' && c != '\t') {
            bail!("indent may only contain spaces and tabs");
        }
        for (section, values) in [("old", &self.old), ("new", &self.new)] {
            for (name, value) in values.fields() {
                if value.is_empty() {
                    bail!("{section}.{name} must not be empty");
                }
                // 值写在单引号里
                if value.contains(['\'', '\n', '\r']) {
                    bail!("{section}.{name} must not contain quotes or line breaks");
                }
            }
        }
        if self.old == self.new {
            bail!("old and new signing values are identical");
        }
        Ok(())
    }
}
