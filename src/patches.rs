use crate::config::Config;
use crate::contexts::SigningBlockContext;
use crate::render::render_block;
use crate::templates::RELEASE_BLOCK;
use anyhow::{Context, Result};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use regex::{NoExpand, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacementRule {
    /// 字面量替换，替换全部出现
    Exact { find: String, insert: String },
    /// 跨行正则替换，替换全部匹配
    Regex { pattern: String, insert: String },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    Exact,
    RegexFallback,
    NotFound,
}

#[derive(Debug)]
pub struct Planned {
    pub outcome: PatchOutcome,
    pub content: String,
}

/// 由配置生成替换规则：先精确匹配，再正则兜底
pub fn build_rules(config: &Config) -> Result<Vec<ReplacementRule>> {
    let old_block = render_block(RELEASE_BLOCK, &SigningBlockContext::new(&config.indent, &config.old))?;
    let new_block = render_block(RELEASE_BLOCK, &SigningBlockContext::new(&config.indent, &config.new))?;

    let pattern = format!(
        r"(?s)release\s*\{{\s*storeFile\s*file\('{}'\)[^}}]+\}}",
        regex::escape(&config.old.store_file)
    );
    let regex_insert = new_block.clone();

    Ok(vec![
        ReplacementRule::Exact { find: old_block, insert: new_block },
        ReplacementRule::Regex { pattern, insert: regex_insert },
    ])
}

/// 第一条匹配的规则生效，全部不匹配时返回 `None`
pub fn plan(content: &str, rules: &[ReplacementRule]) -> Result<Option<Planned>> {
    for rule in rules {
        match rule {
            ReplacementRule::Exact { find, insert } => {
                if content.contains(find.as_str()) {
                    debug!("Exact block found");
                    return Ok(Some(Planned {
                        outcome: PatchOutcome::Exact,
                        content: content.replace(find.as_str(), insert),
                    }));
                }
            }
            ReplacementRule::Regex { pattern, insert } => {
                let re = Regex::new(pattern).with_context(|| format!("Invalid pattern {pattern}"))?;
                if re.is_match(content) {
                    debug!("Pattern {} matched", pattern);
                    return Ok(Some(Planned {
                        outcome: PatchOutcome::RegexFallback,
                        content: re.replace_all(content, NoExpand(insert.as_str())).into_owned(),
                    }));
                }
            }
        }
    }
    Ok(None)
}

/// 读取、替换并写回，最多写一次
pub fn apply_patch(path: &Path, rules: &[ReplacementRule], dry_run: bool) -> Result<PatchOutcome> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let content = normalize_newlines(&raw);

    let Some(planned) = plan(&content, rules)? else {
        return Ok(PatchOutcome::NotFound);
    };

    if dry_run {
        info!("Dry run, {} left untouched", path.display());
    } else {
        write_atomic(path, &planned.content)?;
        info!("Patched {} ({:?})", path.display(), planned.outcome);
    }
    Ok(planned.outcome)
}

/// 统一换行为 `\n`，写回时也按 `\n` 输出
fn normalize_newlines(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

fn generate_random_string(length: usize) -> String {
    let mut rng = rng();
    (0..length)
        .map(|_| rng.sample(Alphanumeric))
        .map(char::from)
        .collect()
}

/// 临时文件，drop 时删除
struct TempPath {
    path: PathBuf,
    armed: bool,
}

impl Drop for TempPath {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// 先写同目录临时文件，再 rename 覆盖；符号链接写到其指向的文件
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let resolved = fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    let path = resolved.as_path();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .with_context(|| format!("{} is not a file path", path.display()))?;

    let mut tmp = TempPath {
        path: dir.join(format!(
            ".{}.tmp-{}",
            file_name.to_string_lossy(),
            generate_random_string(8)
        )),
        armed: true,
    };

    fs::write(&tmp.path, content)
        .with_context(|| format!("Failed to write {}", tmp.path.display()))?;
    let permissions = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .permissions();
    fs::set_permissions(&tmp.path, permissions)
        .with_context(|| format!("Failed to set permissions on {}", tmp.path.display()))?;
    fs::rename(&tmp.path, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    tmp.armed = false;
    Ok(())
}
