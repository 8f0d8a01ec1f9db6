mod model;

pub use crate::model::SigningValues;
use regex::Regex;

/// 取出 `release { ... }` 的块体
fn release_body(content: &str) -> Option<&str> {
    let re_block = Regex::new(r"release\s*\{([^}]*)\}").unwrap();
    re_block
        .captures(content)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

fn quoted_value(body: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).unwrap();
    re.captures(body).map(|cap| cap[1].to_string())
}

/// 解析第一个 release 签名块
///
/// 单双引号均可，空白不限；没有 release 块或缺少任一值时返回 `None`
pub fn parse_signing_block(content: &str) -> Option<SigningValues> {
    let body = release_body(content)?;

    Some(SigningValues {
        store_file: quoted_value(body, r#"storeFile\s+file\(\s*["']([^"']*)["']\s*\)"#)?,
        store_password: quoted_value(body, r#"storePassword\s+["']([^"']*)["']"#)?,
        key_alias: quoted_value(body, r#"keyAlias\s+["']([^"']*)["']"#)?,
        key_password: quoted_value(body, r#"keyPassword\s+["']([^"']*)["']"#)?,
    })
}
