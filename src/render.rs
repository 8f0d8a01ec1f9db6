use anyhow::Result;
use serde::Serialize;
use tinytemplate::{TinyTemplate, format_unescaped};

/// 渲染模板，去掉末尾换行
pub fn render_block<T: Serialize>(template: &str, ctx: &T) -> Result<String> {
    let mut tt = TinyTemplate::new();
    // 值原样输出，不做 HTML 转义
    tt.set_default_formatter(&format_unescaped);
    tt.add_template("tpl", template)?;

    let content = tt.render("tpl", ctx)?;
    Ok(content.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contexts::SigningBlockContext;
    use crate::templates::RELEASE_BLOCK;
    use signing_block::SigningValues;

    fn values(password: &str) -> SigningValues {
        SigningValues {
            store_file: "a.jks".into(),
            store_password: password.into(),
            key_alias: "alias".into(),
            key_password: password.into(),
        }
    }

    #[test]
    fn renders_release_block() {
        let values = values("secret");
        let block = render_block(RELEASE_BLOCK, &SigningBlockContext::new("  ", &values)).unwrap();
        assert_eq!(
            block,
            "  release {\n      storeFile file('a.jks')\n      storePassword 'secret'\n      keyAlias 'alias'\n      keyPassword 'secret'\n  }"
        );
    }

    #[test]
    fn values_are_not_escaped() {
        let values = values("a<b>&\"c{d}");
        let block = render_block(RELEASE_BLOCK, &SigningBlockContext::new("", &values)).unwrap();
        assert!(block.contains("storePassword 'a<b>&\"c{d}'"));
    }
}
