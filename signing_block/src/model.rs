use serde::{Deserialize, Serialize};

/// 签名块中的四个值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigningValues {
    pub store_file: String,
    pub store_password: String,
    pub key_alias: String,
    pub key_password: String,
}

impl SigningValues {
    /// 按块内顺序返回字段名和值
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("store_file", &self.store_file),
            ("store_password", &self.store_password),
            ("key_alias", &self.key_alias),
            ("key_password", &self.key_password),
        ]
    }
}
