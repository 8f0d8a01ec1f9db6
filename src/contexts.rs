use serde::Serialize;
use signing_block::SigningValues;

#[derive(Serialize)]
pub struct SigningBlockContext<'a> {
    pub indent: &'a str,
    pub store_file: &'a str,
    pub store_password: &'a str,
    pub key_alias: &'a str,
    pub key_password: &'a str,
}

impl<'a> SigningBlockContext<'a> {
    pub fn new(indent: &'a str, values: &'a SigningValues) -> Self {
        Self {
            indent,
            store_file: &values.store_file,
            store_password: &values.store_password,
            key_alias: &values.key_alias,
            key_password: &values.key_password,
        }
    }
}
