pub const RELEASE_BLOCK: &str = include_str!("templates/release-block.tmpl");
