use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"[site]
base_url = "https://example.com"
title = "My portfolio"
author = "Jane Doe"
posts_per_page = 5

# If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
src_dir = "src"

# Every key is optional, shown here with its default
[discovery]
route_base = "/posts"
search_location = "./routes/posts/"
document_pattern = "./routes/posts/**/*.mdx"
page_pattern = "./routes/posts/*/**/+page.svelte"
page_marker = "+page"
page_export = "PostData"
# skip | fail
malformed = "skip"

[log]
level = "Info"
log_to_console = true
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(file_path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parses() {
        let cfg = folio::config::parse_config(CONFIG_SAMPLE).unwrap();
        assert_eq!(cfg.site.author, "Jane Doe");
        assert_eq!(cfg.discovery.page_export, "PostData");
    }
}
