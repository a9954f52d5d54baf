use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Site {
    /// Scheme and host the site is served from, e.g. `https://example.com`
    pub base_url: String,
    pub title: String,
    pub author: String,
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: u32,
}

impl Site {
    /// Page title as shown in the browser tab, e.g. `Posts | Jane Doe`
    pub fn title_for(&self, title: &str) -> String {
        format!("{} | {}", title, self.author)
    }

    /// `/posts/sorting` -> `https://example.com/posts/sorting`
    pub fn absolute_url(&self, url: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), url.trim_start_matches('/'))
    }
}

fn default_posts_per_page() -> u32 {
    5
}

#[derive(Deserialize, Debug)]
pub struct Paths {
    /// Module keys (`./routes/posts/...`) are relative to this directory
    pub src_dir: PathBuf,
}

/// What to do with a module whose metadata cannot become a post.
#[derive(Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Skip the module, log a warning and record a diagnostic
    Skip,
    /// Abort the whole aggregation
    Fail,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Discovery {
    pub route_base: String,
    pub search_location: String,
    pub document_pattern: String,
    pub page_pattern: String,
    pub page_marker: String,
    pub page_export: String,
    pub malformed: MalformedPolicy,
}

impl Default for Discovery {
    fn default() -> Self {
        Discovery {
            route_base: "/posts".to_string(),
            search_location: "./routes/posts/".to_string(),
            document_pattern: "./routes/posts/**/*.mdx".to_string(),
            page_pattern: "./routes/posts/*/**/+page.svelte".to_string(),
            page_marker: "+page".to_string(),
            page_export: "PostData".to_string(),
            malformed: MalformedPolicy::Skip,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    #[serde(default)]
    pub discovery: Discovery,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Executable has no parent directory"))?;
    let rest = path.strip_prefix("${exe_dir}")
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e.to_string()))?;
    Ok(exe_dir.join(rest))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths.src_dir = parse_path(cfg.paths.src_dir)?;
    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path).transpose()?;
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[site]
base_url = "https://example.com"
title = "example website"
author = "Jane Doe"

[paths]
src_dir = "src"
"#;

    #[test]
    fn test_defaults() {
        let cfg = parse_config(MINIMAL).unwrap();
        assert_eq!(cfg.site.posts_per_page, 5);
        assert_eq!(cfg.paths.src_dir, PathBuf::from("src"));
        assert_eq!(cfg.discovery.route_base, "/posts");
        assert_eq!(cfg.discovery.search_location, "./routes/posts/");
        assert_eq!(cfg.discovery.page_export, "PostData");
        assert_eq!(cfg.discovery.malformed, MalformedPolicy::Skip);
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_full_config() {
        let cfg = parse_config(r#"
[site]
base_url = "https://example.com"
title = "example website"
author = "Jane Doe"
posts_per_page = 10

[paths]
src_dir = "site/src"

[discovery]
route_base = "/writing"
malformed = "fail"

[log]
level = "Debug"
log_to_console = true
"#).unwrap();

        assert_eq!(cfg.site.posts_per_page, 10);
        assert_eq!(cfg.discovery.route_base, "/writing");
        // Unset discovery keys keep their defaults
        assert_eq!(cfg.discovery.page_marker, "+page");
        assert_eq!(cfg.discovery.malformed, MalformedPolicy::Fail);
        assert!(matches!(cfg.log.as_ref().map(|l| l.level), Some(LogLevel::Debug)));
    }

    #[test]
    fn test_exe_dir_path() {
        let path = parse_path(PathBuf::from("${exe_dir}/content")).unwrap();
        let exe_dir = env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(path, exe_dir.join("content"));
    }

    #[test]
    fn test_title_for() {
        let cfg = parse_config(MINIMAL).unwrap();
        assert_eq!(cfg.site.title_for("Posts"), "Posts | Jane Doe");
    }

    #[test]
    fn test_absolute_url() {
        let mut cfg = parse_config(MINIMAL).unwrap();
        assert_eq!(cfg.site.absolute_url("/posts/sorting"), "https://example.com/posts/sorting");

        cfg.site.base_url = "https://example.com/".to_string();
        assert_eq!(cfg.site.absolute_url("/posts"), "https://example.com/posts");
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[site]\ntitle = 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
