use crate::config::Discovery;
use crate::error::{ContentError, Result};

/// Derives the public url of a module.
///
/// `./routes/posts/erpnext-letsencrypt.mdx` -> `/posts/erpnext-letsencrypt`
/// `./routes/posts/sorting/+page.svelte` -> `/posts/sorting`
pub fn derive_url(discovery: &Discovery, key: &str) -> Result<String> {
    let relative = key.strip_prefix(discovery.search_location.as_str())
        .ok_or_else(|| ContentError::InvalidKey {
            key: key.to_string(),
            search_location: discovery.search_location.clone(),
        })?;

    let path = strip_marker(strip_extension(relative), &discovery.page_marker);
    let base = discovery.route_base.trim_end_matches('/');

    let url = match (base.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (false, true) => base.to_string(),
        (_, false) => format!("{}/{}", base, path),
    };
    Ok(url)
}

fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |slash| slash + 1);
    match path[name_start..].rfind('.') {
        // Dot files have no extension
        Some(0) | None => path,
        Some(dot) => &path[..name_start + dot],
    }
}

/// Removes a trailing `+page` segment, never a `+page` suffix of a longer name.
fn strip_marker<'a>(path: &'a str, marker: &str) -> &'a str {
    if marker.is_empty() {
        return path;
    }
    if path == marker {
        return "";
    }
    path.strip_suffix(marker)
        .and_then(|dir| dir.strip_suffix('/'))
        .unwrap_or(path)
}
