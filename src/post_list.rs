use std::collections::HashMap;

use crate::content::PostItem;

/// Tags with the number of posts using them, most used first, then by name.
pub fn tag_frequency(posts: &[PostItem]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for tag in &post.meta.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    let mut tags: Vec<(String, usize)> = counts.into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    tags
}

/// Posts of `series` in the order they are meant to be read.
///
/// Numbered parts come first, by part. Posts without a part follow, oldest first.
pub fn series_reading_order<'a>(posts: &'a [PostItem], series: &str) -> Vec<&'a PostItem> {
    let mut in_series: Vec<&PostItem> = posts.iter()
        .filter(|post| post.meta.series.as_deref() == Some(series))
        .collect();

    in_series.sort_by(|a, b| {
        let part = match (a.meta.part, b.meta.part) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        };
        part.then_with(|| a.meta.date.cmp(&b.meta.date))
    });
    in_series
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::content::PostMeta;

    use super::*;

    fn post(url: &str, day: u32, tags: &[&str], series: Option<&str>, part: Option<u32>) -> PostItem {
        PostItem {
            url: url.to_string(),
            meta: PostMeta {
                title: url.to_string(),
                description: None,
                date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap().and_hms_opt(0, 0, 0).unwrap(),
                last_updated: None,
                tags: tags.iter().map(|t| t.to_string()).collect(),
                part,
                series: series.map(str::to_string),
                draft: false,
            },
        }
    }

    #[test]
    fn test_tag_frequency() {
        let posts = vec![
            post("/posts/a", 1, &["rust", "web"], None, None),
            post("/posts/b", 2, &["rust"], None, None),
            post("/posts/c", 3, &["svelte", "web", "algorithms"], None, None),
        ];

        assert_eq!(tag_frequency(&posts), vec![
            ("rust".to_string(), 2),
            ("web".to_string(), 2),
            ("algorithms".to_string(), 1),
            ("svelte".to_string(), 1),
        ]);
        assert!(tag_frequency(&[]).is_empty());
    }

    #[test]
    fn test_series_reading_order() {
        let posts = vec![
            post("/posts/epilogue", 9, &[], Some("alpha"), None),
            post("/posts/two", 2, &[], Some("alpha"), Some(2)),
            post("/posts/other", 3, &[], Some("beta"), Some(1)),
            post("/posts/one", 5, &[], Some("alpha"), Some(1)),
            post("/posts/notes", 4, &[], Some("alpha"), None),
        ];

        let urls: Vec<&str> = series_reading_order(&posts, "alpha").iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, ["/posts/one", "/posts/two", "/posts/notes", "/posts/epilogue"]);
        assert!(series_reading_order(&posts, "gamma").is_empty());
    }
}
