use std::collections::HashMap;

/// Query parameters of a request URL.
///
/// Repeated keys keep their first value, the same answer `URLSearchParams.get` gives.
#[derive(PartialEq, Debug, Default, Clone)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let mut items: HashMap<String, String> = HashMap::with_capacity(vs.len());
        for (key, val) in vs {
            items.entry(key).or_insert(val);
        }

        QueryString {
            items,
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn get_page(&self) -> u32 {
        match self.get("page").map(str::parse::<u32>) {
            Some(Ok(page)) if page > 0 => page,
            _ => 1,
        }
    }
}
