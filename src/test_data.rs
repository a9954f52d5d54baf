#[cfg(test)]
pub const POST_DATA_MDX: &str = r#"---
title: "Running ERPNext behind Let's Encrypt"
description: Certificates that renew themselves
date: 2023-12-01
tags:
  - erpnext
  - self-hosting
draft: false
---

<script>
	import Callout from '@components/Callout.svelte';
</script>

# Running ERPNext behind Let's Encrypt

The bench tool can set up certificates for you, until it can't.

<Callout>Back up `sites/` before you start.</Callout>
"#;

#[cfg(test)]
pub const POST_DATA_TOML_FRONTMATTER: &str = r#"+++
title = "Books of the year"
date = 2024-01-01T09:30:00
series = "reading-list"
part = 3
+++

Three books, one of them finished.
"#;

#[cfg(test)]
pub const POST_DATA_MANIFEST: &str = r#"[PostData]
title = "Sorting, visualised"
description = "Bubble sort, but you can watch it"
date = 2024-03-01
tags = ["algorithms", "svelte"]
series = "algorithms"
part = 1
draft = false

[Seo]
image = "/images/sorting.png"
"#;
