pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    /// A `page_size` of 0 puts everything on a single page.
    pub fn from(items: &'a [T], page_size: u32) -> Self {
        let page_size = match page_size {
            0 => (items.len() as u32).max(1),
            size => size,
        };
        let page_count = (items.len() as u32).div_ceil(page_size);

        Paginator {
            items,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn get_page(&self, page: u32) -> Result<&'a [T], String> {
        match page {
            0 => return Err("Page has to be greater than 0".to_string()),
            x if x > self.page_count => return Err(format!("Page has to be less than page_count ({})", self.page_count)),
            _ => {}
        };

        let items = self.items;
        Ok(items.chunks(self.page_size as usize)
            .nth((page - 1) as usize)
            .unwrap_or_default())
    }

    /// Brings a requested page into `1..=page_count`.
    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.page_count.max(1))
    }
}
