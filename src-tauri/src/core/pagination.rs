use super::config::{PageCountStrategy, ITEMS_PER_PAGE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub items_per_page: u32,
    pub total_pages: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_per_page: ITEMS_PER_PAGE,
            total_pages: 1,
        }
    }
}

impl PageState {
    pub fn contains(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    /// Moves to `page` when it is in `[1, total_pages]`. Returns whether it moved.
    pub fn request_page(&mut self, page: u32) -> bool {
        if !self.contains(page) {
            return false;
        }
        self.current_page = page;
        true
    }
}

/// Never below 1, so page 1 stays reachable after an empty result.
pub fn compute_total_pages(
    strategy: PageCountStrategy,
    returned: usize,
    public_repo_count: u64,
    per_page: u32,
) -> u32 {
    let per_page = u64::from(per_page.max(1));
    let items = match strategy {
        PageCountStrategy::ReturnedCount => returned as u64,
        PageCountStrategy::PublicRepos => public_repo_count,
    };
    u32::try_from(items.div_ceil(per_page))
        .unwrap_or(u32::MAX)
        .max(1)
}

/// Page links, or an empty string when there is at most one page.
pub fn render_pagination(state: &PageState) -> String {
    if state.total_pages <= 1 {
        return String::new();
    }
    let current = state.current_page;
    let last = state.total_pages;

    let pages: String = (1..=last)
        .map(|page| {
            let (class, aria) = if page == current {
                (" active", r#" aria-current="page""#)
            } else {
                ("", "")
            };
            format!(
                r##"
        <li class="page-item{class}">
            <a class="page-link" href="#" data-page="{page}"{aria}>{page}</a>
        </li>"##
            )
        })
        .collect();

    format!(
        r##"<nav aria-label="Page navigation">
    <ul class="pagination">
        <li class="page-item{prev_disabled}">
            <a class="page-link" href="#" data-page="{prev}" aria-label="Previous">
                <span aria-hidden="true">&laquo;</span>
            </a>
        </li>{pages}
        <li class="page-item{next_disabled}">
            <a class="page-link" href="#" data-page="{next}" aria-label="Next">
                <span aria-hidden="true">&raquo;</span>
            </a>
        </li>
    </ul>
</nav>"##,
        prev_disabled = if current <= 1 { " disabled" } else { "" },
        prev = current.saturating_sub(1),
        pages = pages,
        next_disabled = if current >= last { " disabled" } else { "" },
        next = current.saturating_add(1),
    )
}

#[cfg(test)]
#[path = "tests/pagination.rs"]
mod tests;
