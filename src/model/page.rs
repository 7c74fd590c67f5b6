//! Page window - pagination state for the listing

/// Allowed page sizes
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current page, page size and the server-reported total for the active query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageWindow {
    /// Create a window; sizes outside the option set fall back to the default
    pub fn new(page_size: usize) -> Self {
        let page_size = if PAGE_SIZE_OPTIONS.contains(&page_size) {
            page_size
        } else {
            DEFAULT_PAGE_SIZE
        };
        Self {
            page: 1,
            page_size,
            total: 0,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Returns true if the page changed
    pub fn next_page(&mut self) -> bool {
        if self.has_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Returns true if the page changed
    pub fn prev_page(&mut self) -> bool {
        if self.has_prev() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Back to page 1 for a different query. The previous total no longer
    /// applies, so navigation stays disabled until the new total arrives.
    pub fn restart(&mut self) {
        self.page = 1;
        self.total = 0;
    }

    /// Change the page size and go back to the first page.
    /// Sizes outside the option set are ignored.
    pub fn set_page_size(&mut self, size: usize) {
        if PAGE_SIZE_OPTIONS.contains(&size) {
            self.page_size = size;
            self.page = 1;
        }
    }

    /// Next larger page size, wrapping around
    pub fn cycle_page_size_up(&mut self) {
        let idx = self.size_index();
        self.set_page_size(PAGE_SIZE_OPTIONS[(idx + 1) % PAGE_SIZE_OPTIONS.len()]);
    }

    /// Next smaller page size, wrapping around
    pub fn cycle_page_size_down(&mut self) {
        let idx = self.size_index();
        let prev = if idx == 0 {
            PAGE_SIZE_OPTIONS.len() - 1
        } else {
            idx - 1
        };
        self.set_page_size(PAGE_SIZE_OPTIONS[prev]);
    }

    fn size_index(&self) -> usize {
        PAGE_SIZE_OPTIONS
            .iter()
            .position(|s| *s == self.page_size)
            .unwrap_or(0)
    }

    /// Record the total of a successful fetch and clamp the page into range.
    /// Returns true if the page had to move.
    pub fn apply_total(&mut self, total: usize) -> bool {
        self.total = total;
        let clamped = self.page.clamp(1, self.total_pages());
        let moved = clamped != self.page;
        self.page = clamped;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        let mut window = PageWindow::new(10);
        window.apply_total(41);
        assert_eq!(window.total_pages(), 5);
        window.apply_total(40);
        assert_eq!(window.total_pages(), 4);
    }

    #[test]
    fn test_total_pages_never_zero() {
        let window = PageWindow::new(25);
        assert_eq!(window.total_pages(), 1);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut window = PageWindow::new(10);
        window.apply_total(25);

        assert!(!window.prev_page());
        assert_eq!(window.page, 1);

        assert!(window.next_page());
        assert!(window.next_page());
        assert_eq!(window.page, 3);
        assert!(!window.has_next());
        assert!(!window.next_page());
        assert_eq!(window.page, 3);
    }

    #[test]
    fn test_every_page_size_change_resets_page() {
        for size in PAGE_SIZE_OPTIONS {
            let mut window = PageWindow::new(10);
            window.apply_total(1000);
            window.next_page();
            window.next_page();
            window.set_page_size(size);
            assert_eq!(window.page, 1, "page size {}", size);
            assert_eq!(window.page_size, size);
        }
    }

    #[test]
    fn test_invalid_page_size_ignored() {
        let mut window = PageWindow::new(10);
        window.set_page_size(33);
        assert_eq!(window.page_size, 10);
        assert_eq!(PageWindow::new(7).page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_cycle_page_size() {
        let mut window = PageWindow::new(100);
        window.cycle_page_size_up();
        assert_eq!(window.page_size, 10);
        window.cycle_page_size_down();
        assert_eq!(window.page_size, 100);
    }

    #[test]
    fn test_restart_forgets_previous_total() {
        let mut window = PageWindow::new(10);
        window.apply_total(30);
        window.next_page();

        window.restart();
        assert_eq!(window.page, 1);
        assert_eq!(window.total_pages(), 1);
        assert!(!window.next_page());
    }

    #[test]
    fn test_apply_total_clamps_page() {
        let mut window = PageWindow::new(10);
        window.apply_total(100);
        for _ in 0..9 {
            window.next_page();
        }
        assert_eq!(window.page, 10);

        assert!(window.apply_total(15));
        assert_eq!(window.page, 2);

        assert!(window.apply_total(0));
        assert_eq!(window.page, 1);
    }
}
