//! Page tracking for the sheet list.

use crossterm::event::{KeyCode, KeyEvent};

/// Tracks the active page (sheet) against a known page count.
///
/// Paging stops at either end; it never wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    total_pages: usize,
}

impl Pager {
    /// Create a pager on the first of `total_pages` pages.
    pub fn new(total_pages: usize) -> Self {
        let mut pager = Self {
            page: 0,
            total_pages: 1,
        };
        pager.set_total_pages(total_pages);
        pager
    }

    /// Zero-based index of the current page.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    fn on_first_page(&self) -> bool {
        self.page == 0
    }

    fn on_last_page(&self) -> bool {
        self.page + 1 >= self.total_pages
    }

    /// Move to the previous page, if any.
    pub fn prev(&mut self) {
        if !self.on_first_page() {
            self.page -= 1;
        }
    }

    /// Move to the next page, if any.
    pub fn next(&mut self) {
        if !self.on_last_page() {
            self.page += 1;
        }
    }

    /// Update the page count, keeping the current page in range.
    fn set_total_pages(&mut self, total_pages: usize) {
        self.total_pages = total_pages.max(1);
        self.page = self.page.min(self.total_pages - 1);
    }

    /// React to the pager's own keys (PageUp / PageDown).
    pub fn handle_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::PageUp => self.prev(),
            KeyCode::PageDown => self.next(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_pager_does_not_wrap() {
        let mut pager = Pager::new(3);
        pager.prev();
        assert_eq!(pager.page(), 0);

        for _ in 0..10 {
            pager.next();
        }
        assert_eq!(pager.page(), 2);
        assert!(pager.on_last_page());
    }

    #[test]
    fn test_pager_set_total_pages_clamps() {
        let mut pager = Pager::new(5);
        pager.next();
        pager.next();
        pager.next();
        pager.set_total_pages(2);
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.total_pages(), 2);
    }

    #[test]
    fn test_pager_keys() {
        let mut pager = Pager::new(2);
        pager.handle_key(&KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE));
        assert_eq!(pager.page(), 1);
        pager.handle_key(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(pager.page(), 1);
        pager.handle_key(&KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE));
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_pager_zero_pages_behaves_as_one() {
        let mut pager = Pager::new(0);
        pager.next();
        assert_eq!(pager.page(), 0);
        assert_eq!(pager.total_pages(), 1);
    }
}
