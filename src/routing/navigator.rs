use crate::routing::scroll::ScrollAnimation;
use crate::routing::shell::HeaderScroll;
use crate::routing::table::{Resolution, RouteTable};
use tracing::info;

/// Result of one navigation
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub from: Resolution,
    pub to: Resolution,
    pub scroll: ScrollAnimation,
}

impl Navigation {
    /// Whether the host must unmount the previous page's components
    pub fn page_changed(&self) -> bool {
        self.from.page != self.to.page || self.from.location != self.to.location
    }
}

/// Client-side location state on top of a fixed route table
///
/// Redirects replace the requested location instead of pushing it, so the
/// history only ever holds locations that resolved directly.
pub struct Navigator {
    table: RouteTable,
    current: Resolution,
    history: Vec<String>,
    scroll_offset: f64,
    header: HeaderScroll,
}

impl Navigator {
    /// Start at `initial`, resolved like any other navigation
    pub fn new(table: RouteTable, initial: &str) -> Self {
        let current = table.resolve(initial);
        Self {
            table,
            history: vec![current.location.clone()],
            current,
            scroll_offset: 0.0,
            header: HeaderScroll::new(),
        }
    }

    pub fn current(&self) -> &Resolution {
        &self.current
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Locations visited, oldest first, current last
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Header state following the recorded scroll positions
    pub fn header(&self) -> &HeaderScroll {
        &self.header
    }

    /// Record the viewport's scroll position
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset.max(0.0);
        self.header.observe(self.scroll_offset);
    }

    pub fn navigate(&mut self, path: &str) -> Navigation {
        let to = self.table.resolve(path);
        self.history.push(to.location.clone());

        info!(
            path,
            location = %to.location,
            page = ?to.page,
            redirected = to.is_redirect(),
            "Navigated"
        );

        self.transition(to)
    }

    /// Go back one entry; `None` when already at the oldest location
    pub fn back(&mut self) -> Option<Navigation> {
        if self.history.len() < 2 {
            return None;
        }
        self.history.pop();
        let previous = self.history.last()?.clone();
        let to = self.table.resolve(&previous);
        Some(self.transition(to))
    }

    fn transition(&mut self, to: Resolution) -> Navigation {
        let scroll = ScrollAnimation::new(self.scroll_offset);
        self.scroll_offset = 0.0;
        self.header.observe(0.0);
        let from = std::mem::replace(&mut self.current, to.clone());
        Navigation { from, to, scroll }
    }
}
