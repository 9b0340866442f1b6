use crate::routing::table::{PageId, Resolution};
use serde::Serialize;

/// What the page shell renders around a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub header: bool,
    pub footer: bool,
    pub page: PageId,
}

/// Wraps a resolved page with optional header/footer chrome
pub struct PageShell;

impl PageShell {
    pub fn frame(resolution: &Resolution) -> Frame {
        Frame {
            header: resolution.chrome,
            footer: resolution.chrome,
            page: resolution.page,
        }
    }
}

/// Past this offset the header switches to its solid background.
pub const HEADER_SOLID_AFTER: f64 = 10.0;
/// Scrolling down past this offset slides the header out of view.
pub const HEADER_HIDE_AFTER: f64 = 100.0;

/// Header appearance driven by the viewport's scroll events
///
/// Hidden only while scrolling down below [`HEADER_HIDE_AFTER`]; any upward
/// scroll brings it back.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HeaderScroll {
    last_offset: f64,
    solid: bool,
    hidden: bool,
}

impl HeaderScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one scroll event
    pub fn observe(&mut self, offset: f64) {
        self.solid = offset > HEADER_SOLID_AFTER;
        self.hidden = offset > self.last_offset && offset > HEADER_HIDE_AFTER;
        self.last_offset = offset;
    }

    pub fn is_solid(&self) -> bool {
        self.solid
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}
