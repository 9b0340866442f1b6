//! Client-side routing
//!
//! - [`table`] - the fixed route table and exact-string resolver
//! - [`shell`] - header/footer chrome decision for a resolved page
//! - [`scroll`] - the scroll-to-top animation played on navigation
//! - [`navigator`] - current location, history and navigation events
//! - [`contact`] - the contact page's form and its confirmation popup

/// Route table, page identifiers and resolution.
pub mod table;
/// Page shell chrome.
pub mod shell;
/// Scroll reset easing.
pub mod scroll;
/// Location and history tracking.
pub mod navigator;
/// Contact form state.
pub mod contact;

pub use contact::{ContactForm, ContactRejected, ContactSubmission, CONFIRMATION_DURATION};
pub use navigator::{Navigation, Navigator};
pub use scroll::{ease_in_out_cubic, ScrollAnimation, DEFAULT_SCROLL_DURATION};
pub use shell::{Frame, HeaderScroll, PageShell};
pub use table::{PageId, Resolution, RouteEntry, RouteTable, NOT_FOUND_PATH};
