//! Static route table and exact-string resolver

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Location the catch-all redirects to.
pub const NOT_FOUND_PATH: &str = "/404";

/// Every page the site can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageId {
    Home,
    NotFound,
    Contact,
    About,
    Services,
    Products,
    Blogs,
    QuantumComputing,
    AiIntegration,
    QuantumEncryption,
    QuantumNetwork,
    QuantumMachineLearning,
    PrivacyPolicyTerms,
}

impl PageId {
    /// Human-readable page title
    pub fn title(&self) -> &'static str {
        match self {
            PageId::Home => "Home",
            PageId::NotFound => "Page Not Found",
            PageId::Contact => "Contact Us",
            PageId::About => "About Us",
            PageId::Services => "Services",
            PageId::Products => "Products",
            PageId::Blogs => "Blog",
            PageId::QuantumComputing => "Quantum Computing Use Cases",
            PageId::AiIntegration => "AI Integration",
            PageId::QuantumEncryption => "Quantum Encryption",
            PageId::QuantumNetwork => "Quantum Networks",
            PageId::QuantumMachineLearning => "Quantum Machine Learning",
            PageId::PrivacyPolicyTerms => "Privacy Policy & Terms",
        }
    }

    /// Whether the page mounts a chat widget
    ///
    /// Only the home page carries one (the live demo section).
    pub fn has_chat_widget(&self) -> bool {
        matches!(self, PageId::Home)
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// One registered `(path, page)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub path: String,
    pub page: PageId,
    /// Whether the page shell renders header and footer around this page
    pub chrome: bool,
}

/// Outcome of resolving a path. Resolution never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub page: PageId,
    /// Location the browser ends up on (the catch-all target for misses)
    pub location: String,
    /// The requested path when the catch-all redirected it
    pub redirected_from: Option<String>,
    pub chrome: bool,
}

impl Resolution {
    pub fn is_redirect(&self) -> bool {
        self.redirected_from.is_some()
    }
}

/// Ordered route list with a catch-all
///
/// Matching is exact-string, first registration wins, and paths are never
/// normalized: `//privacy-policy-terms` and `/privacy-policy-terms` are
/// different routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    fallback: RouteEntry,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// Create a table that only knows the catch-all
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            fallback: RouteEntry {
                path: NOT_FOUND_PATH.to_string(),
                page: PageId::NotFound,
                chrome: false,
            },
        }
    }

    /// The QuantumLeap site routes, in registration order
    pub fn site() -> Self {
        Self::new()
            .register("/", PageId::Home)
            .register(NOT_FOUND_PATH, PageId::NotFound)
            .register("/contact", PageId::Contact)
            .register("/about", PageId::About)
            .register("/services", PageId::Services)
            .register("/products", PageId::Products)
            .register("/blogs", PageId::Blogs)
            .register("/quantumcomputing", PageId::QuantumComputing)
            .register("/aiintegeration", PageId::AiIntegration)
            .register("/quantumencryption", PageId::QuantumEncryption)
            .register("/quantumnetwork", PageId::QuantumNetwork)
            .register("/quantummachinelearning", PageId::QuantumMachineLearning)
            .register("//privacy-policy-terms", PageId::PrivacyPolicyTerms)
    }

    /// Register a route verbatim
    ///
    /// The not-found page is registered without chrome; everything else gets
    /// header and footer. A path registered twice keeps its first page.
    pub fn register(mut self, path: impl Into<String>, page: PageId) -> Self {
        self.entries.push(RouteEntry {
            path: path.into(),
            page,
            chrome: page != PageId::NotFound,
        });
        self
    }

    /// Suppress header and footer for every entry of `page`
    pub fn without_chrome(mut self, page: PageId) -> Self {
        for entry in self.entries.iter_mut().filter(|e| e.page == page) {
            entry.chrome = false;
        }
        self
    }

    /// Resolve a path to exactly one page
    pub fn resolve(&self, path: &str) -> Resolution {
        if let Some(entry) = self.entries.iter().find(|e| e.path == path) {
            return Resolution {
                page: entry.page,
                location: entry.path.clone(),
                redirected_from: None,
                chrome: entry.chrome,
            };
        }

        debug!(path, target = %self.fallback.path, "No route matched, redirecting");

        // The catch-all lands on the registered not-found route when there is
        // one, so its chrome setting applies.
        let target = self
            .entries
            .iter()
            .find(|e| e.path == self.fallback.path)
            .unwrap_or(&self.fallback);

        Resolution {
            page: target.page,
            location: target.path.clone(),
            redirected_from: Some(path.to_string()),
            chrome: target.chrome,
        }
    }

    /// Registered entries in registration order (catch-all excluded)
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
