//! Terminal pages for reviewing decisions.
//!
//! Pages never talk to the terminal or to each other directly: navigation
//! goes through a `Navigator`, and page content comes from a `Panel`.
//! `terminal` wires both to crossterm.

pub mod panel;
pub mod terminal;
pub mod transparency;

use std::io::{self, Write};
use std::sync::Mutex;

pub use panel::DecisionPanel;
pub use transparency::{PageOutcome, TransparencyPage};

/// Route of the home screen.
pub const HOME_ROUTE: &str = "/";

/// Route of the transparency page.
pub const TRANSPARENCY_ROUTE: &str = "/transparency";

/// Outbound navigation capability.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Content hosted inside a page.
pub trait Panel {
    fn render(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Records the current route. Unknown paths fall back to home.
#[derive(Debug)]
pub struct Router {
    current: Mutex<String>,
}

impl Router {
    pub fn new(start: &str) -> Self {
        Self {
            current: Mutex::new(normalize_route(start).to_string()),
        }
    }

    pub fn current(&self) -> String {
        match self.current.lock() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Navigator for Router {
    fn navigate(&self, path: &str) {
        let route = normalize_route(path);
        tracing::debug!(route, "navigate");
        match self.current.lock() {
            Ok(mut current) => *current = route.to_string(),
            Err(poisoned) => *poisoned.into_inner() = route.to_string(),
        }
    }
}

fn normalize_route(path: &str) -> &'static str {
    match path.trim_end_matches('/') {
        "/transparency" | "transparency" => TRANSPARENCY_ROUTE,
        _ => HOME_ROUTE,
    }
}
