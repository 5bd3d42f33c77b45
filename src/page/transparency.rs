//! The transparency page: a back-to-home header above a hosted panel.

use crate::page::{Navigator, Panel, HOME_ROUTE};
use crossterm::event::KeyCode;
use std::io::{self, Write};

/// Result of handing a key to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The back control was activated and the navigator was called
    NavigatedHome,
    /// The page does not react to this key
    Ignored,
}

/// Header with a single back control, then whatever the panel renders.
/// Holds no state of its own.
pub struct TransparencyPage<'a> {
    panel: &'a dyn Panel,
    navigator: &'a dyn Navigator,
}

impl<'a> TransparencyPage<'a> {
    pub fn new(panel: &'a dyn Panel, navigator: &'a dyn Navigator) -> Self {
        Self { panel, navigator }
    }

    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "  ← Back to home  [b]")?;
        writeln!(out)?;
        writeln!(out, "  AI Decision Transparency")?;
        writeln!(out, "  {}", "━".repeat(40))?;
        writeln!(out)?;
        self.panel.render(out)
    }

    pub fn handle_key(&self, key: KeyCode) -> PageOutcome {
        match key {
            KeyCode::Char('b')
            | KeyCode::Char('B')
            | KeyCode::Esc
            | KeyCode::Backspace
            | KeyCode::Left => {
                self.navigator.navigate(HOME_ROUTE);
                PageOutcome::NavigatedHome
            }
            _ => PageOutcome::Ignored,
        }
    }
}
