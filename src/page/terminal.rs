//! Terminal app hosting the home screen and the transparency page.
//!
//! Screens are drawn in cooked mode; raw mode is only enabled while waiting
//! for a single keystroke, on a blocking thread since crossterm uses
//! synchronous I/O.

use crate::decision::{BoundContext, DecisionLogger};
use crate::page::{DecisionPanel, Navigator, Router, TransparencyPage, HOME_ROUTE, TRANSPARENCY_ROUTE};
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, Clear, ClearType},
};
use std::io::Write;

/// Whether the app keeps running after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Quit,
}

/// Run the app until the user quits.
pub async fn run_app(logger: DecisionLogger, start_route: &str, message_id: Option<String>) -> Result<()> {
    let router = Router::new(start_route);
    let mut panel: Option<DecisionPanel> = None;

    loop {
        let route = router.current();
        if route == TRANSPARENCY_ROUTE {
            if panel.is_none() {
                panel = Some(DecisionPanel::load(&logger, message_id.as_deref()).await);
            }
        } else {
            // Reload on the next visit
            panel = None;
        }

        let mut screen = Vec::new();
        render_screen(&route, panel.as_ref(), logger.context(), &router, &mut screen)?;
        let mut stdout = std::io::stdout();
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        stdout.write_all(&screen)?;
        stdout.flush()?;

        let key = tokio::task::spawn_blocking(read_key).await??;
        if dispatch_key(&route, key, panel.as_ref(), &router) == AppControl::Quit {
            break;
        }
    }

    Ok(())
}

/// Draw the screen for `route` into `out`.
pub fn render_screen(
    route: &str,
    panel: Option<&DecisionPanel>,
    context: &BoundContext,
    navigator: &dyn Navigator,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    writeln!(out)?;
    match (route, panel) {
        (TRANSPARENCY_ROUTE, Some(panel)) => {
            TransparencyPage::new(panel, navigator).render(out)?;
            writeln!(out)?;
            writeln!(out, "  [b] Back    [q] Quit")
        }
        _ => {
            writeln!(out, "  clearsight — decision transparency")?;
            writeln!(out, "  {}", "━".repeat(40))?;
            writeln!(out)?;
            writeln!(out, "  Assistant: {}", context.assistant_id)?;
            writeln!(out, "  Session:   {}", context.session_id)?;
            writeln!(out)?;
            writeln!(out, "  [t] Transparency    [q] Quit")
        }
    }
}

/// Apply one key to the current route.
pub fn dispatch_key(
    route: &str,
    key: KeyEvent,
    panel: Option<&DecisionPanel>,
    router: &Router,
) -> AppControl {
    let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) {
        return AppControl::Quit;
    }

    match (route, panel) {
        (TRANSPARENCY_ROUTE, Some(panel)) => {
            TransparencyPage::new(panel, router).handle_key(key.code);
        }
        _ => {
            if matches!(key.code, KeyCode::Char('t') | KeyCode::Char('T') | KeyCode::Enter) {
                router.navigate(TRANSPARENCY_ROUTE);
            } else if route != HOME_ROUTE {
                router.navigate(HOME_ROUTE);
            }
        }
    }
    AppControl::Continue
}

/// Block until one key press arrives.
fn read_key() -> Result<KeyEvent> {
    terminal::enable_raw_mode()?;
    let result = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(key),
            Ok(_) => continue,
            Err(e) => break Err(e.into()),
        }
    };
    terminal::disable_raw_mode()?;
    result
}
