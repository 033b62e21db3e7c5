mod host;
mod logging;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use dotfield_background::{CellCanvas, Controller};
use dotfield_config::Config;
use dotfield_core::{Profile, Theme};
use glam::Vec2;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::{Line, Span},
};

use crate::host::TerminalHost;

/// The field fills the whole terminal, so the surface starts at the origin.
const SURFACE_ORIGIN: Vec2 = Vec2::ZERO;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init()?;
    let config = Config::load()?;
    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current color theme.
    theme: Theme,
    /// Current animation profile.
    profile: Profile,
    config: Config,
    controller: Controller<TerminalHost>,
    canvas: CellCanvas,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let host = TerminalHost::new(config.cell, config.frame_interval());
        let controller = Controller::new(host, config.field_settings());
        Self {
            running: false,
            theme: config.theme,
            profile: config.profile,
            canvas: CellCanvas::new(0, 0, config.cell),
            controller,
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let size = terminal.size()?;
        self.canvas.resize(size.width, size.height);
        self.controller.start();

        terminal.draw(|frame| self.render(frame))?;
        while self.running {
            let mut dirty = self.handle_crossterm_events()?;
            if let Some(handle) = self.controller.host_mut().take_due_frame() {
                dirty |= self.controller.on_frame(handle, &mut self.canvas, self.theme);
            }
            if dirty {
                terminal.draw(|frame| self.render(frame))?;
            }
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(self.canvas.view(self.theme), area);

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Dot field
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let accent = self.theme.accent();
        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".dark_gray(),
            "t".bold().fg(accent),
            " toggle theme  ".dark_gray(),
            "p".bold().fg(accent),
            Span::from(format!(" profile: {}", self.profile.name())).dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most until the next frame is due. Returns whether the
    /// screen needs redrawing.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<bool> {
        let timeout = self.controller.host().time_until_frame();
        if !event::poll(timeout)? {
            return Ok(false);
        }
        let dirty = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.on_key_event(key);
                true
            }
            Event::Mouse(mouse) => {
                self.on_mouse_event(mouse);
                false
            }
            Event::Resize(cols, rows) => {
                self.on_resize(cols, rows);
                true
            }
            Event::FocusLost => {
                self.controller.on_pointer_leave();
                false
            }
            _ => false,
        };
        Ok(dirty)
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Char('p')) => self.cycle_profile(),
            _ => {}
        }
    }

    /// Forward pointer motion to the controller.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if !self.controller.host().wants_pointer() {
            return;
        }
        if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
            let (x, y) = self.config.cell.cell_center(mouse.column, mouse.row);
            self.controller.on_pointer_move(Vec2::new(x, y), SURFACE_ORIGIN);
        }
    }

    /// Match the canvas to the terminal and rebuild the grid.
    fn on_resize(&mut self, cols: u16, rows: u16) {
        self.canvas.resize(cols, rows);
        if self.controller.host().wants_resize() {
            let surface = self.config.cell.surface_size(cols, rows);
            self.controller.on_resize(surface);
        }
    }

    /// Switch between light and dark themes.
    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }

    /// Cycle to the next animation profile, restarting the field.
    fn cycle_profile(&mut self) {
        self.profile = self.profile.next();
        let settings = self.config.settings_for(self.profile);
        self.controller.restart(settings);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
