mod input;
mod logging;

use std::io;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyEvent, KeyEventKind, MouseEvent,
    },
    execute,
};
use glam::Vec2;
use nightbridge_config::Config;
use nightbridge_core::Viewport;
use nightbridge_scene::{DrawList, Scene, SceneCanvas, SceneOptions, color::MOON};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Stylize},
    text::Line,
};
use tracing::{info, trace, warn};

use crate::input::{Action, EditAction, PointerEvent, edit_action, key_action, pointer_event};

/// Longest text accepted by the footer editor.
const MAX_TEXT_LEN: usize = 32;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if let Ok(path) = logging::init(&config.log_level) {
        info!(path = %path.display(), "nightbridge starting");
    }
    if let Some(e) = config_error {
        warn!(error = %e, "could not load config, using defaults");
    }

    let terminal = ratatui::init();
    let result = run(terminal, config);
    let cleanup = execute!(io::stdout(), DisableMouseCapture, DisableFocusChange);
    ratatui::restore();
    result?;
    cleanup?;
    Ok(())
}

fn run(terminal: DefaultTerminal, config: Config) -> color_eyre::Result<()> {
    execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)?;
    App::new(config).run(terminal)
}

/// Seed from the configuration, or from the clock.
fn scene_seed(config: &Config) -> u64 {
    config.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    })
}

fn scene_options(config: &Config) -> SceneOptions {
    SceneOptions {
        toggles: config.scene.toggles,
        influence_radius: config.scene.influence_radius,
        car_count: config.scene.car_count,
        heart_count: config.scene.heart_count,
        speed: config.scene.speed,
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Loaded configuration.
    config: Config,
    /// Animated scene state.
    scene: Scene,
    /// Draw calls of the current frame, replayed by the canvas widget.
    frame: DrawList,
    /// Text being typed in the footer, when editing.
    editor: Option<String>,
    /// Terminal area covered by the scene in the last frame.
    canvas_area: Rect,
    /// Animation clock origin.
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let scene = Scene::new(
            Viewport::default(),
            config.text.clone(),
            scene_options(&config),
            scene_seed(&config),
        );
        Self {
            running: false,
            config,
            scene,
            frame: DrawList::new(),
            editor: None,
            canvas_area: Rect::default(),
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let budget = Duration::from_millis(self.config.display.frame_interval_ms());
        while self.running {
            let deadline = Instant::now() + budget;
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(deadline)?;
        }
        info!("nightbridge exiting");
        Ok(())
    }

    /// Size of one terminal cell in scene pixels.
    fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.config.display.cell_width as f32,
            self.config.display.cell_height as f32,
        )
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let [canvas_area, footer_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        self.canvas_area = canvas_area;

        let viewport = Viewport::from_cells(
            canvas_area.width,
            canvas_area.height,
            self.config.display.cell_width,
            self.config.display.cell_height,
        );
        self.scene.resize(viewport);

        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        self.frame.reset();
        let stats = self.scene.frame(&mut self.frame, elapsed_ms);
        trace!(
            particles = stats.particles,
            connections = stats.connections,
            cable_snaps = stats.cable_snaps,
            bursts = stats.bursts,
            sparks = stats.sparks,
            "frame"
        );

        frame.render_widget(SceneCanvas::new(&self.frame, viewport), canvas_area);
        frame.render_widget(self.footer(), footer_area);
    }

    /// Key help, or the text editor while editing.
    fn footer(&self) -> Line<'static> {
        let accent = Color::from(MOON);
        match &self.editor {
            Some(text) => Line::from(vec![
                "text ".dark_gray(),
                format!("{text}_").bold().fg(accent),
                "  enter".bold().fg(accent),
                " apply  ".dark_gray(),
                "esc".bold().fg(accent),
                " cancel".dark_gray(),
            ])
            .centered(),
            None => {
                let speed = self.scene.options().speed.label();
                Line::from(vec![
                    "q".bold().fg(accent),
                    " quit  ".dark_gray(),
                    "e".bold().fg(accent),
                    " edit text  ".dark_gray(),
                    "h/s/m".bold().fg(accent),
                    " hearts/stars/moon  ".dark_gray(),
                    "f".bold().fg(accent),
                    " fireworks  ".dark_gray(),
                    "v".bold().fg(accent),
                    format!(" speed ({speed})").dark_gray(),
                ])
                .centered()
            }
        }
    }

    /// Reads crossterm events until `deadline`, the start of the next frame.
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        while self.running {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::FocusLost => self.scene.clear_pointer(),
                // The next render picks up the new size.
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if let Some(text) = self.editor.as_mut() {
            match edit_action(key) {
                Some(EditAction::Insert(c)) if text.chars().count() < MAX_TEXT_LEN => text.push(c),
                Some(EditAction::Backspace) => {
                    text.pop();
                }
                Some(EditAction::Apply) => {
                    let text = std::mem::take(text);
                    self.editor = None;
                    self.scene.set_text(text.trim());
                }
                Some(EditAction::Cancel) => self.editor = None,
                _ => {}
            }
            return;
        }

        match key_action(key) {
            Some(Action::Quit) => self.quit(),
            Some(Action::EditText) => self.editor = Some(self.scene.text().to_string()),
            Some(Action::ToggleHearts) => self.scene.toggles_mut().toggle_hearts(),
            Some(Action::ToggleStars) => self.scene.toggles_mut().toggle_stars(),
            Some(Action::ToggleMoon) => self.scene.toggles_mut().toggle_moon(),
            Some(Action::FireworkShow) => self.scene.launch_show(
                self.config.fireworks.show_bursts,
                self.config.fireworks.show_interval_ms,
            ),
            Some(Action::CycleSpeed) => self.cycle_speed(),
            None => {}
        }
    }

    /// Moves the pointer or launches a burst.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match pointer_event(mouse, self.canvas_area, self.cell_size()) {
            Some(PointerEvent::Move(at)) => self.scene.set_pointer(Some(at)),
            Some(PointerEvent::Leave) => self.scene.clear_pointer(),
            Some(PointerEvent::Burst(at)) => {
                self.scene.spawn_burst(at);
                self.scene.set_pointer(Some(at));
            }
            None => {}
        }
    }

    /// Cycle through the animation speeds.
    fn cycle_speed(&mut self) {
        let speed = self.scene.options().speed.next();
        self.scene.set_speed(speed);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
