use std::{
    fs::{self, File},
    io::{self, IsTerminal},
    time::{Duration, Instant},
};

use color_eyre::eyre::WrapErr;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
};
use letterfall_background::{
    CellMetrics, PAPER, PointerEvent, PointerKind, Scene, SceneOptions, contrast_ink, to_color,
};
use letterfall_config::Config;
use ratatui::{DefaultTerminal, Frame};

mod foreground;

use foreground::Foreground;

/// How long to wait for input before drawing the next frame.
const FRAME_BUDGET: Duration = Duration::from_millis(16);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    if !io::stdout().is_terminal() {
        eprintln!("letterfall: stdout is not a terminal, nothing to draw");
        return Ok(());
    }

    init_logging()?;
    let config = letterfall_config::load()?;

    let terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture)
        .wrap_err("enabling mouse capture")
        .and_then(|()| App::new(&config).run(terminal));
    if let Err(err) = execute!(io::stdout(), DisableMouseCapture) {
        log::warn!("could not disable mouse capture: {err}");
    }
    ratatui::restore();
    result
}

/// Send log records to a file in the cache directory; the terminal belongs to the UI.
fn init_logging() -> color_eyre::Result<()> {
    let Some(dirs) = letterfall_config::project_dirs() else {
        return Ok(());
    };
    let dir = dirs.cache_dir();
    fs::create_dir_all(dir).wrap_err_with(|| format!("creating {}", dir.display()))?;
    let path = dir.join("letterfall.log");
    let file = File::create(&path).wrap_err_with(|| format!("creating {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// The falling glyphs.
    scene: Scene,
    /// Settings reused whenever the scene is rebuilt.
    options: SceneOptions,
    /// Title and help cards.
    foreground: Foreground,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config) -> Self {
        let defaults = CellMetrics::default();
        let options = SceneOptions {
            paper: config.paper_color().unwrap_or(PAPER),
            show_bounds: config.show_bounds,
            cells: CellMetrics::new(
                config.cell_width.unwrap_or(defaults.width),
                config.cell_height.unwrap_or(defaults.height),
            ),
        };
        let paper = options.paper;
        let foreground = Foreground::new(
            config.title(),
            config.tagline(),
            contrast_ink(paper),
            to_color((paper.r, paper.g, paper.b)),
        );

        Self {
            running: false,
            scene: Scene::new(config.preset, options),
            options,
            foreground,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Step the scene and draw it with the cards on top.
    fn render(&mut self, frame: &mut Frame) {
        let now = Instant::now();
        let area = frame.area();
        let preset = self.scene.preset();
        let cards = self.foreground.layout(area, preset);

        self.scene.update(area, &cards.regions(), now);
        self.scene.render(frame.buffer_mut(), area, now);

        let status = self.scene.status_lines();
        self.foreground
            .render(frame.buffer_mut(), &cards, preset, &status);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_BUDGET)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                // The next frame picks up the new size.
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('p')) => self.switch_preset(),
            (_, KeyCode::Char('c')) => {
                self.scene.clear_glyphs();
            }
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let kind = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
            MouseEventKind::Drag(MouseButton::Left) => PointerKind::Drag,
            MouseEventKind::Up(MouseButton::Left) => PointerKind::Up,
            _ => return,
        };
        self.scene
            .handle_pointer(PointerEvent::new(kind, mouse.column, mouse.row));
    }

    /// Replace the scene with a fresh one running the next preset.
    fn switch_preset(&mut self) {
        let preset = self.scene.preset().next();
        log::info!("switching to {} preset", preset.name());
        self.scene = Scene::new(preset, self.options);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
