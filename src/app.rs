//! Screen state machine.
//!
//! Every screen (menus, play, pause, game over, score entry) is a state of
//! one flat frame loop.  `App::frame` consumes one input snapshot and
//! advances whichever screen is current; `App::draw` renders it.

use std::path::{Path, PathBuf};

use crossterm::style::Color;
use rand::Rng;

use crate::audio::Audio;
use crate::entities::Entity;
use crate::input::InputSnapshot;
use crate::scores::{check_path, top_scores, write_score, TopScores};
use crate::session::{FrameEvent, GameOverReason, Session};
use crate::surface::{Bounds, Rect, Surface};
use crate::ui::{Button, InputField};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// What a screen asks the app to do next.
#[derive(Clone, Debug, PartialEq)]
enum Action {
    Play,
    Pause,
    Resume,
    GameOver,
    SaveScore,
    BackToGameOver,
    OpenScoreFile,
    ShowScores(Option<PathBuf>),
    BackToMenu,
    Quit,
}

// ── Screens ───────────────────────────────────────────────────────────────────

pub enum Screen {
    MainMenu(MainMenu),
    Playing,
    Paused(PauseMenu),
    GameOver(GameOverMenu),
    SaveScore(SaveScoreMenu),
    ScoreFile(ScoreFileMenu),
    TopScores(TopScoresView),
}

pub struct MainMenu {
    play: Button,
    scores: Button,
    quit: Button,
}

impl MainMenu {
    fn new(field: Bounds) -> Self {
        let mid = field.height / 2.0;
        MainMenu {
            play: Button::centered("Play", field, mid, 200.0, Some('p')),
            scores: Button::centered("High Scores", field, mid + 125.0, 300.0, Some('h')),
            quit: Button::centered("Quit", field, mid + 250.0, 200.0, Some('q')),
        }
    }

    fn update(&mut self, input: &InputSnapshot) -> Option<Action> {
        if self.play.poll(input) {
            Some(Action::Play)
        } else if self.scores.poll(input) {
            Some(Action::OpenScoreFile)
        } else if self.quit.poll(input) {
            Some(Action::Quit)
        } else {
            None
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.text_centered(300.0, "Pixel Defender", Color::White);
        self.play.draw(surface);
        self.scores.draw(surface);
        self.quit.draw(surface);
    }
}

pub struct PauseMenu {
    quit: Button,
}

impl PauseMenu {
    fn new(field: Bounds) -> Self {
        PauseMenu { quit: Button::centered("Quit", field, field.height / 2.0 + 120.0, 200.0, Some('q')) }
    }

    /// Resumes on a fresh SPACE press, not a held fire key.
    fn update(&mut self, input: &InputSnapshot) -> Option<Action> {
        if input.resume {
            Some(Action::Resume)
        } else if self.quit.poll(input) {
            Some(Action::Quit)
        } else {
            None
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let mid = surface.field().height / 2.0;
        surface.text_centered(300.0, "Paused", Color::White);
        surface.text_centered(mid, "Resume (SPACE)", Color::White);
        self.quit.draw(surface);
    }
}

pub struct GameOverMenu {
    reason: GameOverReason,
    save: Button,
    retry: Button,
    quit: Button,
}

impl GameOverMenu {
    fn new(field: Bounds, reason: GameOverReason) -> Self {
        let mid = field.height / 2.0;
        GameOverMenu {
            reason,
            save: Button::centered("Save Score", field, mid, 200.0, Some('s')),
            retry: Button::centered("Retry", field, mid + 120.0, 200.0, Some('r')),
            quit: Button::centered("Quit", field, mid + 240.0, 200.0, Some('q')),
        }
    }

    pub fn reason(&self) -> GameOverReason {
        self.reason
    }

    fn update(&mut self, input: &InputSnapshot) -> Option<Action> {
        if self.save.poll(input) {
            Some(Action::SaveScore)
        } else if self.retry.poll(input) {
            Some(Action::Play)
        } else if self.quit.poll(input) {
            Some(Action::Quit)
        } else {
            None
        }
    }

    fn draw(&self, surface: &mut dyn Surface, session: &Session) {
        surface.text_centered(300.0, self.reason.text(), Color::Red);
        self.save.draw(surface);
        self.retry.draw(surface);
        self.quit.draw(surface);
        session.draw_hud(surface);
    }
}

/// Moves focus name → path → none with tab.
fn cycle_focus(fields: &mut [&mut InputField]) {
    match fields.iter().position(|f| f.active) {
        Some(i) => {
            fields[i].active = false;
            if let Some(next) = fields.get_mut(i + 1) {
                next.focus();
            }
        }
        None => {
            if let Some(first) = fields.first_mut() {
                first.focus();
            }
        }
    }
}

pub struct SaveScoreMenu {
    name: InputField,
    path: InputField,
    status: &'static str,
    saved: bool,
}

impl SaveScoreMenu {
    fn new(field: Bounds) -> Self {
        let mid = field.height / 2.0;
        SaveScoreMenu {
            name: InputField::new(Rect::new(field.width / 2.0 - 175.0, mid, 350.0, 50.0)),
            path: InputField::new(Rect::new(field.width / 2.0 - 340.0, mid + 180.0, 680.0, 35.0)),
            status: "Save (s)",
            saved: false,
        }
    }

    pub fn status(&self) -> &str {
        self.status
    }

    fn editing(&self) -> bool {
        self.name.active || self.path.active
    }

    fn update(&mut self, input: &InputSnapshot, score: u32, default: &Path) -> Option<Action> {
        self.name.handle(input);
        self.path.handle(input);
        if input.tab {
            cycle_focus(&mut [&mut self.name, &mut self.path]);
        }
        if self.editing() {
            return None;
        }

        if input.save && !self.saved {
            let typed = self.path.text.trim();
            let path = if typed.is_empty() { default.to_path_buf() } else { PathBuf::from(typed) };
            match check_path(&path, default).and_then(|_| write_score(&path, &self.name.text, score)) {
                Ok(()) => {
                    self.status = "Score saved!";
                    self.saved = true;
                }
                Err(e) => {
                    log::warn!("score not saved: {}", e);
                    self.status = e.user_message();
                }
            }
        }
        if input.back {
            return Some(Action::BackToGameOver);
        }
        None
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.text_centered(200.0, self.status, Color::White);
        surface.text_centered(300.0, "Go back (b)", Color::White);
        surface.text_centered(420.0, "Name", Color::White);
        surface.text_centered(600.0, "File path (optional)", Color::White);
        self.name.draw(surface);
        self.path.draw(surface);
    }
}

pub struct ScoreFileMenu {
    path: InputField,
    status: &'static str,
}

impl ScoreFileMenu {
    fn new(field: Bounds) -> Self {
        ScoreFileMenu {
            path: InputField::new(Rect::new(
                field.width / 2.0 - 340.0,
                field.height / 2.0 + 100.0,
                680.0,
                35.0,
            )),
            status: "See scores (s)",
        }
    }

    pub fn status(&self) -> &str {
        self.status
    }

    fn update(&mut self, input: &InputSnapshot, default: &Path) -> Option<Action> {
        self.path.handle(input);
        if input.tab {
            cycle_focus(&mut [&mut self.path]);
        }
        if self.path.active {
            return None;
        }

        if input.save {
            let typed = self.path.text.trim();
            if typed.is_empty() {
                return Some(Action::ShowScores(None));
            }
            let path = PathBuf::from(typed);
            match check_path(&path, default) {
                Ok(()) => return Some(Action::ShowScores(Some(path))),
                Err(e) => {
                    log::warn!("score file rejected: {}", e);
                    self.status = e.user_message();
                }
            }
        }
        if input.back {
            return Some(Action::BackToMenu);
        }
        None
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.text_centered(200.0, self.status, Color::White);
        surface.text_centered(300.0, "Go back (b)", Color::White);
        surface.text_centered(500.0, "File path (optional)", Color::White);
        surface.text_centered(
            750.0,
            "* To skip file input just press (s) without typing anything *",
            Color::DarkGrey,
        );
        self.path.draw(surface);
    }
}

pub struct TopScoresView {
    scores: TopScores,
}

impl TopScoresView {
    fn load(default: &Path, user: Option<&Path>) -> Self {
        TopScoresView { scores: top_scores(default, user) }
    }

    pub fn scores(&self) -> &TopScores {
        &self.scores
    }

    fn update(&mut self, input: &InputSnapshot) -> Option<Action> {
        input.back.then_some(Action::OpenScoreFile)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let title = self.scores.error.unwrap_or("Top 5 Scores");
        surface.text_centered(150.0, title, Color::White);
        for (i, entry) in self.scores.entries.iter().enumerate() {
            surface.text_centered(300.0 + 75.0 * i as f32, &entry.line, Color::White);
        }
        surface.text_centered(750.0, "Go back (b)", Color::White);
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Frames a level-up banner stays on screen.
const BANNER_FRAMES: u32 = 90;

/// Short message drawn over the playfield for a few frames.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Banner {
    text: String,
    frames_left: u32,
}

/// Age the current banner by one frame and react to this frame's events.
fn observe(banner: &mut Option<Banner>, frame: u64, events: &[FrameEvent]) {
    if let Some(current) = banner {
        current.frames_left -= 1;
        if current.frames_left == 0 {
            *banner = None;
        }
    }
    for event in events {
        log::debug!("frame {}: {:?}", frame, event);
        if let FrameEvent::LevelUp { level } = event {
            *banner = Some(Banner { text: format!("LEVEL {}", level), frames_left: BANNER_FRAMES });
        }
    }
}

pub struct App<R: Rng> {
    screen: Screen,
    session: Session,
    banner: Option<Banner>,
    rng: R,
    default_scores: PathBuf,
    field: Bounds,
}

impl<R: Rng> App<R> {
    pub fn new(rng: R, default_scores: PathBuf) -> Self {
        let session = Session::new();
        let field = session.bounds;
        App {
            screen: Screen::MainMenu(MainMenu::new(field)),
            session,
            banner: None,
            rng,
            default_scores,
            field,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Run one frame of the current screen.
    pub fn frame(&mut self, input: &InputSnapshot, audio: &mut dyn Audio) -> Flow {
        if input.quit {
            return Flow::Quit;
        }
        let action = match &mut self.screen {
            Screen::MainMenu(menu) => menu.update(input),
            Screen::Playing => {
                if input.pause {
                    Some(Action::Pause)
                } else {
                    let events = self.session.tick(input.controls(), &mut self.rng, audio);
                    observe(&mut self.banner, self.session.frame, &events);
                    self.session.is_over().then_some(Action::GameOver)
                }
            }
            Screen::Paused(menu) => menu.update(input),
            Screen::GameOver(menu) => menu.update(input),
            Screen::SaveScore(menu) => menu.update(input, self.session.score, &self.default_scores),
            Screen::ScoreFile(menu) => menu.update(input, &self.default_scores),
            Screen::TopScores(view) => view.update(input),
        };
        match action {
            Some(action) => self.apply(action, audio),
            None => Flow::Continue,
        }
    }

    /// Text of the banner currently shown over the playfield, if any.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_ref().map(|b| b.text.as_str())
    }

    fn apply(&mut self, action: Action, audio: &mut dyn Audio) -> Flow {
        log::debug!("screen action {:?}", action);
        let field = self.field;
        self.screen = match action {
            Action::Play => {
                self.session = Session::new();
                self.banner = None;
                log::info!("new session started");
                audio.start_music();
                Screen::Playing
            }
            Action::Pause => {
                audio.stop_music();
                Screen::Paused(PauseMenu::new(field))
            }
            Action::Resume => {
                audio.start_music();
                Screen::Playing
            }
            Action::GameOver | Action::BackToGameOver => {
                let reason = self.session.game_over.unwrap_or(GameOverReason::Died);
                Screen::GameOver(GameOverMenu::new(field, reason))
            }
            Action::SaveScore => Screen::SaveScore(SaveScoreMenu::new(field)),
            Action::OpenScoreFile => Screen::ScoreFile(ScoreFileMenu::new(field)),
            Action::ShowScores(user) => {
                Screen::TopScores(TopScoresView::load(&self.default_scores, user.as_deref()))
            }
            Action::BackToMenu => Screen::MainMenu(MainMenu::new(field)),
            Action::Quit => {
                log::info!("quit requested");
                return Flow::Quit;
            }
        };
        Flow::Continue
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match &self.screen {
            Screen::MainMenu(menu) => menu.draw(surface),
            Screen::Playing => {
                self.session.draw(surface);
                if let Some(banner) = &self.banner {
                    surface.text_centered(self.field.height / 2.0 - 100.0, &banner.text, Color::Yellow);
                }
            }
            Screen::Paused(menu) => menu.draw(surface),
            Screen::GameOver(menu) => menu.draw(surface, &self.session),
            Screen::SaveScore(menu) => menu.draw(surface),
            Screen::ScoreFile(menu) => menu.draw(surface),
            Screen::TopScores(view) => view.draw(surface),
        }
    }
}
