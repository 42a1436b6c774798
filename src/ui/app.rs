//! Main TUI application state and logic

use crate::engine::Machine;
use crate::snapshot::{OutputLog, Snapshot, SnapshotHistory};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tape,
    Output,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tape => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Tape,
        }
    }
}

/// The main application state
pub struct App {
    /// The machine, always at the newest recorded round
    pub machine: Machine,

    /// One snapshot per round reached so far
    pub history: SnapshotHistory,

    /// Every term the machine has written
    pub output: OutputLog,

    /// Index of the displayed snapshot
    pub position: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub tape_scroll: usize,
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,

    /// Why no further rounds can be computed, once that happens
    pub halted: Option<String>,
}

impl App {
    /// Create an app over a freshly seeded machine
    pub fn new(machine: Machine, history_limit: usize) -> Self {
        let mut history = SnapshotHistory::new(history_limit);
        let mut halted = None;
        if let Err(err) = history.push(Snapshot::capture(&machine)) {
            halted = Some(err.to_string());
        }

        App {
            machine,
            history,
            output: OutputLog::new(),
            position: 0,
            focused_pane: FocusedPane::Tape,
            tape_scroll: 0,
            output_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
            halted,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_millis(500) {
                if self.step_forward() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// The snapshot currently on screen
    pub fn displayed(&self) -> Option<&Snapshot> {
        self.history.get(self.position)
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[0]);

        if let Some(snapshot) = self.history.get(self.position) {
            super::panes::render_tape_pane(
                frame,
                columns[0],
                snapshot,
                self.focused_pane == FocusedPane::Tape,
                &mut self.tape_scroll,
            );

            let written = (snapshot.round as usize).min(self.output.len());
            super::panes::render_output_pane(
                frame,
                columns[1],
                &self.output.terms()[..written],
                self.focused_pane == FocusedPane::Output,
                &mut self.output_scroll,
            );
        }

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            super::panes::StatusRenderData {
                message: &self.status_message,
                position: self.position,
                total: self.history.len(),
                is_playing: self.is_playing,
                halted: self.halted.is_some(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N rounds directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if !self.step_forward() {
                        break;
                    }
                    stepped += 1;
                }
                if self.halted.is_none() || stepped > 0 {
                    self.status_message = format!("Stepped forward {} round(s)", stepped);
                }
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                if self.step_forward() {
                    self.status_message = "Stepped forward".to_string();
                }
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tape => self.tape_scroll = self.tape_scroll.saturating_sub(1),
                FocusedPane::Output => self.output_scroll = self.output_scroll.saturating_sub(1),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tape => self.tape_scroll = self.tape_scroll.saturating_add(1),
                FocusedPane::Output => self.output_scroll = self.output_scroll.saturating_add(1),
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(Duration::from_secs(1))
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.position = self.history.len().saturating_sub(1);
                self.status_message = "Jumped to newest round".to_string();
                self.output_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.position = 0;
                self.status_message = "Jumped to start".to_string();
                self.output_scroll = usize::MAX;
            }
            _ => {}
        }
    }

    /// Show the next round, computing it if it is past the newest snapshot
    ///
    /// Returns false when nothing moved; the status message says why.
    pub fn step_forward(&mut self) -> bool {
        if self.position + 1 < self.history.len() {
            self.position += 1;
            self.output_scroll = usize::MAX;
            return true;
        }

        if let Some(reason) = &self.halted {
            self.status_message = format!("Cannot step forward: {}", reason);
            return false;
        }

        let mut term = Vec::new();
        if let Err(err) = self.machine.step(&mut term) {
            warn!(round = self.machine.round(), error = %err, "viewer halted");
            self.status_message = format!("Machine halted: {}", err);
            self.halted = Some(err.to_string());
            return false;
        }
        self.output.record(&term);

        if let Err(err) = self.history.push(Snapshot::capture(&self.machine)) {
            self.status_message = format!("Cannot step forward: {}", err);
            self.halted = Some(err.to_string());
            return false;
        }
        debug!(
            round = self.machine.round(),
            snapshots = self.history.len(),
            memory = self.history.memory_usage(),
            "snapshot recorded"
        );

        self.position += 1;
        self.output_scroll = usize::MAX;
        true
    }

    fn step_backward(&mut self) {
        if self.position == 0 {
            self.status_message = "Cannot step backward: already at the start".to_string();
            return;
        }
        self.position -= 1;
        self.status_message = "Stepped backward".to_string();
        self.output_scroll = usize::MAX;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MachineConfig;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn app(history_limit: usize) -> App {
        let machine = Machine::new(&MachineConfig { capacity: 2_000 }).unwrap();
        App::new(machine, history_limit)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_forward_computes_and_back_replays() {
        let mut app = app(1 << 20);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.history.len(), 6);
        assert_eq!(app.position, 5);
        assert_eq!(app.output.terms(), ["1", "1", "2", "3", "5"]);

        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.position, 3);
        assert_eq!(app.displayed().map(|s| s.round), Some(3));

        // stepping forward inside the history does not run the machine
        press(&mut app, KeyCode::Right);
        assert_eq!(app.machine.round(), 5);
        assert_eq!(app.position, 4);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.position, 0);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.position, 5);
    }

    #[test]
    fn test_history_limit_halts_viewer() {
        let machine = Machine::new(&MachineConfig { capacity: 2_000 }).unwrap();
        let size = Snapshot::capture(&machine).estimated_size();
        let mut app = App::new(machine, size * 2 + size / 2);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.history.len(), 2);
        assert!(app.halted.is_some());
        assert!(app.status_message.starts_with("Cannot step forward"));

        press(&mut app, KeyCode::Right);
        assert_eq!(app.history.len(), 2);
    }

    #[test]
    fn test_render_shows_tape_and_output() {
        let mut app = app(1 << 20);
        press(&mut app, KeyCode::Char('3'));

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Tape (2 blocks"));
        assert!(text.contains("head"));
        assert!(text.contains("tail"));
        assert!(text.contains("Output"));
        assert!(text.contains("Round 3/3"));
    }

    #[test]
    fn test_quit_and_focus() {
        let mut app = app(1 << 20);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Output);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
