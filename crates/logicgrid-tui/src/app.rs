use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use logicgrid_core::{NormalizedGrid, SizeGroup};

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

const THEME_NAMES: &[&str] = &["dark", "light", "high-contrast"];

/// Viewer state: the grouped dataset plus navigation and display toggles.
pub struct App {
    /// Size groups in display order; never empty
    groups: Vec<SizeGroup>,
    /// Index of the current group
    pub group_index: usize,
    /// Index of the current grid within the group
    pub grid_index: usize,
    /// Whether the solution shading is shown instead of the givens
    pub show_solution: bool,
    /// Color theme
    pub theme: Theme,
    theme_index: usize,
}

impl App {
    pub fn new(groups: Vec<SizeGroup>, theme_name: &str) -> App {
        let theme_index = THEME_NAMES
            .iter()
            .position(|name| *name == theme_name)
            .unwrap_or(0);
        App {
            groups,
            group_index: 0,
            grid_index: 0,
            show_solution: false,
            theme: Theme::by_name(THEME_NAMES[theme_index]).unwrap_or_default(),
            theme_index,
        }
    }

    pub fn groups(&self) -> &[SizeGroup] {
        &self.groups
    }

    pub fn current_group(&self) -> &SizeGroup {
        &self.groups[self.group_index]
    }

    pub fn current_grid(&self) -> &NormalizedGrid {
        &self.current_group().grids[self.grid_index]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Left | KeyCode::Char('h') => self.prev_grid(),
            KeyCode::Right | KeyCode::Char('l') => self.next_grid(),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::PageUp => self.prev_group(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::PageDown => self.next_group(),
            KeyCode::Home => self.jump(0, 0),
            KeyCode::End => self.jump(self.groups.len() - 1, 0),
            KeyCode::Char('s') | KeyCode::Char(' ') => self.show_solution = !self.show_solution,
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
        AppAction::Continue
    }

    fn next_grid(&mut self) {
        if self.grid_index + 1 < self.current_group().grids.len() {
            self.jump(self.group_index, self.grid_index + 1);
        } else if self.group_index + 1 < self.groups.len() {
            self.jump(self.group_index + 1, 0);
        }
    }

    fn prev_grid(&mut self) {
        if self.grid_index > 0 {
            self.jump(self.group_index, self.grid_index - 1);
        } else if self.group_index > 0 {
            let previous = self.group_index - 1;
            self.jump(previous, self.groups[previous].grids.len() - 1);
        }
    }

    fn next_group(&mut self) {
        if self.group_index + 1 < self.groups.len() {
            self.jump(self.group_index + 1, 0);
        }
    }

    fn prev_group(&mut self) {
        if self.group_index > 0 {
            self.jump(self.group_index - 1, 0);
        }
    }

    /// Move to another grid. The peek toggle is per grid, so it resets.
    fn jump(&mut self, group: usize, grid: usize) {
        if (group, grid) != (self.group_index, self.grid_index) {
            self.group_index = group;
            self.grid_index = grid;
            self.show_solution = false;
        }
    }

    fn cycle_theme(&mut self) {
        self.theme_index = (self.theme_index + 1) % THEME_NAMES.len();
        self.theme = Theme::by_name(THEME_NAMES[self.theme_index]).unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use logicgrid_core::{build_groups, RawPuzzle};

    fn app() -> App {
        let puzzles = vec![
            raw(1, 2, 2, 1),
            raw(2, 2, 2, 2),
            raw(3, 3, 3, 1),
        ];
        let (groups, errors) = build_groups(puzzles);
        assert!(errors.is_empty());
        App::new(groups, "dark")
    }

    fn raw(pid: u64, rows: usize, cols: usize, difficulty: u32) -> RawPuzzle {
        RawPuzzle {
            pid,
            difficulty,
            rows,
            cols,
            topology: Vec::new(),
            rules: Vec::new(),
            solution: None,
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_grid_navigation_crosses_groups() {
        let mut app = app();
        assert_eq!(app.current_grid().pid, 1);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.current_grid().pid, 2);
        press(&mut app, KeyCode::Right);
        assert_eq!((app.group_index, app.current_grid().pid), (1, 3));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.current_grid().pid, 3);
        press(&mut app, KeyCode::Left);
        assert_eq!((app.group_index, app.current_grid().pid), (0, 2));
    }

    #[test]
    fn test_peek_resets_on_navigation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        assert!(app.show_solution);
        press(&mut app, KeyCode::Right);
        assert!(!app.show_solution);
        // Toggling in place does not move.
        press(&mut app, KeyCode::Char(' '));
        assert!(app.show_solution);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.show_solution);
    }

    #[test]
    fn test_group_navigation_clamps() {
        let mut app = app();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.group_index, 0);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.group_index, 1);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.group_index, 1);
        press(&mut app, KeyCode::Home);
        assert_eq!((app.group_index, app.grid_index), (0, 0));
    }
}
