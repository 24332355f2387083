use crate::app::App;
use crate::theme::Theme;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use logicgrid_core::{
    Cell, CellColor, DisplayRule, NormalizedGrid, PatternRef, CONNECT_ALL_DARK_PATTERN,
    CONNECT_ALL_LIGHT_PATTERN,
};
use std::io;

/// Interior width of one rendered cell, in characters.
const CELL_WIDTH: u16 = 3;

/// Arrow glyphs for dart direction codes, clockwise from up.
const DART_ARROWS: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, _term_height) = terminal::size()?;
    let theme = &app.theme;
    let grid = app.current_grid();

    execute!(
        stdout,
        Hide,
        SetBackgroundColor(theme.bg),
        Clear(ClearType::All)
    )?;

    let grid_width = grid.cols as u16 * (CELL_WIDTH + 1) + 1;
    let start_x = if term_width > grid_width + 4 {
        (term_width - grid_width) / 2
    } else {
        2
    };

    render_header(stdout, app, start_x, 1)?;
    render_grid(stdout, grid, theme, app.show_solution, start_x, 3)?;
    let rules_y = 3 + grid.rows as u16 * 2 + 2;
    let controls_y = render_rules(stdout, grid, theme, start_x, rules_y)?;
    render_controls(stdout, theme, start_x, controls_y + 1)?;

    execute!(stdout, Show)?;
    Ok(())
}

fn render_header(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let group = app.current_group();
    let grid = app.current_grid();

    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.fg),
        Print(format!("{} x {}", group.rows, group.cols)),
        SetForegroundColor(theme.info),
        Print(format!(
            "  group {}/{}  puzzle {}/{}",
            app.group_index + 1,
            app.groups().len(),
            app.grid_index + 1,
            group.grids.len()
        )),
    )?;

    // Difficulty 1-5 renders as orbs, 6+ as stars.
    let (marker, count) = if grid.difficulty <= 5 {
        ('●', grid.difficulty)
    } else {
        ('★', grid.difficulty - 5)
    };
    execute!(
        stdout,
        MoveTo(x, y + 1),
        SetForegroundColor(theme.fg),
        Print(format!("#{}", grid.pid)),
        SetForegroundColor(theme.difficulty),
        Print(format!(
            " {}",
            std::iter::repeat(marker).take(count as usize).collect::<String>()
        )),
    )?;
    if app.show_solution {
        execute!(
            stdout,
            SetForegroundColor(theme.peek),
            Print("  [solution]")
        )?;
    }
    Ok(())
}

fn render_grid(
    stdout: &mut io::Stdout,
    grid: &NormalizedGrid,
    theme: &Theme,
    show_solution: bool,
    x: u16,
    y: u16,
) -> io::Result<()> {
    for border_row in 0..=grid.rows {
        let line_y = y + border_row as u16 * 2;
        execute!(stdout, MoveTo(x, line_y), SetBackgroundColor(theme.bg))?;
        for col in 0..grid.cols {
            execute!(stdout, SetForegroundColor(theme.border), Print("+"))?;
            if horizontal_border_hidden(grid, border_row, col) {
                let cell = grid.cell(border_row.min(grid.rows - 1), col);
                execute!(
                    stdout,
                    SetBackgroundColor(cell_background(cell, theme, show_solution)),
                    Print("   "),
                    SetBackgroundColor(theme.bg)
                )?;
            } else {
                execute!(stdout, Print("---"))?;
            }
        }
        execute!(stdout, SetForegroundColor(theme.border), Print("+"))?;

        if border_row == grid.rows {
            break;
        }

        // Cell row under this border line.
        let cell_y = line_y + 1;
        execute!(stdout, MoveTo(x, cell_y))?;
        for col in 0..grid.cols {
            if vertical_border_hidden(grid, border_row, col) {
                let cell = grid.cell(border_row, col);
                execute!(
                    stdout,
                    SetBackgroundColor(cell_background(cell, theme, show_solution)),
                    Print(" ")
                )?;
            } else {
                execute!(
                    stdout,
                    SetBackgroundColor(theme.bg),
                    SetForegroundColor(theme.border),
                    Print("|")
                )?;
            }
            render_cell_interior(stdout, grid.cell(border_row, col), theme, show_solution)?;
        }
        // Right boundary.
        if grid.cell(border_row, grid.cols - 1).merges.right {
            let cell = grid.cell(border_row, grid.cols - 1);
            execute!(
                stdout,
                SetBackgroundColor(cell_background(cell, theme, show_solution)),
                Print(" "),
                SetBackgroundColor(theme.bg)
            )?;
        } else {
            execute!(
                stdout,
                SetBackgroundColor(theme.bg),
                SetForegroundColor(theme.border),
                Print("|")
            )?;
        }
    }
    Ok(())
}

/// The border segment above cell row `border_row` in column `col` is hidden
/// when either adjoining cell merges across it.
fn horizontal_border_hidden(grid: &NormalizedGrid, border_row: usize, col: usize) -> bool {
    let above = border_row > 0 && grid.cell(border_row - 1, col).merges.below;
    let below = border_row < grid.rows && grid.cell(border_row, col).merges.above;
    above || below
}

/// The border segment left of cell `(row, col)` is hidden when either
/// adjoining cell merges across it.
fn vertical_border_hidden(grid: &NormalizedGrid, row: usize, col: usize) -> bool {
    let left = col > 0 && grid.cell(row, col - 1).merges.right;
    let right = grid.cell(row, col).merges.left;
    left || right
}

fn cell_background(cell: &Cell, theme: &Theme, show_solution: bool) -> Color {
    if !cell.exists {
        return theme.hole;
    }
    let color = if show_solution { cell.solution } else { cell.color };
    match color {
        CellColor::Light => theme.light_cell,
        CellColor::Dark => theme.dark_cell,
        CellColor::Unknown => theme.unknown_cell,
    }
}

fn render_cell_interior(
    stdout: &mut io::Stdout,
    cell: &Cell,
    theme: &Theme,
    show_solution: bool,
) -> io::Result<()> {
    let bg = cell_background(cell, theme, show_solution);
    if !cell.exists {
        return execute!(stdout, SetBackgroundColor(bg), Print("   "));
    }

    let shown = if show_solution { cell.solution } else { cell.color };
    let clue_color = if shown == CellColor::Dark {
        theme.clue_on_dark
    } else {
        theme.clue
    };
    let (glyph, fg) = cell_glyph(cell, clue_color, theme.decoration);
    execute!(
        stdout,
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(glyph)
    )
}

/// Pick the cell's annotation glyph, padded to the interior width. Cells
/// carry at most one clue kind in practice; decorations win over nothing.
fn cell_glyph(cell: &Cell, clue: Color, decoration: Color) -> (String, Color) {
    if let Some(letter) = cell.letter {
        return (format!(" {letter} "), clue);
    }
    if let Some(area) = cell.area {
        return (pad(&area.to_string()), clue);
    }
    if let Some(viewpoint) = cell.viewpoint {
        return (pad(&format!("{viewpoint}+")), clue);
    }
    if let Some(dart) = cell.dart {
        let arrow = DART_ARROWS[dart.direction as usize % DART_ARROWS.len()];
        return (pad(&format!("{}{arrow}", dart.clue)), clue);
    }
    if let Some(myopia) = cell.myopia {
        let mut arrows = String::new();
        for (blocked, arrow) in [
            (myopia.up(), '↑'),
            (myopia.down(), '↓'),
            (myopia.left(), '←'),
            (myopia.right(), '→'),
        ] {
            if blocked && arrows.chars().count() < CELL_WIDTH as usize {
                arrows.push(arrow);
            }
        }
        return (pad(&arrows), clue);
    }
    if !cell.galaxies.is_empty() {
        return (pad(&"◍".repeat(cell.galaxies.len().min(3))), decoration);
    }
    if !cell.lotuses.is_empty() {
        return (pad(&"♡".repeat(cell.lotuses.len().min(3))), decoration);
    }
    ("   ".to_string(), clue)
}

/// Center `text` in the cell interior, truncating oversized clues.
fn pad(text: &str) -> String {
    let width = CELL_WIDTH as usize;
    let count = text.chars().count();
    if count >= width {
        return text.chars().take(width).collect();
    }
    let left = (width - count) / 2;
    let right = width - count - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Render the display-rule strip below the grid. Returns the first free row.
fn render_rules(
    stdout: &mut io::Stdout,
    grid: &NormalizedGrid,
    theme: &Theme,
    x: u16,
    y: u16,
) -> io::Result<u16> {
    let mut line = y;
    for rule in &grid.rules {
        match rule {
            DisplayRule::BanPattern(pattern) => {
                execute!(
                    stdout,
                    MoveTo(x, line),
                    SetBackgroundColor(theme.bg),
                    SetForegroundColor(theme.info),
                    Print("banned pattern:")
                )?;
                line += 1;
                for row in 0..pattern.rows() {
                    let text: String = (0..pattern.cols())
                        .map(|col| shade_char(CellColor::from_code(pattern.cells()[row * pattern.cols() + col])))
                        .collect();
                    execute!(stdout, MoveTo(x + 2, line), Print(text))?;
                    line += 1;
                }
            }
            DisplayRule::ConnectAllDark => {
                line = render_pattern_rule(
                    stdout,
                    theme,
                    "connect all dark cells:",
                    CONNECT_ALL_DARK_PATTERN,
                    x,
                    line,
                )?;
            }
            DisplayRule::ConnectAllLight => {
                line = render_pattern_rule(
                    stdout,
                    theme,
                    "connect all light cells:",
                    CONNECT_ALL_LIGHT_PATTERN,
                    x,
                    line,
                )?;
            }
            other => {
                execute!(
                    stdout,
                    MoveTo(x, line),
                    SetBackgroundColor(theme.bg),
                    SetForegroundColor(theme.info),
                    Print(rule_label(other))
                )?;
                line += 1;
            }
        }
    }
    Ok(line)
}

fn render_pattern_rule(
    stdout: &mut io::Stdout,
    theme: &Theme,
    label: &str,
    pattern: PatternRef,
    x: u16,
    y: u16,
) -> io::Result<u16> {
    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.info),
        Print(label)
    )?;
    for row in 0..pattern.rows {
        let text: String = (0..pattern.cols).map(|col| shade_char(pattern.cell(row, col))).collect();
        execute!(stdout, MoveTo(x + 2, y + 1 + row as u16), Print(text))?;
    }
    Ok(y + 1 + pattern.rows as u16)
}

fn shade_char(color: CellColor) -> char {
    match color {
        CellColor::Light => '□',
        CellColor::Dark => '■',
        CellColor::Unknown => '·',
    }
}

fn rule_label(rule: &DisplayRule) -> String {
    match rule {
        DisplayRule::OneSymbolPerLight => "exactly one symbol per light region".to_string(),
        DisplayRule::OneSymbolPerDark => "exactly one symbol per dark region".to_string(),
        DisplayRule::LightShapesDistinct => {
            "all light regions have different shapes and areas".to_string()
        }
        DisplayRule::DarkShapesDistinct => {
            "all dark regions have different shapes and areas".to_string()
        }
        DisplayRule::LightShapesSame => "all light regions have the same shape".to_string(),
        DisplayRule::DarkShapesSame => "all dark regions have the same shape".to_string(),
        DisplayRule::LightArea(area) => format!("all light regions have area {area}"),
        DisplayRule::DarkArea(area) => format!("all dark regions have area {area}"),
        DisplayRule::Underconstrained => "? multiple solutions exist".to_string(),
        DisplayRule::Other { tag, .. } => format!("rule: {tag}"),
        DisplayRule::BanPattern(_) | DisplayRule::ConnectAllDark | DisplayRule::ConnectAllLight => {
            unreachable!("rendered with a pattern glyph")
        }
    }
}

fn render_controls(stdout: &mut io::Stdout, theme: &Theme, x: u16, y: u16) -> io::Result<()> {
    let bindings = [
        ("←/→", "puzzle"),
        ("↑/↓", "size group"),
        ("s", "peek solution"),
        ("t", "theme"),
        ("q", "quit"),
    ];
    execute!(stdout, MoveTo(x, y), SetBackgroundColor(theme.bg))?;
    for (key, action) in bindings {
        execute!(
            stdout,
            SetForegroundColor(theme.key),
            Print(key),
            SetForegroundColor(theme.info),
            Print(format!(" {action}  "))
        )?;
    }
    Ok(())
}
