// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Character-cell text consoles, one per screen.
//!
//! Output is plain text interleaved with the small set of ANSI escape sequences the viewer uses:
//!
//! * `ESC[<row>;<col>H` moves the cursor (1-based, `0` counts as `1`),
//! * `ESC[2J` clears the console, `ESC[K` clears to the end of the line,
//! * `ESC[<n>;...m` selects graphic rendition: `0` reset, `1` bold, `30`-`37` foreground.
//!
//! Text wraps at the right edge and the console scrolls up when writing past the last row.

use core::fmt::{self, Write};

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::services::gsp::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    pub const fn sgr_foreground(&self) -> u8 {
        30 + *self as u8
    }

    /// Escape sequence switching to the bold variant of this color.
    pub const fn bold(self) -> Bold {
        Bold(self)
    }

    fn from_sgr(code: u16) -> Option<Self> {
        Some(match code {
            30 => Self::Black,
            31 => Self::Red,
            32 => Self::Green,
            33 => Self::Yellow,
            34 => Self::Blue,
            35 => Self::Magenta,
            36 => Self::Cyan,
            37 => Self::White,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Bold(Color);

impl fmt::Display for Bold {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\x1b[{};1m", self.0.sgr_foreground())
    }
}

pub const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bold: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        style: Style {
            fg: None,
            bold: false,
        },
    };
}

const MAX_PARAMS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parser {
    Ground,
    Escape,
    Csi {
        params: [u16; MAX_PARAMS],
        count: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextConsole {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
    row: usize,
    column: usize,
    style: Style,
    parser: Parser,
}

impl TextConsole {
    pub fn new(columns: usize, rows: usize) -> Self {
        assert!(columns > 0 && rows > 0, "console needs at least one cell");

        Self {
            columns,
            rows,
            cells: vec![Cell::BLANK; columns * rows],
            row: 0,
            column: 0,
            style: Style::default(),
            parser: Parser::Ground,
        }
    }

    pub fn for_screen(screen: Screen) -> Self {
        let (columns, rows) = screen.console_size();
        Self::new(columns, rows)
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Cursor position as zero-based `(row, column)`.
    pub const fn cursor(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        if row < self.rows && column < self.columns {
            self.cells.get(row * self.columns + column)
        } else {
            None
        }
    }

    /// Writes formatted output. Writing to a console cannot fail.
    pub fn print(&mut self, args: fmt::Arguments) {
        let _ = self.write_fmt(args);
    }

    /// Moves the cursor to a 1-based position.
    pub fn set_cursor(&mut self, row: usize, column: usize) {
        self.print(format_args!("\x1b[{row};{column}H"));
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
        self.row = 0;
        self.column = 0;
    }

    /// One `* Label: value` report line, with the marker and the value in `color`.
    pub fn line(&mut self, color: Color, label: impl fmt::Display, value: impl fmt::Display) {
        self.print(format_args!(
            "{}*{RESET} {label}: {}{value}{RESET}\n",
            color.bold(),
            color.bold()
        ));
    }

    /// Replaces the 1-based `row` with a report line, leaving the cursor at its end.
    pub fn line_at(
        &mut self,
        row: usize,
        color: Color,
        label: impl fmt::Display,
        value: impl fmt::Display,
    ) {
        self.set_cursor(row, 1);
        self.print(format_args!(
            "{}*{RESET} {label}: {}{value}{RESET}\x1b[K",
            color.bold(),
            color.bold()
        ));
    }

    /// Text of one zero-based row, trailing blanks removed. Rows past the bottom are empty.
    pub fn row_text(&self, row: usize) -> String {
        if row >= self.rows {
            return String::new();
        }

        let start = row * self.columns;
        let text: String = self.cells[start..start + self.columns]
            .iter()
            .map(|cell| cell.ch)
            .collect();

        String::from(text.trim_end())
    }

    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for row in 0..self.rows {
            text.push_str(&self.row_text(row));
            text.push('\n');
        }

        text
    }

    /// The whole grid with colors re-encoded as escape sequences, for display on a terminal.
    pub fn ansi_text(&self) -> String {
        let mut text = String::new();
        for row in self.cells.chunks(self.columns) {
            let mut current = Style::default();
            for cell in row {
                if cell.style != current {
                    text.push_str(RESET);
                    if let Some(fg) = cell.style.fg {
                        let _ = write!(text, "\x1b[{}m", fg.sgr_foreground());
                    }
                    if cell.style.bold {
                        text.push_str("\x1b[1m");
                    }
                    current = cell.style;
                }
                text.push(cell.ch);
            }
            text.push_str(RESET);
            text.push('\n');
        }

        text
    }

    fn new_line(&mut self) {
        self.column = 0;
        self.row += 1;
        if self.row == self.rows {
            self.cells.copy_within(self.columns.., 0);
            let last = (self.rows - 1) * self.columns;
            self.cells[last..].fill(Cell::BLANK);
            self.row = self.rows - 1;
        }
    }

    fn put(&mut self, ch: char) {
        if self.column == self.columns {
            self.new_line();
        }

        let index = self.row * self.columns + self.column;
        self.cells[index] = Cell {
            ch,
            style: self.style,
        };
        self.column += 1;
    }

    fn feed(&mut self, ch: char) {
        self.parser = match (self.parser, ch) {
            (Parser::Ground, '\x1b') => Parser::Escape,
            (Parser::Ground, '\n') => {
                self.new_line();
                Parser::Ground
            }
            (Parser::Ground, '\r') => {
                self.column = 0;
                Parser::Ground
            }
            (Parser::Ground, ch) => {
                self.put(ch);
                Parser::Ground
            }
            (Parser::Escape, '[') => Parser::Csi {
                params: [0; MAX_PARAMS],
                count: 0,
            },
            (Parser::Escape, _) => Parser::Ground,
            (Parser::Csi { mut params, count }, '0'..='9') => {
                let digit = ch as u16 - '0' as u16;
                let index = count.saturating_sub(1).min(MAX_PARAMS - 1);
                params[index] = params[index].saturating_mul(10).saturating_add(digit);
                Parser::Csi {
                    params,
                    count: count.max(1),
                }
            }
            (Parser::Csi { params, count }, ';') => Parser::Csi {
                params,
                count: (count.max(1) + 1).min(MAX_PARAMS),
            },
            (csi @ Parser::Csi { .. }, '\x20'..='\x3f') => csi,
            (Parser::Csi { params, count }, final_byte) => {
                self.execute(final_byte, &params[..count]);
                Parser::Ground
            }
        };
    }

    fn execute(&mut self, final_byte: char, params: &[u16]) {
        let param = |i: usize| params.get(i).copied().unwrap_or(0) as usize;

        match final_byte {
            'H' | 'f' => {
                self.row = param(0).max(1).min(self.rows) - 1;
                self.column = param(1).max(1).min(self.columns) - 1;
            }
            'J' if param(0) == 2 => self.clear(),
            'K' => {
                let start = self.row * self.columns + self.column;
                let end = (self.row + 1) * self.columns;
                self.cells[start..end].fill(Cell::BLANK);
            }
            'm' if params.is_empty() => self.style = Style::default(),
            'm' => {
                for &code in params {
                    match code {
                        0 => self.style = Style::default(),
                        1 => self.style.bold = true,
                        39 => self.style.fg = None,
                        code => {
                            if let Some(color) = Color::from_sgr(code) {
                                self.style.fg = Some(color);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

impl fmt::Write for TextConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        s.chars().for_each(|ch| self.feed(ch));
        Ok(())
    }
}

/// The pair of consoles, one per screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consoles {
    pub top: TextConsole,
    pub bottom: TextConsole,
}

impl Consoles {
    pub fn new() -> Self {
        Self {
            top: TextConsole::for_screen(Screen::Top),
            bottom: TextConsole::for_screen(Screen::Bottom),
        }
    }

    pub fn screen(&mut self, screen: Screen) -> &mut TextConsole {
        match screen {
            Screen::Top => &mut self.top,
            Screen::Bottom => &mut self.bottom,
        }
    }
}

impl Default for Consoles {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console() -> TextConsole {
        TextConsole::new(10, 3)
    }

    #[test]
    fn text_is_written_at_cursor() {
        let mut con = console();
        con.print(format_args!("ab\ncd"));

        assert_eq!(con.row_text(0), "ab");
        assert_eq!(con.row_text(1), "cd");
        assert_eq!(con.cursor(), (1, 2));
    }

    #[test]
    fn cursor_positioning_is_one_based() {
        let mut con = console();
        con.set_cursor(2, 3);
        con.print(format_args!("x"));
        con.print(format_args!("\x1b[1;0Hy"));

        assert_eq!(con.cell(1, 2).map(|c| c.ch), Some('x'));
        assert_eq!(con.row_text(0), "y");
    }

    #[test]
    fn rows_outside_the_grid_are_empty() {
        let mut con = console();
        con.print(format_args!("abc"));

        assert_eq!(con.row_text(3), "");
        assert_eq!(con.row_text(usize::MAX), "");
        assert_eq!(con.cell(3, 0), None);
    }

    #[test]
    fn overwriting_replaces_previous_text() {
        let mut con = console();
        con.print(format_args!("\x1b[1;1H99%  "));
        con.print(format_args!("\x1b[1;1H5%   "));

        assert_eq!(con.row_text(0), "5%");
    }

    #[test]
    fn sgr_sets_and_resets_style() {
        let mut con = console();
        con.print(format_args!("\x1b[36;1mA\x1b[0mB"));

        let a = con.cell(0, 0).unwrap();
        let b = con.cell(0, 1).unwrap();
        assert_eq!(a.style.fg, Some(Color::Cyan));
        assert!(a.style.bold);
        assert_eq!(b.style, Style::default());
    }

    #[test]
    fn wraps_and_scrolls() {
        let mut con = TextConsole::new(3, 2);
        con.print(format_args!("abcdef\ngh"));

        assert_eq!(con.row_text(0), "def");
        assert_eq!(con.row_text(1), "gh");
    }

    #[test]
    fn clear_and_erase_line() {
        let mut con = console();
        con.print(format_args!("hello\x1b[1;3H\x1b[K"));
        assert_eq!(con.row_text(0), "he");

        con.print(format_args!("\x1b[2J"));
        assert_eq!(con.plain_text(), "\n\n\n");
        assert_eq!(con.cursor(), (0, 0));
    }

    #[test]
    fn report_line_shape() {
        let mut con = TextConsole::new(40, 2);
        con.line(Color::Magenta, "Country", "DE");

        assert_eq!(con.row_text(0), "* Country: DE");
        assert_eq!(con.cell(0, 0).unwrap().style.fg, Some(Color::Magenta));
        assert_eq!(con.cell(0, 2).unwrap().style, Style::default());
        assert_eq!(con.cell(0, 11).unwrap().style.fg, Some(Color::Magenta));
        assert_eq!(con.cursor(), (1, 0));
    }

    #[test]
    fn line_at_replaces_whole_row() {
        let mut con = TextConsole::new(40, 3);
        con.line_at(2, Color::Blue, "Adapter state", "disconnected");
        con.line_at(2, Color::Blue, "Adapter state", "connected");

        assert_eq!(con.row_text(1), "* Adapter state: connected");
        assert_eq!(con.row_text(0), "");
    }

    #[test]
    fn unknown_sequences_are_swallowed() {
        let mut con = console();
        con.print(format_args!("\x1b[?25la\x1bzb"));

        assert_eq!(con.row_text(0), "ab");
    }
}
