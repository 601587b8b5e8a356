use crate::{TermInt, Coords};
use crate::config::COLUMNS_PER_CELL;
use crate::grid::{Bounds, Position};
use crate::render::{CellStyle, Renderer};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{anyhow, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

const SNAKE_BODY_CHAR: char = '█';
const SNAKE_HEAD_CHAR: char = '▓';
const FOOD_CHARS: [char; 2] = ['(', ')'];
const SCORE_ROW: TermInt = 0;

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
    grid: Option<GridLayout>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

/// Where the play field sits on screen. `top_left` is the first cell inside
/// the border.
#[derive(Copy, Clone)]
struct GridLayout {
    bounds: Bounds,
    top_left: Coords,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        let stdout = stdout();
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen, current_msg: None, grid: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        self.set_raw_mode(true)?;
        self.set_cursor_visibility(false)?;
        self.set_cursor_blink(false)
    }

    pub fn restore(&mut self) -> Result<()> {
        self.set_raw_mode(false)?;
        self.set_cursor_visibility(true)?;
        self.set_cursor_blink(true)?;
        execute!(self.stdout, LeaveAlternateScreen).context("Error leaving alt screen")?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Waits up to `timeout` for the first key, then drains whatever else is
    /// already queued without waiting.
    pub fn read_key_events(&self, timeout: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];
        let mut wait = timeout;

        while poll(wait)? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
            wait = Duration::from_millis(0);
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    /// Centres the play field for `bounds` below the score line and frames it.
    pub fn set_grid(&mut self, bounds: Bounds) -> Result<()> {
        let inner_width = bounds.columns() as TermInt * COLUMNS_PER_CELL;
        let inner_height = bounds.rows() as TermInt;
        let left = self.width.saturating_sub(inner_width + 2) / 2;
        let top = SCORE_ROW + 1;

        self.grid = Some(GridLayout { bounds, top_left: (left + 1, top + 1) });
        self.draw_borders((left, top), (inner_width + 2, inner_height + 2))
    }

    pub fn draw_borders(&mut self, origin: Coords, size: Coords) -> Result<()> {
        let (width, height) = size;
        let end_x = origin.0 + width - 1;
        let end_y = origin.1 + height - 1;

        for x in 0..width {
            let ch = if x == 0 || x == width - 1 {'+'} else {'-'};
            self.print_at((origin.0 + x, origin.1), ch)?;
            self.print_at((origin.0 + x, end_y), ch)?;
        }

        for y in 1..height - 1 {
            self.print_at((origin.0, origin.1 + y), '|')?;
            self.print_at((end_x, origin.1 + y), '|')?;
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let (x, y) = (top_left.0 + x_diff, top_left.1 + y_diff);
                if let Some(&ch) = self.screen.get(self.index(x, y)) {
                    self.print_at_no_save((x, y), ch)?;
                }
            }
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        self.print_at_no_save(pos, ch)?;
        let idx = self.index(pos.0, pos.1);
        if let Some(cell) = self.screen.get_mut(idx) {
            *cell = ch;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        self.grid = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, x: TermInt, y: TermInt) -> usize {
        self.width as usize * y as usize + x as usize
    }

    fn layout(&self) -> Result<GridLayout> {
        self.grid.ok_or_else(|| anyhow!("Drawing before the grid was laid out"))
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        // To be used for printing messages, where we don't wanna overwrite our
        // local buffer to restore it when the message is hidden
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    fn set_raw_mode(&self, option: bool) -> Result<()> {
        let res = if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        };

        res.context("Error setting raw mode")
    }

    fn set_cursor_blink(&mut self, option: bool) -> Result<()> {
        let res = if option {
            execute!(self.stdout, cursor::EnableBlinking)
        } else {
            execute!(self.stdout, cursor::DisableBlinking)
        };

        res.context("Error setting cursor blink")
    }

    fn set_cursor_visibility(&mut self, option: bool) -> Result<()> {
        let res = if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        };

        res.context("Error setting cursor visibility")
    }
}

impl Renderer for TermManager {
    fn draw_background(&mut self) -> Result<()> {
        let GridLayout { bounds, top_left } = self.layout()?;
        let inner_width = bounds.columns() as TermInt * COLUMNS_PER_CELL;

        for y in 0..bounds.rows() as TermInt {
            for x in 0..inner_width {
                self.print_at((top_left.0 + x, top_left.1 + y), ' ')?;
            }
        }
        Ok(())
    }

    fn draw_cell(&mut self, pos: Position, style: CellStyle) -> Result<()> {
        let GridLayout { bounds, top_left } = self.layout()?;
        if !bounds.contains(pos) {
            return Ok(());
        }

        let col = top_left.0 + (pos.x - bounds.min_x) as TermInt * COLUMNS_PER_CELL;
        let row = top_left.1 + (pos.y - bounds.min_y) as TermInt;
        let chars = match style {
            CellStyle::Food => FOOD_CHARS,
            CellStyle::Head => [SNAKE_HEAD_CHAR; 2],
            CellStyle::Body => [SNAKE_BODY_CHAR; 2],
        };

        for (i, ch) in chars.iter().enumerate() {
            self.print_at((col + i as TermInt, row), *ch)?;
        }
        Ok(())
    }

    fn set_score(&mut self, score: u32) -> Result<u32> {
        let left = self.layout().map(|l| l.top_left.0.saturating_sub(1)).unwrap_or(0);
        let text = format!("Score: {:<6}", score);

        for (i, ch) in text.chars().enumerate() {
            self.print_at((left + i as TermInt, SCORE_ROW), ch)?;
        }
        Ok(score)
    }

    fn present(&mut self) -> Result<()> {
        self.flush()
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: Coords) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> Coords {
        self.top_left
    }
}
