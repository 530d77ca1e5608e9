use std::io::{stdout, Stdout, Write};

use crossterm::cursor;
use crossterm::event::KeyCode;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use cosmac::machine::display::{Framebuffer, HEIGHT, WIDTH};

/// Renders framebuffer snapshots into the terminal. Entering the
/// alternate screen and raw mode happens on construction; both are
/// undone on drop, even when the frontend bails out with an error.
pub struct Screen {
    last: Framebuffer,
}

impl Screen {
    pub fn new() -> crossterm::Result<Screen> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        terminal::enable_raw_mode()?;
        draw_border(&mut stdout)?;
        stdout.flush()?;
        Ok(Screen {
            last: Framebuffer::new(),
        })
    }

    /// Draw the cells that changed since the previous frame. Each pixel
    /// is two characters wide to keep the aspect ratio near square.
    pub fn present(&mut self, frame: &Framebuffer) -> crossterm::Result<()> {
        if *frame == self.last {
            return Ok(());
        }
        let mut stdout = stdout();
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let lit = frame.get(x, y);
                if lit != self.last.get(x, y) {
                    queue!(
                        stdout,
                        cursor::MoveTo(1 + 2 * x as u16, 1 + y as u16),
                        Print(if lit { "██" } else { "  " })
                    )?;
                }
            }
        }
        stdout.flush()?;
        self.last = frame.clone();
        Ok(())
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, cursor::Show);
    }
}

fn draw_border(stdout: &mut Stdout) -> crossterm::Result<()> {
    let right = 2 * WIDTH as u16 + 1;
    let bottom = HEIGHT as u16 + 1;
    queue!(stdout, cursor::MoveTo(0, 0), Print('┏'))?;
    for _ in 0..2 * WIDTH {
        queue!(stdout, Print('━'))?;
    }
    queue!(stdout, Print('┓'))?;
    for y in 1..bottom {
        queue!(stdout, cursor::MoveTo(0, y), Print('┃'))?;
        queue!(stdout, cursor::MoveTo(right, y), Print('┃'))?;
    }
    queue!(stdout, cursor::MoveTo(0, bottom), Print('┗'))?;
    for _ in 0..2 * WIDTH {
        queue!(stdout, Print('━'))?;
    }
    queue!(stdout, Print('┛'))?;
    Ok(())
}

// 1 2 3 4      1 2 3 C
// q w e r  ->  4 5 6 D
// a s d f      7 8 9 E
// z x c v      A 0 B F
pub fn key_index(code: KeyCode) -> Option<u8> {
    let key = match code {
        KeyCode::Char('1') => 0x1,
        KeyCode::Char('2') => 0x2,
        KeyCode::Char('3') => 0x3,
        KeyCode::Char('4') => 0xC,
        KeyCode::Char('q') => 0x4,
        KeyCode::Char('w') => 0x5,
        KeyCode::Char('e') => 0x6,
        KeyCode::Char('r') => 0xD,
        KeyCode::Char('a') => 0x7,
        KeyCode::Char('s') => 0x8,
        KeyCode::Char('d') => 0x9,
        KeyCode::Char('f') => 0xE,
        KeyCode::Char('z') => 0xA,
        KeyCode::Char('x') => 0x0,
        KeyCode::Char('c') => 0xB,
        KeyCode::Char('v') => 0xF,
        _ => return None,
    };
    Some(key)
}
