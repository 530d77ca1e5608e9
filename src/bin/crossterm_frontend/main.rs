use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use structopt::StructOpt;

use cosmac::machine::{Machine, Runner};

mod crossterm_io;
mod key_latch;

use crossterm_io::{key_index, Screen};
use key_latch::KeyLatch;

const FRAME: Duration = Duration::from_millis(1000 / 60);

/// How long a key counts as held after its last press or repeat event.
/// Terminals never report releases, so the latch has to invent them.
const KEY_HOLD: Duration = Duration::from_millis(200);

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// Instructions per second
    #[structopt(short, long, default_value = "700")]
    clock: u32,

    /// The ROM file to execute
    #[structopt(parse(from_os_str))]
    rom: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let opt = Opt::from_args();
    log::info!("executing {:?}", &opt.rom);
    let image = std::fs::read(&opt.rom)?;

    let machine = Machine::new(&image)?;
    let runner = Runner::spawn(machine, opt.clock);

    let mut screen = Screen::new()?;
    let mut latch = KeyLatch::new(KEY_HOLD);
    let mut sounding = false;
    let mut halted = false;

    loop {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                match code {
                    KeyCode::Esc => return Ok(()),
                    KeyCode::F(5) => runner.reset(),
                    code => {
                        if let Some(key) = key_index(code) {
                            runner.set_key(key, true);
                            latch.press(key);
                        }
                    }
                }
            }
        }
        for key in latch.expired() {
            runner.set_key(key, false);
        }

        screen.present(&runner.snapshot())?;

        // Ring the terminal bell when the sound timer starts running.
        let now_sounding = runner.sound_active();
        if now_sounding && !sounding {
            print!("\x07");
            std::io::stdout().flush()?;
        }
        sounding = now_sounding;

        // A fault leaves the last frame on screen; F5 resets and revives.
        match runner.fault() {
            Some(fault) => {
                if !halted {
                    log::error!("machine halted: {}", fault);
                }
                halted = true;
            }
            None => halted = false,
        }

        std::thread::sleep(FRAME);
    }
}
