use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use cosmac::machine::{Machine, Runner};

/// Run a ROM without a display, until it faults or is interrupted.
/// Useful for exercising programs and inspecting faults.
#[derive(StructOpt, Debug)]
#[structopt(name = "cosmac")]
struct Opt {
    /// Instructions per second
    #[structopt(short, long, default_value = "700")]
    clock: u32,

    /// The ROM file to execute
    #[structopt(parse(from_os_str))]
    rom: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let opt = Opt::from_args();
    log::info!("executing {:?}", &opt.rom);
    let image = std::fs::read(&opt.rom)?;

    let machine = Machine::new(&image)?;
    let runner = Runner::spawn(machine, opt.clock);

    loop {
        std::thread::sleep(Duration::from_millis(250));
        if let Some(fault) = runner.fault() {
            // Post-mortem dump before handing the fault to the shell.
            runner.inspect(|machine| {
                eprintln!("{}", machine.framebuffer());
                eprintln!(
                    "halted: pc={:#06X} i={:#06X} registers={:02X?}",
                    machine.program_counter(),
                    machine.index_register(),
                    machine.registers()
                );
            });
            return Err(fault.into());
        }
    }
}
