/*!

A CHIP-8 virtual machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm frontend

To play a ROM in the terminal, run
`cargo run --release --bin crossterm_frontend -- <rom>`.
The keys 1-4, q-r, a-f and z-v map to the machine's 16-key pad, `F5`
resets the machine and reloads the ROM, and `Esc` quits. Which pad keys a
program reacts to is up to the ROM.

# Library

The machine itself has no opinions about windowing, keyboards or audio;
it executes instructions and exposes its state. Create one with a program
image and step it by hand:

```rust
use cosmac::machine::Machine;

// Clear the screen, then jump back to the start.
let mut machine = Machine::new(&[0x00, 0xE0, 0x12, 0x00]).unwrap();
machine.step().unwrap();
assert_eq!(machine.program_counter(), 0x202);
```

Malformed programs do not panic; the machine parks itself in a fault
state the host can inspect:

```rust
use cosmac::machine::{Fault, Machine};

let mut machine = Machine::new(&[0xFF, 0xFF]).unwrap();
assert!(machine.step().is_err());
assert_eq!(machine.fault(), Some(Fault::InvalidInstruction { opcode: 0xFFFF }));
```

# Running a machine

`Runner::spawn` drives a machine from two threads (the instruction
cycle at a rate you choose, the two timers at 60 Hz) and hands the
host a transactional interface: key events in, framebuffer snapshots and
sound state out.

```rust,no_run
use cosmac::machine::{Machine, Runner};

let machine = Machine::new(&[0x12, 0x00]).unwrap();
let runner = Runner::spawn(machine, 700);
runner.set_key(0x4, true);
let frame = runner.snapshot();
assert!(!frame.get(0, 0));
```
*/

pub mod machine;
pub mod util;
