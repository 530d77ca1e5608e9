//! The virtual machine: state, decoder, execution engine, display
//! compositor, input latch, and the threaded runner that drives them.

pub mod display;
pub mod fault;
pub mod instruction;
pub mod keypad;
pub mod runner;
pub mod state;

mod cpu;

pub use self::fault::{Fault, LoadError};
pub use self::runner::Runner;
pub use self::state::{Machine, Mode};
