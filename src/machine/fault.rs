use thiserror::Error;

/// A recoverable machine fault. The machine records the fault and halts
/// instead of terminating the hosting process; the driver can inspect the
/// halted state and revive it with a reset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("invalid opcode {opcode:#06X}")]
    InvalidInstruction { opcode: u16 },

    #[error("call with all 16 stack slots in use")]
    StackOverflow,

    #[error("return with an empty call stack")]
    StackUnderflow,

    #[error("program counter {address:#06X} outside executable memory")]
    ProgramCounter { address: u16 },
}

/// A program image that cannot be loaded. Reported before the machine
/// starts; nothing is written to memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("program is {size} bytes, but at most {max} fit above 0x200")]
    TooLarge { size: usize, max: usize },
}
