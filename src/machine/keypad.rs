/// The 16-key input latch. The host records press/release levels here and
/// the execution engine consults them for the key-skip instructions.
///
/// Key indices are masked to 0..16, so a malformed index can never reach
/// the backing array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; 16],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad { keys: [false; 16] }
    }

    pub fn set(&mut self, key: u8, pressed: bool) {
        self.keys[(key & 0xF) as usize] = pressed;
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    pub fn release_all(&mut self) {
        self.keys = [false; 16];
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn keys_start_released() {
        let keypad = Keypad::new();
        for key in 0..16 {
            assert!(!keypad.is_pressed(key));
        }
    }

    #[test]
    fn set_and_release_one_key() {
        let mut keypad = Keypad::new();
        keypad.set(0xA, true);
        assert!(keypad.is_pressed(0xA));
        assert!(!keypad.is_pressed(0xB));
        keypad.set(0xA, false);
        assert!(!keypad.is_pressed(0xA));
    }

    #[test]
    fn indices_are_masked_to_the_low_nibble() {
        let mut keypad = Keypad::new();
        keypad.set(0x1A, true);
        assert!(keypad.is_pressed(0xA));
    }

    #[test]
    fn release_all_clears_everything() {
        let mut keypad = Keypad::new();
        keypad.set(3, true);
        keypad.set(7, true);
        keypad.release_all();
        assert_eq!(keypad, Keypad::new());
    }
}
