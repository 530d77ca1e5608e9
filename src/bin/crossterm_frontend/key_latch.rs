use std::time::{Duration, Instant};

/// Terminals report key presses (and auto-repeats) but never releases,
/// so a held key arrives as a stream of press events. The latch turns
/// that stream back into levels: a key stays pressed while repeats keep
/// arriving within the hold window and is reported as released once
/// they stop.
pub struct KeyLatch {
    hold: Duration,
    held: [Option<Instant>; 16],
}

impl KeyLatch {
    pub fn new(hold: Duration) -> KeyLatch {
        KeyLatch {
            hold,
            held: [None; 16],
        }
    }

    /// Record a press or repeat event.
    pub fn press(&mut self, key: u8) {
        self.held[(key & 0xF) as usize] = Some(Instant::now());
    }

    /// Drain the keys whose hold window has run out; each is reported
    /// released exactly once.
    pub fn expired(&mut self) -> Vec<u8> {
        let mut released = Vec::new();
        for (key, pressed_at) in self.held.iter_mut().enumerate() {
            if let Some(at) = *pressed_at {
                if at.elapsed() >= self.hold {
                    *pressed_at = None;
                    released.push(key as u8);
                }
            }
        }
        released
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn a_fresh_press_is_still_held() {
        let mut latch = KeyLatch::new(Duration::from_secs(60));
        latch.press(0x4);
        assert!(latch.expired().is_empty());
    }

    #[test]
    fn an_expired_press_is_released_once() {
        let mut latch = KeyLatch::new(Duration::from_millis(0));
        latch.press(0x4);
        assert_eq!(latch.expired(), vec![0x4]);
        assert!(latch.expired().is_empty());
    }

    #[test]
    fn a_repeat_refreshes_the_hold() {
        let mut latch = KeyLatch::new(Duration::from_secs(60));
        latch.press(0x4);
        latch.press(0x4);
        assert!(latch.expired().is_empty());
    }
}
