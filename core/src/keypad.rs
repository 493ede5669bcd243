/// The 16-key hex keypad as the CPU sees it.
///
/// The embedding application owns the physical input and mutates key state
/// through [`Keypad::update_keys`] (or an implementation-specific channel);
/// the CPU only reads. `is_key_pressed` is level-triggered and
/// non-consuming: `SKP`/`SKNP` may observe the same held key on
/// consecutive cycles.
///
/// There is no blocking wait. `LD Vx,K` probes [`Keypad::first_pressed`]
/// once per cycle and rewinds the program counter when no key is down, so
/// the driver loop keeps servicing the display and timers in between.
pub trait Keypad {
    /// Whether key `0x0..=0xF` is currently held down.
    fn is_key_pressed(&self, key: u8) -> bool;

    /// The lowest-numbered key currently held, if any.
    fn first_pressed(&self) -> Option<u8>;

    /// Refresh key state from the physical input source.
    fn update_keys(&mut self);
}

/// Plain key-state store for drivers that pump input themselves.
///
/// An event-driven frontend calls [`KeypadState::press`] and
/// [`KeypadState::release`] from its event loop, which makes
/// `update_keys` a no-op here.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeypadState {
    keys: [bool; 16],
}

impl KeypadState {
    pub fn new() -> Self {
        KeypadState::default()
    }

    pub fn press(&mut self, key: u8) {
        if let Some(k) = self.keys.get_mut(key as usize) {
            *k = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(k) = self.keys.get_mut(key as usize) {
            *k = false;
        }
    }
}

impl Keypad for KeypadState {
    fn is_key_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&down| down).map(|k| k as u8)
    }

    fn update_keys(&mut self) {}
}
