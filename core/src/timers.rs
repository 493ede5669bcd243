/// The two 8-bit down-counters and the derived beeper signal.
///
/// Both timers tick down at 60 Hz and clamp at zero; the driver owns the
/// schedule and calls [`Timers::decrement`] once per tick. The beeper
/// boolean is recomputed whenever the sound timer enters or leaves zero,
/// so a driver can poll it instead of watching the counter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    delay: u8,
    sound: u8,
    beeper: bool,
}

impl Timers {
    pub fn new() -> Self {
        Timers::default()
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
        self.beeper = value > 0;
    }

    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// One 60 Hz tick: step both counters toward zero.
    pub fn decrement(&mut self) {
        if self.delay > 0 {
            self.delay -= 1;
        }
        if self.sound > 0 {
            self.sound -= 1;
            if self.sound == 0 {
                self.beeper = false;
            }
        }
    }

    pub fn beeper(&self) -> bool {
        self.beeper
    }
}
