/// Behavioral toggles reproducing historical interpreter divergences.
///
/// Each flag changes the semantics of exactly one instruction family.
/// The defaults match the modern/common interpreter behavior except
/// `catch_endless_jump` and `vf_reset`, which default on because that is
/// what the original COSMAC VIP interpreter did and what most test ROMs
/// expect.
///
/// Flag descriptions follow the CHIP-8 quirks database
/// (<https://github.com/chip-8/chip-8-database>).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// Treat `JP addr` with `addr == PC - 2` as a deliberate halt instead
    /// of spinning forever. Programs commonly use a jump-to-self as "stop".
    pub catch_endless_jump: bool,

    /// `SHR`/`SHL` read and write the same register Vx (HP48 behavior)
    /// instead of reading Vy and writing Vx (original hardware).
    pub shift: bool,

    /// `LD [I],Vx` / `LD Vx,[I]` advance the index register by X instead
    /// of X + 1 (CHIP-48 behavior).
    pub memory_increment_by_x: bool,

    /// `LD [I],Vx` / `LD Vx,[I]` leave the index register untouched
    /// entirely (SUPER-CHIP 1.1 behavior). Takes precedence over
    /// `memory_increment_by_x` when both are set.
    pub memory_leave_i_unchanged: bool,

    /// Sprite pixels wrap around the display edges instead of being
    /// clipped (Octo/XO-CHIP behavior).
    pub wrap_sprite: bool,

    /// `JP V0,addr` uses the register selected by the address's high
    /// nibble, mirroring an HP48 defect, instead of always V0.
    pub jump: bool,

    /// Rate-limit sprite draws to the 60 Hz tick. Documented for parity
    /// with the quirks database; the draw instruction does not currently
    /// enforce it.
    pub vblank: bool,

    /// `OR`/`AND`/`XOR` force VF to zero after execution (COSMAC VIP
    /// behavior) instead of leaving it untouched.
    pub vf_reset: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks {
            catch_endless_jump: true,
            shift: false,
            memory_increment_by_x: false,
            memory_leave_i_unchanged: false,
            wrap_sprite: false,
            jump: false,
            vblank: true,
            vf_reset: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_common_interpreter() {
        let q = Quirks::default();
        assert!(q.catch_endless_jump);
        assert!(q.vf_reset);
        assert!(q.vblank);
        assert!(!q.shift);
        assert!(!q.memory_increment_by_x);
        assert!(!q.memory_leave_i_unchanged);
        assert!(!q.wrap_sprite);
        assert!(!q.jump);
    }
}
