use std::path::PathBuf;

use clap::Parser;

use chip8_core::Quirks;

mod keymap;
mod run;

/// SUPER-CHIP capable CHIP-8 interpreter.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Path to the ROM to run
    pub rom: PathBuf,

    /// Window scale factor per base-resolution pixel
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: u32,

    /// CPU clock rate in instructions per second
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    pub clock: u32,

    /// Run with the SUPER-CHIP display, switchable to 128x64
    #[arg(long)]
    pub schip: bool,

    /// 8XY6/8XYE shift VX in place instead of reading VY
    #[arg(long)]
    pub shift_quirk: bool,

    /// BNNN adds VX (X taken from the address) instead of V0
    #[arg(long)]
    pub jump_quirk: bool,

    /// DXYN wraps sprites around the screen edges instead of clipping
    #[arg(long)]
    pub wrap_sprite: bool,

    /// FX55/FX65 advance I by X instead of X + 1
    #[arg(long)]
    pub memory_increment_by_x: bool,

    /// FX55/FX65 leave I unchanged
    #[arg(long)]
    pub memory_leave_i_unchanged: bool,

    /// Keep running through a jump to the jump's own address
    #[arg(long)]
    pub no_endless_jump_catch: bool,

    /// Leave VF alone after 8XY1/8XY2/8XY3
    #[arg(long)]
    pub no_vf_reset: bool,
}

impl Args {
    fn quirks(&self) -> Quirks {
        Quirks {
            catch_endless_jump: !self.no_endless_jump_catch,
            shift: self.shift_quirk,
            jump: self.jump_quirk,
            wrap_sprite: self.wrap_sprite,
            memory_increment_by_x: self.memory_increment_by_x,
            memory_leave_i_unchanged: self.memory_leave_i_unchanged,
            vf_reset: !self.no_vf_reset,
            ..Quirks::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run::run(&args)
}
