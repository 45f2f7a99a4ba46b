//! Game Boy Interrupt Controller Library
//!
//! This library implements the Game Boy interrupt system as a standalone,
//! explicitly-owned component: the IF (interrupt flags) register, the
//! per-source enable mask, fixed priority arbitration across the five
//! hardware sources, and the halt-wake semantics the CPU core relies on.
//! The CPU core, timer, PPU, serial and joypad emulators are external
//! collaborators that hold a reference to the controller and call into it.

pub mod common;
pub mod interrupts;
