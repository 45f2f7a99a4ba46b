//! Interrupts
//!
//! This module implements the Game Boy interrupt controller.
//!
//! Registers:
//! - IF (0xFF0F): Interrupt flags - pending requests, bits 5-7 read as 1
//! - IE (0xFFFF): Interrupt enable - per-source mask, bits 5-7 read as 0
//!
//! Five sources in priority order (highest first), with their vectors:
//! - VBlank: 0x0040
//! - LCD STAT: 0x0048
//! - Timer: 0x0050
//! - Serial: 0x0058
//! - Joypad: 0x0060
//!
//! Delivery is gated twice: per source by the mask register, and globally
//! by the master enable latch (the EI/DI state). A request that arrives
//! while the latch is down stays queued and can still wake a halted CPU.

use crate::common::{bit, bit_set, Byte, Word};
use log::trace;

/// Interrupt sources in priority order (VBlank highest, Joypad lowest)
///
/// The discriminant is both the priority rank and the bit position in the
/// IF/mask registers, so arbitration order and register layout cannot
/// drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptType {
    /// VBlank interrupt (highest priority)
    VBlank = 0,
    /// LCD STAT interrupt
    LcdStat = 1,
    /// Timer overflow interrupt
    Timer = 2,
    /// Serial transfer interrupt
    Serial = 3,
    /// Joypad interrupt (lowest priority)
    Joypad = 4,
}

impl InterruptType {
    /// Number of interrupt sources
    pub const COUNT: usize = 5;

    /// Get the bit position for this interrupt in the IF/mask registers
    pub fn bit(self) -> u8 {
        self as u8
    }

    /// Get the interrupt vector address
    pub fn vector(self) -> Word {
        match self {
            InterruptType::VBlank => 0x0040,
            InterruptType::LcdStat => 0x0048,
            InterruptType::Timer => 0x0050,
            InterruptType::Serial => 0x0058,
            InterruptType::Joypad => 0x0060,
        }
    }

    /// Get all interrupt types in priority order
    pub fn all() -> &'static [InterruptType; Self::COUNT] {
        &[
            InterruptType::VBlank,
            InterruptType::LcdStat,
            InterruptType::Timer,
            InterruptType::Serial,
            InterruptType::Joypad,
        ]
    }
}

/// CPU-core side of interrupt delivery
///
/// The controller calls [`vector_to`](Self::vector_to) when it delivers an
/// interrupt; the implementor pushes PC and jumps to the handler. Hardware
/// clears the master enable latch on handler entry, so the implementor is
/// also expected to call [`InterruptController::disable`] as part of
/// servicing - the controller never clears its own latch on delivery.
pub trait InterruptDispatch {
    /// Transfer control to the interrupt handler at `vector`
    fn vector_to(&mut self, vector: Word);
}

/// Per-source state: one unserviced-request flag, one mask flag
///
/// The mask flag stores the inverted sense of the register bit: `masked`
/// true means the source is disabled from delivery.
#[derive(Debug, Clone, Copy, Default)]
struct Source {
    requested: bool,
    masked: bool,
}

/// Game Boy interrupt controller
///
/// Owns the five (request, mask) pairs, the global enable latch and the
/// mid-cycle pending flag. Constructed once per emulated session and
/// passed by reference to the CPU core and the hardware-source emulators.
#[derive(Debug, Clone)]
pub struct InterruptController {
    /// Global enable latch (the IME state set by EI/DI)
    enabled: bool,
    /// An interrupt became pending mid-cycle and should wake a halted CPU
    pending: bool,
    /// Source state indexed by priority rank
    sources: [Source; InterruptType::COUNT],
}

impl Default for InterruptController {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptController {
    /// Create a new controller in its reset state
    ///
    /// Reset defaults: no requests pending, all five sources unmasked
    /// (the mask register reads 0x1F), global enable latch down, no
    /// mid-cycle pending signal.
    pub fn new() -> Self {
        Self {
            enabled: false,
            pending: false,
            sources: [Source::default(); InterruptType::COUNT],
        }
    }

    /// Raise a request from a hardware source
    ///
    /// Called by the source's emulator when its condition fires (e.g. the
    /// PPU finishing a frame). Idempotent while the request is unserviced.
    /// If the enable latch is up, flushes immediately so the interrupt is
    /// serviced without waiting for the next step boundary; otherwise the
    /// request stays queued for later delivery or for waking a halt.
    pub fn request(&mut self, source: InterruptType, cpu: &mut dyn InterruptDispatch) {
        trace!("interrupt request: {:?}", source);
        self.sources[source as usize].requested = true;

        if self.enabled {
            self.flush(cpu);
        }
    }

    /// Deliver the highest-priority unmasked pending interrupt, if any
    ///
    /// Called by the CPU loop at every instruction boundary. Clears the
    /// mid-cycle pending flag first in all cases. With the enable latch
    /// down, no interrupt can be delivered, but a pending request still
    /// ends a halted state: that is the only case that returns `true`.
    ///
    /// With the latch up, the sources are scanned in priority order and
    /// the first one that is both requested and unmasked is delivered:
    /// its request flag is cleared and the CPU is vectored to its
    /// handler. At most one interrupt is delivered per call; lower
    /// priority requests stay queued.
    pub fn flush(&mut self, cpu: &mut dyn InterruptDispatch) -> bool {
        self.pending = false;

        if !self.enabled {
            // Can't service anything, but a queued request still unhalts
            // the CPU (masked or not).
            return self.sources.iter().any(|s| s.requested);
        }

        for &source in InterruptType::all() {
            let slot = &mut self.sources[source as usize];
            if slot.requested && !slot.masked {
                slot.requested = false;
                trace!("delivering {:?} -> {:#06X}", source, source.vector());
                cpu.vector_to(source.vector());
                break;
            }
        }

        false
    }

    /// Raise the global enable latch (EI)
    ///
    /// Flushes immediately, so a request that queued up while interrupts
    /// were disabled is serviced the instant they are re-enabled.
    pub fn enable(&mut self, cpu: &mut dyn InterruptDispatch) {
        self.enabled = true;
        self.flush(cpu);
    }

    /// Drop the global enable latch (DI); queued requests are kept
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Whether an interrupt became pending mid-cycle
    ///
    /// Read by the CPU core to end a halted state outside the normal step
    /// loop. Cleared by the next [`flush`](Self::flush).
    pub fn pending_mid_cycle(&self) -> bool {
        self.pending
    }

    /// Read the IF register: request flags in bits 0-4, bits 5-7 wired to 1
    pub fn read_request_register(&self) -> Byte {
        let mut value: Byte = 0xE0;
        for &source in InterruptType::all() {
            bit_set(&mut value, source.bit(), self.sources[source as usize].requested);
        }
        value
    }

    /// Write the IF register: bits 0-4 overwrite the request flags
    ///
    /// Bits 5-7 are ignored. With the enable latch up, writing any request
    /// bit raises the mid-cycle pending signal, modeling software poking a
    /// pending interrupt while the CPU could be halted.
    pub fn write_request_register(&mut self, value: Byte) {
        for &source in InterruptType::all() {
            self.sources[source as usize].requested = bit(value, source.bit());
        }

        if self.enabled && (value & 0x1F) != 0 {
            self.pending = true;
        }
    }

    /// Read the mask register: a set bit means unmasked, bits 5-7 read 0
    pub fn read_mask_register(&self) -> Byte {
        let mut value: Byte = 0x00;
        for &source in InterruptType::all() {
            bit_set(&mut value, source.bit(), !self.sources[source as usize].masked);
        }
        value
    }

    /// Write the mask register: a set bit in 0-4 unmasks that source
    pub fn write_mask_register(&mut self, value: Byte) {
        for &source in InterruptType::all() {
            self.sources[source as usize].masked = !bit(value, source.bit());
        }
    }
}
