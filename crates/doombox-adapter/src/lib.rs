//! # doombox-adapter
//!
//! Guest-side half of the boundary layer: the logic that sits between the
//! unmodified engine and the module's import surface.
//!
//! Inside the packaged module this code answers the engine's platform
//! callbacks by calling imports; here it is a host-agnostic library driven
//! through the [`PlatformHost`] trait so every protocol is testable without
//! an interpreter:
//!
//! - **Key cache** ([`keys`]): double-buffered key states, surfacing each
//!   change exactly once and in key-code order.
//! - **WAD acquisition** ([`wads`]): the two-phase size/copy protocol with
//!   the built-in fallback archive.
//! - **Save games** ([`saves`]): exact-size readers and growable writers
//!   with an explicit growth policy.
//! - **Platform facade** ([`platform`]): the engine-facing callback set
//!   wired to the above.

pub mod keys;
pub mod platform;
pub mod saves;
pub mod wads;

#[cfg(test)]
pub(crate) mod testing;

pub use keys::{KeyEvent, KeyStates};
pub use platform::{Platform, PlatformHost};
pub use saves::{SaveReader, SaveWriter, ShortPersist};
pub use wads::{WadBundle, BUILTIN_IWAD};
