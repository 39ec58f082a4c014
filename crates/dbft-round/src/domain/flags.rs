//! Round status flags.
//!
//! The round's status is a tagged set of independent facets, not a strict
//! state machine: a node can have sent its prepare-request and its signature
//! at the same time. Modelled as a small bitmask newtype.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// Bitmask of round status flags.
///
/// `INITIAL` is the empty mask; the other flags are independent bits and may
/// be set simultaneously. Exactly one of `PRIMARY`/`BACKUP` is meaningful
/// once the local node's role for the round is known.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundState(u8);

impl RoundState {
    /// Fresh round, nothing sent or received yet.
    pub const INITIAL: RoundState = RoundState(0x00);
    /// This node is the view's proposer.
    pub const PRIMARY: RoundState = RoundState(0x01);
    /// This node is a backup (non-proposer validator).
    pub const BACKUP: RoundState = RoundState(0x02);
    /// The prepare-request for this view has been sent.
    pub const REQUEST_SENT: RoundState = RoundState(0x04);
    /// A prepare-request for this view has been received.
    pub const REQUEST_RECEIVED: RoundState = RoundState(0x08);
    /// This node's signature over the candidate header has been broadcast.
    pub const SIGNATURE_SENT: RoundState = RoundState(0x10);
    /// A block reached quorum and was generated this round.
    pub const BLOCK_GENERATED: RoundState = RoundState(0x20);

    /// Check whether every bit of `flag` is set.
    pub fn contains(self, flag: RoundState) -> bool {
        self.0 & flag.0 == flag.0 && flag.0 != 0
    }

    /// True when no flag at all is set.
    pub fn is_initial(self) -> bool {
        self.0 == 0
    }

    /// Set the given flag bits.
    pub fn insert(&mut self, flag: RoundState) {
        self.0 |= flag.0;
    }

    /// Clear the given flag bits.
    pub fn remove(&mut self, flag: RoundState) {
        self.0 &= !flag.0;
    }
}

impl BitAnd for RoundState {
    type Output = RoundState;

    fn bitand(self, rhs: RoundState) -> RoundState {
        RoundState(self.0 & rhs.0)
    }
}

impl BitAndAssign for RoundState {
    fn bitand_assign(&mut self, rhs: RoundState) {
        self.0 &= rhs.0;
    }
}

impl BitOr for RoundState {
    type Output = RoundState;

    fn bitor(self, rhs: RoundState) -> RoundState {
        RoundState(self.0 | rhs.0)
    }
}

impl BitOrAssign for RoundState {
    fn bitor_assign(&mut self, rhs: RoundState) {
        self.0 |= rhs.0;
    }
}

/// Human-readable flag summary for diagnostics. No protocol meaning.
impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Initial: {}, Primary: {}, Backup: {}, RequestSent: {}, \
             RequestReceived: {}, SignatureSent: {}, BlockGenerated: {}",
            self.is_initial(),
            self.contains(RoundState::PRIMARY),
            self.contains(RoundState::BACKUP),
            self.contains(RoundState::REQUEST_SENT),
            self.contains(RoundState::REQUEST_RECEIVED),
            self.contains(RoundState::SIGNATURE_SENT),
            self.contains(RoundState::BLOCK_GENERATED),
        )
    }
}
