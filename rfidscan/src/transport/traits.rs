// rfidscan/src/transport/traits.rs

use crate::constants::VERSION_SENTINELS;
use crate::types::{AuthKey, BlockAddress, BlockData, SelectedCard, Uid};
use crate::{Error, Result};

/// Transport trait abstracts the reader peripheral away from the session
/// logic. Implementations wrap the contactless front-end driver; every
/// method is one bounded bus transaction.
///
/// Non-OK peripheral answers come back as `Error::Status`. Implementations
/// must not cache authentication: a read or write is only valid right after
/// `authenticate` succeeded for that same block.
pub trait Transport {
    /// Read the reader's version register.
    fn version(&mut self) -> Result<u8>;

    /// Is a new (idle) card in the field?
    fn card_present(&mut self) -> Result<bool>;

    /// Run anticollision + select. `Ok(None)` means the card left or did not
    /// answer.
    fn select(&mut self) -> Result<Option<SelectedCard>>;

    /// Authenticate with key A for one block.
    fn authenticate(&mut self, block: BlockAddress, key: &AuthKey, uid: &Uid) -> Result<()>;

    /// Read 16 bytes starting at `block`. On page-oriented cards this returns
    /// four consecutive pages.
    fn read_block(&mut self, block: BlockAddress) -> Result<BlockData>;

    fn write_block(&mut self, block: BlockAddress, data: &BlockData) -> Result<()>;

    /// Halt the card and stop the crypto session.
    fn halt_and_release(&mut self) -> Result<()>;
}

/// Probe the reader. A version register reading of 0x00 or 0xFF means the
/// bus is floating and the reader is not there.
pub fn probe(transport: &mut dyn Transport) -> Result<u8> {
    let version = transport.version()?;
    if VERSION_SENTINELS.contains(&version) {
        return Err(Error::NotResponding { version });
    }
    Ok(version)
}
