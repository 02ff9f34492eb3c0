// rfidscan/src/card/access.rs

use derive_more::Display;
use log::debug;

use crate::transport::Transport;
use crate::types::{AuthKey, BlockAddress, BlockData, PageData, StatusCode, Uid};

/// Why a single block operation did not succeed. Together with `Ok` this
/// makes every block access tri-state: ok, auth failed, io failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BlockFailure {
    #[display(fmt = "auth failed ({})", _0)]
    Auth(StatusCode),
    #[display(fmt = "io failed ({})", _0)]
    Io(StatusCode),
}

impl BlockFailure {
    pub fn status(&self) -> StatusCode {
        match self {
            BlockFailure::Auth(code) | BlockFailure::Io(code) => *code,
        }
    }
}

pub type AccessResult<T> = std::result::Result<T, BlockFailure>;

/// Block access driver for the currently selected card.
///
/// Every sectored read or write authenticates the target block first; the
/// driver keeps no authentication state between calls.
pub struct BlockAccess<'a> {
    transport: &'a mut dyn Transport,
    key: &'a AuthKey,
    uid: Uid,
}

impl<'a> BlockAccess<'a> {
    pub fn new(transport: &'a mut dyn Transport, key: &'a AuthKey, uid: Uid) -> Self {
        Self {
            transport,
            key,
            uid,
        }
    }

    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    pub fn authenticate(&mut self, block: BlockAddress) -> AccessResult<()> {
        self.transport
            .authenticate(block, self.key, &self.uid)
            .map_err(|e| {
                let failure = BlockFailure::Auth(e.status_code());
                debug!("block {}: {}", block, failure);
                failure
            })
    }

    /// Authenticate then read one 16-byte block.
    pub fn read(&mut self, block: BlockAddress) -> AccessResult<BlockData> {
        self.authenticate(block)?;
        self.transport.read_block(block).map_err(|e| {
            let failure = BlockFailure::Io(e.status_code());
            debug!("block {}: read {}", block, failure);
            failure
        })
    }

    /// Read one page of a page-oriented card. No authentication; the reader
    /// returns four pages and only the addressed one is kept.
    pub fn read_page(&mut self, page: u8) -> AccessResult<PageData> {
        let address = BlockAddress::from_linear(page);
        match self.transport.read_block(address) {
            Ok(data) => Ok(data.first_page()),
            Err(e) => {
                let failure = BlockFailure::Io(e.status_code());
                debug!("page {}: {}", page, failure);
                Err(failure)
            }
        }
    }

    /// Authenticate then write one 16-byte block.
    pub fn write(&mut self, block: BlockAddress, data: &BlockData) -> AccessResult<()> {
        self.authenticate(block)?;
        self.transport.write_block(block, data).map_err(|e| {
            let failure = BlockFailure::Io(e.status_code());
            debug!("block {}: write {}", block, failure);
            failure
        })
    }
}
