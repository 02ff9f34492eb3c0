// rfidscan/src/transport/mock.rs

use std::collections::HashSet;

use crate::constants::{BLOCK_SIZE, BLOCKS_PER_SECTOR, PAGE_COUNT, PAGE_SIZE, SECTOR_COUNT};
use crate::transport::traits::Transport;
use crate::types::{AuthKey, BlockAddress, BlockData, SelectedCard, StatusCode, Uid};
use crate::{Error, Result};

/// Factory trailer: key A, access bits FF 07 80 69, key B.
const DEFAULT_TRAILER: [u8; BLOCK_SIZE] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x07, 0x80, 0x69, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
];

/// One recorded call on the mock reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Version,
    Present,
    Select,
    Authenticate(u8),
    Read(u8),
    Write(u8, BlockData),
    Halt,
}

/// A simulated card sitting in the mock reader's field.
#[derive(Debug, Clone)]
pub struct MockCard {
    pub selection: SelectedCard,
    /// Raw memory image. Sectored cards are addressed in 16-byte blocks,
    /// page-oriented cards in 4-byte pages.
    pub memory: Vec<u8>,
    pub paged: bool,
    pub key: AuthKey,
    pub auth_failures: HashSet<u8>,
    pub read_failures: HashSet<u8>,
    pub write_failures: HashSet<u8>,
}

impl MockCard {
    /// A sectored card (16 sectors x 4 blocks) with factory trailers and
    /// zeroed data blocks.
    pub fn sectored(uid: Uid, atqa: u16, sak: u8) -> Self {
        let blocks = SECTOR_COUNT as usize * BLOCKS_PER_SECTOR as usize;
        let mut memory = vec![0u8; blocks * BLOCK_SIZE];
        memory[..uid.len()].copy_from_slice(uid.as_bytes());
        for sector in 0..SECTOR_COUNT {
            let trailer = BlockAddress::new(sector, BLOCKS_PER_SECTOR - 1).as_u8() as usize;
            memory[trailer * BLOCK_SIZE..(trailer + 1) * BLOCK_SIZE]
                .copy_from_slice(&DEFAULT_TRAILER);
        }
        Self {
            selection: SelectedCard::new(uid, atqa, sak),
            memory,
            paged: false,
            key: AuthKey::DEFAULT,
            auth_failures: HashSet::new(),
            read_failures: HashSet::new(),
            write_failures: HashSet::new(),
        }
    }

    pub fn classic_1k(uid: Uid) -> Self {
        Self::sectored(uid, 0x0004, 0x08)
    }

    /// A page-oriented card (16 pages x 4 bytes).
    pub fn ultralight(uid: Uid) -> Self {
        let mut memory = vec![0u8; PAGE_COUNT as usize * PAGE_SIZE];
        let n = uid.len().min(memory.len());
        memory[..n].copy_from_slice(&uid.as_bytes()[..n]);
        Self {
            selection: SelectedCard::new(uid, 0x0044, 0x00),
            memory,
            paged: true,
            key: AuthKey::DEFAULT,
            auth_failures: HashSet::new(),
            read_failures: HashSet::new(),
            write_failures: HashSet::new(),
        }
    }

    pub fn with_block(mut self, block: BlockAddress, data: BlockData) -> Self {
        self.store(block.as_u8(), &data);
        self
    }

    pub fn with_key(mut self, key: AuthKey) -> Self {
        self.key = key;
        self
    }

    pub fn fail_auth(mut self, block: BlockAddress) -> Self {
        self.auth_failures.insert(block.as_u8());
        self
    }

    pub fn fail_read(mut self, block: BlockAddress) -> Self {
        self.read_failures.insert(block.as_u8());
        self
    }

    pub fn fail_write(mut self, block: BlockAddress) -> Self {
        self.write_failures.insert(block.as_u8());
        self
    }

    fn unit(&self) -> usize {
        if self.paged { PAGE_SIZE } else { BLOCK_SIZE }
    }

    /// 16 bytes starting at `address`, wrapping around the end of memory
    /// the way page-oriented cards do.
    pub fn load(&self, address: u8) -> Option<BlockData> {
        let start = address as usize * self.unit();
        if start >= self.memory.len() {
            return None;
        }
        let mut arr = [0u8; BLOCK_SIZE];
        for (i, b) in arr.iter_mut().enumerate() {
            *b = self.memory[(start + i) % self.memory.len()];
        }
        Some(BlockData::from_bytes(arr))
    }

    /// Block contents on a sectored card, as a test would inspect them.
    pub fn block(&self, block: BlockAddress) -> Option<BlockData> {
        self.load(block.as_u8())
    }

    fn store(&mut self, address: u8, data: &BlockData) -> bool {
        let unit = self.unit();
        let start = address as usize * unit;
        if start + unit > self.memory.len() {
            return false;
        }
        // Page-oriented cards only take the first page of a write.
        self.memory[start..start + unit].copy_from_slice(&data.as_bytes()[..unit]);
        true
    }
}

/// Mock reader for unit tests. It records every call and simulates a card
/// with per-block failure injection.
#[derive(Debug)]
pub struct MockTransport {
    pub card: Option<MockCard>,
    pub calls: Vec<Call>,
    pub version: u8,
    /// Testing hook: number of select calls that should find nothing
    pub select_failures: usize,
    /// Testing hook: error returned by every presence check while set
    pub presence_error: Option<Error>,
    authenticated: Option<u8>,
    halted: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            card: None,
            calls: Vec::new(),
            version: 0x92,
            select_failures: 0,
            presence_error: None,
            authenticated: None,
            halted: false,
        }
    }

    pub fn with_card(card: MockCard) -> Self {
        let mut m = Self::new();
        m.card = Some(card);
        m
    }

    /// Put a card in the field.
    pub fn present(&mut self, card: MockCard) {
        self.card = Some(card);
        self.halted = false;
    }

    /// Take the card away and put it back, so a halted card answers again.
    pub fn represent(&mut self) {
        self.halted = false;
    }

    pub fn remove_card(&mut self) -> Option<MockCard> {
        self.authenticated = None;
        self.card.take()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn auth_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Authenticate(_)))
    }

    pub fn read_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Read(_)))
    }

    pub fn write_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Write(..)))
    }

    pub fn halt_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Halt))
    }

    /// Authenticate, read and write calls together.
    pub fn block_ops(&self) -> usize {
        self.auth_calls() + self.read_calls() + self.write_calls()
    }

    /// Addresses touched by read or write calls, in call order.
    pub fn touched(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Read(a) | Call::Write(a, _) => Some(*a),
                _ => None,
            })
            .collect()
    }

    fn card_mut(&mut self) -> Result<&mut MockCard> {
        self.card.as_mut().ok_or(Error::Status(StatusCode::Timeout))
    }

    fn check_access(&self, card: &MockCard, address: u8) -> Result<()> {
        if !card.paged && self.authenticated != Some(address) {
            return Err(Error::Status(StatusCode::MifareNack));
        }
        Ok(())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    fn version(&mut self) -> Result<u8> {
        self.calls.push(Call::Version);
        Ok(self.version)
    }

    fn card_present(&mut self) -> Result<bool> {
        self.calls.push(Call::Present);
        if let Some(err) = &self.presence_error {
            return Err(err.clone());
        }
        Ok(self.card.is_some() && !self.halted)
    }

    fn select(&mut self) -> Result<Option<SelectedCard>> {
        self.calls.push(Call::Select);
        if self.select_failures > 0 {
            self.select_failures -= 1;
            return Ok(None);
        }
        if self.halted {
            return Ok(None);
        }
        Ok(self.card.as_ref().map(|c| c.selection))
    }

    fn authenticate(&mut self, block: BlockAddress, key: &AuthKey, uid: &Uid) -> Result<()> {
        let address = block.as_u8();
        self.calls.push(Call::Authenticate(address));
        self.authenticated = None;
        let card = self.card_mut()?;
        if card.auth_failures.contains(&address)
            || card.key != *key
            || card.selection.uid != *uid
            || card.load(address).is_none()
        {
            return Err(Error::Status(StatusCode::Timeout));
        }
        self.authenticated = Some(address);
        Ok(())
    }

    fn read_block(&mut self, block: BlockAddress) -> Result<BlockData> {
        let address = block.as_u8();
        self.calls.push(Call::Read(address));
        let card = self.card.as_ref().ok_or(Error::Status(StatusCode::Timeout))?;
        self.check_access(card, address)?;
        if card.read_failures.contains(&address) {
            return Err(Error::Status(StatusCode::CrcWrong));
        }
        card.load(address)
            .ok_or(Error::Status(StatusCode::MifareNack))
    }

    fn write_block(&mut self, block: BlockAddress, data: &BlockData) -> Result<()> {
        let address = block.as_u8();
        self.calls.push(Call::Write(address, *data));
        let card = self.card.as_ref().ok_or(Error::Status(StatusCode::Timeout))?;
        self.check_access(card, address)?;
        if card.write_failures.contains(&address) {
            return Err(Error::Status(StatusCode::Error));
        }
        if !self.card_mut()?.store(address, data) {
            return Err(Error::Status(StatusCode::MifareNack));
        }
        Ok(())
    }

    fn halt_and_release(&mut self) -> Result<()> {
        self.calls.push(Call::Halt);
        self.authenticated = None;
        self.halted = true;
        Ok(())
    }
}
