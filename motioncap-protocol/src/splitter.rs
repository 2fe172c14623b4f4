//! Splits the raw serial byte stream into records.
//!
//! The stream has no start marker, so a receiver that attaches mid-record
//! sees a truncated first record. That record still comes out of the
//! splitter and is rejected later by [`Report::parse`](crate::Report::parse).

use heapless::Vec;

use crate::record::{MAX_RECORD_LEN, RECORD_TERMINATOR};

/// Errors from the record splitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SplitError {
    /// Record exceeded the buffer; bytes are dropped until the next terminator
    Overflow,
    /// Completed record is not valid UTF-8
    InvalidUtf8,
}

/// Accumulates bytes until a record terminator is seen
#[derive(Debug, Clone)]
pub struct RecordSplitter<const CAP: usize = MAX_RECORD_LEN> {
    buffer: Vec<u8, CAP>,
    /// A record was returned and the buffer must be cleared on the next byte
    complete: bool,
    /// Dropping bytes of an overlong record
    discarding: bool,
}

impl<const CAP: usize> Default for RecordSplitter<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> RecordSplitter<CAP> {
    /// Create an empty splitter
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            complete: false,
            discarding: false,
        }
    }

    /// Drop any partial record
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.complete = false;
        self.discarding = false;
    }

    /// Number of bytes buffered for the current record
    pub fn pending(&self) -> usize {
        if self.complete {
            0
        } else {
            self.buffer.len()
        }
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(text))` when a terminator completes a record (the
    /// terminator itself is not included), `Ok(None)` when more bytes are
    /// needed.
    pub fn feed(&mut self, byte: u8) -> Result<Option<&str>, SplitError> {
        if self.push(byte)? {
            return self.current().map(Some);
        }
        Ok(None)
    }

    /// Feed bytes until the first record completes or an error occurs
    ///
    /// Returns how many bytes were consumed together with the record, if
    /// one was found. Errors carry the consumed count as well. In both
    /// cases the remaining bytes should be fed again afterwards.
    pub fn feed_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(usize, Option<&str>), (usize, SplitError)> {
        let mut consumed = 0;
        for &byte in bytes {
            consumed += 1;
            if self.push(byte).map_err(|e| (consumed, e))? {
                return self
                    .current()
                    .map(|text| (consumed, Some(text)))
                    .map_err(|e| (consumed, e));
            }
        }
        Ok((consumed, None))
    }

    /// Push one byte, returning `true` when a record is complete
    fn push(&mut self, byte: u8) -> Result<bool, SplitError> {
        if self.complete {
            self.buffer.clear();
            self.complete = false;
        }

        if byte == RECORD_TERMINATOR {
            if self.discarding {
                self.discarding = false;
                self.buffer.clear();
                return Ok(false);
            }
            self.complete = true;
            return Ok(true);
        }

        if self.discarding {
            return Ok(false);
        }

        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.discarding = true;
            return Err(SplitError::Overflow);
        }

        Ok(false)
    }

    fn current(&self) -> Result<&str, SplitError> {
        core::str::from_utf8(&self.buffer).map_err(|_| SplitError::InvalidUtf8)
    }
}
