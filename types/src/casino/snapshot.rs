use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};

use super::SNAPSHOT_VERSION;

/// Persisted player state: the balance and the mute preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub balance: u64,
    pub muted: bool,
}

impl Snapshot {
    pub fn new(balance: u64, muted: bool) -> Self {
        Self { balance, muted }
    }
}

impl Write for Snapshot {
    fn write(&self, writer: &mut impl BufMut) {
        SNAPSHOT_VERSION.write(writer);
        self.balance.write(writer);
        self.muted.write(writer);
    }
}

impl Read for Snapshot {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let version = u8::read(reader)?;
        if version != SNAPSHOT_VERSION {
            return Err(Error::Invalid("Snapshot", "unsupported version"));
        }
        Ok(Self {
            balance: u64::read(reader)?,
            muted: bool::read(reader)?,
        })
    }
}

impl EncodeSize for Snapshot {
    fn encode_size(&self) -> usize {
        SNAPSHOT_VERSION.encode_size() + self.balance.encode_size() + self.muted.encode_size()
    }
}
