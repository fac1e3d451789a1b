use crate::boot_sector::BaseBpb;
use crate::common::{FatError, FatResult, BOOT_SECTOR_SIZE, EXTENDED_BOOT_SIGNATURE, FAT32_BOOT_SIGNATURE_OFFSET};
use crate::fat1216::Fat1216BootSector;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Boot sector of a FAT volume, classified after decoding the shared BPB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootSector {
    Fat1216(Fat1216BootSector),
    Fat32Unsupported(BaseBpb),
}

impl Display for BootSector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BootSector::Fat1216(bs) => write!(f, "FAT12/16 {}", bs),
            BootSector::Fat32Unsupported(bpb) => write!(f, "FAT32 {}", bpb),
        }
    }
}

impl BootSector {
    /// Reads the first sector of an image and decodes it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> FatResult<Self> {
        let file = File::open(path.as_ref())?;
        let mut buf = Vec::with_capacity(BOOT_SECTOR_SIZE);
        file.take(BOOT_SECTOR_SIZE as u64).read_to_end(&mut buf)?;
        log::debug!("read {} bytes from {}", buf.len(), path.as_ref().display());
        Self::decode(&buf)
    }

    pub fn decode(buf: &[u8]) -> FatResult<Self> {
        let base = BaseBpb::decode(buf)?;
        if base.is_fat32_heuristic() {
            // sectors per FAT is the only thing looked at; the FAT32 signature is logged, not trusted
            let fat32_signature = buf.get(FAT32_BOOT_SIGNATURE_OFFSET) == Some(&EXTENDED_BOOT_SIGNATURE);
            log::warn!(
                "16-bit sectors per FAT is zero, treating volume as FAT32 (FAT32 boot signature present: {})",
                fat32_signature
            );
            return Ok(BootSector::Fat32Unsupported(base));
        }
        Ok(BootSector::Fat1216(Fat1216BootSector::with_base(base, buf)?))
    }

    pub fn base(&self) -> &BaseBpb {
        match self {
            BootSector::Fat1216(bs) => &bs.base,
            BootSector::Fat32Unsupported(bpb) => bpb,
        }
    }

    pub fn into_fat1216(self) -> FatResult<Fat1216BootSector> {
        match self {
            BootSector::Fat1216(bs) => Ok(bs),
            BootSector::Fat32Unsupported(_) => Err(FatError::UnsupportedVariant),
        }
    }
}
