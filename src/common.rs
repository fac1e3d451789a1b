use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Size of the DOS 2.0/3.31 BPB including jump instruction and OEM name (offsets 0x00..0x24).
pub const BASE_BPB_SIZE: usize = 0x24;
/// Minimum input needed for the FAT12/16 extended BPB (offsets 0x00..0x44).
pub const EXTENDED_BPB_SIZE: usize = 0x44;
/// Bytes read from the start of an image to decode its boot sector.
pub const BOOT_SECTOR_SIZE: usize = 512;

/// Size of one root directory entry.
pub const DIRECTORY_ENTRY_SIZE: u32 = 32;
/// Largest cluster count that still yields a FAT12 volume.
pub const FAT12_MAX_CLUSTERS: u32 = 4086;
/// Cluster indices 0 and 1 are reserved in every FAT.
pub const RESERVED_CLUSTERS: u32 = 2;

/// Extended boot signatures announcing the volume id, label and type fields.
pub const EXTENDED_BOOT_SIGNATURE: u8 = 0x29;
pub const EXTENDED_BOOT_SIGNATURE_OLD: u8 = 0x28;
/// Offset of the boot signature inside the FAT32 extended BPB.
pub const FAT32_BOOT_SIGNATURE_OFFSET: usize = 0x42;

#[derive(Debug, Error)]
pub enum FatError {
    #[error("Truncated Input: expected at least {expected} bytes, got {actual}")]
    TruncatedInput { expected: usize, actual: usize },
    #[error("Invalid Geometry: {0}")]
    InvalidGeometry(&'static str),
    #[error("Unsupported Variant: FAT32 is not implemented")]
    UnsupportedVariant,
    #[error("Io Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse Error: {0}")]
    ParseError(#[from] binrw::Error),
}

pub type FatResult<T> = Result<T, FatError>;

/// FAT entry width resolved from the cluster count.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum FatWidth {
    Fat12,
    Fat16,
}

impl FatWidth {
    pub fn from_cluster_count(cluster_count: u32) -> Self {
        if cluster_count <= FAT12_MAX_CLUSTERS {
            FatWidth::Fat12
        } else {
            FatWidth::Fat16
        }
    }

    pub fn bits(&self) -> u8 {
        match self {
            FatWidth::Fat12 => 12,
            FatWidth::Fat16 => 16,
        }
    }
}

impl Display for FatWidth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FAT{}", self.bits())
    }
}

pub fn ensure_len(buf: &[u8], expected: usize) -> FatResult<()> {
    if buf.len() < expected {
        return Err(FatError::TruncatedInput { expected, actual: buf.len() });
    }
    Ok(())
}

/// On-disk strings are space padded; keep every byte, including the padding.
pub fn padded_string(raw: &[u8]) -> String {
    raw.iter().map(|v| *v as char).collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fat_width_threshold() {
        assert_eq!(FatWidth::from_cluster_count(4085), FatWidth::Fat12);
        assert_eq!(FatWidth::from_cluster_count(4086), FatWidth::Fat12);
        assert_eq!(FatWidth::from_cluster_count(4087), FatWidth::Fat16);
        assert_eq!(FatWidth::Fat16.to_string(), "FAT16");
    }

    #[test]
    fn ensure_len_reports_sizes() {
        match ensure_len(&[0u8; 10], BASE_BPB_SIZE) {
            Err(FatError::TruncatedInput { expected, actual }) => {
                assert_eq!(expected, 36);
                assert_eq!(actual, 10);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(ensure_len(&[0u8; 36], BASE_BPB_SIZE).is_ok());
    }

    #[test]
    fn padded_string_keeps_padding() {
        assert_eq!(padded_string(b"NO NAME    "), "NO NAME    ");
        assert_eq!(padded_string(b"AB\0\0"), "AB\0\0");
    }
}
