use crate::boot_sector::BaseBpb;
use crate::common::{
    ensure_len, padded_string, FatError, FatResult, FatWidth, BASE_BPB_SIZE, DIRECTORY_ENTRY_SIZE,
    EXTENDED_BOOT_SIGNATURE, EXTENDED_BOOT_SIGNATURE_OLD, EXTENDED_BPB_SIZE, RESERVED_CLUSTERS,
};
use binrw::{binrw, BinRead};
use modular_bitfield::prelude::*;
use std::fmt::{Display, Formatter};
use std::io::Cursor;

/// Extended BPB of FAT12 and FAT16 volumes, starting at offset 0x24.
/// https://en.wikipedia.org/wiki/Design_of_the_FAT_file_system#EBPB
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedBpb {
    // Physical drive number (1 byte): 0x00 for removable media, 0x80 for the first fixed disk.
    pub physical_drive_number: u8,
    // Reserved (1 byte): Windows NT keeps its volume flags here.
    pub flags: u8,
    // Extended boot signature (1 byte): 0x29, or 0x28 when only the volume id follows.
    pub extended_boot_signature: u8,
    pub volume_id: u32,
    // Volume label (11 bytes), space padded.
    pub volume_label: [u8; 11],
    // File system type (8 bytes), space padded, informational only.
    pub file_system_type: [u8; 8],
}

/// Windows NT volume flags kept in the reserved byte at 0x25.
#[bitfield]
#[derive(Debug, Clone, Copy)]
pub struct VolumeFlags {
    /// Volume was not unmounted cleanly, run a check on mount.
    pub dirty: bool,
    /// Scan the surface for bad sectors too.
    pub surface_scan: bool,
    #[skip]
    __: B6,
}

impl ExtendedBpb {
    pub fn volume_flags(&self) -> VolumeFlags {
        VolumeFlags::from_bytes([self.flags])
    }

    pub fn has_extended_signature(&self) -> bool {
        self.extended_boot_signature == EXTENDED_BOOT_SIGNATURE
            || self.extended_boot_signature == EXTENDED_BOOT_SIGNATURE_OLD
    }
}

/// A FAT12 or FAT16 boot sector: the shared BPB plus the FAT12/16 extension.
///
/// Geometry is derived on every call and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fat1216BootSector {
    pub base: BaseBpb,
    pub extended: ExtendedBpb,
}

impl Fat1216BootSector {
    /// Decodes a FAT12/16 boot sector, refusing volumes that look like FAT32.
    pub fn decode(buf: &[u8]) -> FatResult<Self> {
        ensure_len(buf, EXTENDED_BPB_SIZE)?;
        let base = BaseBpb::decode(buf)?;
        if base.is_fat32_heuristic() {
            return Err(FatError::UnsupportedVariant);
        }
        Self::with_base(base, buf)
    }

    pub(crate) fn with_base(base: BaseBpb, buf: &[u8]) -> FatResult<Self> {
        ensure_len(buf, EXTENDED_BPB_SIZE)?;
        let extended = ExtendedBpb::read_le(&mut Cursor::new(&buf[BASE_BPB_SIZE..EXTENDED_BPB_SIZE]))?;
        if !extended.has_extended_signature() {
            log::warn!(
                "unexpected extended boot signature {:#04x}, volume id and label may be garbage",
                extended.extended_boot_signature
            );
        }
        Ok(Self { base, extended })
    }

    /// Untrimmed 11-byte volume label.
    pub fn volume_label(&self) -> String {
        padded_string(&self.extended.volume_label)
    }

    /// Untrimmed 8-byte file system type, e.g. `"FAT16   "`.
    pub fn file_system_type(&self) -> String {
        padded_string(&self.extended.file_system_type)
    }

    /// Sectors occupied by the root directory, rounded up.
    pub fn root_dir_sectors(&self) -> FatResult<u32> {
        let bytes_per_sector = self.base.bytes_per_sector as u32;
        if bytes_per_sector == 0 {
            return Err(FatError::InvalidGeometry("bytes per sector is zero"));
        }
        let root_bytes = self.base.max_root_dir_entries as u32 * DIRECTORY_ENTRY_SIZE;
        Ok(root_bytes.div_ceil(bytes_per_sector))
    }

    /// First sector of the data region: reserved sectors, every FAT copy, then the root directory.
    pub fn data_start_sector(&self) -> FatResult<u32> {
        let fat_sectors = self.base.fat_count as u32 * self.base.sectors_per_fat_16 as u32;
        Ok(self.base.reserved_sector_count as u32 + fat_sectors + self.root_dir_sectors()?)
    }

    /// Number of addressable clusters, counting the two reserved entries.
    pub fn cluster_count(&self) -> FatResult<u32> {
        let data_start = self.data_start_sector()? as i64;
        let sectors_per_cluster = self.base.sectors_per_cluster as i64;
        if sectors_per_cluster == 0 {
            return Err(FatError::InvalidGeometry("sectors per cluster is zero"));
        }
        let data_sectors = self.base.total_logical_sectors() as i64 - data_start;
        if data_sectors < 0 {
            return Err(FatError::InvalidGeometry("data region starts past the end of the volume"));
        }
        let clusters = RESERVED_CLUSTERS as i64 + data_sectors / sectors_per_cluster;
        u32::try_from(clusters).map_err(|_| FatError::InvalidGeometry("cluster count does not fit in 32 bits"))
    }

    pub fn fat_width(&self) -> FatResult<FatWidth> {
        Ok(FatWidth::from_cluster_count(self.cluster_count()?))
    }
}

impl Display for Fat1216BootSector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, label: {:?}", self.base, self.volume_label())
    }
}
