use crate::common::{ensure_len, padded_string, FatResult, BASE_BPB_SIZE};
use binrw::{binrw, BinRead};
use std::fmt::{Display, Formatter};
use std::io::Cursor;

/// BIOS Parameter Block shared by FAT12, FAT16 and FAT32 (offsets 0x00..0x24).
/// https://en.wikipedia.org/wiki/Design_of_the_FAT_file_system#BPB
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseBpb {
    // Jump instruction (3 bytes): x86 jump over the BPB to the boot code.
    pub jump_instruction: [u8; 3],
    // OEM name (8 bytes): name of the formatting tool, space padded.
    pub oem_name: [u8; 8],

    // DOS 2.0 BPB, offset 0x0B
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    // Reserved sectors, the boot sector included.
    pub reserved_sector_count: u16,
    pub fat_count: u8,
    // Root directory entries, FAT12/16 only; 0 on FAT32.
    pub max_root_dir_entries: u16,
    // 0 when the volume has more than 65535 sectors, see total_sectors_32.
    pub total_sectors_16: u16,
    pub media_descriptor: u8,
    // 0 on FAT32, which keeps a 32-bit count at offset 0x24.
    pub sectors_per_fat_16: u16,

    // DOS 3.31 BPB, offset 0x18
    pub sectors_per_track: u16,
    pub number_of_heads: u16,
    pub hidden_sectors: u32,
    pub total_sectors_32: u32,
}

impl BaseBpb {
    /// Decodes the first 36 bytes of `buf`. Any byte pattern is accepted.
    pub fn decode(buf: &[u8]) -> FatResult<Self> {
        ensure_len(buf, BASE_BPB_SIZE)?;
        let bpb = BaseBpb::read_le(&mut Cursor::new(&buf[..BASE_BPB_SIZE]))?;
        log::debug!(
            "decoded BPB: {} bytes/sector, {} sectors/cluster, {} total sectors",
            bpb.bytes_per_sector,
            bpb.sectors_per_cluster,
            bpb.total_logical_sectors()
        );
        Ok(bpb)
    }

    /// Untrimmed OEM name.
    pub fn oem_name(&self) -> String {
        padded_string(&self.oem_name)
    }

    pub fn total_logical_sectors(&self) -> u32 {
        if self.total_sectors_16 != 0 {
            self.total_sectors_16 as u32
        } else {
            self.total_sectors_32
        }
    }

    /// Guesses FAT32 from a zero 16-bit sectors-per-FAT field.
    ///
    /// This is not authoritative: a damaged FAT12/16 volume can carry a zero here,
    /// and FAT32 volumes are only recognised by this one field.
    pub fn is_fat32_heuristic(&self) -> bool {
        self.sectors_per_fat_16 == 0
    }
}

impl Display for BaseBpb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "oem: {:?}, sector size: {}, total sectors: {}",
            self.oem_name(),
            self.bytes_per_sector,
            self.total_logical_sectors()
        )
    }
}
