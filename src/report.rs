use crate::common::{FatResult, FatWidth};
use crate::fat1216::Fat1216BootSector;
use std::fmt::{Display, Formatter};

/// Geometry of a FAT12/16 volume, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryReport {
    pub fat_width: FatWidth,
    pub oem_name: String,
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sector_count: u16,
    pub fat_count: u8,
    pub hidden_sectors: u32,
    pub total_logical_sectors: u32,
    pub max_root_dir_entries: u16,
    pub physical_drive_number: u8,
    pub sectors_per_fat: u16,
    pub data_start_sector: u32,
    pub cluster_count: u32,
    pub volume_label: String,
    pub file_system_type: String,
    pub volume_id: u32,
}

impl GeometryReport {
    pub fn new(bs: &Fat1216BootSector) -> FatResult<Self> {
        Ok(Self {
            fat_width: bs.fat_width()?,
            oem_name: bs.base.oem_name(),
            bytes_per_sector: bs.base.bytes_per_sector,
            sectors_per_cluster: bs.base.sectors_per_cluster,
            reserved_sector_count: bs.base.reserved_sector_count,
            fat_count: bs.base.fat_count,
            hidden_sectors: bs.base.hidden_sectors,
            total_logical_sectors: bs.base.total_logical_sectors(),
            max_root_dir_entries: bs.base.max_root_dir_entries,
            physical_drive_number: bs.extended.physical_drive_number,
            sectors_per_fat: bs.base.sectors_per_fat_16,
            data_start_sector: bs.data_start_sector()?,
            cluster_count: bs.cluster_count()?,
            volume_label: bs.volume_label(),
            file_system_type: bs.file_system_type(),
            volume_id: bs.extended.volume_id,
        })
    }

    /// Label/value pairs in display order.
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("FAT type", self.fat_width.to_string()),
            ("OEM Name", self.oem_name.clone()),
            ("Bytes per logical sector", self.bytes_per_sector.to_string()),
            ("Logical sectors per cluster", self.sectors_per_cluster.to_string()),
            ("Reserved logical sector count", self.reserved_sector_count.to_string()),
            ("File allocation table count", self.fat_count.to_string()),
            ("Hidden sectors before partition", self.hidden_sectors.to_string()),
            ("Total logical sectors", self.total_logical_sectors.to_string()),
            ("Maximum root directory entries", self.max_root_dir_entries.to_string()),
            ("Physical drive number", format!("{:#04x}", self.physical_drive_number)),
            ("Logical sectors per FAT", self.sectors_per_fat.to_string()),
            ("Calculated data start sector", self.data_start_sector.to_string()),
            ("Calculated cluster count", self.cluster_count.to_string()),
            ("Volume label", self.volume_label.clone()),
            ("File system type", self.file_system_type.clone()),
            ("Volume ID", format!("{:#010x}", self.volume_id)),
        ]
    }
}

impl Display for GeometryReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lines = self.lines();
        let width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, value) in lines {
            writeln!(f, "{:<width$}: {}", label, value, width = width)?;
        }
        Ok(())
    }
}
