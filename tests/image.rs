use rust_fat::{BootSector, FatError, FatWidth, GeometryReport};
use std::fs;
use std::path::PathBuf;

const IMAGE_SECTORS: u32 = 100 * 1024 * 1024 / 512;

/// Hand-built first sector of a 100 MiB FAT16 volume labelled "Josh Volume":
/// 4 sectors per cluster, 4 reserved sectors, two 200-sector FATs and a 512 entry
/// root directory. Not captured from a formatted image.
fn synthetic_fat16_boot_sector() -> Vec<u8> {
    let mut buf = vec![0u8; 512];
    buf[0..3].copy_from_slice(&[0xEB, 0x3C, 0x90]);
    buf[3..11].copy_from_slice(b"mkfs.fat");
    buf[0x0B..0x0D].copy_from_slice(&512u16.to_le_bytes());
    buf[0x0D] = 4;
    buf[0x0E..0x10].copy_from_slice(&4u16.to_le_bytes());
    buf[0x10] = 2;
    buf[0x11..0x13].copy_from_slice(&512u16.to_le_bytes());
    buf[0x13..0x15].copy_from_slice(&0u16.to_le_bytes());
    buf[0x15] = 0xF8;
    buf[0x16..0x18].copy_from_slice(&200u16.to_le_bytes());
    buf[0x18..0x1A].copy_from_slice(&32u16.to_le_bytes());
    buf[0x1A..0x1C].copy_from_slice(&8u16.to_le_bytes());
    buf[0x1C..0x20].copy_from_slice(&0u32.to_le_bytes());
    buf[0x20..0x24].copy_from_slice(&IMAGE_SECTORS.to_le_bytes());
    buf[0x24] = 0x80;
    buf[0x26] = 0x29;
    buf[0x27..0x2B].copy_from_slice(&0x5E1F_C0DEu32.to_le_bytes());
    buf[0x2B..0x36].copy_from_slice(b"Josh Volume");
    buf[0x36..0x3E].copy_from_slice(b"FAT16   ");
    buf[510] = 0x55;
    buf[511] = 0xAA;
    buf
}

fn write_image(name: &str, boot_sector: &[u8], extra: usize) -> PathBuf {
    let path = std::env::temp_dir().join(format!("rust-fat-{}-{}.img", std::process::id(), name));
    let mut image = boot_sector.to_vec();
    image.resize(boot_sector.len() + extra, 0);
    fs::write(&path, image).unwrap();
    path
}

#[test]
fn synthetic_fat16_image_geometry() {
    let path = write_image("fat16", &synthetic_fat16_boot_sector(), 4096);
    let bs = BootSector::from_path(&path).unwrap().into_fat1216().unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(bs.base.oem_name(), "mkfs.fat");
    assert_eq!(bs.base.bytes_per_sector, 512);
    assert_eq!(bs.base.total_logical_sectors(), 204800);
    assert_eq!(bs.volume_label(), "Josh Volume");
    assert_eq!(bs.file_system_type(), "FAT16   ");

    // 4 + 2 * 200 + 512 * 32 / 512
    assert_eq!(bs.data_start_sector().unwrap(), 436);
    // 2 + (204800 - 436) / 4
    assert_eq!(bs.cluster_count().unwrap(), 51093);
    assert_eq!(bs.fat_width().unwrap(), FatWidth::Fat16);

    let report = GeometryReport::new(&bs).unwrap();
    let text = report.to_string();
    assert!(text.lines().next().unwrap().ends_with(": FAT16"));
    assert!(text.contains(": 0x80\n"));
    assert!(text.contains(": 51093\n"));
    assert!(text.contains(": Josh Volume\n"));
}

#[test]
fn fat32_image_is_unsupported() {
    let mut boot_sector = synthetic_fat16_boot_sector();
    boot_sector[0x11..0x13].copy_from_slice(&0u16.to_le_bytes());
    boot_sector[0x16..0x18].copy_from_slice(&0u16.to_le_bytes());
    boot_sector[0x42] = 0x29;
    let path = write_image("fat32", &boot_sector, 0);
    let bs = BootSector::from_path(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert!(matches!(bs, BootSector::Fat32Unsupported(_)));
    assert!(matches!(bs.into_fat1216(), Err(FatError::UnsupportedVariant)));
}

#[test]
fn short_image_is_truncated() {
    let boot_sector = synthetic_fat16_boot_sector();
    let path = write_image("short", &boot_sector[..50], 0);
    let result = BootSector::from_path(&path);
    fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(FatError::TruncatedInput { expected: 68, actual: 50 })));
}

#[test]
fn only_first_sector_is_read() {
    let path = write_image("large", &synthetic_fat16_boot_sector(), 1 << 20);
    let bs = BootSector::from_path(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(bs.base().reserved_sector_count, 4);
}
