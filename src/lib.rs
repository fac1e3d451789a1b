pub mod common;
pub mod boot_sector;
pub mod fat1216;
pub mod volume;
pub mod report;

pub use boot_sector::BaseBpb;
pub use common::{FatError, FatResult, FatWidth};
pub use fat1216::{ExtendedBpb, Fat1216BootSector, VolumeFlags};
pub use report::GeometryReport;
pub use volume::BootSector;
