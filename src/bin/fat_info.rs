use rust_fat::{BootSector, FatResult, GeometryReport};
use std::process::ExitCode;

// Create an image with:
// $ dd if=/dev/zero of=fat.img bs=1M count=100
// $ mkfs.fat -F 16 -n "Josh Volume" fat.img

/// Writes log records to stderr.
struct Logger;

static LOGGER: Logger = Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(level: log::LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn run(image: &str) -> FatResult<GeometryReport> {
    let bs = BootSector::from_path(image)?.into_fat1216()?;
    GeometryReport::new(&bs)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let (verbose, image) = match &args[..] {
        [_, image] => (false, image),
        [_, flag, image] if flag == "-v" => (true, image),
        _ => {
            let program = args.first().map(String::as_str).unwrap_or("fat_info");
            eprintln!("Usage: {} [-v] <image>", program);
            return ExitCode::from(2);
        }
    };

    init_logging(if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn });

    match run(image) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("Unhandled error: {}", err);
            ExitCode::FAILURE
        }
    }
}
