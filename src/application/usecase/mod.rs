pub mod scan_usecase;

// Re-export public API
pub use scan_usecase::{lookback_window, ScanProcessor, ScanUseCase};
