pub mod orchestrator;
pub mod report;
pub mod reporter;

pub use orchestrator::ArbitrageScanner;
pub use report::{SampleComparison, ScanReport, SourceSummary};
pub use reporter::Reporter;
