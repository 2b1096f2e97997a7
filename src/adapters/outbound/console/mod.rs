pub mod progress_reporter;
pub mod renderer;

pub use progress_reporter::StderrProgressReporter;
pub use renderer::RenderFormat;
