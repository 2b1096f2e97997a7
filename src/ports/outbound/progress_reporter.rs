/// ProgressReporter port for console feedback during operations
///
/// Abstracts stderr reporting so application code stays testable.
/// Detailed analysis failure causes are logged through `report_error`;
/// the user-facing slot state only carries a generic advisory message.
pub trait ProgressReporter: Send + Sync {
    /// Starts an indeterminate activity indicator (e.g. while an
    /// analysis call is in flight)
    fn begin_activity(&self, message: &str);

    /// Stops the activity indicator started by `begin_activity`
    fn end_activity(&self);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
