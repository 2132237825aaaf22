/// Write-only reporting sink with one channel per severity.
///
/// The engine only ever writes to it; substituting an in-memory collector
/// makes every report assertion testable without a terminal.
pub trait MessageWriter: Send + Sync {
    fn write(&self, text: &str);
    fn write_empty_line(&self);
    fn write_notification(&self, text: &str);
    fn write_main_notification(&self, text: &str);
    fn write_success(&self, text: &str);
    fn write_warn(&self, text: &str);
    fn write_failure(&self, text: &str);
    fn write_header(&self, text: &str);
    fn write_internal_error(&self, text: &str);
}
