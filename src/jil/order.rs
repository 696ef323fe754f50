/// Canonical attribute ordering for rendered JIL blocks.
///
/// Attributes listed here are emitted first, in this order; any attribute a
/// record carries beyond this list is emitted afterwards in the record's own
/// order. The policy is an immutable value owned by the renderer, not shared
/// process state.
#[derive(Debug, Clone)]
pub struct FieldOrderPolicy {
    fields: &'static [&'static str],
}

/// Job identity first, then type/ownership/permission, alerting, placement,
/// triggering, action, and the secondary file-watch fields.
const CANONICAL_ORDER: &[&str] = &[
    "insert_job",
    "job_type",
    "owner",
    "permission",
    "max_run_alarm",
    "alarm_if_fail",
    "send_notification",
    "box_name",
    "machine",
    "condition",
    "file_watch",
    "command",
    "watch_file_min_size",
    "std_err_file",
    "watch_interval",
];

impl Default for FieldOrderPolicy {
    fn default() -> Self {
        Self {
            fields: CANONICAL_ORDER,
        }
    }
}

impl FieldOrderPolicy {
    /// Attribute names in precedence order.
    pub fn fields(&self) -> &[&'static str] {
        self.fields
    }
}
