use std::fmt;

use serde::Deserialize;

/// Scalar attribute value carried by a job record.
///
/// Deserializes untagged so YAML scalars map directly onto the matching
/// variant (`true` -> Bool, `15` -> Int, everything else -> Str).
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Int(i) => write!(f, "{}", i),
            AttrValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Int(i)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

/// Attributes shared by every typed job variant.
///
/// Every field is optional; an omitted field stays `None` (absent) and is
/// never rendered. Absent is distinct from an explicitly set `""`, `0` or
/// `false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseJob {
    pub insert_job: Option<String>,
    pub job_type: Option<String>,
    pub owner: Option<String>,
    pub permission: Option<String>,
    pub max_run_alarm: Option<i64>,
    pub alarm_if_fail: Option<bool>,
    pub send_notification: Option<bool>,
}

impl BaseJob {
    /// Push the set (non-absent) attributes, in declaration order.
    fn collect_set(&self, out: &mut Vec<(String, AttrValue)>) {
        push_str(out, "insert_job", &self.insert_job);
        push_str(out, "job_type", &self.job_type);
        push_str(out, "owner", &self.owner);
        push_str(out, "permission", &self.permission);
        push_int(out, "max_run_alarm", self.max_run_alarm);
        push_bool(out, "alarm_if_fail", self.alarm_if_fail);
        push_bool(out, "send_notification", self.send_notification);
    }
}

fn push_str(out: &mut Vec<(String, AttrValue)>, name: &str, value: &Option<String>) {
    if let Some(v) = value {
        out.push((name.to_string(), AttrValue::Str(v.clone())));
    }
}

fn push_int(out: &mut Vec<(String, AttrValue)>, name: &str, value: Option<i64>) {
    if let Some(v) = value {
        out.push((name.to_string(), AttrValue::Int(v)));
    }
}

fn push_bool(out: &mut Vec<(String, AttrValue)>, name: &str, value: Option<bool>) {
    if let Some(v) = value {
        out.push((name.to_string(), AttrValue::Bool(v)));
    }
}

/// A box job. The constructor forces `job_type` to `"BOX"`; a caller-supplied
/// `job_type` is accepted but overwritten, the variant is the source of truth.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxJob {
    pub base: BaseJob,
}

impl BoxJob {
    pub const JOB_TYPE: &'static str = "BOX";

    pub fn new(mut base: BaseJob) -> Self {
        base.job_type = Some(Self::JOB_TYPE.to_string());
        Self { base }
    }
}

/// A file-watcher job (`job_type = "FW"`), watching for a file to appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileWatchJob {
    pub base: BaseJob,
    pub box_name: Option<String>,
    pub machine: Option<String>,
    pub file_watch: Option<String>,
    pub watch_file_min_size: Option<i64>,
    pub watch_interval: Option<i64>,
}

impl FileWatchJob {
    pub const JOB_TYPE: &'static str = "FW";

    pub fn new(mut job: FileWatchJob) -> Self {
        job.base.job_type = Some(Self::JOB_TYPE.to_string());
        job
    }

    fn collect_set(&self, out: &mut Vec<(String, AttrValue)>) {
        self.base.collect_set(out);
        push_str(out, "box_name", &self.box_name);
        push_str(out, "machine", &self.machine);
        push_str(out, "file_watch", &self.file_watch);
        push_int(out, "watch_file_min_size", self.watch_file_min_size);
        push_int(out, "watch_interval", self.watch_interval);
    }
}

/// A command job (`job_type = "CMD"`), running a command on a machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandJob {
    pub base: BaseJob,
    pub box_name: Option<String>,
    pub machine: Option<String>,
    pub condition: Option<String>,
    pub command: Option<String>,
    pub std_err_file: Option<String>,
}

impl CommandJob {
    pub const JOB_TYPE: &'static str = "CMD";

    pub fn new(mut job: CommandJob) -> Self {
        job.base.job_type = Some(Self::JOB_TYPE.to_string());
        job
    }

    fn collect_set(&self, out: &mut Vec<(String, AttrValue)>) {
        self.base.collect_set(out);
        push_str(out, "box_name", &self.box_name);
        push_str(out, "machine", &self.machine);
        push_str(out, "condition", &self.condition);
        push_str(out, "command", &self.command);
        push_str(out, "std_err_file", &self.std_err_file);
    }
}

/// A free-form job holding exactly the attributes the caller supplied, in
/// supply order. No schema, no discriminant injection. Used for attributes
/// the typed variants do not anticipate and for records built from an
/// external document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenJob {
    attrs: Vec<(String, AttrValue)>,
}

impl OpenJob {
    pub fn new(attrs: Vec<(String, AttrValue)>) -> Self {
        let mut job = OpenJob::default();
        for (name, value) in attrs {
            job.set(name, value);
        }
        job
    }

    /// Set an attribute. A repeated name replaces the earlier value in place,
    /// keeping its original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn attrs(&self) -> &[(String, AttrValue)] {
        &self.attrs
    }
}

/// One schedulable unit's attribute set, prior to serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum JobRecord {
    Base(BaseJob),
    Box(BoxJob),
    FileWatch(FileWatchJob),
    Command(CommandJob),
    Open(OpenJob),
}

impl JobRecord {
    pub fn base(job: BaseJob) -> Self {
        JobRecord::Base(job)
    }

    pub fn boxed(base: BaseJob) -> Self {
        JobRecord::Box(BoxJob::new(base))
    }

    pub fn file_watch(job: FileWatchJob) -> Self {
        JobRecord::FileWatch(FileWatchJob::new(job))
    }

    pub fn command(job: CommandJob) -> Self {
        JobRecord::Command(CommandJob::new(job))
    }

    pub fn open(job: OpenJob) -> Self {
        JobRecord::Open(job)
    }

    /// All set (non-absent) attributes in the record's own order: typed
    /// variants in field declaration order, open records in supply order.
    pub fn set_attributes(&self) -> Vec<(String, AttrValue)> {
        let mut out = Vec::new();
        match self {
            JobRecord::Base(job) => job.collect_set(&mut out),
            JobRecord::Box(job) => job.base.collect_set(&mut out),
            JobRecord::FileWatch(job) => job.collect_set(&mut out),
            JobRecord::Command(job) => job.collect_set(&mut out),
            JobRecord::Open(job) => out.extend(job.attrs().iter().cloned()),
        }
        out
    }

    /// Look up a single attribute. Absent attributes yield `None`, never an
    /// error.
    pub fn get(&self, name: &str) -> Option<AttrValue> {
        self.set_attributes()
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}
