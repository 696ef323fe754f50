use std::collections::HashSet;

use tracing::debug;

use super::order::FieldOrderPolicy;
use super::process::ProcessCollection;

/// Serializes a `ProcessCollection` into JIL text.
///
/// Rendering is a pure read-only traversal: the same collection always
/// renders to byte-identical text, and the input is never mutated.
#[derive(Debug, Default)]
pub struct Renderer {
    policy: FieldOrderPolicy,
}

impl Renderer {
    /// Create a renderer using the canonical field order.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: FieldOrderPolicy) -> Self {
        Self { policy }
    }

    /// Render every record in collection order, one JIL block per record.
    ///
    /// Each block is a `/* -- name -- */` header, a blank line, one
    /// `name: value` line per set attribute (policy order first, then the
    /// record's remaining attributes in its own order), and a trailing blank
    /// separator line.
    pub fn render(&self, collection: &ProcessCollection) -> String {
        debug!("Rendering {} job records", collection.len());

        let mut output = String::new();
        for record in collection.records() {
            let attrs = record.set_attributes();

            let header = match record.get("insert_job") {
                Some(value) => value.to_string(),
                None => "None".to_string(),
            };
            output.push_str(&format!("/* -- {} -- */\n\n", header));

            // Track emitted attributes by name, not by substring search
            // against the accumulated text: a value containing another
            // attribute's name must not suppress that attribute.
            let mut emitted: HashSet<&str> = HashSet::new();

            for field in self.policy.fields() {
                if let Some((name, value)) = attrs.iter().find(|(n, _)| n == field) {
                    output.push_str(&format!("{}: {}\n", name, value));
                    emitted.insert(name.as_str());
                }
            }

            for (name, value) in &attrs {
                if !emitted.contains(name.as_str()) {
                    output.push_str(&format!("{}: {}\n", name, value));
                }
            }

            output.push('\n');
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jil::models::{AttrValue, BaseJob, CommandJob, JobRecord, OpenJob};

    fn render(records: Vec<JobRecord>) -> String {
        Renderer::new().render(&ProcessCollection::new(records))
    }

    #[test]
    fn one_block_per_record_in_input_order() {
        let output = render(vec![
            JobRecord::base(BaseJob {
                insert_job: Some("first".to_string()),
                ..Default::default()
            }),
            JobRecord::base(BaseJob {
                insert_job: Some("second".to_string()),
                ..Default::default()
            }),
            JobRecord::base(BaseJob {
                insert_job: Some("third".to_string()),
                ..Default::default()
            }),
        ]);

        let headers: Vec<&str> = output
            .lines()
            .filter(|l| l.starts_with("/* -- "))
            .collect();
        assert_eq!(
            headers,
            vec![
                "/* -- first -- */",
                "/* -- second -- */",
                "/* -- third -- */"
            ]
        );
        // Each block ends in a blank separator line.
        assert!(output.ends_with("\n\n"));
        assert_eq!(output.matches("\n\n").count(), 6); // header gap + separator, per block
    }

    #[test]
    fn absent_insert_job_renders_none_marker() {
        let output = render(vec![JobRecord::base(BaseJob::default())]);
        assert!(output.starts_with("/* -- None -- */\n\n"));
    }

    #[test]
    fn policy_fields_precede_unlisted_attributes() {
        let mut job = OpenJob::default();
        job.set("custom", "x");
        job.set("owner", "user");
        job.set("max_run_alarm", 15);

        let output = render(vec![JobRecord::open(job)]);

        let owner = output.find("owner: user").unwrap();
        let alarm = output.find("max_run_alarm: 15").unwrap();
        let custom = output.find("custom: x").unwrap();
        assert!(owner < alarm, "policy order within listed fields");
        assert!(alarm < custom, "unlisted fields come last");
    }

    #[test]
    fn command_record_block_contents() {
        let output = render(vec![JobRecord::command(CommandJob {
            base: BaseJob {
                insert_job: Some("job4".to_string()),
                ..Default::default()
            },
            box_name: Some("B".to_string()),
            command: Some("run.sh".to_string()),
            ..Default::default()
        })]);

        assert!(output.contains("job_type: CMD\n"));
        assert!(output.contains("box_name: B\n"));
        assert!(output.contains("command: run.sh\n"));
        assert!(!output.contains("std_err_file"));
    }

    #[test]
    fn open_record_renders_only_supplied_attributes() {
        let output = render(vec![JobRecord::open(OpenJob::new(vec![
            ("insert_job".to_string(), AttrValue::from("job5")),
            ("random".to_string(), AttrValue::from("val")),
        ]))]);

        assert_eq!(
            output,
            "/* -- job5 -- */\n\ninsert_job: job5\nrandom: val\n\n"
        );
    }

    #[test]
    fn attribute_named_inside_another_value_is_still_emitted() {
        // "owner" appears inside the header and inside the command value;
        // the old substring check would have dropped the owner line.
        let mut job = OpenJob::default();
        job.set("insert_job", "owner_sync");
        job.set("command", "chown owner");
        job.set("owner", "root");

        let output = render(vec![JobRecord::open(job)]);
        assert!(output.contains("owner: root\n"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let collection = ProcessCollection::new(vec![
            JobRecord::boxed(BaseJob {
                insert_job: Some("job2".to_string()),
                owner: Some("user".to_string()),
                max_run_alarm: Some(15),
                ..Default::default()
            }),
            JobRecord::base(BaseJob::default()),
        ]);

        let renderer = Renderer::new();
        assert_eq!(renderer.render(&collection), renderer.render(&collection));
    }
}
