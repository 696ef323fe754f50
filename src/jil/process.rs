use tracing::debug;

use super::models::{AttrValue, JobRecord, OpenJob};

/// An ordered sequence of job records making up one process flow.
///
/// Insertion order is preserved and duplicates are allowed. The collection
/// is read-only for the lifetime of a render/write cycle.
#[derive(Debug, Clone, Default)]
pub struct ProcessCollection {
    records: Vec<JobRecord>,
}

impl ProcessCollection {
    /// Build a collection from records, preserving the given order.
    pub fn new(records: Vec<JobRecord>) -> Self {
        Self { records }
    }

    /// Build a collection from a loaded declarative document: one open
    /// record per document entry, in document order, with every attribute
    /// passed through verbatim. The entry name itself is not injected; a
    /// record is named only by whatever `insert_job` attribute it carries.
    pub fn from_document<D>(document: D) -> Self
    where
        D: IntoIterator<Item = (String, Vec<(String, AttrValue)>)>,
    {
        let records: Vec<JobRecord> = document
            .into_iter()
            .map(|(name, attrs)| {
                debug!("Building open record from document entry '{}'", name);
                JobRecord::open(OpenJob::new(attrs))
            })
            .collect();

        debug!("Built {} records from document", records.len());
        Self { records }
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<JobRecord> for ProcessCollection {
    fn from_iter<I: IntoIterator<Item = JobRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jil::models::BaseJob;

    #[test]
    fn direct_construction_preserves_call_order() {
        let collection = ProcessCollection::new(vec![
            JobRecord::base(BaseJob {
                insert_job: Some("a".to_string()),
                ..Default::default()
            }),
            JobRecord::base(BaseJob {
                insert_job: Some("b".to_string()),
                ..Default::default()
            }),
        ]);

        let names: Vec<_> = collection
            .records()
            .iter()
            .map(|r| r.get("insert_job").unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn from_document_builds_open_records_with_attributes_verbatim() {
        let document = vec![(
            "jobA".to_string(),
            vec![
                ("owner".to_string(), AttrValue::from("u")),
                ("command".to_string(), AttrValue::from("c")),
            ],
        )];

        let collection = ProcessCollection::from_document(document);
        assert_eq!(collection.len(), 1);

        let record = &collection.records()[0];
        assert_eq!(record.get("owner"), Some(AttrValue::from("u")));
        assert_eq!(record.get("command"), Some(AttrValue::from("c")));
        // The entry name is not an attribute; insert_job stays absent.
        assert_eq!(record.get("insert_job"), None);
        assert_eq!(record.set_attributes().len(), 2);
    }

    #[test]
    fn from_document_preserves_entry_order() {
        let document = vec![
            ("z".to_string(), vec![("insert_job".to_string(), AttrValue::from("z"))]),
            ("a".to_string(), vec![("insert_job".to_string(), AttrValue::from("a"))]),
        ];

        let collection = ProcessCollection::from_document(document);
        let names: Vec<_> = collection
            .records()
            .iter()
            .map(|r| r.get("insert_job").unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["z", "a"]);
    }
}
