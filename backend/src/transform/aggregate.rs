//! Gender-by-mention-type counts per subject.

use crate::models::{
    ExpandedRecord, GenderBucket, MentionKind, Subject, SubjectAggregate, SubjectBreakdown,
};

/// Per-subject counts plus their running totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub subjects: SubjectBreakdown,
    /// Sum of the four subject aggregates.
    pub totals: SubjectAggregate,
    /// Records whose subject is not one of the core subjects.
    pub excluded: usize,
}

/// Examinable mentions over the whole expanded table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExaminableCounts {
    pub concept: usize,
    pub scientist: usize,
}

/// Classify every record of a core subject into its concept/scientist × male/female bucket.
pub fn aggregate_subjects(records: &[ExpandedRecord]) -> CategoryCounts {
    let mut counts = CategoryCounts::default();

    for subject in Subject::ALL {
        let mut aggregate = SubjectAggregate::default();
        for record in records.iter().filter(|r| r.subject == subject.label()) {
            aggregate.record(
                MentionKind::classify(&record.mention_type),
                GenderBucket::classify(&record.gender),
            );
        }

        counts.totals += aggregate;
        *counts.subjects.get_mut(subject) = aggregate;
    }

    counts.excluded = records
        .iter()
        .filter(|r| Subject::from_label(&r.subject).is_none())
        .count();

    counts
}

/// Count records flagged `"yes"` whose type of mention is exactly `"concept"` or `"scientist"`.
///
/// Every subject is included, core or not.
pub fn count_examinable(records: &[ExpandedRecord]) -> ExaminableCounts {
    let mut counts = ExaminableCounts::default();

    for record in records.iter().filter(|r| r.is_examinable()) {
        match record.mention_type.as_str() {
            "concept" => counts.concept += 1,
            "scientist" => counts.scientist += 1,
            _ => {}
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GenderCount;

    fn row(subject: &str, kind: &str, gender: &str) -> ExpandedRecord {
        ExpandedRecord {
            subject: subject.into(),
            mention: "M".into(),
            scientist: "S".into(),
            gender: gender.into(),
            mention_type: kind.into(),
            nationality: "n".into(),
            region: "r".into(),
            examinable: None,
        }
    }

    #[test]
    fn test_buckets_per_subject() {
        let records = vec![
            row("physics", "concept", "male"),
            row("physics", "concept", "female"),
            row("physics", "scientist", "male"),
            row("chemistry", "scientist", "female"),
            row("chemistry", "scientist", "female"),
            row("environment", "concept", "male"),
        ];

        let counts = aggregate_subjects(&records);

        assert_eq!(counts.subjects.physics.concept, GenderCount { male: 1, female: 1 });
        assert_eq!(counts.subjects.physics.scientist, GenderCount { male: 1, female: 0 });
        assert_eq!(counts.subjects.chemistry.scientist, GenderCount { male: 0, female: 2 });
        assert_eq!(counts.subjects.biology, SubjectAggregate::default());
        assert_eq!(counts.subjects.environment.concept, GenderCount { male: 1, female: 0 });
        assert_eq!(counts.excluded, 0);
    }

    #[test]
    fn test_non_male_and_non_concept_fold() {
        let records = vec![
            row("biology", "concept", "non-binary"),
            row("biology", "concept", ""),
            row("biology", "law", "male"),
        ];

        let counts = aggregate_subjects(&records);

        assert_eq!(counts.subjects.biology.concept, GenderCount { male: 0, female: 2 });
        assert_eq!(counts.subjects.biology.scientist, GenderCount { male: 1, female: 0 });
    }

    #[test]
    fn test_unknown_subjects_are_excluded() {
        let records = vec![
            row("physics", "concept", "male"),
            row("maths", "concept", "male"),
            row("Physics", "scientist", "female"),
        ];

        let counts = aggregate_subjects(&records);

        assert_eq!(counts.excluded, 2);
        assert_eq!(counts.totals.total(), 1);
        assert_eq!(counts.totals.concept, GenderCount { male: 1, female: 0 });
    }

    #[test]
    fn test_totals_sum_subjects() {
        let records = vec![
            row("physics", "concept", "male"),
            row("chemistry", "concept", "female"),
            row("biology", "scientist", "male"),
            row("environment", "scientist", "female"),
            row("environment", "concept", "female"),
        ];

        let counts = aggregate_subjects(&records);

        let mut sum = SubjectAggregate::default();
        for (_, aggregate) in counts.subjects.iter() {
            sum += *aggregate;
        }
        assert_eq!(sum, counts.totals);
        assert_eq!(counts.totals.total(), records.len());
    }

    #[test]
    fn test_count_examinable() {
        let mut records = vec![
            row("physics", "concept", "male"),
            row("maths", "concept", "male"),
            row("physics", "scientist", "female"),
            row("physics", "scientist", "female"),
            row("physics", "law", "female"),
        ];
        let flags = ["yes", "yes", "yes", "no", "yes"];
        for (record, flag) in records.iter_mut().zip(flags) {
            record.examinable = Some(flag.to_string());
        }

        let counts = count_examinable(&records);

        assert_eq!(counts.concept, 2);
        assert_eq!(counts.scientist, 1);
    }
}
