//! Domain models for the mention summary pipeline.
//!
//! - [`MentionRecord`] - One row of the source table (multi-valued cells joined by `;`)
//! - [`ExpandedRecord`] - One (mention, scientist) pair after expansion
//! - [`Subject`] - The fixed set of core subjects
//! - [`Report`] - The summary document written to disk

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::ops::AddAssign;

// =============================================================================
// Columns
// =============================================================================

/// Column names of the source table.
pub mod columns {
    pub const SUBJECT: &str = "Subject";
    pub const MENTION: &str = "Mention";
    pub const SCIENTIST: &str = "Name of Scientist";
    pub const GENDER: &str = "Gender";
    pub const MENTION_TYPE: &str = "Type of Mention";
    pub const NATIONALITY: &str = "Nationality";
    pub const REGION: &str = "Region";
    pub const EXAMINABLE: &str = "Examinable";

    /// Columns every input table must carry.
    pub const REQUIRED: [&str; 7] = [
        SUBJECT,
        MENTION,
        SCIENTIST,
        GENDER,
        MENTION_TYPE,
        NATIONALITY,
        REGION,
    ];
}

// =============================================================================
// Records
// =============================================================================

/// One row of the source table, before expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionRecord {
    /// 1-based line in the source file.
    #[serde(skip)]
    pub line: usize,
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Mention")]
    pub mention: String,
    #[serde(rename = "Name of Scientist")]
    pub scientists: String,
    #[serde(rename = "Gender")]
    pub genders: String,
    #[serde(rename = "Type of Mention")]
    pub mention_type: String,
    #[serde(rename = "Nationality")]
    pub nationalities: String,
    #[serde(rename = "Region")]
    pub regions: String,
    #[serde(rename = "Examinable", skip_serializing_if = "Option::is_none", default)]
    pub examinable: Option<String>,
}

/// A mention record carrying exactly one scientist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedRecord {
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Mention")]
    pub mention: String,
    #[serde(rename = "Name of Scientist")]
    pub scientist: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Type of Mention")]
    pub mention_type: String,
    #[serde(rename = "Nationality")]
    pub nationality: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Examinable", skip_serializing_if = "Option::is_none", default)]
    pub examinable: Option<String>,
}

impl ExpandedRecord {
    /// Whether the examinable flag is exactly `"yes"`.
    pub fn is_examinable(&self) -> bool {
        self.examinable.as_deref() == Some("yes")
    }
}

/// The source table mapped onto mention records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionTable {
    pub records: Vec<MentionRecord>,
    /// True when the source header has an `Examinable` column.
    pub has_examinable: bool,
}

// =============================================================================
// Classification
// =============================================================================

/// Core subjects reported on. Any other label is left out of subject counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Physics,
    Chemistry,
    Biology,
    Environment,
}

impl Subject {
    /// All subjects, in report order.
    pub const ALL: [Subject; 4] = [
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::Environment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
            Subject::Biology => "biology",
            Subject::Environment => "environment",
        }
    }

    /// Exact, case-sensitive label match.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

/// Mention bucket. `"concept"` is a concept, everything else counts as a scientist mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionKind {
    Concept,
    Scientist,
}

impl MentionKind {
    pub fn classify(mention_type: &str) -> Self {
        if mention_type == "concept" {
            MentionKind::Concept
        } else {
            MentionKind::Scientist
        }
    }
}

/// Binary gender fold: exactly `"male"` is male, any other value lands in the female bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenderBucket {
    Male,
    Female,
}

impl GenderBucket {
    pub fn classify(gender: &str) -> Self {
        if gender == "male" {
            GenderBucket::Male
        } else {
            GenderBucket::Female
        }
    }
}

// =============================================================================
// Aggregates
// =============================================================================

/// Male/female counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCount {
    pub male: usize,
    pub female: usize,
}

impl GenderCount {
    pub fn record(&mut self, bucket: GenderBucket) {
        match bucket {
            GenderBucket::Male => self.male += 1,
            GenderBucket::Female => self.female += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.male + self.female
    }
}

impl AddAssign for GenderCount {
    fn add_assign(&mut self, rhs: Self) {
        self.male += rhs.male;
        self.female += rhs.female;
    }
}

/// Concept vs scientist mentions, split by gender, for one subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAggregate {
    pub concept: GenderCount,
    pub scientist: GenderCount,
}

impl SubjectAggregate {
    pub fn record(&mut self, kind: MentionKind, gender: GenderBucket) {
        match kind {
            MentionKind::Concept => self.concept.record(gender),
            MentionKind::Scientist => self.scientist.record(gender),
        }
    }

    pub fn total(&self) -> usize {
        self.concept.total() + self.scientist.total()
    }
}

impl AddAssign for SubjectAggregate {
    fn add_assign(&mut self, rhs: Self) {
        self.concept += rhs.concept;
        self.scientist += rhs.scientist;
    }
}

/// Per-subject aggregates, serialized in [`Subject::ALL`] order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectBreakdown {
    pub physics: SubjectAggregate,
    pub chemistry: SubjectAggregate,
    pub biology: SubjectAggregate,
    pub environment: SubjectAggregate,
}

impl SubjectBreakdown {
    pub fn get(&self, subject: Subject) -> &SubjectAggregate {
        match subject {
            Subject::Physics => &self.physics,
            Subject::Chemistry => &self.chemistry,
            Subject::Biology => &self.biology,
            Subject::Environment => &self.environment,
        }
    }

    pub fn get_mut(&mut self, subject: Subject) -> &mut SubjectAggregate {
        match subject {
            Subject::Physics => &mut self.physics,
            Subject::Chemistry => &mut self.chemistry,
            Subject::Biology => &mut self.biology,
            Subject::Environment => &mut self.environment,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Subject, &SubjectAggregate)> {
        Subject::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

/// Representative attributes and mention count of one unique scientist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScientistAggregate {
    pub gender: String,
    pub nationality: String,
    pub region: String,
    #[serde(rename = "number of mentions")]
    pub mentions: usize,
}

/// Unique scientists keyed by name, kept in first-seen order.
///
/// Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScientistIndex {
    entries: Vec<(String, ScientistAggregate)>,
    positions: HashMap<String, usize>,
}

impl ScientistIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one mention of `record`'s scientist, registering it on first sight.
    pub fn observe(&mut self, record: &ExpandedRecord) {
        match self.positions.get(&record.scientist) {
            Some(&idx) => self.entries[idx].1.mentions += 1,
            None => {
                self.positions
                    .insert(record.scientist.clone(), self.entries.len());
                self.entries.push((
                    record.scientist.clone(),
                    ScientistAggregate {
                        gender: record.gender.clone(),
                        nationality: record.nationality.clone(),
                        region: record.region.clone(),
                        mentions: 1,
                    },
                ));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ScientistAggregate> {
        self.positions.get(name).map(|&idx| &self.entries[idx].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScientistAggregate)> {
        self.entries.iter().map(|(name, agg)| (name.as_str(), agg))
    }
}

impl Serialize for ScientistIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, agg) in &self.entries {
            map.serialize_entry(name, agg)?;
        }
        map.end()
    }
}

/// Overall concept or scientist totals.
///
/// `examinable` is only present when the source table has an `Examinable` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionTotals {
    pub male: usize,
    pub female: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub examinable: Option<usize>,
}

impl MentionTotals {
    pub fn new(counts: GenderCount, examinable: Option<usize>) -> Self {
        Self {
            male: counts.male,
            female: counts.female,
            examinable,
        }
    }
}

/// Gender split and regional distribution of unique scientists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueTotals {
    pub male: usize,
    pub female: usize,
    pub region: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverallAggregate {
    pub concept: MentionTotals,
    pub scientist: MentionTotals,
    pub unique: UniqueTotals,
}

/// The summary document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub subjects: SubjectBreakdown,
    pub names: ScientistIndex,
    pub overall: OverallAggregate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expanded(name: &str, gender: &str, region: &str) -> ExpandedRecord {
        ExpandedRecord {
            subject: "physics".into(),
            mention: "X".into(),
            scientist: name.into(),
            gender: gender.into(),
            mention_type: "concept".into(),
            nationality: "n".into(),
            region: region.into(),
            examinable: None,
        }
    }

    #[test]
    fn test_subject_labels_are_exact() {
        assert_eq!(Subject::from_label("physics"), Some(Subject::Physics));
        assert_eq!(Subject::from_label("environment"), Some(Subject::Environment));
        assert_eq!(Subject::from_label("Physics"), None);
        assert_eq!(Subject::from_label("maths"), None);
    }

    #[test]
    fn test_gender_fold() {
        assert_eq!(GenderBucket::classify("male"), GenderBucket::Male);
        assert_eq!(GenderBucket::classify("female"), GenderBucket::Female);
        assert_eq!(GenderBucket::classify("Male"), GenderBucket::Female);
        assert_eq!(GenderBucket::classify(""), GenderBucket::Female);
    }

    #[test]
    fn test_mention_kind_fold() {
        assert_eq!(MentionKind::classify("concept"), MentionKind::Concept);
        assert_eq!(MentionKind::classify("scientist"), MentionKind::Scientist);
        assert_eq!(MentionKind::classify("law"), MentionKind::Scientist);
    }

    #[test]
    fn test_scientist_index_first_seen_wins() {
        let mut index = ScientistIndex::new();
        index.observe(&expanded("Curie", "female", "Europe"));
        index.observe(&expanded("Bohr", "male", "Europe"));
        index.observe(&expanded("Curie", "male", "Asia"));

        assert_eq!(index.len(), 2);
        let curie = index.get("Curie").unwrap();
        assert_eq!(curie.gender, "female");
        assert_eq!(curie.region, "Europe");
        assert_eq!(curie.mentions, 2);

        let names: Vec<&str> = index.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Curie", "Bohr"]);
    }

    #[test]
    fn test_scientist_serialization_keys() {
        let mut index = ScientistIndex::new();
        index.observe(&expanded("Curie", "female", "Europe"));

        assert_eq!(
            serde_json::to_value(&index).unwrap(),
            json!({
                "Curie": {
                    "gender": "female",
                    "nationality": "n",
                    "region": "Europe",
                    "number of mentions": 1
                }
            })
        );
    }

    #[test]
    fn test_examinable_omitted_when_absent() {
        let totals = MentionTotals::new(GenderCount { male: 2, female: 1 }, None);
        assert_eq!(
            serde_json::to_value(totals).unwrap(),
            json!({ "male": 2, "female": 1 })
        );

        let totals = MentionTotals::new(GenderCount::default(), Some(0));
        assert_eq!(
            serde_json::to_value(totals).unwrap(),
            json!({ "male": 0, "female": 0, "examinable": 0 })
        );
    }

    #[test]
    fn test_expanded_record_uses_column_names() {
        let value = serde_json::to_value(expanded("Curie", "female", "Europe")).unwrap();
        assert_eq!(value["Name of Scientist"], "Curie");
        assert_eq!(value["Type of Mention"], "concept");
        assert!(value.get("Examinable").is_none());
    }
}
