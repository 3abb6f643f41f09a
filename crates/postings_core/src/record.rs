use std::fmt;
use std::str::FromStr;

/// One column of a job-posting document, in CSV column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentField {
    CompanyName,
    Description,
    Title,
    Location,
    SkillsDesc,
    Url,
}

impl DocumentField {
    /// Every field, in the order the CSV header lists them.
    pub const ALL: [DocumentField; 6] = [
        DocumentField::CompanyName,
        DocumentField::Description,
        DocumentField::Title,
        DocumentField::Location,
        DocumentField::SkillsDesc,
        DocumentField::Url,
    ];

    /// Column name used in the CSV header and accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            DocumentField::CompanyName => "company_name",
            DocumentField::Description => "description",
            DocumentField::Title => "title",
            DocumentField::Location => "location",
            DocumentField::SkillsDesc => "skills_desc",
            DocumentField::Url => "url",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentField::CompanyName => "Company Name",
            DocumentField::Description => "Description",
            DocumentField::Title => "Title",
            DocumentField::Location => "Location",
            DocumentField::SkillsDesc => "Skills Description",
            DocumentField::Url => "Posting URL",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DocumentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for DocumentField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DocumentField::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownField(wanted.to_string()))
    }
}

/// Ordered mapping of every [`DocumentField`] to its current text.
///
/// The order is fixed by [`DocumentField::ALL`]; iteration always yields the
/// six fields in CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentRecord {
    values: [String; 6],
}

impl DocumentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: DocumentField) -> &str {
        &self.values[field.index()]
    }

    /// Replaces exactly one field; the other five are untouched.
    pub fn set(&mut self, field: DocumentField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    pub fn with(mut self, field: DocumentField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocumentField, &str)> + '_ {
        DocumentField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    /// Fields whose value is empty once surrounding whitespace is removed.
    pub fn blank_fields(&self) -> Vec<DocumentField> {
        self.iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect()
    }

    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|value| value.is_empty())
    }
}
