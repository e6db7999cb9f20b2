use lazy_static::lazy_static;

/// Substrings that mark an affiliation as academic. Matched case-insensitively.
pub const DEFAULT_ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "institute",
    "school",
    "lab",
    "center",
    "centre",
    "faculty",
    "hospital",
    "academy",
];

lazy_static! {
    static ref DEFAULT_CLASSIFIER: AffiliationClassifier = AffiliationClassifier::default();
}

/// Keyword heuristic deciding whether an affiliation is non-academic.
#[derive(Debug, Clone)]
pub struct AffiliationClassifier {
    keywords: Vec<String>,
}

impl AffiliationClassifier {
    /// Keywords are lowercased; blank entries are dropped since they would
    /// match every affiliation.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True when no academic keyword occurs anywhere in the affiliation.
    /// An empty affiliation is vacuously non-academic.
    pub fn is_non_academic(&self, affiliation: &str) -> bool {
        let lowered = affiliation.to_lowercase();
        !self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

impl Default for AffiliationClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_ACADEMIC_KEYWORDS)
    }
}

/// Classifies with [`DEFAULT_ACADEMIC_KEYWORDS`].
pub fn is_non_academic(affiliation: &str) -> bool {
    DEFAULT_CLASSIFIER.is_non_academic(affiliation)
}
