use get_papers::classify::DEFAULT_ACADEMIC_KEYWORDS;
use get_papers::{is_non_academic, AffiliationClassifier};

#[test]
fn test_company_affiliation_is_non_academic() {
    assert!(is_non_academic("Pfizer Inc., Cambridge MA"));
    assert!(is_non_academic("XYZ Biotech Ltd"));
}

#[test]
fn test_university_affiliation_is_academic() {
    assert!(!is_non_academic("Dept. of Biology, Harvard University"));
}

#[test]
fn test_classification_is_case_insensitive() {
    assert_eq!(
        is_non_academic("UNIVERSITY of X"),
        is_non_academic("university of x")
    );
    assert!(!is_non_academic("UNIVERSITY of X"));
    assert!(!is_non_academic("Royal cOLLEGE of Surgeons"));
}

#[test]
fn test_every_default_keyword_marks_academic() {
    for keyword in DEFAULT_ACADEMIC_KEYWORDS {
        let affiliation = format!("Some {} Somewhere", keyword.to_uppercase());
        assert!(
            !is_non_academic(&affiliation),
            "expected '{}' to be academic",
            affiliation
        );
    }
}

#[test]
fn test_keyword_matches_as_substring() {
    // "lab" inside "Laboratories"
    assert!(!is_non_academic("Abbott Laboratories"));
    // "center" inside "Datacenter"
    assert!(!is_non_academic("Acme Datacenter Ops"));
}

#[test]
fn test_empty_affiliation_is_vacuously_non_academic() {
    assert!(is_non_academic(""));
}

#[test]
fn test_classification_is_deterministic() {
    let classifier = AffiliationClassifier::default();
    let input = "Genentech, South San Francisco";
    let first = classifier.is_non_academic(input);
    for _ in 0..10 {
        assert_eq!(classifier.is_non_academic(input), first);
    }
}

#[test]
fn test_custom_keywords_replace_defaults() {
    let classifier = AffiliationClassifier::new(["Pharma"]);

    assert!(!classifier.is_non_academic("Big PHARMA Co"));
    // Not academic under the custom list
    assert!(classifier.is_non_academic("Harvard University"));
}

#[test]
fn test_blank_keywords_are_dropped() {
    let classifier = AffiliationClassifier::new(["", "  ", "Clinic"]);

    assert_eq!(classifier.keywords(), &["clinic".to_string()]);
    assert!(classifier.is_non_academic("Acme Corp"));
}

#[test]
fn test_default_classifier_uses_canonical_list() {
    let classifier = AffiliationClassifier::default();
    assert_eq!(classifier.keywords().len(), DEFAULT_ACADEMIC_KEYWORDS.len());
    assert!(classifier.keywords().iter().any(|k| k == "hospital"));
    assert!(classifier.keywords().iter().any(|k| k == "academy"));
}
