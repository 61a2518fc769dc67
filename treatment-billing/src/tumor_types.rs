use serde::Serialize;

/// Tumor type the classifier can report, with its grading scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TumorTypeInfo {
    #[serde(rename = "type")]
    pub tumor_type: &'static str,
    pub description: &'static str,
    pub grades: &'static [&'static str],
    pub common_locations: &'static [&'static str],
}

pub const TUMOR_TYPES: [TumorTypeInfo; 3] = [
    TumorTypeInfo {
        tumor_type: "glioma",
        description: "Primary brain tumor arising from glial cells",
        grades: &["Grade I", "Grade II", "Grade III", "Grade IV"],
        common_locations: &["frontal lobe", "temporal lobe", "parietal lobe", "occipital lobe", "brainstem"],
    },
    TumorTypeInfo {
        tumor_type: "meningioma",
        description: "Benign tumor arising from meninges",
        grades: &["Grade I", "Grade II", "Grade III"],
        common_locations: &["convexity", "parasagittal", "sphenoid wing", "olfactory groove", "tentorium"],
    },
    TumorTypeInfo {
        tumor_type: "pituitary",
        description: "Tumor of the pituitary gland",
        grades: &["Microadenoma", "Macroadenoma"],
        common_locations: &["pituitary gland"],
    },
];

pub fn tumor_types() -> &'static [TumorTypeInfo] {
    &TUMOR_TYPES
}

/// Case-insensitive lookup by type name
pub fn find_tumor_type(name: &str) -> Option<&'static TumorTypeInfo> {
    TUMOR_TYPES.iter().find(|t| t.tumor_type.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_types() {
        let names: Vec<_> = tumor_types().iter().map(|t| t.tumor_type).collect();
        assert_eq!(names, vec!["glioma", "meningioma", "pituitary"]);
    }

    #[test]
    fn test_find_tumor_type() {
        let meningioma = find_tumor_type("Meningioma").unwrap();
        assert_eq!(meningioma.grades.len(), 3);
        assert!(find_tumor_type("ependymoma").is_none());
    }

    #[test]
    fn test_serializes_type_field() {
        let json = serde_json::to_value(find_tumor_type("pituitary").unwrap()).unwrap();
        assert_eq!(json["type"], "pituitary");
        assert_eq!(json["common_locations"][0], "pituitary gland");
    }
}
