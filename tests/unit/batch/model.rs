use super::*;

#[test]
fn row_lookup_trims_and_rejects_blank_values() {
    let mut row = Row::new();
    row.set("codigo", "  123  ");
    row.set("produto", "   ");
    assert_eq!(row.value("codigo"), Some("123"));
    assert_eq!(row.value("produto"), None);
    assert_eq!(row.value("preco"), None);
}

#[test]
fn row_deserializes_from_a_plain_json_object() {
    let row: Row = serde_json::from_str(r#"{"codigo":"1","produto":"Arroz"}"#).unwrap();
    assert_eq!(row.value("codigo"), Some("1"));
    assert_eq!(row.value("produto"), Some("Arroz"));
}

#[test]
fn mapping_validation_lists_unbound_roles() {
    let mapping = FieldMapping {
        code: "codigo".to_string(),
        name: String::new(),
        price: "  ".to_string(),
        image: None,
    };
    let err = mapping.validate().unwrap_err();
    assert!(matches!(err, EncarteError::MappingIncomplete(_)));
    let msg = err.to_string();
    assert!(msg.contains("name") && msg.contains("price"));
    assert!(!msg.contains("code,"));
}

#[test]
fn mapping_with_all_roles_bound_is_valid() {
    let mapping = FieldMapping {
        code: "a".to_string(),
        name: "b".to_string(),
        price: "c".to_string(),
        image: Some("d".to_string()),
    };
    mapping.validate().unwrap();
}

#[test]
fn export_format_selection() {
    assert!(!ExportFormats::default().any());
    let formats = ExportFormats {
        grid: true,
        ..Default::default()
    };
    assert!(formats.any());
    assert!(!formats.any_raster());
    let formats = ExportFormats {
        document: true,
        ..Default::default()
    };
    assert!(formats.any_raster());
}
