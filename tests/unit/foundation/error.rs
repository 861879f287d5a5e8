use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        EncarteError::template_invalid("x")
            .to_string()
            .contains("invalid template:")
    );
    assert!(
        EncarteError::mapping_incomplete("x")
            .to_string()
            .contains("incomplete field mapping:")
    );
    assert!(
        EncarteError::composition("x")
            .to_string()
            .contains("composition error:")
    );
    assert!(EncarteError::export("x").to_string().contains("export error:"));
    assert!(
        EncarteError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert_eq!(
        EncarteError::NoFormatSelected.to_string(),
        "no export format selected"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = EncarteError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
