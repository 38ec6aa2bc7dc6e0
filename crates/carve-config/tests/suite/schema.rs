use carve_config::json_schema;

#[test]
fn schema_describes_top_level_tables() {
    let value = serde_json::to_value(json_schema()).expect("schema serializes");

    for table in ["refactorings", "logging"] {
        assert!(
            value.pointer(&format!("/properties/{table}")).is_some(),
            "schema should describe `{table}`"
        );
    }
    for key in ["enabled", "disable", "enable", "fail_loudly"] {
        assert!(
            value
                .pointer(&format!("/definitions/RefactoringsConfig/properties/{key}"))
                .is_some(),
            "schema should describe `refactorings.{key}`"
        );
    }
}
