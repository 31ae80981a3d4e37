use palate_planner_lib::error::PlannerError;

#[test]
fn test_error_creation() {
    let error = PlannerError::new("Test error", "test_stage");
    assert_eq!(error.message, "Test error");
    assert_eq!(error.stage, "test_stage");
    assert!(!error.is_not_found());
}

#[test]
fn test_error_with_context() {
    let error = PlannerError::new("Test error", "test_stage")
        .with_context("Additional context");
    assert_eq!(error.context.as_deref(), Some("Additional context"));
}

#[test]
fn test_not_found_carries_user() {
    let error = PlannerError::not_found("demo_user");
    assert!(error.is_not_found());
    assert_eq!(error.user_id.as_deref(), Some("demo_user"));
    assert!(error.to_string().contains("demo_user"));
}

#[test]
fn test_error_display() {
    let error = PlannerError::new("Test error", "test_stage")
        .with_context("context")
        .with_user("u1");
    let display = format!("{}", error);
    assert!(display.contains("test_stage"));
    assert!(display.contains("Test error"));
    assert!(display.contains("u1"));
}

#[test]
fn test_json_errors_convert() {
    let parse = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
    let error: PlannerError = parse.into();
    assert_eq!(error.stage, "json_parse");
}
