// crates/scenario-harness-gen/src/render/tests.rs
// ============================================================================
// Module: Harness Rendering Unit Tests
// Description: Fragment-level checks for the Go harness template.
// Purpose: Exercise per-method expansion and identifier guards in isolation.
// Dependencies: scenario-harness-gen, scenario-harness-model
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only rendering helpers use panic-based assertions for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use scenario_harness_model::MethodDescription;
use scenario_harness_model::ServiceDescription;
use scenario_harness_model::ValidatedService;

use super::RunnerNames;
use super::render_dispatch;
use super::render_harness;
use super::render_method_procedure;
use crate::GenerationError;
use crate::identifiers::go_string_literal;
use crate::identifiers::is_go_identifier;
use crate::identifiers::is_harness_name;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn validated(methods: Vec<MethodDescription>) -> ValidatedService {
    ValidatedService::try_from(ServiceDescription::new("pb", "TestService", methods))
        .expect("fixture must validate")
}

// ============================================================================
// SECTION: Fragment Tests
// ============================================================================

#[test]
fn method_procedure_is_parameterized_by_method() {
    let names = RunnerNames::new("TestService");
    let mut out = String::new();
    render_method_procedure(&mut out, &names, &MethodDescription::new("Hello", "HReq", "HRes"))
        .expect("render");

    assert!(out.starts_with("func (runner *TestServiceTestRunner) testHello(ctx context.Context"));
    assert!(out.contains("\treq := HReq{}\n"));
    assert!(out.contains("\tres, err := runner.Client.Hello(ctx, &req)\n"));
    assert!(out.contains("\t\texpectedRes := HRes{}\n"));
    assert!(out.contains("response of Hello is not as expected"));
    assert!(out.contains("The actual response of the Hello was not equal"));
    assert!(out.ends_with("\t}\n}\n"));
}

#[test]
fn procedures_are_separated_by_one_blank_line() {
    let service = validated(vec![
        MethodDescription::new("Hello", "HReq", "HRes"),
        MethodDescription::new("Bye", "BReq", "BRes"),
    ]);
    let out = render_harness(&service).expect("render");
    assert!(out.contains("\t}\n}\n\nfunc (runner *TestServiceTestRunner) testBye("));
    assert!(out.ends_with("\t}\n}\n"));
    assert!(!out.ends_with("\n\n"));
}

#[test]
fn dispatch_has_one_case_per_method_in_order() {
    let names = RunnerNames::new("TestService");
    let methods = vec![
        MethodDescription::new("Zeta", "ZReq", "ZRes"),
        MethodDescription::new("Alpha", "AReq", "ARes"),
    ];
    let mut out = String::new();
    render_dispatch(&mut out, &names, &methods).expect("render");

    let zeta = out.find("\t\tcase \"Zeta\":\n").expect("zeta case");
    let alpha = out.find("\t\tcase \"Alpha\":\n").expect("alpha case");
    assert!(zeta < alpha, "cases must follow declaration order");
    assert_eq!(out.matches("\t\tcase ").count(), 2);
    assert!(out.contains("\t\t\ttestHandler := testHandlerMap[\"Alpha\"]\n"));
    assert!(out.contains("\t\t\trunner.testAlpha(ctx, t, testCase, testHandler)\n"));
}

#[test]
fn qualified_type_names_are_rejected() {
    let service = validated(vec![MethodDescription::new("Get", "emptypb.Empty", "GetReply")]);
    match render_harness(&service) {
        Err(GenerationError::InvalidIdentifier {
            field,
            value,
        }) => {
            assert_eq!(field, "request type");
            assert_eq!(value, "emptypb.Empty");
        }
        other => panic!("unexpected result: {}", other.map_or_else(|e| e.to_string(), |s| s)),
    }
}

// ============================================================================
// SECTION: Identifier Guard Tests
// ============================================================================

#[test]
fn go_identifier_rules() {
    for valid in ["pb", "_internal", "Hello2", "v1alpha", "snake_case"] {
        assert!(is_go_identifier(valid), "{valid} should be accepted");
    }
    for invalid in [
        "",
        "_",
        "2fast",
        "has space",
        "dash-ed",
        "type",
        "func",
        "a.b",
        "pkg.Type",
        "Hello\u{b2}",
        "\u{2163}",
        "A\u{345}",
        "\u{f1}ame",
    ] {
        assert!(!is_go_identifier(invalid), "{invalid} should be rejected");
    }
}

#[test]
fn harness_names_are_reserved_for_types() {
    for reserved in ["t", "ctx", "req", "res", "status", "json", "testing", "actionJSONKey"] {
        assert!(is_harness_name(reserved), "{reserved} should be reserved");
    }
    for free in ["HReq", "Status", "Request", "T"] {
        assert!(!is_harness_name(free), "{free} should be free");
    }
}

#[test]
fn reserved_response_type_is_rejected() {
    let service = validated(vec![MethodDescription::new("Hello", "HReq", "t")]);
    assert!(matches!(
        render_harness(&service),
        Err(GenerationError::ReservedName { field: "response type", value }) if value == "t"
    ));
}

#[test]
fn non_ascii_method_name_is_rejected() {
    let service = validated(vec![MethodDescription::new("Hello\u{b2}", "HReq", "HRes")]);
    assert!(matches!(
        render_harness(&service),
        Err(GenerationError::InvalidIdentifier { field: "method name", .. })
    ));
}

#[test]
fn go_string_literal_escapes_quotes() {
    assert_eq!(go_string_literal("Hello"), "\"Hello\"");
    assert_eq!(go_string_literal("a\"b"), "\"a\\\"b\"");
}

#[test]
fn keyword_package_is_rejected() {
    let service = ValidatedService::try_from(ServiceDescription::new(
        "package",
        "TestService",
        vec![MethodDescription::new("Hello", "HReq", "HRes")],
    ))
    .expect("structurally valid");
    match render_harness(&service) {
        Err(GenerationError::InvalidIdentifier {
            field,
            value,
        }) => {
            assert_eq!(field, "package identifier");
            assert_eq!(value, "package");
        }
        other => panic!("unexpected result: {}", other.map_or_else(|e| e.to_string(), |s| s)),
    }
}

#[test]
fn duplicate_methods_are_rejected() {
    let service = validated(vec![
        MethodDescription::new("Hello", "HReq", "HRes"),
        MethodDescription::new("Hello", "HReq", "HRes"),
    ]);
    assert!(matches!(
        render_harness(&service),
        Err(GenerationError::DuplicateMethod { name }) if name == "Hello"
    ));
}

#[test]
fn invalid_request_type_is_rejected() {
    let service = validated(vec![MethodDescription::new("Hello", "H Req", "HRes")]);
    assert!(matches!(
        render_harness(&service),
        Err(GenerationError::InvalidIdentifier { field: "request type", .. })
    ));
}
