// crates/scenario-harness-gen/src/render.rs
// ============================================================================
// Module: Harness Rendering
// Description: Go template skeleton and per-method fragment expansion.
// Purpose: Turn a validated service description into harness source text.
// Dependencies: scenario-harness-model
// ============================================================================

//! ## Overview
//! The harness is assembled in one pass into a single buffer: marker line,
//! package and imports, runner type, scenario entry point, dispatch block, and
//! then one test procedure per method. Methods are visited by explicit
//! iteration in declaration order for both the dispatch block and the
//! procedures.

use std::fmt::Write;

use scenario_harness_model::MethodDescription;
use scenario_harness_model::ValidatedService;

use crate::GENERATOR_NAME;
use crate::GenerationError;
use crate::identifiers::check_renderable;
use crate::identifiers::go_string_literal;

// ============================================================================
// CONSTANTS: Fixed Go fragments
// ============================================================================

/// Go type of the caller-supplied comparison callback.
const HANDLER_TYPE: &str = "*func(t *testing.T, expectedResponse, response interface{})";

/// Import block shared by every harness.
const IMPORTS: &str = "import (
\t\"context\"
\t\"encoding/json\"
\t\"io/ioutil\"
\t\"reflect\"
\t\"testing\"

\t\"google.golang.org/grpc/codes\"
\t\"google.golang.org/grpc/status\"
)
";

/// Scenario record keys read by the harness.
const SCENARIO_KEYS: &str = "const (
\tactionJSONKey            = \"action\"
\trequestJSONKey           = \"request\"
\texpectedResponseJSONKey  = \"expected_response\"
\terrorExpectationJSONKey  = \"error_expectation\"
\texpectedErrorCodeJSONKey = \"expected_error_code\"
)
";

// ============================================================================
// SECTION: Harness Rendering
// ============================================================================

/// Names derived from the service for the runner type.
struct RunnerNames<'a> {
    /// Runner struct name.
    runner: String,
    /// Client interface name.
    client: String,
    /// Service name as declared.
    service: &'a str,
}

impl<'a> RunnerNames<'a> {
    /// Derives runner and client names from a service name.
    fn new(service: &'a str) -> Self {
        Self {
            runner: format!("{service}TestRunner"),
            client: format!("{service}Client"),
            service,
        }
    }
}

/// Renders the complete harness for a validated service.
pub fn render_harness(service: &ValidatedService) -> Result<String, GenerationError> {
    check_renderable(service)?;
    let names = RunnerNames::new(service.service_name());
    let mut out = String::new();
    render_preamble(&mut out, service.package_identifier())?;
    render_runner(&mut out, &names)?;
    render_entry_point(&mut out, &names)?;
    out.push_str(SCENARIO_KEYS);
    out.push('\n');
    render_dispatch(&mut out, &names, service.methods())?;
    for (index, method) in service.methods().iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        render_method_procedure(&mut out, &names, method)?;
    }
    Ok(out)
}

/// Emits the generated-code marker, package clause, and imports.
fn render_preamble(out: &mut String, package: &str) -> Result<(), GenerationError> {
    writeln!(out, "// Code generated by {GENERATOR_NAME}. DO NOT EDIT.")?;
    out.push('\n');
    writeln!(out, "package {package}")?;
    out.push('\n');
    out.push_str(IMPORTS);
    out.push('\n');
    Ok(())
}

/// Emits the runner type and its constructor.
fn render_runner(out: &mut String, names: &RunnerNames<'_>) -> Result<(), GenerationError> {
    let RunnerNames {
        runner,
        client,
        service,
    } = names;
    writeln!(out, "// {runner} is a runner to run the {service} service test.")?;
    writeln!(out, "type {runner} struct {{")?;
    writeln!(out, "\tClient {client}")?;
    out.push_str("}\n\n");
    writeln!(out, "// NewTestClient returns new {runner}.")?;
    writeln!(out, "func NewTestClient(client {client}) *{runner} {{")?;
    writeln!(out, "\treturn &{runner}{{")?;
    out.push_str("\t\tClient: client,\n");
    out.push_str("\t}\n");
    out.push_str("}\n\n");
    Ok(())
}

/// Emits `RunGRPCTest`, which reads the scenario file and runs every record.
fn render_entry_point(out: &mut String, names: &RunnerNames<'_>) -> Result<(), GenerationError> {
    out.push_str(
        "// RunGRPCTest sends a gRPC request according to the scenario written in the JSON file \
         and tests the response.\n",
    );
    out.push_str(
        "// testHandlerMap takes a gRPC method name as a key and value has a function that \
         compares expected response and actual response and defines how to handle the test.\n",
    );
    writeln!(
        out,
        "func (runner *{}) RunGRPCTest(t *testing.T, jsonPath string, testHandlerMap \
         map[string]{HANDLER_TYPE}) {{",
        names.runner
    )?;
    out.push_str("\tscenarioData, err := ioutil.ReadFile(jsonPath)\n");
    out.push_str("\tif err != nil {\n");
    out.push_str("\t\tpanic(err)\n");
    out.push_str("\t}\n");
    out.push_str("\tvar scenario []map[string]interface{}\n");
    out.push_str("\tif err := json.Unmarshal(scenarioData, &scenario); err != nil {\n");
    out.push_str("\t\tpanic(err)\n");
    out.push_str("\t}\n");
    out.push_str("\tfor _, testCase := range scenario {\n");
    out.push_str("\t\tctx := context.Background()\n");
    out.push_str("\t\trunner.runTest(ctx, t, testCase, testHandlerMap)\n");
    out.push_str("\t}\n");
    out.push_str("}\n\n");
    Ok(())
}

/// Emits `runTest` with one `switch` case per method, in declaration order.
fn render_dispatch(
    out: &mut String,
    names: &RunnerNames<'_>,
    methods: &[MethodDescription],
) -> Result<(), GenerationError> {
    writeln!(
        out,
        "func (runner *{}) runTest(ctx context.Context, t *testing.T, testCase \
         map[string]interface{{}}, testHandlerMap map[string]{HANDLER_TYPE}) {{",
        names.runner
    )?;
    out.push_str("\taction := testCase[actionJSONKey].(string)\n");
    out.push_str("\tf := func(t *testing.T) {\n");
    out.push_str("\t\tswitch action {\n");
    for method in methods {
        let key = go_string_literal(&method.name);
        writeln!(out, "\t\tcase {key}:")?;
        writeln!(out, "\t\t\ttestHandler := testHandlerMap[{key}]")?;
        writeln!(out, "\t\t\trunner.test{}(ctx, t, testCase, testHandler)", method.name)?;
    }
    out.push_str("\t\t}\n");
    out.push_str("\t}\n");
    out.push_str("\tt.Run(action, f)\n");
    out.push_str("}\n\n");
    Ok(())
}

/// Emits the call-and-assert procedure for one method.
fn render_method_procedure(
    out: &mut String,
    names: &RunnerNames<'_>,
    method: &MethodDescription,
) -> Result<(), GenerationError> {
    let MethodDescription {
        name,
        request_type_name,
        response_type_name,
    } = method;
    writeln!(
        out,
        "func (runner *{}) test{name}(ctx context.Context, t *testing.T, testCase \
         map[string]interface{{}}, testHandler {HANDLER_TYPE}) {{",
        names.runner
    )?;
    out.push_str("\treqJSON, reqErr := json.Marshal(testCase[requestJSONKey])\n");
    out.push_str("\tif reqErr != nil {\n");
    out.push_str("\t\tpanic(reqErr)\n");
    out.push_str("\t}\n");
    writeln!(out, "\treq := {request_type_name}{{}}")?;
    out.push_str("\tif decodeErr := json.Unmarshal(reqJSON, &req); decodeErr != nil {\n");
    out.push_str("\t\tpanic(decodeErr)\n");
    out.push_str("\t}\n");
    writeln!(out, "\tres, err := runner.Client.{name}(ctx, &req)")?;
    out.push_str("\terrExpectation := testCase[errorExpectationJSONKey].(bool)\n");
    out.push_str("\tif errExpectation {\n");
    out.push_str("\t\terrCodeF := testCase[expectedErrorCodeJSONKey].(float64)\n");
    out.push_str("\t\texpectedErrCode := codes.Code(uint32(errCodeF))\n");
    out.push_str("\t\tactualErrCode := status.Code(err)\n");
    out.push_str("\t\tif expectedErrCode != actualErrCode {\n");
    writeln!(
        out,
        "\t\t\tt.Fatalf(\"The error code of the response of {name} is not as expected. \
         Expected: %d, Actual: %d\\n\", expectedErrCode, actualErrCode)"
    )?;
    out.push_str("\t\t}\n");
    out.push_str("\t} else {\n");
    out.push_str("\t\tif err != nil {\n");
    writeln!(out, "\t\t\tt.Fatalf(\"The call of {name} returned an unexpected error: %v\\n\", err)")?;
    out.push_str("\t\t}\n");
    out.push_str("\t\tresJSON, resErr := json.Marshal(testCase[expectedResponseJSONKey])\n");
    out.push_str("\t\tif resErr != nil {\n");
    out.push_str("\t\t\tpanic(resErr)\n");
    out.push_str("\t\t}\n");
    writeln!(out, "\t\texpectedRes := {response_type_name}{{}}")?;
    out.push_str("\t\tif decodeErr := json.Unmarshal(resJSON, &expectedRes); decodeErr != nil {\n");
    out.push_str("\t\t\tpanic(decodeErr)\n");
    out.push_str("\t\t}\n");
    out.push_str("\t\tif testHandler != nil {\n");
    out.push_str("\t\t\thandler := *testHandler\n");
    out.push_str("\t\t\thandler(t, expectedRes, *res)\n");
    out.push_str("\t\t} else if !reflect.DeepEqual(expectedRes, *res) {\n");
    writeln!(
        out,
        "\t\t\tt.Fatal(\"The actual response of the {name} was not equal to the expected \
         response.\")"
    )?;
    out.push_str("\t\t}\n");
    out.push_str("\t}\n");
    out.push_str("}\n");
    Ok(())
}

#[cfg(test)]
mod tests;
