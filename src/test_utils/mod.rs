//! Shared test utilities for skillmatch.

pub mod fixtures;
pub mod logging;

/// Table-driven test case.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
}

/// Run table-driven cases, reporting the first mismatch by case name.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F) -> Result<(), String>
where
    I: std::fmt::Debug,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E,
{
    for case in cases {
        let input = format!("{:?}", case.input);
        let actual = test_fn(case.input);
        if actual != case.expected {
            return Err(format!(
                "case '{}' failed for input {input}: expected {:?}, got {actual:?}",
                case.name, case.expected
            ));
        }
    }
    Ok(())
}
