mod cli_context_tests;
mod duration_tests;
mod pipeline_tests;
