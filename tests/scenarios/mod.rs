//! Scenario-based tests for pipeframe

mod command_filters;
mod parameter_composition;
mod validation;
