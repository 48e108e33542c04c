//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Layer builders shared by the precedence tests
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Handle, email, calendar, token, and key resolution
//! - `reporting_period`: Date range defaults and validation
//! - `loading`: End-to-end loading from CLI arguments and environment

mod helpers;
mod loading;
mod precedence;
