//! Property-based tests
//!
//! Uses proptest to generate documents and names and verify store properties

mod workspace_proptest;
