//! Proptest generators and property tests for element types.
