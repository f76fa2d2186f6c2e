//! End-to-end tests for the tracker wrapper, translator and backend live in
//! `translate_flow_test.rs`.
