//! Property-based tests

mod vote_count_proptest;
