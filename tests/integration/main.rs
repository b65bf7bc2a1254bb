//! Integration tests against the public library API.

mod simulation;
