//! Integration tests for the plaza crates live under `tests/`.
